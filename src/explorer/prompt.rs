use crate::parser::LinkCandidate;

/// Prompt for one batch analysis task.
pub fn analysis_prompt(links: &[LinkCandidate], city: &str) -> String {
    let links_info = links
        .iter()
        .enumerate()
        .map(|(i, link)| {
            format!(
                "\n[Link {}]\nURL: {}\nTitle: {}\nSnippet: {}\nInterest: {}\nPlatform: {}",
                i + 1,
                link.url,
                if link.title.is_empty() { "Unknown" } else { &link.title },
                if link.snippet.is_empty() { "No snippet" } else { &link.snippet },
                link.interest,
                if link.platform.is_empty() { "Unknown" } else { &link.platform },
            )
        })
        .collect::<Vec<_>>()
        .join("\n---");

    let count = links.len();

    format!(
        r#"You are an Expert Event Analyzer. Analyze these event links and extract details.

## LINKS TO ANALYZE:
{links_info}

## CRITERIA FOR VALID EVENTS:
1. Must have a specific start time (not just "Open 10am-6pm")
2. Must have a human host/organizer
3. Must be IN-PERSON in {city} (NO online/virtual/zoom events)
4. Must be a real event (meetup, workshop, class, talk, etc.)

## REJECT:
- General admission / timed entry slots
- Self-guided tours
- Online/Virtual/Zoom events
- Events without physical address in {city}

## EXTRACT FOR VALID EVENTS:
- name, category
- location (venue, address, city)
- coordinates (lat/lng)
- start_time, end_time (ISO 8601)
- description, pricing, tags

## OUTPUT FORMAT (JSON only):
{{
  "analyzed_links": {count},
  "valid_events": [
    {{
      "name": "Event Name",
      "category": "meetup/workshop/networking/tour/class/talk/other",
      "location": {{ "venue": "Name", "address": "Full address", "city": "{city}" }},
      "coordinates": {{ "lat": 0.0, "lng": 0.0 }},
      "start_time": "2026-01-03T18:00:00",
      "end_time": "2026-01-03T20:00:00",
      "duration_minutes": 120,
      "description": "Brief description",
      "source": {{ "platform": "Eventbrite", "url": "exact-url" }},
      "pricing": {{ "is_free": true, "price": "Free", "currency": "USD" }},
      "tags": ["tag1", "tag2"]
    }}
  ],
  "rejected_links": [
    {{ "url": "https://...", "reason": "Online event" }}
  ]
}}

Output ONLY valid JSON. Start with {{ end with }}"#
    )
}
