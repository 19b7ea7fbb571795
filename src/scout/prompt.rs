use chrono::NaiveDate;

/// Prompt for one per-interest search task. The provider is expected to
/// answer with a single JSON object; anything else is handled by the
/// extractor's fallback strategies.
pub fn search_prompt(
    interest: &str,
    city: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    links_per_search: usize,
    search_terms: &[String],
) -> String {
    let formatted_start = start_date.format("%B %d, %Y");
    let formatted_end = end_date.format("%B %d, %Y");
    let terms = if search_terms.is_empty() {
        interest.to_string()
    } else {
        search_terms.join(", ")
    };

    format!(
        r#"You are an Event Link Scout. Search the web and find URLs to event pages.

## TASK:
Find "{interest}" events in {city} between {formatted_start} and {formatted_end}.

## SEARCH STRATEGY:
Search these platforms for "{interest}" events in {city}:
- Eventbrite
- Meetup
- Luma (lu.ma)
- Local venue calendars
- Facebook Events

Useful related search terms: {terms}

## REQUIREMENTS:
1. Find up to {links_per_search} unique event links
2. Only actual event pages (not homepages or search results)
3. Events must be within the date range
4. Include snippet showing why link is relevant

## OUTPUT FORMAT (JSON only):
{{
  "interest": "{interest}",
  "city": "{city}",
  "date_range": "{start_date} to {end_date}",
  "links": [
    {{
      "url": "https://event-page-url.com",
      "title": "Event title",
      "snippet": "Brief description",
      "platform": "Eventbrite/Meetup/Luma/Other",
      "event_date": "YYYY-MM-DD if known"
    }}
  ],
  "total_found": 10
}}

CRITICAL: Output ONLY valid JSON. Start with {{ end with }}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mentions_interest_city_and_range() {
        let start = NaiveDate::from_ymd_opt(2026, 5, 20).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 5, 22).unwrap();
        let prompt = search_prompt(
            "AI hackathons",
            "San Francisco",
            start,
            end,
            15,
            &["Technology".to_string()],
        );

        assert!(prompt.contains("AI hackathons"));
        assert!(prompt.contains("San Francisco"));
        assert!(prompt.contains("May 20, 2026"));
        assert!(prompt.contains("May 22, 2026"));
        assert!(prompt.contains("up to 15 unique event links"));
        assert!(prompt.contains("Technology"));
    }
}
