use crate::parser::EventRecord;

/// Keywords that mark an event as non-physical when found in its name,
/// description, venue, or address.
const ONLINE_KEYWORDS: &[&str] = &[
    "online",
    "virtual",
    "remote",
    "zoom",
    "webinar",
    "livestream",
    "google meet",
    "teams",
    "webex",
    "discord",
    "streaming",
];

/// Placeholder values that mean "no real address".
const PLACEHOLDER_ADDRESSES: &[&str] = &["", "tbd", "online", "virtual"];

/// Placeholder values that mean "no real venue".
const PLACEHOLDER_VENUES: &[&str] = &["", "online", "virtual", "tbd"];

/// Pure predicate: does this look like an online/virtual event rather than a
/// physical one? Same input always yields the same answer.
pub fn is_online_event(event: &EventRecord) -> bool {
    let fields = [
        event.name.as_str(),
        event.description.as_str(),
        event.location.venue.as_str(),
        event.location.address.as_str(),
    ];

    for field in fields {
        let lowered = field.to_lowercase();
        if ONLINE_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
            return true;
        }
    }

    let address = event.location.address.trim().to_lowercase();
    let venue = event.location.venue.trim().to_lowercase();
    PLACEHOLDER_ADDRESSES.contains(&address.as_str()) && PLACEHOLDER_VENUES.contains(&venue.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Location;

    fn physical_event() -> EventRecord {
        EventRecord {
            name: "Gallery Walk".to_string(),
            description: "A guided walk through downtown galleries".to_string(),
            location: Location {
                venue: "City Gallery".to_string(),
                address: "12 Main St".to_string(),
                city: "Portland".to_string(),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_physical_event_passes() {
        assert!(!is_online_event(&physical_event()));
    }

    #[test]
    fn test_keyword_in_name_flags() {
        let mut event = physical_event();
        event.name = "Zoom Yoga Session".to_string();
        assert!(is_online_event(&event));
    }

    #[test]
    fn test_keyword_in_description_flags() {
        let mut event = physical_event();
        event.description = "Join the livestream from anywhere".to_string();
        assert!(is_online_event(&event));
    }

    #[test]
    fn test_keyword_is_case_insensitive() {
        let mut event = physical_event();
        event.location.venue = "VIRTUAL auditorium".to_string();
        assert!(is_online_event(&event));
    }

    #[test]
    fn test_placeholder_address_and_venue_flags() {
        let mut event = physical_event();
        event.location.address = "TBD".to_string();
        event.location.venue = String::new();
        assert!(is_online_event(&event));
    }

    #[test]
    fn test_placeholder_address_with_real_venue_passes() {
        let mut event = physical_event();
        event.location.address = String::new();
        assert!(!is_online_event(&event));
    }

    #[test]
    fn test_predicate_is_pure() {
        let event = physical_event();
        let first = is_online_event(&event);
        for _ in 0..10 {
            assert_eq!(is_online_event(&event), first);
        }
    }
}
