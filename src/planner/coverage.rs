use crate::parser::EventRecord;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-calendar-date coverage bucket.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CoverageDay {
    pub count: usize,
    pub events: Vec<EventRecord>,
    pub has_morning: bool,
    pub has_afternoon: bool,
    pub has_evening: bool,
}

/// Build the coverage map for the inclusive date range. Every date gets an
/// entry, including zero-event days. Events whose start date falls outside
/// the range, or cannot be parsed at all, are skipped from assignment.
pub fn analyze_coverage(
    events: &[EventRecord],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> BTreeMap<NaiveDate, CoverageDay> {
    let mut coverage: BTreeMap<NaiveDate, CoverageDay> = start_date
        .iter_days()
        .take_while(|date| *date <= end_date)
        .map(|date| (date, CoverageDay::default()))
        .collect();

    for event in events {
        let Some(date) = event.start_date() else { continue };
        let Some(day) = coverage.get_mut(&date) else { continue };
        day.count += 1;
        // An event with an assignable date but an hour we cannot read still
        // counts; it just contributes to no slot.
        if let Some(hour) = event.start_hour() {
            match hour {
                8..=11 => day.has_morning = true,
                12..=16 => day.has_afternoon = true,
                17..=23 => day.has_evening = true,
                _ => {}
            }
        }
        day.events.push(event.clone());
    }

    coverage
}
