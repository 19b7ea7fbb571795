mod coverage;
mod filter;

pub use coverage::{analyze_coverage, CoverageDay};
pub use filter::is_online_event;

use crate::parser::{EventRecord, RejectedLink};
use crate::pipeline::RunLog;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};

/// Planner stage output.
#[derive(Debug)]
pub struct PlanOutcome {
    pub itinerary: Vec<EventRecord>,
    pub dropped_online: Vec<RejectedLink>,
    pub coverage: BTreeMap<NaiveDate, CoverageDay>,
}

/// Organize the analyzed events: drop online events into their own counted
/// category, dedup by name + start_time, sort chronologically with the
/// far-future sentinel for missing times, and bucket coverage per day.
pub fn organize(
    events: &[EventRecord],
    start_date: NaiveDate,
    end_date: NaiveDate,
    log: &mut RunLog,
) -> PlanOutcome {
    let mut kept: Vec<EventRecord> = Vec::new();
    let mut dropped_online: Vec<RejectedLink> = Vec::new();

    for event in events {
        if is_online_event(event) {
            log.push(format!("planner: filtered online event \"{}\"", event.name));
            dropped_online.push(RejectedLink {
                url: event.source.url.clone(),
                reason: "online or virtual event".to_string(),
            });
        } else {
            kept.push(event.clone());
        }
    }

    let deduped = dedup_events(kept);
    let itinerary = sort_events(deduped);
    let coverage = analyze_coverage(&itinerary, start_date, end_date);

    log.push(format!(
        "planner: {} events organized over {} days ({} dropped as online)",
        itinerary.len(),
        coverage.len(),
        dropped_online.len(),
    ));

    PlanOutcome {
        itinerary,
        dropped_online,
        coverage,
    }
}

/// Dedup by the name + start_time composite key, first occurrence wins.
pub fn dedup_events(events: Vec<EventRecord>) -> Vec<EventRecord> {
    let mut seen: HashSet<String> = HashSet::new();
    events
        .into_iter()
        .filter(|event| seen.insert(event.dedup_key()))
        .collect()
}

/// Stable chronological sort; events without a parsable start time go last
/// via the sentinel.
pub fn sort_events(mut events: Vec<EventRecord>) -> Vec<EventRecord> {
    events.sort_by_key(|event| event.sort_key());
    events
}
