use crate::error::OutputError;
use crate::pipeline::{Phase, PipelineState};
use chrono::Utc;
use serde_json::json;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Paths of everything one run wrote to disk.
#[derive(Debug)]
pub struct RunArtifacts {
    pub run_dir: PathBuf,
    pub scout_file: PathBuf,
    pub explorer_file: PathBuf,
    pub itinerary_file: PathBuf,
    pub summary_file: PathBuf,
    pub log_file: PathBuf,
}

/// Write the per-run artifacts under `<report_dir>/<YYYY-MM-DD>/<run_id>/`:
/// stage snapshots as JSON, a human summary as markdown, and the run log.
pub fn write_run_artifacts(
    report_dir: &Path,
    run_id: &str,
    state: &PipelineState,
) -> Result<RunArtifacts, OutputError> {
    let date_str = Utc::now().format("%Y-%m-%d").to_string();
    let run_dir = report_dir.join(date_str).join(run_id);
    fs::create_dir_all(&run_dir).map_err(OutputError::CreateDir)?;

    let scout_file = run_dir.join("scout.json");
    let scout_json = json!({
        "city": state.query.city,
        "interests": state.query.interests,
        "start_date": state.query.start_date,
        "end_date": state.query.end_date,
        "links": state.scout_links,
        "total_links_found": state.scout_links.len(),
        "searches": state.stats.searches,
        "failed_searches": state.stats.failed_searches,
    });
    write_json(&scout_file, &scout_json)?;

    let explorer_file = run_dir.join("explorer.json");
    let explorer_json = json!({
        "events": state.explorer_events,
        "rejected": state.rejected,
        "dropped_online": state.dropped_online,
        "analyzed_count": state.stats.analyzed_count,
        "batches": state.stats.batches,
        "failed_batches": state.stats.failed_batches,
    });
    write_json(&explorer_file, &explorer_json)?;

    let itinerary_file = run_dir.join("itinerary.json");
    let itinerary_entries: Vec<serde_json::Value> = state
        .itinerary
        .iter()
        .map(|event| {
            let mut value = serde_json::to_value(event).unwrap_or_default();
            if let Some(obj) = value.as_object_mut() {
                obj.insert("fingerprint".to_string(), json!(event.fingerprint()));
            }
            value
        })
        .collect();
    let itinerary_json = json!({
        "phase": state.phase,
        "itinerary": itinerary_entries,
        "coverage": state.coverage,
        "search_summary": {
            "platforms_used": platforms_used(state),
            "generated_at": Utc::now().to_rfc3339(),
        },
    });
    write_json(&itinerary_file, &itinerary_json)?;

    let summary_file = run_dir.join("summary.md");
    fs::write(&summary_file, build_summary_markdown(run_id, state))
        .map_err(OutputError::WriteArtifact)?;

    let log_file = run_dir.join("run.log");
    fs::write(&log_file, state.log.entries().join("\n") + "\n")
        .map_err(OutputError::WriteArtifact)?;

    Ok(RunArtifacts {
        run_dir,
        scout_file,
        explorer_file,
        itinerary_file,
        summary_file,
        log_file,
    })
}

fn write_json(path: &Path, value: &serde_json::Value) -> Result<(), OutputError> {
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content).map_err(OutputError::WriteArtifact)
}

fn platforms_used(state: &PipelineState) -> Vec<String> {
    let set: BTreeSet<&str> = state
        .itinerary
        .iter()
        .map(|event| event.source.platform.as_str())
        .filter(|platform| !platform.is_empty())
        .collect();
    set.into_iter().map(|s| s.to_string()).collect()
}

fn build_summary_markdown(run_id: &str, state: &PipelineState) -> String {
    let mut md = String::new();

    md.push_str(&format!("# wayfinder run {}\n\n", run_id));
    md.push_str(&format!(
        "**City:** {}\n**Interests:** {}\n**Dates:** {} to {}\n**Outcome:** {}\n\n",
        state.query.city,
        state.query.interests.join(", "),
        state.query.start_date,
        state.query.end_date,
        state.phase,
    ));

    md.push_str("| Metric | Value |\n");
    md.push_str("|--------|-------|\n");
    md.push_str(&format!("| Searches | {} |\n", state.stats.searches));
    md.push_str(&format!(
        "| Failed searches | {} |\n",
        state.stats.failed_searches
    ));
    md.push_str(&format!("| Unique links | {} |\n", state.stats.links_found));
    md.push_str(&format!("| Batches | {} |\n", state.stats.batches));
    md.push_str(&format!(
        "| Failed batches | {} |\n",
        state.stats.failed_batches
    ));
    md.push_str(&format!(
        "| Links analyzed | {} |\n",
        state.stats.analyzed_count
    ));
    md.push_str(&format!("| Events | {} |\n", state.itinerary.len()));
    md.push_str(&format!("| Rejected links | {} |\n", state.rejected.len()));
    md.push_str(&format!(
        "| Dropped (online) | {} |\n\n",
        state.dropped_online.len()
    ));

    if state.phase == Phase::NoResults {
        md.push_str("*No links were discovered for this query.*\n");
        return md;
    }

    md.push_str("## Coverage\n\n");
    md.push_str("| Date | Events | Morning | Afternoon | Evening |\n");
    md.push_str("|------|--------|---------|-----------|--------|\n");
    for (date, day) in &state.coverage {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            date,
            day.count,
            slot_mark(day.has_morning),
            slot_mark(day.has_afternoon),
            slot_mark(day.has_evening),
        ));
    }

    if !state.itinerary.is_empty() {
        md.push_str("\n## Itinerary\n\n");
        for event in &state.itinerary {
            let time = event.start_time.as_deref().unwrap_or("time TBD");
            md.push_str(&format!(
                "- **{}** at {} ({})\n",
                event.name, time, event.location.venue
            ));
        }
    }

    md
}

fn slot_mark(filled: bool) -> &'static str {
    if filled {
        "yes"
    } else {
        "-"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{EventRecord, Location, Source};
    use crate::pipeline::{PipelineState, Query};
    use crate::planner;
    use chrono::NaiveDate;

    fn sample_state() -> PipelineState {
        let query = Query {
            city: "Austin".to_string(),
            interests: vec!["live music".to_string()],
            start_date: NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 3).unwrap(),
        };
        let mut state = PipelineState::new(query);
        let event = EventRecord {
            name: "Bluegrass Night".to_string(),
            start_time: Some("2026-01-02T19:00:00".to_string()),
            location: Location {
                venue: "The Saloon".to_string(),
                address: "100 Congress Ave".to_string(),
                city: "Austin".to_string(),
            },
            source: Source {
                platform: "Eventbrite".to_string(),
                url: "https://bluegrass.example".to_string(),
            },
            ..Default::default()
        };
        state.itinerary = vec![event.clone()];
        state.explorer_events = vec![event];
        state.coverage = planner::analyze_coverage(
            &state.itinerary,
            state.query.start_date,
            state.query.end_date,
        );
        state.log.push("pipeline: test run".to_string());
        state
    }

    #[test]
    fn test_artifacts_written_and_parseable() {
        let tmp = tempfile::tempdir().unwrap();
        let state = sample_state();

        let artifacts = write_run_artifacts(tmp.path(), "run-abc123", &state).unwrap();

        for path in [
            &artifacts.scout_file,
            &artifacts.explorer_file,
            &artifacts.itinerary_file,
        ] {
            let content = fs::read_to_string(path).unwrap();
            let _: serde_json::Value = serde_json::from_str(&content).unwrap();
        }

        let itinerary: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&artifacts.itinerary_file).unwrap()).unwrap();
        assert_eq!(itinerary["itinerary"][0]["name"], "Bluegrass Night");
        assert!(itinerary["itinerary"][0]["fingerprint"].is_string());
        assert_eq!(
            itinerary["search_summary"]["platforms_used"][0],
            "Eventbrite"
        );

        let summary = fs::read_to_string(&artifacts.summary_file).unwrap();
        assert!(summary.contains("Bluegrass Night"));
        assert!(summary.contains("| 2026-01-03 | 0 |"));

        let log = fs::read_to_string(&artifacts.log_file).unwrap();
        assert!(log.contains("pipeline: test run"));
    }
}
