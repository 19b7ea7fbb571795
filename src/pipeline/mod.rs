mod state;

pub use state::{Phase, PipelineState, PipelineStats, Query, RunLog};

use crate::config::Config;
use crate::explorer;
use crate::planner;
use crate::provider::Generator;
use crate::scout;
use std::sync::Arc;
use tracing::info;

/// Fixed linear pipeline: Init -> Scouted -> Explored -> Planned -> Done,
/// with the terminal NoResults short-circuit out of the scout stage. Each
/// stage runs exactly once; per-task failures inside a stage never abort the
/// run.
pub struct Pipeline {
    generator: Arc<dyn Generator>,
    config: Config,
}

impl Pipeline {
    pub fn new(generator: Arc<dyn Generator>, config: Config) -> Self {
        Self { generator, config }
    }

    pub async fn run(&self, query: Query) -> PipelineState {
        let mut state = PipelineState::new(query);
        let mut log = RunLog::default();
        log.push(format!(
            "pipeline: starting for {} ({} interests, {} to {})",
            state.query.city,
            state.query.interests.len(),
            state.query.start_date,
            state.query.end_date,
        ));

        // Scout: one search per interest, aggregated and deduplicated.
        let scout_outcome =
            scout::run_scout(self.generator.clone(), &self.config, &state.query, &mut log).await;
        state.stats.searches = scout_outcome.searches;
        state.stats.failed_searches = scout_outcome.failed_searches;
        state.stats.links_found = scout_outcome.links.len();
        state.scout_links = scout_outcome.links;

        merge_log(&mut state, log);
        state.transition(Phase::Scouted);

        if state.scout_links.is_empty() {
            state.log.push("pipeline: no links discovered, stopping early".to_string());
            state.transition(Phase::NoResults);
            info!("pipeline finished with no results");
            return state;
        }

        // Explorer: batch analysis over the deduplicated links.
        let mut log = RunLog::default();
        let analysis = explorer::run_explorer(
            self.generator.clone(),
            &self.config,
            &state.query.city,
            &state.scout_links,
            &mut log,
        )
        .await;
        state.stats.batches = analysis.batches;
        state.stats.failed_batches = analysis.failed_batches;
        state.stats.analyzed_count = analysis.analyzed_count;
        state.explorer_events = analysis.events;
        state.rejected = analysis.rejected;
        merge_log(&mut state, log);
        state.transition(Phase::Explored);

        // Planner: online filter, dedup, chronological sort, day coverage.
        let mut log = RunLog::default();
        let plan = planner::organize(
            &state.explorer_events,
            state.query.start_date,
            state.query.end_date,
            &mut log,
        );
        state.dropped_online = plan.dropped_online;
        state.itinerary = plan.itinerary;
        state.coverage = plan.coverage;
        merge_log(&mut state, log);
        state.transition(Phase::Planned);

        state.stats.events_extracted = state.itinerary.len();
        state.stats.rejected_count = state.rejected.len();
        state.stats.dropped_online_count = state.dropped_online.len();
        state.log.push(format!(
            "pipeline: {} events in itinerary, {} rejected, {} dropped as online",
            state.stats.events_extracted,
            state.stats.rejected_count,
            state.stats.dropped_online_count,
        ));
        state.transition(Phase::Done);

        info!(
            "pipeline finished: {} events, {} rejected, {} dropped online",
            state.stats.events_extracted,
            state.stats.rejected_count,
            state.stats.dropped_online_count
        );
        state
    }
}

fn merge_log(state: &mut PipelineState, stage_log: RunLog) {
    for line in stage_log.entries() {
        state.log.push(line.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::provider::GenerationOptions;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    fn query() -> Query {
        Query {
            city: "Lisbon".to_string(),
            interests: vec!["live music".to_string(), "tech meetups".to_string()],
            start_date: NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 4).unwrap(),
        }
    }

    /// Provider double that answers search prompts with one link each and
    /// analysis prompts with one fixed event per batch.
    struct CannedGenerator {
        empty_searches: bool,
    }

    #[async_trait]
    impl Generator for CannedGenerator {
        fn name(&self) -> &'static str {
            "canned"
        }

        async fn generate(
            &self,
            prompt: &str,
            _options: &GenerationOptions,
        ) -> Result<String, ProviderError> {
            if prompt.contains("Event Link Scout") {
                if self.empty_searches {
                    return Ok(r#"{"links": []}"#.to_string());
                }
                // Vary the URL by interest so both searches contribute.
                let tag = if prompt.contains("live music") { "music" } else { "tech" };
                return Ok(format!(
                    r#"{{"links": [{{"url": "https://{tag}.example/e1", "title": "{tag} night", "platform": "Meetup", "event_date": "2026-01-02"}}]}}"#
                ));
            }
            Ok(r#"{
                "analyzed_links": 2,
                "valid_events": [
                    {
                        "name": "Fado Evening",
                        "category": "concert",
                        "location": {"venue": "Casa da Musica", "address": "Rua A 1", "city": "Lisbon"},
                        "start_time": "2026-01-02T19:00:00",
                        "source": {"platform": "Meetup", "url": "https://music.example/e1"}
                    },
                    {
                        "name": "Webinar: Rust Async",
                        "category": "talk",
                        "location": {"venue": "Online", "address": "", "city": ""},
                        "start_time": "2026-01-03T18:00:00",
                        "source": {"platform": "Meetup", "url": "https://tech.example/e1"}
                    }
                ],
                "rejected_links": []
            }"#
            .to_string())
        }
    }

    #[tokio::test]
    async fn test_full_run_reaches_done() {
        let pipeline = Pipeline::new(
            Arc::new(CannedGenerator { empty_searches: false }),
            Config::default(),
        );

        let state = pipeline.run(query()).await;

        assert_eq!(state.phase, Phase::Done);
        assert_eq!(state.scout_links.len(), 2);
        // The webinar is dropped by the online filter, counted explicitly.
        assert_eq!(state.itinerary.len(), 1);
        assert_eq!(state.itinerary[0].name, "Fado Evening");
        assert_eq!(state.dropped_online.len(), 1);
        assert!(state.rejected.is_empty());
        // One coverage day per calendar date in range, zero-event days included.
        assert_eq!(state.coverage.len(), 3);
        assert!(!state.log.entries().is_empty());
    }

    #[tokio::test]
    async fn test_zero_links_terminates_as_no_results() {
        let pipeline = Pipeline::new(
            Arc::new(CannedGenerator { empty_searches: true }),
            Config::default(),
        );

        let state = pipeline.run(query()).await;

        assert_eq!(state.phase, Phase::NoResults);
        assert!(state.itinerary.is_empty());
        assert!(state.coverage.is_empty());
        assert_eq!(state.stats.searches, 2);
    }
}
