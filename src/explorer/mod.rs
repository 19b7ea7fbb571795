mod prompt;

use crate::config::Config;
use crate::parser::{extract_payload, EventRecord, LinkCandidate, RejectedLink};
use crate::pipeline::RunLog;
use crate::provider::{GenerationOptions, Generator};
use crate::runner::run_bounded;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Explorer stage output, concatenated in batch order.
#[derive(Debug, Default)]
pub struct AnalysisOutcome {
    pub events: Vec<EventRecord>,
    pub rejected: Vec<RejectedLink>,
    pub analyzed_count: usize,
    pub batches: usize,
    pub failed_batches: usize,
}

/// The JSON shape a batch analysis task expects back from the provider.
#[derive(Debug, Deserialize)]
struct AnalysisPayload {
    #[serde(default)]
    analyzed_links: Option<usize>,

    #[serde(default)]
    valid_events: Vec<EventRecord>,

    #[serde(default)]
    rejected_links: Vec<RejectedLink>,
}

/// Per-batch success value before fan-in.
#[derive(Debug)]
struct BatchReport {
    events: Vec<EventRecord>,
    rejected: Vec<RejectedLink>,
    analyzed: usize,
}

/// Partition links into fixed-size batches preserving order.
pub fn chunk_links(links: &[LinkCandidate], batch_size: usize) -> Vec<Vec<LinkCandidate>> {
    if batch_size == 0 || links.len() <= batch_size {
        return vec![links.to_vec()];
    }

    links.chunks(batch_size).map(|c| c.to_vec()).collect()
}

/// Analyze the deduplicated link list in parallel batches. A batch whose
/// provider call or extraction fails contributes all of its links to the
/// rejected list with the failure reason; the run continues with the rest.
pub async fn run_explorer(
    generator: Arc<dyn Generator>,
    config: &Config,
    city: &str,
    links: &[LinkCandidate],
    log: &mut RunLog,
) -> AnalysisOutcome {
    if links.is_empty() {
        log.push("explorer: no links to analyze".to_string());
        return AnalysisOutcome::default();
    }

    let batches = chunk_links(links, config.explorer.batch_size);
    let total_batches = batches.len();
    log.push(format!(
        "explorer: analyzing {} links in {} batches, concurrency {}",
        links.len(),
        total_batches,
        config.explorer.max_concurrent_batches,
    ));

    let options = GenerationOptions {
        temperature: config.explorer.temperature,
        max_output_tokens: config.explorer.max_output_tokens,
        search_enabled: true,
    };

    let tasks: Vec<_> = batches
        .iter()
        .enumerate()
        .map(|(idx, batch)| {
            let generator = generator.clone();
            let options = options.clone();
            let prompt = prompt::analysis_prompt(batch, city);
            let batch_len = batch.len();
            async move {
                debug!("explorer: batch {}/{} started", idx + 1, total_batches);
                let text = generator
                    .generate(&prompt, &options)
                    .await
                    .map_err(|e| e.to_string())?;
                let payload: AnalysisPayload =
                    extract_payload(&text).map_err(|e| e.to_string())?;
                Ok(BatchReport {
                    events: payload.valid_events,
                    rejected: payload.rejected_links,
                    analyzed: payload.analyzed_links.unwrap_or(batch_len),
                })
            }
        })
        .collect();

    let results = run_bounded(tasks, config.explorer.max_concurrent_batches).await;

    let mut outcome = AnalysisOutcome {
        batches: total_batches,
        ..Default::default()
    };

    for (idx, (batch, result)) in batches.iter().zip(results).enumerate() {
        match result {
            Ok(report) => {
                log.push(format!(
                    "explorer: batch {}/{} extracted {} events, rejected {}",
                    idx + 1,
                    total_batches,
                    report.events.len(),
                    report.rejected.len(),
                ));
                outcome.events.extend(report.events);
                outcome.rejected.extend(report.rejected);
                outcome.analyzed_count += report.analyzed;
            }
            Err(reason) => {
                log.push(format!(
                    "explorer: batch {}/{} failed: {}",
                    idx + 1,
                    total_batches,
                    reason,
                ));
                outcome.failed_batches += 1;
                outcome
                    .rejected
                    .extend(batch.iter().map(|link| RejectedLink {
                        url: link.url.clone(),
                        reason: reason.clone(),
                    }));
            }
        }
    }

    info!(
        "explorer: {} events, {} rejected, {} of {} batches failed",
        outcome.events.len(),
        outcome.rejected.len(),
        outcome.failed_batches,
        total_batches
    );

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use async_trait::async_trait;
    use chrono::{NaiveDate, Utc};

    fn link(url: &str) -> LinkCandidate {
        LinkCandidate {
            url: url.to_string(),
            title: String::new(),
            snippet: String::new(),
            platform: "Meetup".to_string(),
            interest: "tech".to_string(),
            event_date: None,
            date: NaiveDate::from_ymd_opt(2026, 1, 3).unwrap(),
            discovered_at: Utc::now(),
        }
    }

    fn links(n: usize) -> Vec<LinkCandidate> {
        (0..n).map(|i| link(&format!("https://event-{i}.example"))).collect()
    }

    #[test]
    fn test_chunk_sizes_five_five_two() {
        let chunks = chunk_links(&links(12), 5);
        let sizes: Vec<usize> = chunks.iter().map(|c| c.len()).collect();
        assert_eq!(sizes, vec![5, 5, 2]);
    }

    #[test]
    fn test_chunk_small_input_single_batch() {
        let chunks = chunk_links(&links(3), 5);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len(), 3);
    }

    /// Scripted provider: the response whose marker appears in the prompt is
    /// returned, so tests do not depend on batch completion order.
    struct ScriptedGenerator {
        responses: Vec<(String, Result<String, String>)>,
    }

    impl ScriptedGenerator {
        fn new(responses: Vec<(&str, Result<String, String>)>) -> Arc<Self> {
            Arc::new(Self {
                responses: responses
                    .into_iter()
                    .map(|(marker, response)| (marker.to_string(), response))
                    .collect(),
            })
        }
    }

    #[async_trait]
    impl Generator for ScriptedGenerator {
        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn generate(
            &self,
            prompt: &str,
            _options: &GenerationOptions,
        ) -> Result<String, ProviderError> {
            let next = self
                .responses
                .iter()
                .find(|(marker, _)| prompt.contains(marker))
                .map(|(_, response)| response.clone())
                .unwrap_or_else(|| Err("no scripted response for prompt".to_string()));
            next.map_err(|message| ProviderError::Api {
                status: 500,
                message,
            })
        }
    }

    fn batch_response(event_names: &[&str], analyzed: usize) -> String {
        let events: Vec<serde_json::Value> = event_names
            .iter()
            .map(|name| {
                serde_json::json!({
                    "name": name,
                    "category": "meetup",
                    "location": {"venue": "Hall", "address": "1 Main St", "city": "Berlin"},
                    "start_time": "2026-01-03T18:00:00",
                    "source": {"platform": "Meetup", "url": format!("https://{name}.example")}
                })
            })
            .collect();
        serde_json::json!({
            "analyzed_links": analyzed,
            "valid_events": events,
            "rejected_links": []
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_analyzed_count_sums_to_link_total() {
        // 12 links, batch size 5 -> batches of 5, 5, 2, each answered by the
        // scripted response matching its first link.
        let config = Config::default();
        let generator = ScriptedGenerator::new(vec![
            ("event-0.example", Ok(batch_response(&["a"], 5))),
            ("event-5.example", Ok(batch_response(&["b"], 5))),
            ("event-10.example", Ok(batch_response(&["c"], 2))),
        ]);

        let mut log = RunLog::default();
        let outcome =
            run_explorer(generator, &config, "Berlin", &links(12), &mut log).await;

        assert_eq!(outcome.analyzed_count, 12);
        assert_eq!(outcome.batches, 3);
        assert_eq!(outcome.failed_batches, 0);
        // Fan-in concatenates in batch order even if completion order varies.
        let names: Vec<&str> = outcome.events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_failed_batch_rejects_all_its_links() {
        let config = Config::default();
        let generator = ScriptedGenerator::new(vec![
            ("event-0.example", Ok(batch_response(&["early"], 5))),
            ("event-5.example", Err("quota exhausted".to_string())),
            ("event-10.example", Ok(batch_response(&["late"], 2))),
        ]);

        let mut log = RunLog::default();
        let outcome =
            run_explorer(generator, &config, "Berlin", &links(12), &mut log).await;

        // The middle batch (links 5..10) failed wholesale.
        assert_eq!(outcome.failed_batches, 1);
        assert_eq!(outcome.rejected.len(), 5);
        assert!(outcome
            .rejected
            .iter()
            .all(|r| r.reason.contains("quota exhausted")));
        assert_eq!(outcome.rejected[0].url, "https://event-5.example");

        // Events from the surviving batches are still present.
        let names: Vec<&str> = outcome.events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["early", "late"]);
        assert_eq!(outcome.analyzed_count, 7);
    }

    #[tokio::test]
    async fn test_unparsable_batch_text_rejects_links() {
        let config = Config::default();
        let generator = ScriptedGenerator::new(vec![(
            "event-0.example",
            Ok("I could not find anything useful.".to_string()),
        )]);

        let mut log = RunLog::default();
        let outcome = run_explorer(generator, &config, "Berlin", &links(2), &mut log).await;

        assert_eq!(outcome.failed_batches, 1);
        assert_eq!(outcome.rejected.len(), 2);
        assert!(outcome.events.is_empty());
        assert_eq!(outcome.analyzed_count, 0);
    }

    #[tokio::test]
    async fn test_empty_links_short_circuits() {
        let config = Config::default();
        let generator = ScriptedGenerator::new(vec![]);
        let mut log = RunLog::default();

        let outcome = run_explorer(generator, &config, "Berlin", &[], &mut log).await;

        assert_eq!(outcome.batches, 0);
        assert!(outcome.events.is_empty());
    }
}
