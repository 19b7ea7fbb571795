mod prompt;

use crate::config::Config;
use crate::interests;
use crate::parser::{extract_payload, LinkCandidate};
use crate::pipeline::{Query, RunLog};
use crate::provider::{GenerationOptions, Generator};
use crate::runner::{run_bounded, TaskResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Scout stage output: the deduplicated link set plus fan-out stats.
#[derive(Debug)]
pub struct ScoutOutcome {
    pub links: Vec<LinkCandidate>,
    pub searches: usize,
    pub failed_searches: usize,
}

/// The JSON shape a search task expects back from the provider. Unknown
/// fields (interest echo, total_found, ...) are ignored.
#[derive(Debug, Deserialize)]
pub struct SearchPayload {
    #[serde(default)]
    pub links: Vec<RawLink>,
}

/// One link as the provider reports it, before tagging.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLink {
    pub url: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub snippet: String,

    #[serde(default)]
    pub platform: String,

    #[serde(default)]
    pub event_date: Option<String>,
}

/// Run one search per interest under the scout concurrency bound, then
/// aggregate and deduplicate the results.
pub async fn run_scout(
    generator: Arc<dyn Generator>,
    config: &Config,
    query: &Query,
    log: &mut RunLog,
) -> ScoutOutcome {
    log.push(format!(
        "scout: searching {} interests in {} ({} to {}), concurrency {}",
        query.interests.len(),
        query.city,
        query.start_date,
        query.end_date,
        config.scout.max_concurrent_searches,
    ));
    let categories = interests::categories_for(&query.interests);
    if !categories.is_empty() {
        log.push(format!(
            "scout: interests map to categories: {}",
            categories.join(", ")
        ));
    }

    let options = GenerationOptions {
        temperature: config.scout.temperature,
        max_output_tokens: config.scout.max_output_tokens,
        search_enabled: true,
    };

    let tasks: Vec<_> = query
        .interests
        .iter()
        .map(|interest| {
            let generator = generator.clone();
            let options = options.clone();
            let interest = interest.clone();
            let terms = interests::search_terms_for(std::slice::from_ref(&interest));
            let prompt = prompt::search_prompt(
                &interest,
                &query.city,
                query.start_date,
                query.end_date,
                config.scout.links_per_search,
                &terms,
            );
            async move {
                debug!("scout: searching \"{}\"", interest);
                let text = generator
                    .generate(&prompt, &options)
                    .await
                    .map_err(|e| format!("search \"{interest}\" failed: {e}"))?;
                let payload: SearchPayload = extract_payload(&text)
                    .map_err(|e| format!("search \"{interest}\" unparsable: {e}"))?;
                Ok(payload.links)
            }
        })
        .collect();

    let results = run_bounded(tasks, config.scout.max_concurrent_searches).await;

    let searches = results.len();
    let mut failed_searches = 0;
    for (interest, result) in query.interests.iter().zip(&results) {
        match result {
            Ok(links) => log.push(format!(
                "scout: found {} links for \"{}\"",
                links.len(),
                interest
            )),
            Err(reason) => {
                failed_searches += 1;
                log.push(format!("scout: search \"{interest}\" failed: {reason}"));
            }
        }
    }

    let tagged: Vec<(String, TaskResult<Vec<RawLink>>)> = query
        .interests
        .iter()
        .cloned()
        .zip(results)
        .collect();
    let links = aggregate_links(&tagged, query.start_date, Utc::now());

    info!(
        "scout: {} unique links from {} searches ({} failed)",
        links.len(),
        searches,
        failed_searches
    );
    log.push(format!("scout: {} unique links aggregated", links.len()));

    ScoutOutcome {
        links,
        searches,
        failed_searches,
    }
}

/// Tag every link from each successful search with its originating interest,
/// a resolved date (provider event date or the query start date), and the
/// discovery timestamp; flatten preserving interest-group order; then dedup
/// by exact URL, keeping the first occurrence.
pub fn aggregate_links(
    results: &[(String, TaskResult<Vec<RawLink>>)],
    fallback_date: NaiveDate,
    discovered_at: DateTime<Utc>,
) -> Vec<LinkCandidate> {
    let mut all: Vec<LinkCandidate> = Vec::new();

    for (interest, result) in results {
        let Ok(raw_links) = result else { continue };
        for raw in raw_links {
            let event_date = raw
                .event_date
                .as_deref()
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());
            all.push(LinkCandidate {
                url: raw.url.clone(),
                title: raw.title.clone(),
                snippet: raw.snippet.clone(),
                platform: raw.platform.clone(),
                interest: interest.clone(),
                event_date,
                date: event_date.unwrap_or(fallback_date),
                discovered_at,
            });
        }
    }

    dedup_links(all)
}

/// Stable URL dedup: first occurrence in iteration order wins.
pub fn dedup_links(links: Vec<LinkCandidate>) -> Vec<LinkCandidate> {
    let mut seen: HashSet<String> = HashSet::new();
    links
        .into_iter()
        .filter(|link| seen.insert(link.url.clone()))
        .collect()
}
