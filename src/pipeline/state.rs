use crate::parser::{EventRecord, LinkCandidate, RejectedLink};
use crate::planner::CoverageDay;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Validated pipeline input. Construction-time guarantees (non-empty
/// interests, start <= end) are the caller's job; see `cli::run`.
#[derive(Debug, Clone, Serialize)]
pub struct Query {
    pub city: String,
    pub interests: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Where a pipeline run currently stands. Strictly linear; `NoResults` is a
/// terminal success-shaped outcome, distinct from any error path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Init,
    Scouted,
    Explored,
    Planned,
    Done,
    NoResults,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Init => "init",
            Phase::Scouted => "scouted",
            Phase::Explored => "explored",
            Phase::Planned => "planned",
            Phase::Done => "done",
            Phase::NoResults => "no_results",
        };
        write!(f, "{name}")
    }
}

/// Append-only log sink threaded through every stage and merged into the run
/// artifacts. Stages only ever push; nothing is rewritten or reordered.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RunLog {
    entries: Vec<String>,
}

impl RunLog {
    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

/// Per-run statistics carried into the artifacts.
#[derive(Debug, Default, Clone, Serialize)]
pub struct PipelineStats {
    pub searches: usize,
    pub failed_searches: usize,
    pub links_found: usize,
    pub batches: usize,
    pub failed_batches: usize,
    pub analyzed_count: usize,
    pub events_extracted: usize,
    pub rejected_count: usize,
    pub dropped_online_count: usize,
}

/// Everything one pipeline execution accumulates. Owned exclusively by the
/// orchestrator; stages hand back partial outputs that are merged here after
/// each fan-in completes.
#[derive(Debug, Serialize)]
pub struct PipelineState {
    pub query: Query,
    pub phase: Phase,

    pub scout_links: Vec<LinkCandidate>,
    pub explorer_events: Vec<EventRecord>,
    pub rejected: Vec<RejectedLink>,
    /// Events excluded by the online filter. Counted and reported explicitly
    /// instead of vanishing from the stats.
    pub dropped_online: Vec<RejectedLink>,

    pub itinerary: Vec<EventRecord>,
    pub coverage: BTreeMap<NaiveDate, CoverageDay>,

    pub stats: PipelineStats,
    pub log: RunLog,
}

impl PipelineState {
    pub fn new(query: Query) -> Self {
        Self {
            query,
            phase: Phase::Init,
            scout_links: Vec::new(),
            explorer_events: Vec::new(),
            rejected: Vec::new(),
            dropped_online: Vec::new(),
            itinerary: Vec::new(),
            coverage: BTreeMap::new(),
            stats: PipelineStats::default(),
            log: RunLog::default(),
        }
    }

    pub(super) fn transition(&mut self, next: Phase) {
        self.log.push(format!("pipeline: {} -> {}", self.phase, next));
        self.phase = next;
    }
}
