mod executor;

pub use executor::run_bounded;

/// What one fan-out task produced: a value, or a captured failure message.
/// Past the fan-in boundary the only consumers are the run log and the
/// rejected-link bookkeeping, so failures carry plain strings.
pub type TaskResult<T> = Result<T, String>;
