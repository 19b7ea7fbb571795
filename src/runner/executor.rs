use super::TaskResult;
use futures::future::join_all;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::debug;

/// Run `tasks` to completion with at most `limit` in flight at any instant.
///
/// Results come back in the same order as the input tasks, regardless of
/// completion order. One task's failure (or panic) never cancels its
/// siblings; it is captured as that slot's failure message. Tasks are never
/// retried here.
pub async fn run_bounded<T, Fut>(tasks: Vec<Fut>, limit: usize) -> Vec<TaskResult<T>>
where
    T: Send + 'static,
    Fut: Future<Output = TaskResult<T>> + Send + 'static,
{
    let total = tasks.len();
    let semaphore = Arc::new(Semaphore::new(limit.max(1)));
    debug!("Dispatching {} tasks with concurrency {}", total, limit);

    let handles: Vec<_> = tasks
        .into_iter()
        .map(|task| {
            let semaphore = semaphore.clone();
            tokio::spawn(async move {
                // The semaphore is never closed while tasks run, but a
                // closed-semaphore error must not take down the whole batch.
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => return Err(format!("concurrency limiter closed: {e}")),
                };
                task.await
            })
        })
        .collect();

    // Handles are awaited in spawn order, so the output order is the input
    // order even when later tasks finish first.
    join_all(handles)
        .await
        .into_iter()
        .map(|joined| match joined {
            Ok(result) => result,
            Err(e) => Err(format!("task panicked: {e}")),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::sleep;

    #[tokio::test]
    async fn test_results_preserve_input_order() {
        // Earlier tasks sleep longer, so completion order is reversed.
        let tasks: Vec<_> = (0..5u64)
            .map(|i| async move {
                sleep(Duration::from_millis(50 - i * 10)).await;
                Ok(i)
            })
            .collect();

        let results = run_bounded(tasks, 5).await;

        let values: Vec<u64> = results.into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(values, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_failure_does_not_abort_siblings() {
        let tasks: Vec<_> = (0..4u64)
            .map(|i| async move {
                if i == 1 {
                    Err("boom".to_string())
                } else {
                    Ok(i)
                }
            })
            .collect();

        let results = run_bounded(tasks, 2).await;

        assert_eq!(results.len(), 4);
        assert_eq!(results[0], Ok(0));
        assert_eq!(results[1], Err("boom".to_string()));
        assert_eq!(results[2], Ok(2));
        assert_eq!(results[3], Ok(3));
    }

    #[tokio::test]
    async fn test_concurrency_never_exceeds_limit() {
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..12usize)
            .map(|i| {
                let active = active.clone();
                let peak = peak.clone();
                async move {
                    let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    sleep(Duration::from_millis(20)).await;
                    active.fetch_sub(1, Ordering::SeqCst);
                    Ok(i)
                }
            })
            .collect();

        let results = run_bounded(tasks, 3).await;

        assert_eq!(results.len(), 12);
        assert!(results.iter().all(|r| r.is_ok()));
        assert!(peak.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn test_three_tasks_bound_two_all_complete() {
        let tasks: Vec<_> = (0..3u64)
            .map(|i| async move {
                sleep(Duration::from_millis(10)).await;
                Ok(format!("search-{i}"))
            })
            .collect();

        let results = run_bounded(tasks, 2).await;

        assert_eq!(results.len(), 3);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.as_deref(), Ok(format!("search-{i}").as_str()));
        }
    }

    #[tokio::test]
    async fn test_panic_is_captured_as_failure() {
        let tasks: Vec<_> = (0..2usize)
            .map(|i| async move {
                if i == 0 {
                    panic!("task exploded");
                }
                Ok(i)
            })
            .collect();

        let results = run_bounded(tasks, 2).await;

        assert!(results[0].as_ref().unwrap_err().contains("panicked"));
        assert_eq!(results[1], Ok(1));
    }
}
