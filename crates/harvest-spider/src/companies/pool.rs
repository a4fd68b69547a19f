use crate::Result;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, trace};

/// Run `task` over every item on a fixed set of `workers` tokio tasks, returning the results
/// in the order of `items`.
///
/// Items are fed through a bounded queue; each worker pulls the next item when it finishes the
/// last one, so no more than `workers` tasks are ever in flight. Results travel back over a
/// channel tagged with their input position, and `on_result` sees each one as it settles.
/// A task's failure is just another `R`; it never stops the other workers.
pub async fn run_ordered<T, R, F, Fut>(
    items: Vec<T>,
    workers: usize,
    task: F,
    mut on_result: impl FnMut(&R),
) -> Result<Vec<R>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
{
    let total = items.len();
    let workers = workers.clamp(1, total.max(1));
    debug!("running {total} jobs on {workers} workers");

    let task = Arc::new(task);
    let (job_tx, job_rx) = mpsc::channel::<(usize, T)>(workers);
    let job_rx = Arc::new(Mutex::new(job_rx));
    let (result_tx, mut result_rx) = mpsc::unbounded_channel::<(usize, R)>();

    let mut handles = Vec::with_capacity(workers + 1);
    for id in 0..workers {
        let job_rx = job_rx.clone();
        let result_tx = result_tx.clone();
        let task = task.clone();
        handles.push(tokio::spawn(async move {
            loop {
                // the queue lock is only held while waiting for the next job
                let job = job_rx.lock().await.recv().await;
                let Some((index, item)) = job else {
                    break;
                };
                trace!("worker {id} picked up job {index}");
                if result_tx.send((index, task(item).await)).is_err() {
                    break;
                }
            }
            trace!("worker {id} finished");
        }));
    }
    drop(result_tx);

    // feed the queue
    handles.push(tokio::spawn(async move {
        for job in items.into_iter().enumerate() {
            if job_tx.send(job).await.is_err() {
                break;
            }
        }
    }));

    let mut results: Vec<Option<R>> = (0..total).map(|_| None).collect();
    while let Some((index, result)) = result_rx.recv().await {
        on_result(&result);
        results[index] = Some(result);
    }

    // surfaces a panicked worker
    for handle in handles {
        handle.await?;
    }

    Ok(results.into_iter().flatten().collect())
}
