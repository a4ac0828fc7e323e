use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, error, info};

use crate::config::{Config, task_capacity};
use crate::error::{ConfigError, PoolError, QueueError};
use crate::models::{Report, Task, TaskResult};
use crate::queue::BoundedQueue;
use crate::tracker::CompletionTracker;
use crate::worker::Worker;
use crate::worker_processing::{RandomDelay, Workload};

pub struct Pool {
  workers: usize,
  tasks: u64,
  capacity: usize,
  workload: Arc<dyn Workload>,
}

impl Pool {
  pub fn new(workers: usize, tasks: u64, workload: impl Workload + 'static) -> Result<Self, PoolError> {
    if workers == 0 {
      return Err(ConfigError::ZeroWorkers.into());
    }
    let capacity = task_capacity(tasks)?;
    Ok(Self {
      workers,
      tasks,
      capacity,
      workload: Arc::new(workload),
    })
  }

  pub fn from_config(config: &Config) -> Result<Self, PoolError> {
    Self::new(config.workers, config.tasks, RandomDelay::new(config.max_delay))
  }

  // Both queues hold every task, so the producer never waits. Result queue
  // closes only after the tracker wait.
  pub async fn run(&self) -> Result<Report, PoolError> {
    let task_queue = Arc::new(BoundedQueue::<Task>::new("tasks", self.capacity));
    let result_queue = Arc::new(BoundedQueue::<TaskResult>::new("results", self.capacity));

    let tracker = CompletionTracker::new();
    let guards: Vec<_> = (0..self.workers).map(|_| tracker.register()).collect();

    info!("Main: Starting {} worker tasks.", self.workers);
    let mut handles = Vec::with_capacity(self.workers);
    for (index, guard) in guards.into_iter().enumerate() {
      let worker = Worker::new(
        index + 1,
        task_queue.clone(),
        result_queue.clone(),
        self.workload.clone(),
      );
      handles.push(tokio::spawn(worker.run(guard)));
    }

    info!("Main: Populating the task queue with {} tasks.", self.tasks);
    for id in 0..self.tasks {
      task_queue.enqueue(Task::new(id)).await?;
    }
    task_queue.close()?;

    info!("Main: Waiting for all workers to finish...");
    tracker.wait().await;
    debug!("Main: all {} workers signalled done", self.workers);

    result_queue.close()?;
    let outcomes = collect_outcomes(join_all(handles).await);

    let mut results = Vec::new();
    while let Some(result) = result_queue.dequeue().await {
      results.push(result);
    }
    outcomes?;

    Ok(Report {
      workers: self.workers,
      results,
    })
  }
}

fn collect_outcomes(
  outcomes: Vec<Result<Result<usize, QueueError>, tokio::task::JoinError>>,
) -> Result<(), PoolError> {
  let mut first_error = None;
  for (index, outcome) in outcomes.into_iter().enumerate() {
    let worker_id = index + 1;
    let err = match outcome {
      Ok(Ok(processed)) => {
        debug!("Worker {} processed {} tasks", worker_id, processed);
        continue;
      }
      Ok(Err(e)) => PoolError::Queue(e),
      Err(_) => PoolError::WorkerPanicked { worker_id },
    };
    error!("Worker {} did not finish cleanly: {}", worker_id, err);
    first_error.get_or_insert(err);
  }
  match first_error {
    Some(err) => Err(err),
    None => Ok(()),
  }
}
