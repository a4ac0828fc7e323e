use std::sync::Arc;

use tracing::{error, info};

use crate::error::QueueError;
use crate::models::{Task, TaskResult};
use crate::queue::BoundedQueue;
use crate::tracker::CompletionGuard;
use crate::worker_processing::Workload;

pub struct Worker {
  pub id: usize,
  tasks: Arc<BoundedQueue<Task>>,
  results: Arc<BoundedQueue<TaskResult>>,
  workload: Arc<dyn Workload>,
}

impl Worker {
  pub fn new(
    id: usize,
    tasks: Arc<BoundedQueue<Task>>,
    results: Arc<BoundedQueue<TaskResult>>,
    workload: Arc<dyn Workload>,
  ) -> Self {
    Self {
      id,
      tasks,
      results,
      workload,
    }
  }

  /// Runs the worker to queue exhaustion. `done` is dropped on every way out
  /// of this function, which is what tells the tracker this worker is gone.
  pub async fn run(self, done: CompletionGuard) -> Result<usize, QueueError> {
    let _done = done;
    self.process_all().await
  }

  /// Pulls tasks one at a time until the task queue is closed and empty.
  /// Returns how many tasks this worker handled.
  pub async fn process_all(&self) -> Result<usize, QueueError> {
    info!("Worker {} starting...", self.id);
    let mut processed = 0;

    while let Some(task) = self.tasks.dequeue().await {
      let elapsed = self.workload.perform(&task).await;
      let result = TaskResult::new(self.id, task.id, elapsed.as_millis() as u64);
      let message = result.message.clone();

      if let Err(e) = self.results.enqueue(result).await {
        error!("Worker {}: could not hand off result for Task-{}: {}", self.id, task.id, e);
        return Err(e);
      }
      info!("{}", message);
      processed += 1;
    }

    info!("Worker {} finished.", self.id);
    Ok(processed)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::tracker::CompletionTracker;
  use crate::worker_processing::FixedDelay;

  fn queues(capacity: usize) -> (Arc<BoundedQueue<Task>>, Arc<BoundedQueue<TaskResult>>) {
    (
      Arc::new(BoundedQueue::new("tasks", capacity)),
      Arc::new(BoundedQueue::new("results", capacity)),
    )
  }

  #[tokio::test]
  async fn single_worker_drains_queue_in_order() {
    let (tasks, results) = queues(5);
    for id in 0..5 {
      tasks.enqueue(Task::new(id)).await.unwrap();
    }
    tasks.close().unwrap();

    let worker = Worker::new(1, tasks, results.clone(), Arc::new(FixedDelay::ZERO));
    assert_eq!(worker.process_all().await, Ok(5));

    results.close().unwrap();
    let mut ids = Vec::new();
    while let Some(result) = results.dequeue().await {
      assert_eq!(result.worker_id, 1);
      assert_eq!(result.duration_ms, 0);
      ids.push(result.task_id);
    }
    assert_eq!(ids, vec![0, 1, 2, 3, 4]);
  }

  #[tokio::test]
  async fn worker_with_no_tasks_still_signals_done() {
    let (tasks, results) = queues(0);
    tasks.close().unwrap();

    let tracker = CompletionTracker::new();
    let worker = Worker::new(2, tasks, results, Arc::new(FixedDelay::ZERO));
    assert_eq!(worker.run(tracker.register()).await, Ok(0));
    assert_eq!(tracker.pending(), 0);
    tracker.wait().await;
  }

  #[tokio::test]
  async fn closed_result_queue_is_reported_and_still_signals_done() {
    let (tasks, results) = queues(1);
    tasks.enqueue(Task::new(0)).await.unwrap();
    tasks.close().unwrap();
    results.close().unwrap();

    let tracker = CompletionTracker::new();
    let worker = Worker::new(3, tasks, results, Arc::new(FixedDelay::ZERO));
    assert_eq!(
      worker.run(tracker.register()).await,
      Err(QueueError::Closed { queue: "results" })
    );
    assert_eq!(tracker.pending(), 0);
  }
}
