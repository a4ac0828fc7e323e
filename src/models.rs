use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
  pub id: u64,
}

impl Task {
  pub fn new(id: u64) -> Self {
    Self { id }
  }
}

/// Output record of one processed task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResult {
  pub worker_id: usize,
  pub task_id: u64,
  pub duration_ms: u64,
  pub message: String,
  pub completed_at: DateTime<Utc>,
}

impl TaskResult {
  pub fn new(worker_id: usize, task_id: u64, duration_ms: u64) -> Self {
    Self {
      worker_id,
      task_id,
      duration_ms,
      message: format!("Worker {} processed Task-{} in {}ms.", worker_id, task_id, duration_ms),
      completed_at: Utc::now(),
    }
  }
}

/// Everything the collector drained, in arrival order.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
  pub workers: usize,
  pub results: Vec<TaskResult>,
}

impl Report {
  pub fn len(&self) -> usize {
    self.results.len()
  }

  pub fn is_empty(&self) -> bool {
    self.results.is_empty()
  }

  pub fn task_ids(&self) -> Vec<u64> {
    let mut ids: Vec<u64> = self.results.iter().map(|r| r.task_id).collect();
    ids.sort_unstable();
    ids
  }

  /// Number of results each worker produced. Workers that processed nothing
  /// still appear with a count of zero.
  pub fn per_worker(&self) -> BTreeMap<usize, usize> {
    let mut tally: BTreeMap<usize, usize> = (1..=self.workers).map(|id| (id, 0)).collect();
    for result in &self.results {
      *tally.entry(result.worker_id).or_insert(0) += 1;
    }
    tally
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn message_matches_demo_format() {
    let result = TaskResult::new(3, 17, 242);
    assert_eq!(result.message, "Worker 3 processed Task-17 in 242ms.");
  }

  #[test]
  fn per_worker_includes_idle_workers() {
    let report = Report {
      workers: 3,
      results: vec![TaskResult::new(1, 0, 5), TaskResult::new(1, 1, 5), TaskResult::new(3, 2, 5)],
    };
    let tally = report.per_worker();
    assert_eq!(tally.get(&1), Some(&2));
    assert_eq!(tally.get(&2), Some(&0));
    assert_eq!(tally.get(&3), Some(&1));
    assert_eq!(report.task_ids(), vec![0, 1, 2]);
  }

  #[test]
  fn result_serializes_with_all_fields() {
    let result = TaskResult::new(2, 9, 100);
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["worker_id"], 2);
    assert_eq!(value["task_id"], 9);
    assert_eq!(value["duration_ms"], 100);
    assert_eq!(value["message"], "Worker 2 processed Task-9 in 100ms.");
    assert!(value["completed_at"].is_string());
  }
}
