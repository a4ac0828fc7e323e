use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tokio::time::sleep;
use tracing::debug;

use crate::models::Task;

/// The "work" a worker does for one task. Returns how long it took, which
/// ends up in the task's result.
#[async_trait]
pub trait Workload: Send + Sync {
  async fn perform(&self, task: &Task) -> Duration;
}

/// Sleeps for a uniformly random whole number of milliseconds in `[0, max)`.
#[derive(Debug, Clone, Copy)]
pub struct RandomDelay {
  pub max: Duration,
}

impl RandomDelay {
  pub fn new(max: Duration) -> Self {
    Self { max }
  }

  pub fn draw(&self) -> Duration {
    let max_ms = self.max.as_millis() as u64;
    if max_ms == 0 {
      return Duration::ZERO;
    }
    Duration::from_millis(rand::rng().random_range(0..max_ms))
  }
}

#[async_trait]
impl Workload for RandomDelay {
  async fn perform(&self, task: &Task) -> Duration {
    let delay = self.draw();
    debug!("Task-{} sleeping for {}ms", task.id, delay.as_millis());
    sleep(delay).await;
    delay
  }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

impl FixedDelay {
  pub const ZERO: FixedDelay = FixedDelay(Duration::ZERO);
}

#[async_trait]
impl Workload for FixedDelay {
  async fn perform(&self, _task: &Task) -> Duration {
    if !self.0.is_zero() {
      sleep(self.0).await;
    }
    self.0
  }
}
