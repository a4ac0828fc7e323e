use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
  #[error("enqueue on closed queue '{queue}'")]
  Closed { queue: &'static str },

  #[error("queue '{queue}' was already closed")]
  AlreadyClosed { queue: &'static str },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
  #[error("invalid value {value:?} for {var}")]
  Invalid { var: &'static str, value: String },

  #[error("worker count must be at least 1")]
  ZeroWorkers,

  #[error("task count {tasks} exceeds the queue limit of {max}")]
  TooManyTasks { tasks: u64, max: usize },
}

#[derive(Error, Debug)]
pub enum PoolError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Queue(#[from] QueueError),

  #[error("worker {worker_id} panicked")]
  WorkerPanicked { worker_id: usize },
}
