pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod pool;
pub mod queue;
pub mod tracker;
pub mod worker;
pub mod worker_processing;

pub use config::Config;
pub use error::{ConfigError, PoolError, QueueError};
pub use models::{Report, Task, TaskResult};
pub use pool::Pool;
