use anyhow::{Context, Result};
use tracing::info;
use workpool::{Config, Pool, output};

#[tokio::main]
async fn main() -> Result<()> {
  let config = Config::from_env().context("Failed to read configuration")?;
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_max_level(config.log_level)
    .init();

  let pool = Pool::from_config(&config)?;
  let report = pool.run().await.context("Worker pool did not complete")?;
  info!("Main: collected {} results from {} workers", report.len(), report.workers);

  print!("{}", output::render(&report, config.output)?);
  Ok(())
}
