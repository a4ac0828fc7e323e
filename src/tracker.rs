use std::sync::Arc;

use tokio::sync::watch;

/// Counts outstanding [`CompletionGuard`]s. Dropping a guard is its done
/// signal, so it fires on return, on `?` and on unwind alike.
#[derive(Debug, Clone)]
pub struct CompletionTracker {
  pending: Arc<watch::Sender<usize>>,
}

/// Not `Clone`: one guard, one signal.
#[derive(Debug)]
pub struct CompletionGuard {
  pending: Arc<watch::Sender<usize>>,
}

impl Drop for CompletionGuard {
  fn drop(&mut self) {
    self.pending.send_modify(|n| *n -= 1);
  }
}

impl Default for CompletionTracker {
  fn default() -> Self {
    Self::new()
  }
}

impl CompletionTracker {
  pub fn new() -> Self {
    let (pending, _) = watch::channel(0);
    Self {
      pending: Arc::new(pending),
    }
  }

  pub fn register(&self) -> CompletionGuard {
    self.pending.send_modify(|n| *n += 1);
    CompletionGuard {
      pending: self.pending.clone(),
    }
  }

  pub fn pending(&self) -> usize {
    *self.pending.borrow()
  }

  /// Waits until no guard is outstanding. Any number of callers may wait at
  /// once.
  pub async fn wait(&self) {
    let mut pending = self.pending.subscribe();
    let _ = pending.wait_for(|&n| n == 0).await;
  }
}
