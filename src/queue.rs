use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::{Semaphore, mpsc};
use tracing::debug;

use crate::error::QueueError;

/// Bounded FIFO with any number of producers and consumers. Closing takes the
/// sender, after which writes fail and readers drain the rest then see `None`.
pub struct BoundedQueue<T> {
  name: &'static str,
  capacity: usize,
  sender: Mutex<Option<mpsc::Sender<T>>>,
  receiver: tokio::sync::Mutex<mpsc::Receiver<T>>,
}

impl<T: Send> BoundedQueue<T> {
  /// Capacity is clamped to `1..=Semaphore::MAX_PERMITS`.
  pub fn new(name: &'static str, capacity: usize) -> Self {
    let capacity = capacity.clamp(1, Semaphore::MAX_PERMITS);
    let (tx, rx) = mpsc::channel(capacity);
    Self {
      name,
      capacity,
      sender: Mutex::new(Some(tx)),
      receiver: tokio::sync::Mutex::new(rx),
    }
  }

  pub fn name(&self) -> &'static str {
    self.name
  }

  pub fn capacity(&self) -> usize {
    self.capacity
  }

  pub fn is_closed(&self) -> bool {
    self.sender_slot().is_none()
  }

  /// Appends an item, waiting while the queue is full.
  ///
  /// A write that is already waiting when [`close`](Self::close) is called
  /// still lands; readers only see the end of the queue after it does.
  pub async fn enqueue(&self, item: T) -> Result<(), QueueError> {
    let sender = self
      .sender_slot()
      .clone()
      .ok_or(QueueError::Closed { queue: self.name })?;
    sender
      .send(item)
      .await
      .map_err(|_| QueueError::Closed { queue: self.name })
  }

  pub fn close(&self) -> Result<(), QueueError> {
    match self.sender_slot().take() {
      Some(_) => {
        debug!("Queue '{}' closed", self.name);
        Ok(())
      }
      None => Err(QueueError::AlreadyClosed { queue: self.name }),
    }
  }

  /// Waits for the next item. Returns `None` once the queue is closed and
  /// every buffered item has been handed out.
  pub async fn dequeue(&self) -> Option<T> {
    self.receiver.lock().await.recv().await
  }

  fn sender_slot(&self) -> MutexGuard<'_, Option<mpsc::Sender<T>>> {
    self.sender.lock().unwrap_or_else(PoisonError::into_inner)
  }
}
