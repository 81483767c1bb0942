// src/MPSC/producer.rs
use crate::MPSC::Queue::LockFreeQueue;
use crate::MPSC::Structs::PushError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The sending half of a queue.
///
/// Producers are cheap to clone and may be moved to and shared between any
/// number of threads. Every push is wait-free.
pub struct Producer<T> {
    pub(crate) queue: Arc<LockFreeQueue<T>>,
    consumer_alive: Arc<AtomicBool>,
}

impl<T> Producer<T> {
    pub(crate) fn new(queue: Arc<LockFreeQueue<T>>, consumer_alive: Arc<AtomicBool>) -> Self {
        Self {
            queue,
            consumer_alive,
        }
    }

    /// Appends an item to the back of the queue.
    pub fn push(&self, item: T) {
        self.queue.push(item);
    }

    /// Appends a clone of `item`. A panicking `Clone` leaves the queue untouched.
    pub fn push_clone(&self, item: &T)
    where
        T: Clone,
    {
        self.queue.push_clone(item);
    }

    /// Appends an item, returning it inside the error if allocation fails.
    ///
    /// # Returns
    /// * `Ok(())` if the item was enqueued
    /// * `Err(PushError)` if the node could not be allocated; the queue is unchanged
    pub fn try_push(&self, item: T) -> Result<(), PushError<T>> {
        self.queue.try_push(item)
    }

    /// Returns a reference to the consumer-alive flag.
    ///
    /// The flag turns false when the consumer drops. Pushing is still allowed
    /// afterwards; the items are dropped with the queue once the last
    /// producer goes away.
    pub fn consumer_alive(&self) -> &Arc<AtomicBool> {
        &self.consumer_alive
    }

    /// Returns true once the consumer half has been dropped.
    pub fn is_disconnected(&self) -> bool {
        !self.consumer_alive.load(Ordering::Acquire)
    }
}

impl<T> Clone for Producer<T> {
    fn clone(&self) -> Self {
        Self {
            queue: Arc::clone(&self.queue),
            consumer_alive: Arc::clone(&self.consumer_alive),
        }
    }
}
