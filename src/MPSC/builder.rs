use super::{ByteQueue, Consumer, LockFreeQueue, Producer};
use crate::Core::backoff::WaitStrategy;
use crate::trace::debug;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub struct QueueBuilder {
    wait_strategy: WaitStrategy,
    element_size: usize,
}

impl Default for QueueBuilder {
    fn default() -> Self {
        Self {
            wait_strategy: WaitStrategy::Backoff,
            element_size: 0, // Only meaningful for byte queues
        }
    }
}

impl QueueBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wait_strategy(mut self, wait_strategy: WaitStrategy) -> Self {
        self.wait_strategy = wait_strategy;
        self
    }

    pub fn with_element_size(mut self, element_size: usize) -> Self {
        self.element_size = element_size;
        self
    }

    /// Build a bare queue for callers that uphold the single-consumer rule themselves.
    pub fn build_queue<T>(self) -> LockFreeQueue<T> {
        LockFreeQueue::with_wait_strategy(self.wait_strategy)
    }

    /// Build a queue and split it into its producer and consumer halves.
    pub fn build<T>(self) -> (Producer<T>, Consumer<T>) {
        let wait_strategy = self.wait_strategy;
        let queue = Arc::new(LockFreeQueue::with_wait_strategy(wait_strategy));
        let consumer_alive = Arc::new(AtomicBool::new(true));
        debug!(wait = ?wait_strategy, "queue created");
        (
            Producer::new(Arc::clone(&queue), Arc::clone(&consumer_alive)),
            Consumer::new(queue, consumer_alive),
        )
    }

    /// Build a byte queue with the configured element size.
    pub fn build_byte_queue(self) -> std::io::Result<ByteQueue> {
        let queue = ByteQueue::with_wait_strategy(self.element_size, self.wait_strategy)?;
        debug!(element_size = self.element_size, "byte queue created");
        Ok(queue)
    }
}
