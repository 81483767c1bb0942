// src/MPSC/consumer.rs

use crate::MPSC::producer::Producer;
use crate::MPSC::Queue::LockFreeQueue;
use crate::trace::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The receiving half of a queue.
///
/// There is exactly one consumer per queue: it cannot be cloned, and every
/// operation that moves the head takes `&mut self`. It may be moved to the
/// thread that does the work.
pub struct Consumer<T> {
    queue: Arc<LockFreeQueue<T>>,
    consumer_alive: Arc<AtomicBool>,
}

impl<T> Consumer<T> {
    pub(crate) fn new(queue: Arc<LockFreeQueue<T>>, consumer_alive: Arc<AtomicBool>) -> Self {
        Self {
            queue,
            consumer_alive,
        }
    }

    /// Whether an item is waiting at the front of the queue.
    pub fn has_front(&self) -> bool {
        self.queue.has_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Borrow the oldest item, or `None` if the queue is empty.
    pub fn front(&mut self) -> Option<&mut T> {
        if self.queue.has_front() {
            // Safety: we are the only consumer and just saw a head.
            Some(unsafe { self.queue.front_unchecked() })
        } else {
            None
        }
    }

    /// Borrow the oldest item without checking for emptiness.
    ///
    /// # Safety
    /// The queue must be non-empty, e.g. [`has_front`](Self::has_front) just
    /// returned `true`.
    pub unsafe fn front_unchecked(&mut self) -> &mut T {
        self.queue.front_unchecked()
    }

    /// Remove and return the oldest item, or `None` if the queue is empty.
    ///
    /// May spin briefly if a producer is in the middle of linking the next
    /// item.
    pub fn pop(&mut self) -> Option<T> {
        if self.queue.has_front() {
            // Safety: single consumer, non-empty.
            Some(unsafe { self.queue.pop_unchecked() })
        } else {
            None
        }
    }

    /// Remove and return the oldest item without checking for emptiness.
    ///
    /// # Safety
    /// The queue must be non-empty.
    pub unsafe fn pop_unchecked(&mut self) -> T {
        self.queue.pop_unchecked()
    }

    /// Drop the oldest item. Returns `false` if the queue was empty.
    pub fn discard(&mut self) -> bool {
        if self.queue.has_front() {
            // Safety: single consumer, non-empty.
            unsafe { self.queue.discard_unchecked() };
            true
        } else {
            false
        }
    }

    /// Number of items in the queue. O(n), a snapshot while producers are active.
    pub fn size(&self) -> usize {
        // Safety: popping needs `&mut self`, so nothing frees nodes under us.
        unsafe { self.queue.size_unchecked() }
    }

    /// Drop every item currently in the queue and return how many there were.
    ///
    /// Items pushed concurrently with the clear may or may not be removed.
    pub fn clear(&mut self) -> usize {
        // Safety: single consumer.
        let removed = unsafe { self.queue.clear_unchecked() };
        debug!(removed, "queue cleared");
        removed
    }

    /// An iterator that pops items until the queue is observed empty.
    pub fn try_iter(&mut self) -> TryIter<'_, T> {
        TryIter { consumer: self }
    }

    /// Make a new producer for this queue.
    pub fn producer(&self) -> Producer<T> {
        Producer::new(Arc::clone(&self.queue), Arc::clone(&self.consumer_alive))
    }

    pub(crate) fn queue(&self) -> &LockFreeQueue<T> {
        &self.queue
    }
}

impl<T> Drop for Consumer<T> {
    fn drop(&mut self) {
        self.consumer_alive.store(false, Ordering::Release);
    }
}

/// Iterator returned by [`Consumer::try_iter`]. Never waits for new items.
pub struct TryIter<'a, T> {
    consumer: &'a mut Consumer<T>,
}

impl<T> Iterator for TryIter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.consumer.pop()
    }
}
