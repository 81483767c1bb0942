use std::fmt;
use std::sync::atomic::Ordering;

use crate::MPSC::{ByteQueue, Consumer, LockFreeQueue, Producer};

/// Debug function for LockFreeQueue
///
/// Shows the raw head/tail pointers and the wait strategy. Never walks the
/// chain, so it is safe to call from any thread.
pub fn debug_lock_free_queue<T>(queue: &LockFreeQueue<T>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("LockFreeQueue")
        .field("head", &format_args!("{:p}", queue.head.load(Ordering::Relaxed)))
        .field("tail", &format_args!("{:p}", queue.tail.load(Ordering::Relaxed)))
        .field("wait", &queue.wait)
        .finish()
}

/// Debug function for Consumer
///
/// The consumer may walk the chain, so this includes the current size.
pub fn debug_consumer<T>(consumer: &Consumer<T>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Consumer")
        .field("queue", consumer.queue())
        .field("size", &consumer.size())
        .finish()
}

pub fn debug_producer<T>(producer: &Producer<T>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Producer")
        .field("queue", &*producer.queue)
        .field("disconnected", &producer.is_disconnected())
        .finish()
}

pub fn debug_byte_queue(queue: &ByteQueue, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ByteQueue")
        .field("element_size", &queue.element_size())
        .field("queue", queue.queue())
        .finish_non_exhaustive()
}

impl<T> fmt::Debug for LockFreeQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_lock_free_queue(self, f)
    }
}

impl<T> fmt::Debug for Consumer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_consumer(self, f)
    }
}

impl<T> fmt::Debug for Producer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_producer(self, f)
    }
}

impl fmt::Debug for ByteQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_byte_queue(self, f)
    }
}
