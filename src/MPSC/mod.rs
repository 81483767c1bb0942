mod builder;
mod byte_queue;
mod consumer;
mod producer;

pub use builder::QueueBuilder;
pub use consumer::{Consumer, TryIter};
pub use producer::Producer;

pub mod Queue {
    pub mod Queue;
    pub mod Queue_impl;
    pub use Queue::LockFreeQueue; // re-export for stable path
}

pub mod Structs {
    pub mod Queue_Structs;
    pub use Queue_Structs::{IoQueueInfo, PushError, QueueError}; // re-export for stable path
}

pub use byte_queue::ByteQueue;
pub use self::Queue::LockFreeQueue;

/// Create a queue with default settings and return its two halves.
pub fn channel<T>() -> (Producer<T>, Consumer<T>) {
    QueueBuilder::new().build()
}
