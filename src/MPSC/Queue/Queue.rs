// This is the unbounded lock-free MPSC queue shared by every producer and the consumer

use crate::Core::backoff::WaitStrategy;
use crossbeam_utils::CachePadded;
use std::marker::PhantomData;
use std::ptr;
use std::sync::atomic::AtomicPtr;

/// One link in the queue's chain.
///
/// A node is created by exactly one push and freed by exactly one pop (or by
/// the queue's drop). `next` is written at most once, by the push that
/// follows this node in the total order of tail exchanges.
pub(crate) struct Node<T> {
    pub(crate) next: AtomicPtr<Node<T>>,
    pub(crate) item: T,
}

impl<T> Node<T> {
    pub(crate) fn new(item: T) -> Self {
        Self {
            next: AtomicPtr::new(ptr::null_mut()),
            item,
        }
    }
}

/// An unbounded, non-intrusive, lock-free FIFO queue for many producers and
/// one consumer.
///
/// ### Concurrency Design:
/// - **Producers (push)**: exchange `tail` with their freshly allocated node.
///   The node they get back is linked to the new one through its `next`
///   field; if they get back null the queue was empty and they install the
///   node as `head` themselves. Push is wait-free.
/// - **Consumer (pop)**: tries to swing `tail` from the current head to null.
///   If that fails a producer is mid-push, and the consumer spins on the head
///   node's `next` link until the producer publishes it. Pop is lock-free.
///
/// Only one thread may run consumer operations at a time. The raw consumer
/// methods on this type are therefore `unsafe`; the safe way to consume is
/// through [`Consumer`](crate::MPSC::Consumer), which cannot be cloned.
pub struct LockFreeQueue<T> {
    /// Oldest unconsumed node, or null when empty.
    /// Written by the consumer, and by the push that fills an empty queue.
    pub(crate) head: CachePadded<AtomicPtr<Node<T>>>,

    /// Most recently published node, or null when empty.
    /// Exchanged by producers, compare-exchanged by the consumer.
    pub(crate) tail: CachePadded<AtomicPtr<Node<T>>>,

    /// How the consumer waits for an in-flight push to link its node.
    pub(crate) wait: WaitStrategy,

    /// The queue owns boxed `Node<T>`s.
    pub(crate) _marker: PhantomData<Box<Node<T>>>,
}

// Items are moved across threads but never shared: producers hand them off
// and only the single consumer touches them afterwards.
unsafe impl<T: Send> Send for LockFreeQueue<T> {}
unsafe impl<T: Send> Sync for LockFreeQueue<T> {}
