use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::ptr;
use std::sync::atomic::Ordering::{AcqRel, Acquire, Release};

use super::Queue::{LockFreeQueue, Node};
use crate::Core::backoff::WaitStrategy;
use crate::MPSC::Structs::Queue_Structs::PushError;
use crate::trace::warn;
use crossbeam_utils::CachePadded;
use std::sync::atomic::AtomicPtr;

// Memory ordering
//
// Every node is fully written before the producer's `tail.swap` (AcqRel),
// and published to the consumer either through `old_tail.next` or `head`
// with a Release store. The consumer only ever dereferences a node after an
// Acquire load of one of those two, so it always sees the item.
//
// `tail` is only touched by RMWs (producers' swap, the consumer's CAS), so
// those operations form a single chain in `tail`'s modification order. A
// producer whose swap returns null has acquired the consumer's emptying CAS,
// and with it every earlier consumer write to `head`; its own `head` store is
// therefore ordered after them. The consumer's follow-up `head` CAS is an RMW
// too and reads the latest `head`, so it can never erase a head a producer has
// just installed.

impl<T> LockFreeQueue<T> {
    /// Create an empty queue that backs off while waiting on in-flight pushes.
    pub fn new() -> Self {
        Self::with_wait_strategy(WaitStrategy::default())
    }

    /// Create an empty queue with the given wait strategy for pop.
    pub fn with_wait_strategy(wait: WaitStrategy) -> Self {
        Self {
            head: CachePadded::new(AtomicPtr::new(ptr::null_mut())),
            tail: CachePadded::new(AtomicPtr::new(ptr::null_mut())),
            wait,
            _marker: PhantomData,
        }
    }

    pub fn wait_strategy(&self) -> WaitStrategy {
        self.wait
    }

    /// Whether there is an item at the front of the queue.
    ///
    /// Exact when called by the consumer. Any other thread only gets a
    /// snapshot that may already be out of date.
    #[inline]
    pub fn has_front(&self) -> bool {
        !self.head.load(Acquire).is_null()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.has_front()
    }

    /// Append `item` to the back of the queue.
    ///
    /// Safe to call from any number of threads at once. Never blocks and
    /// finishes in a constant number of atomic operations. Aborts on
    /// allocation failure like any other Rust allocation; use
    /// [`try_push`](Self::try_push) to get the item back instead.
    pub fn push(&self, item: T) {
        let node = Box::into_raw(Box::new(Node::new(item)));
        // Safety: `node` is a fresh, exclusively owned allocation.
        unsafe { self.link(node) }
    }

    /// Append a clone of `item`.
    ///
    /// The clone is made before the queue is touched, so a panicking `Clone`
    /// leaves the queue exactly as it was.
    pub fn push_clone(&self, item: &T)
    where
        T: Clone,
    {
        self.push(item.clone());
    }

    /// Append `item`, handing it back if the node cannot be allocated.
    ///
    /// On failure the queue is left untouched.
    pub fn try_push(&self, item: T) -> Result<(), PushError<T>> {
        // Node<T> always carries its `next` pointer, so the layout is never
        // zero-sized.
        let layout = Layout::new::<Node<T>>();
        let node = unsafe { alloc::alloc(layout) } as *mut Node<T>;
        if node.is_null() {
            warn!(size = layout.size(), "queue node allocation failed");
            return Err(PushError::new(item));
        }

        // Safety: `node` is a live allocation with the layout of Node<T>, and
        // the Global allocator is the one `Box::from_raw` will free it with.
        unsafe {
            node.write(Node::new(item));
            self.link(node);
        }
        Ok(())
    }

    /// Publish `node` as the new tail.
    ///
    /// # Safety
    /// `node` must be a uniquely owned, initialised `Box<Node<T>>` pointer
    /// with a null `next`.
    unsafe fn link(&self, node: *mut Node<T>) {
        // Linearization point: the order of these swaps is the FIFO order.
        let old_tail = self.tail.swap(node, AcqRel);
        if old_tail.is_null() {
            // The queue was empty; there is no chain to link through.
            self.head.store(node, Release);
        } else {
            // The consumer cannot free `old_tail` until it observes this
            // store (or wins the tail CAS, which our swap has prevented).
            (*old_tail).next.store(node, Release);
        }
    }

    /// The item at the front of the queue.
    ///
    /// # Safety
    /// The caller must be the only consumer and must have just observed
    /// [`has_front`](Self::has_front) return `true`. The returned reference
    /// must not outlive the next consumer operation.
    #[allow(clippy::mut_from_ref)]
    #[inline]
    pub unsafe fn front_unchecked(&self) -> &mut T {
        let head = self.head.load(Acquire);
        debug_assert!(!head.is_null(), "front on an empty queue");
        &mut (*head).item
    }

    /// Remove the item at the front of the queue and return it.
    ///
    /// # Safety
    /// Same contract as [`front_unchecked`](Self::front_unchecked): single
    /// consumer, queue known to be non-empty.
    pub unsafe fn pop_unchecked(&self) -> T {
        let popped = self.unlink();
        // Safety: the head node was produced by Box (or an equivalent
        // Global allocation) and is no longer reachable from the queue.
        let node = Box::from_raw(popped);
        node.item
    }

    /// Remove the item at the front of the queue and drop it.
    ///
    /// The queue is consistent again before the item's destructor runs, so a
    /// panicking `Drop` cannot corrupt it.
    ///
    /// # Safety
    /// Same contract as [`pop_unchecked`](Self::pop_unchecked).
    pub unsafe fn discard_unchecked(&self) {
        drop(self.pop_unchecked());
    }

    /// Detach the head node and return it. Consumer only.
    unsafe fn unlink(&self) -> *mut Node<T> {
        let popped = self.head.load(Acquire);
        debug_assert!(!popped.is_null(), "pop on an empty queue");

        if self
            .tail
            .compare_exchange(popped, ptr::null_mut(), AcqRel, Acquire)
            .is_ok()
        {
            // `popped` was the last node. A push may already have refilled
            // `head` after our tail CAS, in which case this fails and the new
            // head stays.
            let _ = self
                .head
                .compare_exchange(popped, ptr::null_mut(), AcqRel, Acquire);
        } else {
            // A producer has swapped `tail` past `popped` but may not have
            // linked `popped.next` yet. It is one store away.
            let next = self.wait.wait_until(|| {
                let next = (*popped).next.load(Acquire);
                (!next.is_null()).then_some(next)
            });
            self.head.store(next, Release);
        }

        popped
    }

    /// Number of items currently in the queue. O(n).
    ///
    /// Exact only while no push is in flight; a push racing the walk may or
    /// may not be counted.
    ///
    /// # Safety
    /// Must be called from the consumer, never concurrently with a pop.
    pub unsafe fn size_unchecked(&self) -> usize {
        let mut count = 0;
        let mut node = self.head.load(Acquire);
        while !node.is_null() {
            count += 1;
            node = (*node).next.load(Acquire);
        }
        count
    }

    /// Pop and drop every item currently reachable. Returns how many were
    /// removed.
    ///
    /// # Safety
    /// Must be called from the consumer.
    pub unsafe fn clear_unchecked(&self) -> usize {
        let mut removed = 0;
        while self.has_front() {
            self.discard_unchecked();
            removed += 1;
        }
        removed
    }
}

impl<T> Default for LockFreeQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for LockFreeQueue<T> {
    fn drop(&mut self) {
        // Safety: `&mut self` rules out concurrent producers and consumers.
        unsafe {
            self.clear_unchecked();
        }
    }
}
