// Byte-oriented queue: fixed-size opaque elements copied in and out of caller buffers

use crate::Core::backoff::WaitStrategy;
use crate::MPSC::Queue::LockFreeQueue;
use crate::MPSC::Structs::Queue_Structs::{IoQueueInfo, QueueError};
use crate::trace::warn;

/// A queue of fixed-size byte elements, for callers that can only hand over
/// raw buffers (see [`crate::ffi`]).
///
/// Every call checks the caller's buffer length against the configured
/// element size and reports failures as [`QueueError`] instead of panicking.
/// Allocation is fallible on the push path, so running out of memory leaves
/// the queue untouched.
///
/// Producer methods (`push_bytes`) are safe from any thread. Consumer
/// methods are `unsafe`: at most one thread may use them at a time.
pub struct ByteQueue {
    queue: LockFreeQueue<Box<[u8]>>,
    element_size: usize,
}

impl ByteQueue {
    /// Create an empty queue for elements of `element_size` bytes.
    pub fn new(element_size: usize) -> Result<Self, QueueError> {
        Self::with_wait_strategy(element_size, WaitStrategy::default())
    }

    pub(crate) fn with_wait_strategy(
        element_size: usize,
        wait: WaitStrategy,
    ) -> Result<Self, QueueError> {
        if element_size == 0 {
            return Err(QueueError::InvalidElementSize);
        }
        Ok(Self {
            queue: LockFreeQueue::with_wait_strategy(wait),
            element_size,
        })
    }

    pub fn element_size(&self) -> usize {
        self.element_size
    }

    #[inline]
    fn check_len(&self, actual: usize) -> Result<(), QueueError> {
        if actual != self.element_size {
            warn!(expected = self.element_size, actual, "element size mismatch");
            return Err(QueueError::SizeMismatch {
                expected: self.element_size,
                actual,
            });
        }
        Ok(())
    }

    pub fn has_front(&self) -> bool {
        self.queue.has_front()
    }

    /// Copy `data` into a new element at the back of the queue.
    ///
    /// # Returns
    /// * `Ok(())` if the element was enqueued
    /// * `Err(QueueError::SizeMismatch)` if `data` is not exactly one element
    /// * `Err(QueueError::OutOfMemory)` if the element or its node could not be allocated
    pub fn push_bytes(&self, data: &[u8]) -> Result<(), QueueError> {
        self.check_len(data.len())?;

        let mut element = Vec::new();
        if element.try_reserve_exact(data.len()).is_err() {
            warn!(len = data.len(), "element allocation failed");
            return Err(QueueError::OutOfMemory);
        }
        element.extend_from_slice(data);

        self.queue
            .try_push(element.into_boxed_slice())
            .map_err(|_| QueueError::OutOfMemory)
    }

    /// Copy the oldest element into `out` without removing it.
    ///
    /// # Safety
    /// Consumer operation: no other thread may run a consumer method concurrently.
    pub unsafe fn front_into(&self, out: &mut [u8]) -> Result<(), QueueError> {
        self.check_len(out.len())?;
        if !self.queue.has_front() {
            return Err(QueueError::Empty);
        }
        out.copy_from_slice(self.queue.front_unchecked());
        Ok(())
    }

    /// Remove the oldest element.
    ///
    /// # Safety
    /// Consumer operation.
    pub unsafe fn pop(&self) -> Result<(), QueueError> {
        if !self.queue.has_front() {
            return Err(QueueError::Empty);
        }
        self.queue.discard_unchecked();
        Ok(())
    }

    /// Move the oldest element into `out` and remove it.
    ///
    /// # Safety
    /// Consumer operation.
    pub unsafe fn pop_into(&self, out: &mut [u8]) -> Result<(), QueueError> {
        self.check_len(out.len())?;
        if !self.queue.has_front() {
            return Err(QueueError::Empty);
        }
        out.copy_from_slice(&self.queue.pop_unchecked());
        Ok(())
    }

    /// Drop every element currently in the queue. Returns the number removed.
    ///
    /// # Safety
    /// Consumer operation.
    pub unsafe fn clear(&self) -> usize {
        self.queue.clear_unchecked()
    }

    /// Number of elements in the queue. O(n).
    ///
    /// # Safety
    /// Consumer operation.
    pub unsafe fn size(&self) -> usize {
        self.queue.size_unchecked()
    }

    /// Element size and current length.
    ///
    /// # Safety
    /// Consumer operation.
    pub unsafe fn info(&self) -> IoQueueInfo {
        IoQueueInfo {
            element_size: self.element_size as u64,
            length: self.size() as u64,
        }
    }

    pub(crate) fn queue(&self) -> &LockFreeQueue<Box<[u8]>> {
        &self.queue
    }
}
