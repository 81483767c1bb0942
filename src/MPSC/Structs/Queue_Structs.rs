// Error and info types shared by the typed queue, the byte queue and the C ABI

use std::fmt;
use std::io;
use thiserror::Error;

/// Returned by `try_push` when the node for an item cannot be allocated.
///
/// Carries the item back so nothing is lost; the queue itself is unchanged.
#[derive(Error)]
#[error("out of memory while allocating a queue node")]
pub struct PushError<T> {
    item: T,
}

impl<T> PushError<T> {
    pub(crate) fn new(item: T) -> Self {
        Self { item }
    }

    /// Recover the item that could not be pushed.
    pub fn into_inner(self) -> T {
        self.item
    }
}

impl<T> fmt::Debug for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PushError").finish_non_exhaustive()
    }
}

impl<T> From<PushError<T>> for io::Error {
    fn from(_: PushError<T>) -> Self {
        io::Error::from(io::ErrorKind::OutOfMemory)
    }
}

/// Failures reported by the byte-oriented queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// A node or element buffer could not be allocated. The queue is unchanged.
    #[error("out of memory")]
    OutOfMemory,
    /// `front`/`pop` was called with nothing at the front of the queue.
    #[error("queue is empty")]
    Empty,
    /// The caller's buffer length does not match the configured element size.
    #[error("element size mismatch (expected {expected} bytes, got {actual})")]
    SizeMismatch { expected: usize, actual: usize },
    /// Element size zero was requested at construction.
    #[error("element size must be non-zero")]
    InvalidElementSize,
}

impl From<QueueError> for io::Error {
    fn from(err: QueueError) -> Self {
        let kind = match err {
            QueueError::OutOfMemory => io::ErrorKind::OutOfMemory,
            QueueError::Empty => io::ErrorKind::WouldBlock,
            QueueError::SizeMismatch { .. } | QueueError::InvalidElementSize => {
                io::ErrorKind::InvalidInput
            }
        };
        io::Error::new(kind, err)
    }
}

/// Snapshot of a byte queue, filled in by `ioq_info`.
/// ABI-stable; both fields are native-endian u64.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct IoQueueInfo {
    pub element_size: u64,
    pub length: u64,
}
