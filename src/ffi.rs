// C ABI over ByteQueue. Every entry point returns an IoQueueResult code and never unwinds.

use crate::MPSC::Structs::{IoQueueInfo, QueueError};
use crate::MPSC::ByteQueue;
use crate::trace::{debug, warn};
use libc::{c_int, c_void, size_t};
use std::alloc::{self, Layout};
use std::ptr;
use std::slice;

/// All io-queue operations return an `IoQueueResult`.
pub type IoQueueResult = c_int;

// Result codes
pub const IOQ_RESULT_TRUE: IoQueueResult = 2;
pub const IOQ_RESULT_SUCCESS: IoQueueResult = 1;
pub const IOQ_RESULT_FALSE: IoQueueResult = 0;
pub const IOQ_RESULT_OUT_OF_MEMORY: IoQueueResult = -1;
pub const IOQ_RESULT_NULL_POINTER: IoQueueResult = -2;
pub const IOQ_RESULT_EMPTY: IoQueueResult = -3;
pub const IOQ_RESULT_SIZE_MISMATCH: IoQueueResult = -4;
pub const IOQ_RESULT_INVALID_ARG: IoQueueResult = -5;

/// Handle to a byte queue instance (opaque pointer)
pub struct IoQueueHandle {
    inner: ByteQueue,
}

fn result_code(result: Result<(), QueueError>) -> IoQueueResult {
    match result {
        Ok(()) => IOQ_RESULT_SUCCESS,
        Err(QueueError::OutOfMemory) => IOQ_RESULT_OUT_OF_MEMORY,
        Err(QueueError::Empty) => IOQ_RESULT_EMPTY,
        Err(QueueError::SizeMismatch { .. }) => IOQ_RESULT_SIZE_MISMATCH,
        Err(QueueError::InvalidElementSize) => IOQ_RESULT_INVALID_ARG,
    }
}

// -----------------------------------------------------------------------------
// Lifecycle
// -----------------------------------------------------------------------------

/// Create a queue for elements of `element_size` bytes.
///
/// # Arguments
/// * `handle_out` - Receives the new handle on success; untouched otherwise.
/// * `element_size` - Size in bytes of every element (non-zero).
///
/// # Returns
/// * `IOQ_RESULT_SUCCESS`, `IOQ_RESULT_INVALID_ARG` for a zero size,
///   `IOQ_RESULT_OUT_OF_MEMORY`, or `IOQ_RESULT_NULL_POINTER`.
///
/// # Safety
/// `handle_out` must be null or valid for a pointer write.
#[no_mangle]
pub unsafe extern "C" fn ioq_init(
    handle_out: *mut *mut IoQueueHandle,
    element_size: size_t,
) -> IoQueueResult {
    if handle_out.is_null() {
        return IOQ_RESULT_NULL_POINTER;
    }

    let inner = match ByteQueue::new(element_size) {
        Ok(inner) => inner,
        Err(e) => {
            warn!(element_size, "ioq_init rejected: {}", e);
            return result_code(Err(e));
        }
    };

    // Allocate the handle by hand so exhaustion is reported, not aborted on.
    let layout = Layout::new::<IoQueueHandle>();
    let handle = alloc::alloc(layout) as *mut IoQueueHandle;
    if handle.is_null() {
        return IOQ_RESULT_OUT_OF_MEMORY;
    }
    handle.write(IoQueueHandle { inner });
    *handle_out = handle;

    debug!(element_size, "ioq_init");
    IOQ_RESULT_SUCCESS
}

/// Drain and free a handle. Passing null is a no-op.
///
/// # Safety
/// `handle` must be null or a pointer from `ioq_init` that has not been freed,
/// with no other thread still using it.
#[no_mangle]
pub unsafe extern "C" fn ioq_free(handle: *mut IoQueueHandle) {
    if !handle.is_null() {
        let _ = Box::from_raw(handle); // Drains the queue on drop
    }
}

// -----------------------------------------------------------------------------
// Producer API
// -----------------------------------------------------------------------------

/// Copy one element from `data` onto the back of the queue.
///
/// # Arguments
/// * `handle` - Pointer to `IoQueueHandle`.
/// * `data` - Pointer to the element bytes.
/// * `len` - Length of `data`; must equal the element size.
///
/// # Returns
/// * `IOQ_RESULT_SUCCESS`, or `IOQ_RESULT_OUT_OF_MEMORY` with the queue unchanged.
///
/// # Safety
/// `handle` must come from `ioq_init`; `data` must be readable for `len` bytes.
#[no_mangle]
pub unsafe extern "C" fn ioq_push(
    handle: *mut IoQueueHandle,
    data: *const c_void,
    len: size_t,
) -> IoQueueResult {
    if handle.is_null() || data.is_null() {
        return IOQ_RESULT_NULL_POINTER;
    }

    let queue = &(*handle).inner;
    let bytes = slice::from_raw_parts(data as *const u8, len);
    result_code(queue.push_bytes(bytes))
}

// -----------------------------------------------------------------------------
// Consumer API (one thread at a time)
// -----------------------------------------------------------------------------

/// Check whether the queue has an element at the front.
///
/// # Returns
/// * `IOQ_RESULT_TRUE`, `IOQ_RESULT_FALSE`, or `IOQ_RESULT_NULL_POINTER`.
///
/// # Safety
/// `handle` must come from `ioq_init`.
#[no_mangle]
pub unsafe extern "C" fn ioq_has_front(handle: *mut IoQueueHandle) -> IoQueueResult {
    if handle.is_null() {
        return IOQ_RESULT_NULL_POINTER;
    }

    if (*handle).inner.has_front() {
        IOQ_RESULT_TRUE
    } else {
        IOQ_RESULT_FALSE
    }
}

/// Copy the front element into `out` without removing it.
///
/// # Returns
/// * `IOQ_RESULT_SUCCESS`, `IOQ_RESULT_EMPTY`, or `IOQ_RESULT_SIZE_MISMATCH`
///   if `len` is not the element size.
///
/// # Safety
/// Consumer operation. `out` must be writable for `len` bytes.
#[no_mangle]
pub unsafe extern "C" fn ioq_front(
    handle: *mut IoQueueHandle,
    out: *mut c_void,
    len: size_t,
) -> IoQueueResult {
    if handle.is_null() || out.is_null() {
        return IOQ_RESULT_NULL_POINTER;
    }

    let queue = &(*handle).inner;
    let out = slice::from_raw_parts_mut(out as *mut u8, len);
    result_code(queue.front_into(out))
}

/// Remove the front element.
///
/// # Returns
/// * `IOQ_RESULT_SUCCESS` or `IOQ_RESULT_EMPTY`.
///
/// # Safety
/// Consumer operation.
#[no_mangle]
pub unsafe extern "C" fn ioq_pop(handle: *mut IoQueueHandle) -> IoQueueResult {
    if handle.is_null() {
        return IOQ_RESULT_NULL_POINTER;
    }

    result_code((*handle).inner.pop())
}

/// Remove every element. The handle stays usable.
///
/// # Safety
/// Consumer operation. Only drains what producers have published so far.
#[no_mangle]
pub unsafe extern "C" fn ioq_clear(handle: *mut IoQueueHandle) -> IoQueueResult {
    if handle.is_null() {
        return IOQ_RESULT_NULL_POINTER;
    }

    (*handle).inner.clear();
    IOQ_RESULT_SUCCESS
}

/// Write the number of queued elements to `count_out`. O(n).
///
/// # Safety
/// Consumer operation. `count_out` must be valid for a write.
#[no_mangle]
pub unsafe extern "C" fn ioq_size(handle: *mut IoQueueHandle, count_out: *mut size_t) -> IoQueueResult {
    if handle.is_null() || count_out.is_null() {
        return IOQ_RESULT_NULL_POINTER;
    }

    *count_out = (*handle).inner.size();
    IOQ_RESULT_SUCCESS
}

/// Fill `info_out` with the element size and current length.
///
/// # Safety
/// Consumer operation. `info_out` must be valid for a write.
#[no_mangle]
pub unsafe extern "C" fn ioq_info(handle: *mut IoQueueHandle, info_out: *mut IoQueueInfo) -> IoQueueResult {
    if handle.is_null() || info_out.is_null() {
        return IOQ_RESULT_NULL_POINTER;
    }

    ptr::write(info_out, (*handle).inner.info());
    IOQ_RESULT_SUCCESS
}
