// Module naming follows project convention (MPSC = Multi-Producer Single-Consumer)
#[allow(non_snake_case)]
pub mod MPSC;

#[allow(non_snake_case)]
pub mod Core;

#[allow(non_snake_case)]
mod Debug {
    pub mod StructDebug;
}

pub mod ffi;
pub mod trace;

pub use Core::WaitStrategy;
pub use MPSC::{channel, ByteQueue, Consumer, LockFreeQueue, Producer, QueueBuilder};
