pub mod backoff;

pub use backoff::WaitStrategy;
