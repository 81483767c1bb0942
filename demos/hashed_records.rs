// In demos/hashed_records.rs
//
// Drives the C ABI the way a foreign caller would: fixed-size records made of
// a sequence number and the SHA-256 of "message_<n>", pushed by several
// threads and verified by one consumer.
//
//   cargo run --example hashed_records -- <num_messages> [producers]

use dmxp_ioqueue::ffi::*;
use sha2::{Digest, Sha256};
use std::env;
use std::ffi::c_void;
use std::ptr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

const RECORD_SIZE: usize = 8 + 32;

#[derive(Clone, Copy)]
struct SharedHandle(*mut IoQueueHandle);
unsafe impl Send for SharedHandle {}
unsafe impl Sync for SharedHandle {}

fn digest_for(n: u64) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(format!("message_{}", n).as_bytes());
    hasher.finalize().into()
}

fn main() -> std::io::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <num_messages> [producers]", args[0]);
        std::process::exit(1);
    }

    let num_messages: usize = args[1].parse().expect("Invalid number of messages");
    let producers: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(4);

    let mut raw: *mut IoQueueHandle = ptr::null_mut();
    let result = unsafe { ioq_init(&mut raw, RECORD_SIZE) };
    if result != IOQ_RESULT_SUCCESS {
        return Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("ioq_init failed: {}", result),
        ));
    }
    let handle = SharedHandle(raw);

    let keep_alive = Arc::new(AtomicBool::new(true));
    let keep_alive_for_handler = Arc::clone(&keep_alive);
    ctrlc::set_handler(move || {
        keep_alive_for_handler.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");

    let next = Arc::new(AtomicUsize::new(0));
    let start = std::time::Instant::now();

    let handles: Vec<_> = (0..producers)
        .map(|_| {
            let next = Arc::clone(&next);
            let keep_alive = Arc::clone(&keep_alive);
            thread::spawn(move || {
                let handle = handle;
                let mut record = [0u8; RECORD_SIZE];
                loop {
                    let n = next.fetch_add(1, Ordering::Relaxed);
                    if n >= num_messages || !keep_alive.load(Ordering::Relaxed) {
                        break;
                    }
                    record[..8].copy_from_slice(&(n as u64).to_le_bytes());
                    record[8..].copy_from_slice(&digest_for(n as u64));
                    let result = unsafe {
                        ioq_push(handle.0, record.as_ptr() as *const c_void, RECORD_SIZE)
                    };
                    if result != IOQ_RESULT_SUCCESS {
                        eprintln!("Producer: push failed with {}", result);
                        break;
                    }
                }
            })
        })
        .collect();

    println!("Consumer: verifying {} records...", num_messages);
    let mut received = 0;
    let mut corrupted = 0;
    let mut record = [0u8; RECORD_SIZE];
    while received < num_messages && keep_alive.load(Ordering::Relaxed) {
        if unsafe { ioq_has_front(handle.0) } != IOQ_RESULT_TRUE {
            std::hint::spin_loop();
            continue;
        }
        let result = unsafe { ioq_front(handle.0, record.as_mut_ptr() as *mut c_void, RECORD_SIZE) };
        if result != IOQ_RESULT_SUCCESS {
            eprintln!("Consumer: front failed with {}", result);
            break;
        }
        let result = unsafe { ioq_pop(handle.0) };
        if result != IOQ_RESULT_SUCCESS {
            eprintln!("Consumer: pop failed with {}", result);
            break;
        }
        let mut seq = [0u8; 8];
        seq.copy_from_slice(&record[..8]);
        if record[8..] != digest_for(u64::from_le_bytes(seq)) {
            corrupted += 1;
        }
        received += 1;
        if received % 100_000 == 0 {
            println!("Consumer: verified {} records", received);
        }
    }

    for h in handles {
        let _ = h.join();
    }

    println!(
        "Consumer: {} records, {} corrupted, {:.2?}",
        received,
        corrupted,
        start.elapsed()
    );

    unsafe { ioq_free(handle.0) };
    Ok(())
}
