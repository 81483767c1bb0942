// In demos/logger.rs
//
// Worker threads hand formatted log records to one writer thread through the
// queue, so none of them ever waits on the stdout lock.
//
//   cargo run --example logger -- <records_per_worker> [workers]

use dmxp_ioqueue::MPSC::QueueBuilder;
use dmxp_ioqueue::WaitStrategy;
use std::env;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

struct LogRecord {
    worker: usize,
    seq: usize,
    at: Instant,
    message: String,
}

fn main() -> std::io::Result<()> {
    dmxp_ioqueue::trace::init_tracing();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <records_per_worker> [workers]", args[0]);
        std::process::exit(1);
    }

    let per_worker: usize = args[1].parse().expect("Invalid number of records");
    let workers: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(4);

    let (producer, mut consumer) = QueueBuilder::new()
        .with_wait_strategy(WaitStrategy::Backoff)
        .build::<LogRecord>();

    let running = Arc::new(AtomicBool::new(true));
    let running_for_handler = Arc::clone(&running);

    // Handle Ctrl+C to stop the workers early
    ctrlc::set_handler(move || {
        running_for_handler.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");

    let finished = Arc::new(AtomicUsize::new(0));
    let start = Instant::now();

    let handles: Vec<_> = (0..workers)
        .map(|worker| {
            let producer = producer.clone();
            let running = Arc::clone(&running);
            let finished = Arc::clone(&finished);
            thread::spawn(move || {
                for seq in 0..per_worker {
                    if !running.load(Ordering::Relaxed) {
                        break;
                    }
                    producer.push(LogRecord {
                        worker,
                        seq,
                        at: Instant::now(),
                        message: format!("processed job {seq}"),
                    });
                }
                finished.fetch_add(1, Ordering::SeqCst);
            })
        })
        .collect();
    drop(producer);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut written = 0usize;
    loop {
        match consumer.pop() {
            Some(record) => {
                writeln!(
                    out,
                    "[{:.3?}] worker={} seq={} {}",
                    record.at.duration_since(start),
                    record.worker,
                    record.seq,
                    record.message
                )?;
                written += 1;
            }
            None => {
                if finished.load(Ordering::SeqCst) == workers && !consumer.has_front() {
                    break;
                }
                thread::sleep(Duration::from_micros(50));
            }
        }
    }
    drop(out);

    for h in handles {
        let _ = h.join();
    }

    println!(
        "Logger: wrote {} records from {} workers in {:.2?}",
        written,
        workers,
        start.elapsed()
    );
    Ok(())
}
