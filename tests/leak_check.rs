// Heap accounting for the queue, using dhat in testing mode.
//
// dhat allows a single profiler at a time, so everything lives in one test.
//
//   cargo test --test leak_check -- --nocapture

use dmxp_ioqueue::MPSC::{channel, LockFreeQueue};

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

#[test]
#[serial_test::serial]
fn one_node_per_item_and_nothing_left_after_drain() {
    let _profiler = dhat::Profiler::builder().testing().build();

    let baseline = dhat::HeapStats::get().curr_blocks;

    // Each push allocates exactly one node; each pop frees exactly one.
    let queue = LockFreeQueue::new();
    for i in 0..1000u64 {
        queue.push(i);
    }
    let stats = dhat::HeapStats::get();
    assert_eq!(stats.curr_blocks, baseline + 1000);

    for i in 0..400u64 {
        let popped = unsafe { queue.pop_unchecked() };
        assert_eq!(popped, i);
    }
    let stats = dhat::HeapStats::get();
    assert_eq!(stats.curr_blocks, baseline + 600);

    // Dropping a non-empty queue drains it.
    drop(queue);
    let stats = dhat::HeapStats::get();
    assert_eq!(stats.curr_blocks, baseline);

    // Same through the handle pair, with heap-owning items.
    let (producer, mut consumer) = channel::<String>();
    let with_handles = dhat::HeapStats::get().curr_blocks;
    for i in 0..100 {
        producer.push(format!("item {i}"));
    }
    // A node and a string buffer per item.
    let filled = dhat::HeapStats::get().curr_blocks;
    assert_eq!(filled, with_handles + 200);

    let removed = consumer.clear();
    let cleared = dhat::HeapStats::get().curr_blocks;
    assert_eq!(removed, 100);
    assert_eq!(cleared, with_handles);

    drop(producer);
    drop(consumer);
    let stats = dhat::HeapStats::get();
    assert_eq!(stats.curr_blocks, baseline);

    // Printing allocates, so report only once every count has been checked.
    println!(
        "teardown: {} blocks live, peak {} blocks / {} bytes",
        stats.curr_blocks, stats.max_blocks, stats.max_bytes
    );
}
