use dmxp_ioqueue::MPSC::{channel, LockFreeQueue, QueueBuilder};
use dmxp_ioqueue::WaitStrategy;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn push_one_then_pop() {
    let (producer, mut consumer) = channel::<i32>();
    assert!(!consumer.has_front());
    assert_eq!(consumer.size(), 0);

    producer.push(1);
    assert!(consumer.has_front());
    assert_eq!(consumer.front(), Some(&mut 1));
    assert_eq!(consumer.size(), 1);

    assert_eq!(consumer.pop(), Some(1));
    assert!(!consumer.has_front());
    assert_eq!(consumer.size(), 0);
}

#[test]
fn two_items_come_out_in_order() {
    let (producer, mut consumer) = channel::<i32>();

    producer.push(2);
    producer.push(3);
    assert_eq!(consumer.front().copied(), Some(2));
    assert_eq!(consumer.size(), 2);

    assert!(consumer.discard());
    assert_eq!(consumer.front().copied(), Some(3));
    assert_eq!(consumer.size(), 1);

    assert!(consumer.discard());
    assert!(!consumer.has_front());
    assert!(!consumer.discard());
}

#[test]
fn push_many_pop_half() {
    let (producer, mut consumer) = channel::<usize>();

    for i in 0..64 {
        producer.push(i);
        assert!(consumer.has_front());
        // The front never moves while only pushing.
        assert_eq!(consumer.front().copied(), Some(0));
    }

    for i in 0..32 {
        assert_eq!(consumer.front().copied(), Some(i));
        assert_eq!(consumer.pop(), Some(i));
    }

    assert!(consumer.has_front());
    assert_eq!(consumer.size(), 32);
}

#[test]
fn clear_empties_any_queue() {
    let (producer, mut consumer) = channel::<String>();
    assert_eq!(consumer.clear(), 0);

    for i in 0..10 {
        producer.push(format!("record {i}"));
    }
    assert_eq!(consumer.clear(), 10);
    assert!(!consumer.has_front());
    assert_eq!(consumer.size(), 0);

    // Still usable afterwards.
    producer.push(String::from("again"));
    assert_eq!(consumer.pop().as_deref(), Some("again"));
}

#[test]
fn front_is_mutable_in_place() {
    let (producer, mut consumer) = channel::<Vec<u8>>();
    producer.push(vec![1, 2]);
    producer.push(vec![9]);

    consumer.front().unwrap().push(3);
    assert_eq!(consumer.pop(), Some(vec![1, 2, 3]));
    assert_eq!(consumer.pop(), Some(vec![9]));
}

#[test]
fn emptiness_equivalence() {
    let (producer, mut consumer) = channel::<u8>();
    let check = |consumer: &mut dmxp_ioqueue::Consumer<u8>| {
        let has_front = consumer.has_front();
        assert_eq!(has_front, consumer.size() != 0);
        assert_eq!(has_front, consumer.front().is_some());
        assert_eq!(has_front, !consumer.is_empty());
    };

    check(&mut consumer);
    producer.push(1);
    check(&mut consumer);
    consumer.pop();
    check(&mut consumer);
}

#[test]
fn unchecked_surface_matches_checked() {
    let queue = LockFreeQueue::new();
    queue.push(10u64);
    queue.push_clone(&20u64);

    unsafe {
        assert_eq!(*queue.front_unchecked(), 10);
        assert_eq!(queue.size_unchecked(), 2);
        assert_eq!(queue.pop_unchecked(), 10);
        *queue.front_unchecked() += 1;
        assert_eq!(queue.pop_unchecked(), 21);
    }
    assert!(queue.is_empty());
}

#[test]
fn try_iter_drains_everything_published() {
    let (producer, mut consumer) = channel::<u32>();
    for i in 0..100 {
        producer.push(i);
    }

    let drained: Vec<u32> = consumer.try_iter().collect();
    assert_eq!(drained, (0..100).collect::<Vec<_>>());
    assert!(consumer.try_iter().next().is_none());
}

#[test]
fn matches_vecdeque_model() {
    let mut rng = fastrand::Rng::with_seed(0x5eed);
    for strategy in [WaitStrategy::Backoff, WaitStrategy::Spin] {
        let (producer, mut consumer) = QueueBuilder::new().with_wait_strategy(strategy).build::<u64>();
        let mut model = VecDeque::new();

        for _ in 0..10_000 {
            match rng.u8(0..10) {
                0..=5 => {
                    let value = rng.u64(..);
                    producer.push(value);
                    model.push_back(value);
                }
                6..=8 => assert_eq!(consumer.pop(), model.pop_front()),
                _ => assert_eq!(consumer.front().copied(), model.front().copied()),
            }
            assert_eq!(consumer.has_front(), !model.is_empty());
        }

        assert_eq!(consumer.size(), model.len());
        assert_eq!(consumer.try_iter().collect::<Vec<_>>(), Vec::from(model));
    }
}

struct PanicOnClone(u32);

impl Clone for PanicOnClone {
    fn clone(&self) -> Self {
        panic!("clone of {} refused", self.0);
    }
}

#[test]
fn failed_clone_leaves_queue_untouched() {
    let (producer, mut consumer) = channel::<PanicOnClone>();
    producer.push(PanicOnClone(1));
    producer.push(PanicOnClone(2));

    let result = panic::catch_unwind(AssertUnwindSafe(|| producer.push_clone(&PanicOnClone(3))));
    assert!(result.is_err());

    assert_eq!(consumer.size(), 2);
    assert_eq!(consumer.pop().map(|item| item.0), Some(1));
    assert_eq!(consumer.pop().map(|item| item.0), Some(2));
    assert!(!consumer.has_front());
}

struct PanicOnDrop {
    armed: bool,
    drops: Arc<AtomicUsize>,
}

impl Drop for PanicOnDrop {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
        if self.armed {
            panic!("destructor failure");
        }
    }
}

#[test]
fn panicking_destructor_does_not_corrupt_queue() {
    let drops = Arc::new(AtomicUsize::new(0));
    let (producer, mut consumer) = channel::<PanicOnDrop>();
    producer.push(PanicOnDrop { armed: true, drops: drops.clone() });
    producer.push(PanicOnDrop { armed: false, drops: drops.clone() });

    let result = panic::catch_unwind(AssertUnwindSafe(|| consumer.discard()));
    assert!(result.is_err());
    assert_eq!(drops.load(Ordering::SeqCst), 1);

    // The failing item is gone and the next one is at the front.
    assert_eq!(consumer.size(), 1);
    assert!(consumer.front().map(|item| !item.armed).unwrap_or(false));
    assert!(consumer.discard());
    assert!(!consumer.has_front());
    assert_eq!(drops.load(Ordering::SeqCst), 2);
}

#[test]
fn dropping_the_queue_drops_remaining_items() {
    let drops = Arc::new(AtomicUsize::new(0));
    {
        let queue = LockFreeQueue::new();
        for _ in 0..5 {
            queue.push(PanicOnDrop { armed: false, drops: drops.clone() });
        }
    }
    assert_eq!(drops.load(Ordering::SeqCst), 5);

    let (producer, consumer) = channel::<PanicOnDrop>();
    producer.push(PanicOnDrop { armed: false, drops: drops.clone() });
    drop(consumer);
    assert!(producer.is_disconnected());
    assert_eq!(drops.load(Ordering::SeqCst), 5);
    drop(producer);
    assert_eq!(drops.load(Ordering::SeqCst), 6);
}

#[test]
fn try_push_succeeds_under_normal_conditions() {
    let (producer, mut consumer) = channel::<String>();
    assert!(producer.try_push(String::from("ok")).is_ok());
    assert!(!producer.is_disconnected());
    assert_eq!(consumer.pop().as_deref(), Some("ok"));
}

#[test]
fn consumer_can_mint_producers() {
    let (first, mut consumer) = channel::<u8>();
    let second = consumer.producer();
    let third = second.clone();

    first.push(1);
    second.push(2);
    third.push(3);
    assert_eq!(consumer.try_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[test]
fn debug_output_names_the_parts() {
    let (producer, consumer) = channel::<u8>();
    producer.push(4);

    let consumer_dbg = format!("{:?}", consumer);
    assert!(consumer_dbg.contains("Consumer"));
    assert!(consumer_dbg.contains("size: 1"));

    let producer_dbg = format!("{:?}", producer);
    assert!(producer_dbg.contains("disconnected: false"));
    println!("Consumer Struct: {:#?}", consumer);
}
