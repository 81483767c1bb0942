use crossbeam_utils::Backoff;

/// How the consumer waits while a concurrent push finishes linking its node.
///
/// This is the only place the queue ever waits. The wait is bounded by the
/// producer's own progress: it has already exchanged `tail` and only has a
/// single store left to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaitStrategy {
    /// Spin with exponential backoff, then start yielding the thread.
    /// Keeps the wait short when the producer was preempted mid-push.
    #[default]
    Backoff,
    /// Bare `spin_loop` hint on every retry.
    Spin,
}

impl WaitStrategy {
    /// Poll `probe` until it returns `Some`, waiting between attempts.
    #[inline]
    pub fn wait_until<R>(self, mut probe: impl FnMut() -> Option<R>) -> R {
        match self {
            WaitStrategy::Spin => loop {
                if let Some(value) = probe() {
                    return value;
                }
                std::hint::spin_loop();
            },
            WaitStrategy::Backoff => {
                let backoff = Backoff::new();
                loop {
                    if let Some(value) = probe() {
                        return value;
                    }
                    backoff.snooze();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn returns_immediately_when_ready() {
        let calls = Cell::new(0);
        let value = WaitStrategy::Spin.wait_until(|| {
            calls.set(calls.get() + 1);
            Some(7)
        });
        assert_eq!(value, 7);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn keeps_polling_until_probe_succeeds() {
        for strategy in [WaitStrategy::Spin, WaitStrategy::Backoff] {
            let calls = Cell::new(0);
            let value = strategy.wait_until(|| {
                calls.set(calls.get() + 1);
                (calls.get() == 50).then_some("linked")
            });
            assert_eq!(value, "linked");
            assert_eq!(calls.get(), 50);
        }
    }

    #[test]
    fn backoff_is_default() {
        assert_eq!(WaitStrategy::default(), WaitStrategy::Backoff);
    }
}
