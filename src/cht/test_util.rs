use std::sync::atomic::{AtomicUsize, Ordering};

mod tests;

const NO_WINNER: usize = usize::MAX;

/// The lowercase hexadecimal form of `i`, the key format used by the tests.
pub(crate) fn hex(i: usize) -> String {
    format!("{i:x}")
}

/// Records, for every key, how many threads saw an operation succeed and which
/// thread got there first.
pub(crate) struct Scoreboard {
    counters: Box<[AtomicUsize]>,
    winners: Box<[AtomicUsize]>,
}

impl Scoreboard {
    pub(crate) fn new(num_keys: usize) -> Self {
        Self {
            counters: (0..num_keys).map(|_| AtomicUsize::new(0)).collect(),
            winners: (0..num_keys).map(|_| AtomicUsize::new(NO_WINNER)).collect(),
        }
    }

    pub(crate) fn record(&self, key: usize, thread: usize) {
        if self.counters[key].fetch_add(1, Ordering::Relaxed) == 0 {
            self.winners[key].store(thread, Ordering::Relaxed);
        }
    }

    pub(crate) fn count(&self, key: usize) -> usize {
        self.counters[key].load(Ordering::Relaxed)
    }

    /// Number of keys first won by each thread.
    pub(crate) fn wins_per_thread(&self, num_threads: usize) -> Vec<usize> {
        let mut wins = vec![0; num_threads];
        for winner in self.winners.iter() {
            let t = winner.load(Ordering::Relaxed);
            if t != NO_WINNER {
                wins[t] += 1;
            }
        }
        wins
    }
}

/// Visits every key once, starting at an offset that depends on the thread, so
/// that threads start out on different buckets and then contend on every key.
pub(crate) fn keys_for_thread(
    thread: usize,
    num_threads: usize,
    num_keys: usize,
) -> impl Iterator<Item = usize> {
    let start = thread * (num_keys / num_threads);
    (0..num_keys).map(move |i| (start + i) % num_keys)
}
