/// Concurrency test cases shared by every way of constructing a `HashTable`.
///
/// `$suite` names the generated module and `$new` is an expression creating an
/// empty table with the default resize policy.
#[macro_export]
macro_rules! write_test_cases_for_table {
    ($suite:ident, $new:expr) => {
        mod $suite {
            #[allow(unused_imports)]
            use super::*;
            use $crate::cht::test_util::{hex, keys_for_thread, Scoreboard};

            use std::sync::{Arc, Barrier};
            use std::thread;

            const NUM_THREADS: usize = 8;

            #[cfg(not(skip_large_mem_tests))]
            const NUM_KEYS: usize = 1 << 16;
            #[cfg(skip_large_mem_tests)]
            const NUM_KEYS: usize = 1 << 12;

            const YIELD_EVERY: usize = 64;

            fn spawn_all<F>(f: F) -> Vec<thread::JoinHandle<()>>
            where
                F: Fn(usize) + Send + Sync + 'static,
            {
                let f = Arc::new(f);
                let barrier = Arc::new(Barrier::new(NUM_THREADS));

                (0..NUM_THREADS)
                    .map(|t| {
                        let f = Arc::clone(&f);
                        let barrier = Arc::clone(&barrier);

                        thread::spawn(move || {
                            barrier.wait();
                            f(t);
                        })
                    })
                    .collect()
            }

            fn join_all(threads: Vec<thread::JoinHandle<()>>) {
                for result in threads.into_iter().map(|t| t.join()) {
                    assert!(result.is_ok());
                }
            }

            // Whether every thread must have won a race. With fewer cores than
            // threads, one thread can be descheduled until its neighbours have
            // swept past all of its leading keys, so only one winner per key
            // is checked then.
            fn assert_every_thread_won(board: &Scoreboard, op: &str) {
                let cores = thread::available_parallelism().map_or(1, |n| n.get());
                if cores < NUM_THREADS {
                    return;
                }

                let wins = board.wins_per_thread(NUM_THREADS);
                for (t, n) in wins.iter().enumerate() {
                    assert!(*n > 0, "thread {t} never won an {op} race: {wins:?}");
                }
            }

            #[test]
            fn insertion() {
                const MAX_VALUE: usize = 512;

                let table = $new;

                for i in 0..MAX_VALUE {
                    assert!(table.insert(hex(i)));

                    assert!(!table.is_empty());
                    assert_eq!(table.len(), i + 1);

                    for j in 0..=i {
                        assert!(table.contains(hex(j)));
                        assert!(!table.insert(hex(j)));
                    }

                    for k in i + 1..MAX_VALUE {
                        assert!(!table.contains(hex(k)));
                    }
                }
            }

            #[test]
            fn concurrent_insertion_of_the_same_keys() {
                let table = Arc::new($new);
                let board = Arc::new(Scoreboard::new(NUM_KEYS));

                let threads = {
                    let table = Arc::clone(&table);
                    let board = Arc::clone(&board);
                    spawn_all(move |t| {
                        for (n, i) in keys_for_thread(t, NUM_THREADS, NUM_KEYS).enumerate() {
                            if table.insert(hex(i)) {
                                board.record(i, t);
                            }
                            if n % YIELD_EVERY == 0 {
                                thread::yield_now();
                            }
                        }
                    })
                };
                join_all(threads);

                for i in 0..NUM_KEYS {
                    assert_eq!(board.count(i), 1, "key {i}");
                    assert!(table.contains(hex(i)));
                }
                assert_eq!(table.len(), NUM_KEYS);
                assert!(table.bucket_count() > table.policy().min_buckets());
                assert_every_thread_won(&board, "insert");
            }

            #[test]
            fn concurrent_query() {
                let table = $new;
                for i in (0..NUM_KEYS).step_by(2) {
                    assert!(table.insert(hex(i)));
                }
                let table = Arc::new(table);
                let bucket_count = table.bucket_count();
                let board = Arc::new(Scoreboard::new(NUM_KEYS));

                let threads = {
                    let table = Arc::clone(&table);
                    let board = Arc::clone(&board);
                    spawn_all(move |t| {
                        for i in 0..NUM_KEYS {
                            if table.contains(hex(i)) {
                                board.record(i, t);
                            }
                        }
                    })
                };
                join_all(threads);

                for i in 0..NUM_KEYS {
                    let expected = if i % 2 == 0 { NUM_THREADS } else { 0 };
                    assert_eq!(board.count(i), expected, "key {i}");
                }
                assert_eq!(table.len(), NUM_KEYS / 2);
                assert_eq!(table.bucket_count(), bucket_count);
            }

            #[test]
            fn concurrent_erasure_of_the_same_keys() {
                let table = $new;
                for i in 0..NUM_KEYS {
                    assert!(table.insert(hex(i)));
                }
                let table = Arc::new(table);
                let board = Arc::new(Scoreboard::new(NUM_KEYS));

                let threads = {
                    let table = Arc::clone(&table);
                    let board = Arc::clone(&board);
                    spawn_all(move |t| {
                        for (n, i) in keys_for_thread(t, NUM_THREADS, NUM_KEYS).enumerate() {
                            if table.erase(hex(i)) {
                                board.record(i, t);
                            }
                            if n % YIELD_EVERY == 0 {
                                thread::yield_now();
                            }
                        }
                    })
                };
                join_all(threads);

                for i in 0..NUM_KEYS {
                    assert_eq!(board.count(i), 1, "key {i}");
                    assert!(!table.contains(hex(i)));
                }
                assert!(table.is_empty());
                assert_every_thread_won(&board, "erase");
            }

            #[test]
            fn concurrent_insertion_and_erasure() {
                const MAX_VALUE: usize = 512;
                const HALF: usize = NUM_THREADS * MAX_VALUE;

                // Erasers own `HALF..2 * HALF`, inserters own `0..HALF`.
                let table = $new;
                for i in HALF..2 * HALF {
                    assert!(table.insert(hex(i)));
                }
                let table = Arc::new(table);

                let threads = {
                    let table = Arc::clone(&table);
                    spawn_all(move |t| {
                        if t % 2 == 0 {
                            for j in t * MAX_VALUE..(t + 2) * MAX_VALUE {
                                assert!(table.insert(hex(j)));
                            }
                        } else {
                            for j in HALF + (t - 1) * MAX_VALUE..HALF + (t + 1) * MAX_VALUE {
                                assert!(table.erase(hex(j)));
                            }
                        }
                    })
                };
                join_all(threads);

                assert_eq!(table.len(), HALF);
                for i in 0..HALF {
                    assert!(table.contains(hex(i)));
                }
                for i in HALF..2 * HALF {
                    assert!(!table.contains(hex(i)));
                }
            }

            #[test]
            fn concurrent_churn_keeps_the_count_exact() {
                const ROUNDS: usize = 2_000;
                const KEYS: usize = 64;

                let table = Arc::new($new);

                let threads = {
                    let table = Arc::clone(&table);
                    spawn_all(move |t| {
                        for r in 0..ROUNDS {
                            let key = hex((r * 7 + t) % KEYS);
                            if (r + t) % 3 == 0 {
                                table.erase(&key);
                            } else {
                                table.insert(&key);
                            }
                            table.contains(&key);
                        }
                    })
                };
                join_all(threads);

                let present = (0..KEYS).filter(|&i| table.contains(hex(i))).count();
                assert_eq!(table.len(), present);
                assert!(table.bucket_count() >= table.policy().min_buckets());
            }
        }
    };
}
