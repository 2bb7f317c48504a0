//! Concurrency Tests
//!
//! Hammers one store from many threads. Concurrent cold misses may each run
//! the producer, but the table must end with one entry per key.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use mart_cache::CacheStore;

const THREADS: usize = 16;

#[test]
fn test_cold_key_stampede_leaves_single_entry() {
    let store: Arc<CacheStore<u64>> = Arc::new(CacheStore::new(300));
    let calls = Arc::new(AtomicUsize::new(0));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let store = Arc::clone(&store);
            let calls = Arc::clone(&calls);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                store.get_or_compute("dashboard:stats", || -> Result<u64, ()> {
                    calls.fetch_add(1, Ordering::SeqCst);
                    // Widen the window so several threads miss together
                    thread::sleep(Duration::from_millis(20));
                    Ok(i as u64)
                })
            })
        })
        .collect();

    let results: Vec<u64> = handles
        .into_iter()
        .map(|h| h.join().expect("thread panicked").expect("producer failed"))
        .collect();

    let calls = calls.load(Ordering::SeqCst);
    assert!(calls >= 1 && calls <= THREADS, "producer ran {calls} times");
    assert_eq!(store.len(), 1);

    let stored = store.get("dashboard:stats").expect("entry missing");
    assert!(results.contains(&stored), "stored value came from some producer");
}

#[test]
fn test_mixed_operations_keep_table_consistent() {
    let store: Arc<CacheStore<String>> = Arc::new(CacheStore::new(300));
    let keys: Vec<String> = (0..8)
        .map(|i| format!("analytics:top_products:{i}"))
        .collect();
    let keys = Arc::new(keys);

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let store = Arc::clone(&store);
            let keys = Arc::clone(&keys);
            thread::spawn(move || {
                for round in 0..200 {
                    let key = &keys[(t + round) % keys.len()];
                    match round % 6 {
                        0 => store.set(key.clone(), format!("{t}-{round}")),
                        1 => {
                            let _ = store.get(key);
                        }
                        2 => {
                            let _: Result<String, ()> =
                                store.get_or_compute(key, || Ok(format!("computed-{t}")));
                        }
                        3 => store.delete(key),
                        4 => {
                            let _ = store.stats();
                        }
                        _ => {
                            let _: Result<String, &str> =
                                store.get_or_compute(key, || Err("query failed"));
                        }
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread panicked");
    }

    let stats = store.stats();
    assert!(stats.total_keys <= keys.len());
    assert_eq!(stats.total_keys, stats.active_keys + stats.expired_keys);

    // Every surviving key is one of ours and readable.
    for key in keys.iter() {
        if let Some(value) = store.get(key) {
            assert!(!value.is_empty());
        }
    }

    // One read-through per key afterwards leaves exactly one entry each.
    for key in keys.iter() {
        let _: Result<String, ()> = store.get_or_compute(key, || Ok("final".to_string()));
    }
    assert_eq!(store.len(), keys.len());
}

#[test]
fn test_concurrent_invalidation_and_writes() {
    let store: Arc<CacheStore<u32>> = Arc::new(CacheStore::new(300));

    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for i in 0..500u32 {
                store.set(format!("dashboard:counter:{}", i % 10), i);
                store.set(format!("analytics:sales_by_date:{}", i % 10), i);
            }
        })
    };
    let invalidator = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for _ in 0..100 {
                store.invalidate_matching("dashboard");
            }
        })
    };

    writer.join().expect("writer panicked");
    invalidator.join().expect("invalidator panicked");

    store.invalidate_matching("dashboard");
    assert_eq!(store.len(), 10, "analytics keys untouched by dashboard sweeps");
}
