//! Multi-threaded find/insert load against a synchronized cache

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use anyhow::{anyhow, ensure, Result};
use objcache::SynchronizedObjectCache;
use tracing::{debug, info};

pub fn run(capacity: usize, threads: usize, ops: usize) -> Result<()> {
    ensure!(threads > 0, "at least one worker thread is required");

    let cache: Arc<SynchronizedObjectCache<u64>> =
        Arc::new(SynchronizedObjectCache::with_capacity(capacity));
    info!(capacity, threads, ops, "starting stress run");

    let start = Instant::now();
    let workers: Vec<_> = (0..threads)
        .map(|worker| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                let mut keys = Vec::with_capacity(ops);
                for i in 0..ops {
                    let value = (worker * ops + i) as u64;
                    keys.push((cache.insert_auto(value), value));

                    // Re-read an older key, which may have been evicted
                    let (key, expected) = keys[i / 2];
                    if let Some(found) = cache.find(key) {
                        if found != expected {
                            return Err(anyhow!(
                                "key {key} returned {found}, expected {expected}"
                            ));
                        }
                    }
                }
                debug!(worker, "worker finished");
                Ok(())
            })
        })
        .collect();

    for handle in workers {
        handle
            .join()
            .map_err(|_| anyhow!("worker thread panicked"))??;
    }
    let elapsed = start.elapsed();

    let stats = cache.stats().snapshot();
    info!(
        elapsed_ms = elapsed.as_millis() as u64,
        size = cache.size(),
        count = cache.len(),
        "stress run complete"
    );
    println!(
        "{} inserts, {} hits, {} misses (hit ratio {:.2}), {} evictions",
        stats.inserts,
        stats.hits,
        stats.misses,
        stats.hit_ratio(),
        stats.evictions
    );
    ensure!(
        cache.size() <= cache.capacity(),
        "cache size {} exceeds capacity {}",
        cache.size(),
        cache.capacity()
    );
    Ok(())
}
