//! Walkthrough of cache eviction as capacity shrinks

use std::mem;

use anyhow::{ensure, Result};
use objcache::{AnyValue, ObjectCache};

const INT: usize = mem::size_of::<i32>();

/// Render the cached ints among `keys`, skipping evicted ones
fn render_ints(cache: &ObjectCache<i32>, keys: &[usize]) -> String {
    keys.iter()
        .filter_map(|key| cache.find(*key))
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render cached ints and int lists, whichever type each key holds
fn render_any(cache: &ObjectCache<AnyValue>, keys: &[usize]) -> Result<String> {
    let mut parts = Vec::new();
    for key in keys {
        let Some(value) = cache.find(*key) else {
            continue;
        };
        if let Ok(int) = value.downcast_ref::<i32>() {
            parts.push(int.to_string());
        } else {
            let list = value.downcast_ref::<Vec<i32>>()?;
            parts.extend(list.iter().map(|v| v.to_string()));
        }
    }
    Ok(parts.join(" "))
}

pub fn run(count: usize) -> Result<()> {
    ensure!(count >= 2, "demo needs at least 2 values, got {count}");

    println!("--- Int Cache ---");
    let int_cache: ObjectCache<i32> = ObjectCache::new();
    let keys: Vec<usize> = (0..count as i32).map(|v| int_cache.insert_auto(v)).collect();
    println!("Cached: {}", render_ints(&int_cache, &keys));

    let freed = int_cache.set_capacity(INT * (count / 2));
    println!("Cached: {}", render_ints(&int_cache, &keys));
    println!("Freed {freed} bytes\n");

    println!("--- Generic Cache ---");
    let cache: ObjectCache = ObjectCache::new();
    let half = count / 2;
    let mut keys: Vec<usize> = (0..half as i32).map(|v| cache.insert_any(v)).collect();
    let list: Vec<i32> = (half as i32..count as i32).collect();
    let list_size = INT * list.len();
    keys.push(cache.insert_any_sized(list, list_size));
    println!("Cached: {}", render_any(&cache, &keys)?);

    for capacity in [INT * (count - half + 1), INT * (half / 2 + 1)] {
        cache.set_capacity(capacity);
        println!("Cached: {}", render_any(&cache, &keys)?);
    }

    let stats = cache.stats().snapshot();
    println!(
        "\n{} inserts, {} evictions ({} bytes)",
        stats.inserts, stats.evictions, stats.evicted_bytes
    );
    Ok(())
}
