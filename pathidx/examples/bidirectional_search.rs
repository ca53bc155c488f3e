//! Bidirectional search over a small path index
//!
//! Run with `RUST_LOG=pathidx=debug` to see cache and index logs.

use pathidx::{BidirectionalState, Dictionary, MemoryIndex, RecordCache, SdIterator, SparseVector};
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> pathidx::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pathidx=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Segment names map to offsets; node ids are 2 * (offset + 1) in forward orientation.
    let segments = Dictionary::from_keys(["s1", "s2", "s3", "s4", "s5"])?;
    let node = |name: &str| 2 * (segments.find(name) as u64 + 1);
    let named_paths = [
        vec!["s1", "s2", "s4", "s5"],
        vec!["s1", "s3", "s4", "s5"],
        vec!["s1", "s2", "s4"],
    ];
    let paths: Vec<Vec<u64>> = named_paths
        .iter()
        .map(|path| path.iter().map(|name| node(*name)).collect())
        .collect();

    println!("Building index over {} paths...", paths.len());
    let start = Instant::now();
    let index = MemoryIndex::from_paths(&paths, true)?;
    println!(
        "Indexed {} sequences and {} nodes in {:.3}ms",
        index.sequences(),
        index.node_count(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    let cache = RecordCache::new(&index);
    let pattern = ["s2", "s4"];

    // Start from the middle and grow the pattern in both directions.
    let mut state: BidirectionalState = cache.bd_find(node(pattern[0]))?;
    state = cache.extend_forward_to(state, node(pattern[1]))?;
    println!("\nOccurrences of {pattern:?}: {}", state.size());
    state = cache.extend_backward_to(state, node("s1"))?;
    println!("Occurrences of [\"s1\", \"s2\", \"s4\"]: {}", state.size());
    state = cache.extend_forward_to(state, node("s5"))?;
    println!("Occurrences of [\"s1\", \"s2\", \"s4\", \"s5\"]: {}", state.size());
    println!(
        "Cache holds {} records in {} slots",
        cache.cache_size(),
        cache.cache_capacity()
    );

    // Path start offsets in a concatenation of all paths.
    let mut starts = Vec::with_capacity(paths.len());
    let mut total = 0;
    for path in &paths {
        starts.push(total);
        total += path.len();
    }
    let boundaries = SparseVector::new(&starts, total)?;
    for position in [0, 5, total - 1] {
        let iter = SdIterator::predecessor(&boundaries, position);
        println!("Position {position} lies on path {}", iter.rank());
    }

    // Persist the segment names next to the index.
    let path = std::env::temp_dir().join("pathidx_segments.dict");
    segments.store_to_file(&path)?;
    let loaded = Dictionary::load_from_file(&path)?;
    println!(
        "\nReloaded {} segment names from '{}' ({} bytes)",
        loaded.len(),
        path.display(),
        loaded.serialized_size()
    );
    std::fs::remove_file(&path)?;

    Ok(())
}
