//! End-to-end example: learning-automata path search on two tiny graphs.
//!
//! Run with `RUST_LOG=lapath=debug` to see per-search summaries.

use lapath::{EdgeRecord, LaPathSearch, PathSearch, SearchConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // A chain 0->1->...->5: only one possible path.
    let chain: Vec<EdgeRecord> = (0..5)
        .map(|i| EdgeRecord::new(i, i + 1, 1 + i as u64))
        .collect();
    let mut la = LaPathSearch::new(chain);
    println!("chain 0->5: {:?}", la.path(0, 5));

    // Three routes from 0 to 3: 0->1->3 (cost 2), 0->2->3 (cost 10)
    // and a direct but heavy 0->3 (cost 20).
    let diamond = [
        EdgeRecord::new(0, 1, 1),
        EdgeRecord::new(1, 3, 1),
        EdgeRecord::new(0, 2, 5),
        EdgeRecord::new(2, 3, 5),
        EdgeRecord::new(0, 3, 20),
    ];
    let config = SearchConfig::default().with_seed(7).with_iterations(500);
    let mut la = LaPathSearch::with_config(diamond, config)?;
    let path = la.path(0, 3);
    println!("diamond 0->3: {:?} (length {})", path, la.path_length(&path)?);

    println!("learned probabilities at node 0:");
    la.dump_probabilities(0, &mut std::io::stdout())?;

    la.clear();
    println!("after clear: {:?}", la.path(0, 3));
    Ok(())
}
