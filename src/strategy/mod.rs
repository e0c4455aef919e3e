// src/strategy/mod.rs

pub mod aco;
pub mod annealing;
pub mod genetic;
pub mod greedy;
pub mod schedule;
pub mod traits;

use rand::rngs::StdRng;
use rand::SeedableRng;

pub use aco::AntColonyOptimizer;
pub use annealing::SimulatedAnnealing;
pub use genetic::GeneticAlgorithm;
pub use traits::{Optimizer, OptimizerOutcome, Progress};

/// A fixed seed replays a run exactly; `None` draws one from the OS.
pub(crate) fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
