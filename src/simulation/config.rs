// src/simulation/config.rs

use std::path::PathBuf;

/// How completions after the deadline count towards the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LateCompletionPolicy {
    /// Late orders subtract from the total (the plain linear formula).
    #[default]
    Penalize,
    /// Late orders contribute nothing.
    Clamp,
}

#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Stop advancing once the turn counter passes the deadline.
    pub bounded: bool,
    pub late_policy: LateCompletionPolicy,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            bounded: false,
            late_policy: LateCompletionPolicy::Penalize,
        }
    }
}

/// Which warehouse an ant picks among those holding the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionRule {
    /// The candidate with the lowest `tau^alpha * eta^beta`.
    #[default]
    Minimum,
    /// Roulette wheel, proportional to `tau^alpha * eta^beta`.
    Proportional,
}

/// How much pheromone an ant lays on the pairs it used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepositRule {
    /// `q / score`: higher scores lay less.
    #[default]
    InverseScore,
    /// `q * score / 100`: higher scores lay more.
    ProportionalScore,
}

#[derive(Debug, Clone)]
pub struct AcoConfig {
    pub num_ants: usize,
    pub num_iterations: usize,
    pub alpha: f64,
    pub beta: f64,
    pub evaporation_rate: f64,
    pub q: f64,
    pub selection: SelectionRule,
    pub deposit: DepositRule,
    pub late_policy: LateCompletionPolicy,
    pub seed: Option<u64>,
    pub parallel: bool,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            num_ants: 10,
            num_iterations: 10,
            alpha: 1.0,
            beta: 2.0,
            evaporation_rate: 0.5,
            q: 100.0,
            selection: SelectionRule::Minimum,
            deposit: DepositRule::InverseScore,
            late_policy: LateCompletionPolicy::Penalize,
            seed: None,
            parallel: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnnealingConfig {
    pub initial_temperature: f64,
    pub cooling_rate: f64,
    pub min_temperature: f64,
    pub max_iterations: usize,
    pub late_policy: LateCompletionPolicy,
    pub seed: Option<u64>,
    /// Where to dump the best schedule when the run ends.
    pub result_path: Option<PathBuf>,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            cooling_rate: 0.95,
            min_temperature: 0.1,
            max_iterations: 1000,
            late_policy: LateCompletionPolicy::Penalize,
            seed: None,
            result_path: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneticConfig {
    pub population_size: usize,
    pub num_generations: usize,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    pub seed: Option<u64>,
    pub parallel: bool,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 5,
            num_generations: 50,
            crossover_rate: 0.7,
            mutation_rate: 0.1,
            seed: None,
            parallel: false,
        }
    }
}
