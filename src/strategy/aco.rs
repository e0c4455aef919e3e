// src/strategy/aco.rs

use crate::error::DeliveryError;
use crate::model::{Location, Warehouse};
use crate::simulation::config::{AcoConfig, DepositRule, SelectionRule};
use crate::simulation::context::Simulation;
use crate::simulation::scoring::order_score;
use crate::strategy::schedule::{Command, OrderPlan};
use crate::strategy::seeded_rng;
use crate::strategy::traits::{report, Optimizer, OptimizerOutcome, Progress};
use log::{debug, info};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// One pheromone weight per (warehouse, order) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneTable {
    num_orders: usize,
    values: Vec<f64>,
}

impl PheromoneTable {
    pub fn new(num_warehouses: usize, num_orders: usize, initial: f64) -> Self {
        Self {
            num_orders,
            values: vec![initial; num_warehouses * num_orders],
        }
    }

    pub fn get(&self, warehouse: usize, order: usize) -> f64 {
        self.values[warehouse * self.num_orders + order]
    }

    pub fn evaporate(&mut self, rate: f64) {
        for value in self.values.iter_mut() {
            *value *= 1.0 - rate;
        }
    }

    pub fn deposit(&mut self, warehouse: usize, order: usize, amount: f64) {
        self.values[warehouse * self.num_orders + order] += amount;
    }

    /// End-of-iteration update: evaporate everything, then let every ant
    /// deposit on the pairs it used.
    pub fn update(&mut self, solutions: &[AntSolution], config: &AcoConfig) {
        self.evaporate(config.evaporation_rate);
        for solution in solutions {
            let amount = deposit_amount(solution.score, config);
            for plan in &solution.plans {
                for &warehouse in &plan.warehouses {
                    self.deposit(warehouse, plan.order, amount);
                }
            }
        }
    }
}

fn deposit_amount(score: f64, config: &AcoConfig) -> f64 {
    match config.deposit {
        DepositRule::InverseScore => config.q / score.max(1.0),
        DepositRule::ProportionalScore => config.q * score.max(0.0) / 100.0,
    }
}

/// One ant's construction: a plan per order, its score and elapsed turns.
#[derive(Debug, Clone, PartialEq)]
pub struct AntSolution {
    pub plans: Vec<OrderPlan>,
    pub score: f64,
    pub turns: u32,
}

/// Closer warehouses get a higher value.
pub fn heuristic(warehouse: &Location, order: &Location) -> f64 {
    1.0 / (1.0 + warehouse.euclidean_distance(order))
}

fn desirability(
    pheromone: &PheromoneTable,
    config: &AcoConfig,
    warehouse: &Warehouse,
    order: usize,
    destination: &Location,
) -> f64 {
    pheromone.get(warehouse.id, order).powf(config.alpha)
        * heuristic(&warehouse.location, destination).powf(config.beta)
}

fn select_warehouse<R: Rng>(
    candidates: &[usize],
    warehouses: &[Warehouse],
    order: usize,
    destination: &Location,
    pheromone: &PheromoneTable,
    config: &AcoConfig,
    rng: &mut R,
) -> usize {
    let scores: Vec<f64> = candidates
        .iter()
        .map(|&w| desirability(pheromone, config, &warehouses[w], order, destination))
        .collect();

    match config.selection {
        SelectionRule::Minimum => candidates
            .iter()
            .zip(&scores)
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(&w, _)| w)
            .unwrap_or(candidates[0]),
        SelectionRule::Proportional => WeightedIndex::new(&scores)
            .map(|dist| candidates[dist.sample(rng)])
            .unwrap_or(candidates[0]),
    }
}

/// Builds one ant's solution on a private snapshot of the world.
///
/// Orders are served one after another; each missing product is fetched in
/// chunks from the selected warehouse by the nearest drone that can lift at
/// least one unit. Reads the pheromone table but never writes it.
pub fn construct_solution<R: Rng>(
    simulation: &Simulation,
    pheromone: &PheromoneTable,
    config: &AcoConfig,
    rng: &mut R,
) -> Result<AntSolution, DeliveryError> {
    let mut world = simulation.snapshot();
    let mut turns = 0u32;
    let mut score = 0.0;
    let mut plans = Vec::with_capacity(world.orders.len());

    for o in 0..world.orders.len() {
        let destination = world.orders[o].location;
        let mut plan = OrderPlan::new(o);
        let lines = world.orders[o].items.clone();

        for line in lines {
            let product = *simulation.product(line.product)?;
            let weight = product.weight.max(1);

            loop {
                let need = world.orders[o].remaining(product.id);
                if need == 0 {
                    break;
                }

                let candidates: Vec<usize> = world
                    .warehouses
                    .iter()
                    .filter(|w| w.available(product.id) > 0)
                    .map(|w| w.id)
                    .collect();
                if candidates.is_empty() {
                    return Err(DeliveryError::InsufficientStock {
                        product: product.id,
                        order: o,
                    });
                }
                let w = select_warehouse(
                    &candidates,
                    &world.warehouses,
                    o,
                    &destination,
                    pheromone,
                    config,
                    rng,
                );
                let source = world.warehouses[w].location;

                let mut by_distance: Vec<(f64, usize)> = world
                    .drones
                    .iter()
                    .map(|d| (d.location.euclidean_distance(&source), d.id))
                    .collect();
                by_distance.sort_by(|a, b| a.0.total_cmp(&b.0));
                let d = by_distance
                    .iter()
                    .map(|&(_, d)| d)
                    .find(|&d| world.drones[d].remaining_capacity() >= product.weight)
                    .ok_or(DeliveryError::PayloadExceeded {
                        product: product.id,
                        weight: product.weight,
                        max_payload: world.drones.iter().map(|d| d.max_payload).max().unwrap_or(0),
                    })?;

                let drone = &mut world.drones[d];
                let quantity = need
                    .min(world.warehouses[w].available(product.id))
                    .min(drone.remaining_capacity() / weight);
                if quantity == 0 {
                    return Err(DeliveryError::PayloadExceeded {
                        product: product.id,
                        weight: product.weight,
                        max_payload: drone.max_payload,
                    });
                }

                turns += drone.move_to(source);
                if !drone.load(&mut world.warehouses[w], &product, quantity) {
                    return Err(DeliveryError::PayloadExceeded {
                        product: product.id,
                        weight: product.weight,
                        max_payload: drone.max_payload,
                    });
                }
                turns += 1;
                turns += drone.move_to(destination);
                drone.deliver(&mut world.orders[o], &product, quantity);
                turns += 1;

                plan.push(Command::Load {
                    drone: d,
                    warehouse: w,
                    product: product.id,
                    quantity,
                });
                plan.push(Command::Deliver {
                    drone: d,
                    order: o,
                    product: product.id,
                    quantity,
                });
            }
        }

        // Orders with nothing to deliver never complete
        if world.orders[o].completed {
            score += order_score(simulation.deadline, turns, config.late_policy);
        }
        plans.push(plan);
    }

    Ok(AntSolution {
        plans,
        score,
        turns,
    })
}

/// Ant Colony Optimization over (warehouse, order) choices.
#[derive(Debug)]
pub struct AntColonyOptimizer {
    config: AcoConfig,
    pheromone: PheromoneTable,
    best: Option<AntSolution>,
}

impl AntColonyOptimizer {
    pub fn new(config: AcoConfig) -> Self {
        Self {
            config,
            pheromone: PheromoneTable::new(0, 0, 1.0),
            best: None,
        }
    }

    pub fn pheromone(&self) -> &PheromoneTable {
        &self.pheromone
    }

    /// Per-order plans of the best ant so far.
    pub fn best_path(&self) -> &[OrderPlan] {
        self.best.as_ref().map(|b| b.plans.as_slice()).unwrap_or(&[])
    }

    fn construct_all(
        &self,
        simulation: &Simulation,
        seeds: &[u64],
    ) -> Result<Vec<AntSolution>, DeliveryError> {
        let pheromone = &self.pheromone;
        let config = &self.config;
        let build = |&seed: &u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            construct_solution(simulation, pheromone, config, &mut rng)
        };
        if config.parallel {
            seeds.par_iter().map(build).collect()
        } else {
            seeds.iter().map(build).collect()
        }
    }
}

impl Optimizer for AntColonyOptimizer {
    type Solution = AntSolution;

    fn name(&self) -> &'static str {
        "aco"
    }

    fn run(
        &mut self,
        simulation: &Simulation,
        mut progress: Progress<'_>,
    ) -> Result<OptimizerOutcome<AntSolution>, DeliveryError> {
        let mut rng = seeded_rng(self.config.seed);
        self.pheromone =
            PheromoneTable::new(simulation.warehouses().len(), simulation.orders().len(), 1.0);
        self.best = None;

        let mut iterations = 0;
        for iteration in 0..self.config.num_iterations {
            let seeds: Vec<u64> = (0..self.config.num_ants).map(|_| rng.gen()).collect();
            // Construction phase: the table is only read
            let solutions = self.construct_all(simulation, &seeds)?;

            let mut improved = false;
            for solution in &solutions {
                if self.best.as_ref().map_or(true, |b| solution.score > b.score) {
                    self.best = Some(solution.clone());
                    improved = true;
                }
            }

            // Update phase: all ants have returned
            self.pheromone.update(&solutions, &self.config);
            iterations = iteration + 1;

            if let Some(best) = &self.best {
                debug!(
                    "Iteration {}: best score {:.2} after {} turns",
                    iteration, best.score, best.turns
                );
                if improved && report(&mut progress, iteration, best.score).is_break() {
                    info!("ACO stopped by caller after iteration {}", iteration);
                    break;
                }
            }
        }

        let best = self.best.clone().unwrap_or(AntSolution {
            plans: Vec::new(),
            score: 0.0,
            turns: 0,
        });
        info!(
            "ACO finished: best score {:.2} ({} turns) after {} iterations",
            best.score, best.turns, iterations
        );
        Ok(OptimizerOutcome {
            score: best.score,
            solution: best,
            iterations,
        })
    }
}
