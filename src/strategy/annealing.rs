// src/strategy/annealing.rs

use crate::error::DeliveryError;
use crate::io::reporting::{summary_path_for, write_run_summary, write_simulation_log, RunSummary};
use crate::simulation::config::{AnnealingConfig, SimulatorConfig};
use crate::simulation::context::Simulation;
use crate::simulation::engine::simulate;
use crate::strategy::schedule::{DroneSchedule, OrderActions};
use crate::strategy::seeded_rng;
use crate::strategy::traits::{report, Optimizer, OptimizerOutcome, Progress};
use log::{debug, info, warn};
use rand::Rng;
use std::path::Path;

/// The moves used to perturb a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neighborhood {
    /// Move all of one order's actions to another drone, joining the
    /// block it may already have there.
    MoveOrder,
    /// Reverse a contiguous run of a drone's order blocks.
    InvertSequence,
    /// Move one order block to another position on the same drone.
    RelocateOrder,
}

pub const NEIGHBORHOODS: [Neighborhood; 3] = [
    Neighborhood::MoveOrder,
    Neighborhood::InvertSequence,
    Neighborhood::RelocateOrder,
];

/// Applies `move_kind` to `schedule`. Returns false when the schedule has no
/// room for that move (e.g. a single drone for `MoveOrder`).
pub fn apply_neighbor<R: Rng>(
    schedule: &mut DroneSchedule,
    move_kind: Neighborhood,
    rng: &mut R,
) -> bool {
    match move_kind {
        Neighborhood::MoveOrder => move_order(schedule, rng),
        Neighborhood::InvertSequence => invert_sequence(schedule, rng),
        Neighborhood::RelocateOrder => relocate_order(schedule, rng),
    }
}

fn drones_with_at_least(schedule: &DroneSchedule, blocks: usize) -> Vec<usize> {
    schedule
        .plans
        .iter()
        .enumerate()
        .filter(|(_, plan)| plan.len() >= blocks)
        .map(|(d, _)| d)
        .collect()
}

fn move_order<R: Rng>(schedule: &mut DroneSchedule, rng: &mut R) -> bool {
    let num_drones = schedule.plans.len();
    let sources = drones_with_at_least(schedule, 1);
    if num_drones < 2 || sources.is_empty() {
        return false;
    }
    let from = sources[rng.gen_range(0..sources.len())];
    let mut to = rng.gen_range(0..num_drones - 1);
    if to >= from {
        to += 1;
    }

    let index = rng.gen_range(0..schedule.plans[from].len());
    let order = schedule.plans[from][index].order;

    // Every block of the order leaves the source drone
    let mut actions = Vec::new();
    schedule.plans[from].retain(|block| {
        if block.order == order {
            actions.extend(block.actions.iter().copied());
            false
        } else {
            true
        }
    });

    let target = &mut schedule.plans[to];
    match target.iter_mut().find(|block| block.order == order) {
        Some(block) => block.actions.extend(actions),
        None => {
            let position = rng.gen_range(0..=target.len());
            target.insert(position, OrderActions { order, actions });
        }
    }
    true
}

fn invert_sequence<R: Rng>(schedule: &mut DroneSchedule, rng: &mut R) -> bool {
    let candidates = drones_with_at_least(schedule, 2);
    if candidates.is_empty() {
        return false;
    }
    let d = candidates[rng.gen_range(0..candidates.len())];
    let len = schedule.plans[d].len();
    let start = rng.gen_range(0..len - 1);
    let end = rng.gen_range(start + 1..len);
    schedule.plans[d][start..=end].reverse();
    true
}

fn relocate_order<R: Rng>(schedule: &mut DroneSchedule, rng: &mut R) -> bool {
    let candidates = drones_with_at_least(schedule, 2);
    if candidates.is_empty() {
        return false;
    }
    let d = candidates[rng.gen_range(0..candidates.len())];
    let len = schedule.plans[d].len();
    let from = rng.gen_range(0..len);
    let mut to = rng.gen_range(0..len - 1);
    if to >= from {
        to += 1;
    }
    let block = schedule.plans[d].remove(from);
    schedule.plans[d].insert(to, block);
    true
}

/// Metropolis acceptance: improvements always pass, worse moves pass with
/// probability `exp(delta / temperature)`.
pub fn accept<R: Rng>(delta: f64, temperature: f64, rng: &mut R) -> bool {
    if delta > 0.0 {
        return true;
    }
    rng.gen::<f64>() < (delta / temperature).exp()
}

/// Simulated annealing over schedules produced by the greedy simulator.
#[derive(Debug)]
pub struct SimulatedAnnealing {
    config: AnnealingConfig,
}

impl SimulatedAnnealing {
    pub fn new(config: AnnealingConfig) -> Self {
        Self { config }
    }

    /// The greedy starting point: orders with fewer items are scanned first.
    pub fn initial_schedule(
        &self,
        simulation: &Simulation,
    ) -> Result<DroneSchedule, DeliveryError> {
        let mut sequence: Vec<usize> = (0..simulation.orders().len()).collect();
        sequence.sort_by_key(|&o| simulation.orders()[o].total_items());
        let outcome = simulate(
            simulation,
            &sequence,
            &SimulatorConfig {
                bounded: false,
                late_policy: self.config.late_policy,
            },
        )?;
        debug!("Greedy simulator scored {:.2}", outcome.score);
        Ok(DroneSchedule::from_outcome(&outcome))
    }

    fn write_result(
        &self,
        path: &Path,
        simulation: &Simulation,
        best: &DroneSchedule,
        score: f64,
        iterations: usize,
    ) {
        let replay = best.replay(simulation);
        let summary = RunSummary {
            algorithm: self.name(),
            score,
            completed_orders: replay.completions.iter().flatten().count(),
            total_orders: replay.completions.len(),
            turns: replay
                .timeline
                .iter()
                .filter_map(|actions| actions.last())
                .map(|s| s.finish)
                .max()
                .unwrap_or(0),
            iterations,
        };
        let written = write_simulation_log(path, &best.records(simulation))
            .and_then(|_| write_run_summary(summary_path_for(path), &[summary]));
        if let Err(e) = written {
            warn!("Could not write annealing result to {}: {}", path.display(), e);
        }
    }
}

impl Optimizer for SimulatedAnnealing {
    type Solution = DroneSchedule;

    fn name(&self) -> &'static str {
        "sa"
    }

    fn run(
        &mut self,
        simulation: &Simulation,
        mut progress: Progress<'_>,
    ) -> Result<OptimizerOutcome<DroneSchedule>, DeliveryError> {
        let policy = self.config.late_policy;
        let mut rng = seeded_rng(self.config.seed);

        let mut current = self.initial_schedule(simulation)?;
        let mut current_score = current.score(simulation, policy);
        let mut best = current.clone();
        let mut best_score = current_score;
        info!("SA starting from score {:.2}", current_score);

        let mut temperature = self.config.initial_temperature;
        let mut iteration = 0;
        while temperature > self.config.min_temperature && iteration < self.config.max_iterations {
            let move_kind = NEIGHBORHOODS[rng.gen_range(0..NEIGHBORHOODS.len())];
            let mut candidate = current.clone();
            let mut stop = false;

            if apply_neighbor(&mut candidate, move_kind, &mut rng) {
                let score = candidate.score(simulation, policy);
                if accept(score - current_score, temperature, &mut rng) {
                    current = candidate;
                    current_score = score;
                }
                if current_score > best_score {
                    best = current.clone();
                    best_score = current_score;
                    debug!(
                        "Iteration {}: new best {:.2} via {:?} at temperature {:.4}",
                        iteration, best_score, move_kind, temperature
                    );
                    stop = report(&mut progress, iteration, best_score).is_break();
                }
            }

            temperature *= self.config.cooling_rate;
            iteration += 1;
            if stop {
                info!("SA stopped by caller after iteration {}", iteration);
                break;
            }
        }

        info!(
            "SA finished after {} iterations: best score {:.2}, temperature {:.4}",
            iteration, best_score, temperature
        );
        if let Some(path) = &self.config.result_path {
            self.write_result(path, simulation, &best, best_score, iteration);
        }

        Ok(OptimizerOutcome {
            solution: best,
            score: best_score,
            iterations: iteration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Drone, Grid, Location, Order, Product, Warehouse};
    use crate::model::DroneAction;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn simulation() -> Simulation {
        let products: Arc<[Product]> =
            Arc::from(vec![Product { id: 0, weight: 1 }, Product { id: 1, weight: 4 }]);
        Simulation::new(
            Grid::new(60, 60),
            150,
            products,
            (0..3).map(|id| Drone::new(id, Location::new(5, 5), 8, 2)).collect(),
            vec![
                Warehouse::new(0, Location::new(5, 5), vec![20, 6]),
                Warehouse::new(1, Location::new(40, 30), vec![20, 6]),
            ],
            vec![
                Order::from_product_types(0, Location::new(50, 50), &[0, 0, 1]),
                Order::from_product_types(1, Location::new(6, 20), &[1, 1, 1]),
                Order::from_product_types(2, Location::new(30, 2), &[0]),
                Order::from_product_types(3, Location::new(12, 44), &[0, 0, 0, 0, 1]),
                Order::from_product_types(4, Location::new(45, 10), &[0, 1]),
            ],
        )
        .unwrap()
    }

    fn config() -> AnnealingConfig {
        AnnealingConfig {
            max_iterations: 300,
            seed: Some(11),
            ..AnnealingConfig::default()
        }
    }

    fn sorted_actions(schedule: &DroneSchedule) -> Vec<String> {
        let mut actions: Vec<String> = schedule
            .plans
            .iter()
            .flatten()
            .flat_map(|b| b.actions.iter().map(move |a| format!("{} {:?}", b.order, a)))
            .collect();
        actions.sort();
        actions
    }

    fn one_block_per_order(schedule: &DroneSchedule) -> bool {
        schedule.plans.iter().all(|blocks| {
            blocks
                .iter()
                .enumerate()
                .all(|(i, b)| blocks[i + 1..].iter().all(|other| other.order != b.order))
        })
    }

    #[test]
    fn moves_only_rearrange_blocks() {
        let sim = simulation();
        let sa = SimulatedAnnealing::new(config());
        let initial = sa.initial_schedule(&sim).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for move_kind in NEIGHBORHOODS.iter().cycle().take(60) {
            let mut candidate = initial.clone();
            apply_neighbor(&mut candidate, *move_kind, &mut rng);
            assert_eq!(candidate.plans.len(), initial.plans.len());
            assert_eq!(sorted_actions(&candidate), sorted_actions(&initial));
        }
    }

    #[test]
    fn moves_need_room() {
        let mut rng = StdRng::seed_from_u64(3);
        let block = OrderActions {
            order: 0,
            actions: Vec::new(),
        };
        let mut lone = DroneSchedule {
            plans: vec![vec![block.clone()]],
        };
        assert!(!apply_neighbor(&mut lone, Neighborhood::MoveOrder, &mut rng));
        assert!(!apply_neighbor(&mut lone, Neighborhood::InvertSequence, &mut rng));
        assert!(!apply_neighbor(&mut lone, Neighborhood::RelocateOrder, &mut rng));

        let mut pair = DroneSchedule {
            plans: vec![vec![block], Vec::new()],
        };
        assert!(apply_neighbor(&mut pair, Neighborhood::MoveOrder, &mut rng));
        assert!(pair.plans[0].is_empty());
        assert_eq!(pair.plans[1].len(), 1);
    }

    #[test]
    fn moved_order_joins_its_block_on_the_target() {
        let deliver = |order: usize, quantity: u32| DroneAction::Deliver {
            order,
            product: 0,
            quantity,
        };
        let mut schedule = DroneSchedule {
            plans: vec![
                vec![
                    OrderActions {
                        order: 0,
                        actions: vec![deliver(0, 1)],
                    },
                    OrderActions {
                        order: 1,
                        actions: vec![deliver(1, 2)],
                    },
                ],
                vec![OrderActions {
                    order: 0,
                    actions: vec![deliver(0, 3)],
                }],
            ],
        };
        let before = sorted_actions(&schedule);

        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..50 {
            assert!(apply_neighbor(&mut schedule, Neighborhood::MoveOrder, &mut rng));
            assert!(one_block_per_order(&schedule));
            assert!(schedule.num_blocks() <= 3);
            assert_eq!(sorted_actions(&schedule), before);
        }
    }

    #[test]
    fn metropolis_always_takes_improvements() {
        let mut rng = StdRng::seed_from_u64(5);
        assert!((0..100).all(|_| accept(0.5, 1e-9, &mut rng)));
        // exp(-1000) is effectively zero
        assert!((0..100).all(|_| !accept(-1000.0, 1.0, &mut rng)));
    }

    #[test]
    fn never_worse_than_greedy_start() {
        let sim = simulation();
        let mut sa = SimulatedAnnealing::new(config());
        let start = sa
            .initial_schedule(&sim)
            .unwrap()
            .score(&sim, config().late_policy);
        let outcome = sa.run(&sim, None).unwrap();
        assert!(outcome.score >= start);
        assert!((outcome.solution.score(&sim, config().late_policy) - outcome.score).abs() < 1e-9);
        assert!(outcome.iterations <= 300);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let sim = simulation();
        let a = SimulatedAnnealing::new(config()).run(&sim, None).unwrap();
        let b = SimulatedAnnealing::new(config()).run(&sim, None).unwrap();
        assert_eq!(a.score, b.score);
        assert_eq!(a.solution, b.solution);
    }

    #[test]
    fn cold_start_returns_the_greedy_schedule() {
        let sim = simulation();
        let mut sa = SimulatedAnnealing::new(AnnealingConfig {
            initial_temperature: 0.1,
            min_temperature: 0.1,
            ..config()
        });
        let initial = sa.initial_schedule(&sim).unwrap();
        let outcome = sa.run(&sim, None).unwrap();
        assert_eq!(outcome.iterations, 0);
        assert_eq!(outcome.solution, initial);
    }

    #[test]
    fn infeasible_instance_is_reported() {
        let products: Arc<[Product]> = Arc::from(vec![Product { id: 0, weight: 1 }]);
        let sim = Simulation::new(
            Grid::new(10, 10),
            20,
            products,
            vec![Drone::new(0, Location::new(0, 0), 5, 1)],
            vec![Warehouse::new(0, Location::new(0, 0), vec![0])],
            vec![Order::from_product_types(0, Location::new(2, 2), &[0])],
        )
        .unwrap();
        let mut sa = SimulatedAnnealing::new(config());
        assert!(matches!(
            sa.run(&sim, None),
            Err(DeliveryError::InsufficientStock { .. })
        ));
    }

    #[test]
    fn writes_result_files() {
        let sim = simulation();
        let path = std::env::temp_dir().join(format!("sa_result_{}.csv", std::process::id()));
        let mut sa = SimulatedAnnealing::new(AnnealingConfig {
            max_iterations: 20,
            result_path: Some(path.clone()),
            ..config()
        });
        sa.run(&sim, None).unwrap();

        let log = std::fs::read_to_string(&path).unwrap();
        assert!(log.starts_with("drone,start,finish,action"));
        let summary_path = summary_path_for(&path);
        let summary = std::fs::read_to_string(&summary_path).unwrap();
        assert!(summary.contains("sa"));
        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_file(&summary_path);
    }
}
