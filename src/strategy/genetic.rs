// src/strategy/genetic.rs

//! Genetic search over per-drone block sequences.
//!
//! A chromosome holds one plan per drone. A plan is an ordered list of
//! blocks: a [`CommandBlock`] loads a quantity at a warehouse and drops it
//! at an order; a [`WaitBlock`] idles the drone for a number of turns.

use crate::error::DeliveryError;
use crate::model::DroneAction;
use crate::simulation::config::GeneticConfig;
use crate::simulation::context::Simulation;
use crate::simulation::engine::ActionRecord;
use crate::simulation::scoring::ceiled_order_score;
use crate::strategy::greedy::{build_greedy_chromosome, SEED_STRATEGIES};
use crate::strategy::seeded_rng;
use crate::strategy::traits::{report, Optimizer, OptimizerOutcome, Progress};
use log::{debug, info};
use rand::seq::{index, SliceRandom};
use rand::Rng;
use rayon::prelude::*;

/// Load `quantity` of `product` at `warehouse`, then deliver it to `order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandBlock {
    pub warehouse: usize,
    pub product: usize,
    pub quantity: u32,
    pub order: usize,
}

/// Idle for `time` turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitBlock {
    pub time: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Command(CommandBlock),
    Wait(WaitBlock),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chromosome {
    pub plans: Vec<Vec<Block>>,
}

impl Chromosome {
    pub fn empty(num_drones: usize) -> Self {
        Self {
            plans: vec![Vec::new(); num_drones],
        }
    }

    pub fn num_blocks(&self) -> usize {
        self.plans.iter().map(Vec::len).sum()
    }

    /// Completion turn of every order when the chromosome is replayed.
    pub fn completions(&self, simulation: &Simulation) -> Vec<Option<u32>> {
        replay(self, simulation, None)
    }

    /// Replays the chromosome and logs every load and delivery it performs.
    pub fn records(&self, simulation: &Simulation) -> Vec<ActionRecord> {
        let mut log = Vec::new();
        replay(self, simulation, Some(&mut log));
        log
    }
}

/// Every (warehouse, product, order) unit of work, cut into chunks a full
/// payload can carry. Stock is not shared out between orders here.
pub fn create_blocks(simulation: &Simulation) -> Vec<CommandBlock> {
    let max_load = simulation.max_payload();
    let mut blocks = Vec::new();

    for warehouse in simulation.warehouses() {
        for (product, &stock) in warehouse.stock.iter().enumerate() {
            if stock == 0 {
                continue;
            }
            let max_quantity = max_load / simulation.products[product].weight.max(1);
            if max_quantity == 0 {
                continue;
            }
            for order in simulation.orders() {
                let needed = order.remaining(product);
                if needed == 0 {
                    continue;
                }
                let actual = needed.min(stock);
                let full = actual / max_quantity;
                let rest = actual % max_quantity;
                let chunks = std::iter::repeat(max_quantity)
                    .take(full as usize)
                    .chain((rest > 0).then_some(rest));
                for quantity in chunks {
                    blocks.push(CommandBlock {
                        warehouse: warehouse.id,
                        product,
                        quantity,
                        order: order.id,
                    });
                }
            }
        }
    }
    blocks
}

/// Shuffles all blocks and deals each to a random drone.
pub fn random_chromosome<R: Rng>(
    blocks: &[CommandBlock],
    num_drones: usize,
    rng: &mut R,
) -> Chromosome {
    let mut shuffled = blocks.to_vec();
    shuffled.shuffle(rng);
    let mut chromosome = Chromosome::empty(num_drones);
    for block in shuffled {
        let d = rng.gen_range(0..num_drones);
        chromosome.plans[d].push(Block::Command(block));
    }
    chromosome
}

// =========================================================================
// 1. Fitness
// =========================================================================

/// Plays the chromosome against a fresh snapshot and returns each order's
/// completion time. Drones are replayed one after another, each on its own
/// clock; stock taken by an earlier drone is gone for later ones.
fn replay(
    chromosome: &Chromosome,
    simulation: &Simulation,
    mut log: Option<&mut Vec<ActionRecord>>,
) -> Vec<Option<u32>> {
    let mut world = simulation.snapshot();
    let mut completions: Vec<Option<u32>> = vec![None; world.orders.len()];

    for (d, plan) in chromosome.plans.iter().enumerate().take(world.drones.len()) {
        let mut clock = 0u32;
        for block in plan {
            let block = match block {
                Block::Wait(wait) => {
                    clock += wait.time;
                    continue;
                }
                Block::Command(command) => command,
            };
            let Some(product) = simulation.products.get(block.product).copied() else {
                continue;
            };
            let drone = &mut world.drones[d];
            let Some(warehouse) = world.warehouses.get_mut(block.warehouse) else {
                continue;
            };

            let start = clock;
            clock += drone.move_to(warehouse.location);
            let quantity = warehouse
                .available(product.id)
                .min(block.quantity)
                .min(drone.max_payload / product.weight.max(1));
            if quantity == 0 {
                continue;
            }
            clock += 1;
            if !drone.load(warehouse, &product, quantity) {
                continue;
            }
            if let Some(log) = log.as_deref_mut() {
                let action = DroneAction::Load {
                    warehouse: block.warehouse,
                    product: product.id,
                    quantity,
                };
                log.push(ActionRecord::new(d, start, clock, &action));
            }

            let Some(order) = world.orders.get_mut(block.order) else {
                drone.discard(&product);
                continue;
            };
            let leg_start = clock;
            clock += drone.move_to(order.location);
            if !order.needs(product.id) {
                drone.discard(&product);
                continue;
            }
            clock += 1;
            if drone.deliver(order, &product, quantity) {
                if let Some(log) = log.as_deref_mut() {
                    let action = DroneAction::Deliver {
                        order: block.order,
                        product: product.id,
                        quantity,
                    };
                    log.push(ActionRecord::new(d, leg_start, clock, &action));
                }
                if order.completed && completions[block.order].is_none() {
                    completions[block.order] = Some(clock);
                }
            }
        }
    }
    completions
}

/// Sum over completed orders of the rounded-up deadline-proximity score.
pub fn fitness(chromosome: &Chromosome, simulation: &Simulation) -> u32 {
    replay(chromosome, simulation, None)
        .into_iter()
        .flatten()
        .map(|turn| ceiled_order_score(simulation.deadline, turn))
        .sum()
}

// =========================================================================
// 2. Crossover
// =========================================================================

/// Per drone, with probability `rate`, swaps plan suffixes after a random
/// cut inside the shorter plan. Plans of one block or less are copied.
pub fn crossover<R: Rng>(
    parent1: &Chromosome,
    parent2: &Chromosome,
    rate: f64,
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    let mut child1 = Chromosome::empty(0);
    let mut child2 = Chromosome::empty(0);

    for (plan1, plan2) in parent1.plans.iter().zip(&parent2.plans) {
        if rng.gen::<f64>() < rate && plan1.len() > 1 && plan2.len() > 1 {
            let cut = rng.gen_range(1..plan1.len().min(plan2.len()));
            child1
                .plans
                .push(plan1[..cut].iter().chain(&plan2[cut..]).copied().collect());
            child2
                .plans
                .push(plan2[..cut].iter().chain(&plan1[cut..]).copied().collect());
        } else {
            child1.plans.push(plan1.clone());
            child2.plans.push(plan2.clone());
        }
    }
    (child1, child2)
}

// =========================================================================
// 3. Mutation
// =========================================================================

/// Takes a random block out of each of two drones and hands each to the other.
pub fn swap_between_drones<R: Rng>(chromosome: &mut Chromosome, rng: &mut R) {
    let num_drones = chromosome.plans.len();
    if num_drones < 2 {
        return;
    }
    let d1 = rng.gen_range(0..num_drones);
    let mut d2 = rng.gen_range(0..num_drones - 1);
    if d2 >= d1 {
        d2 += 1;
    }
    if chromosome.plans[d1].is_empty() || chromosome.plans[d2].is_empty() {
        return;
    }
    let i1 = rng.gen_range(0..chromosome.plans[d1].len());
    let i2 = rng.gen_range(0..chromosome.plans[d2].len());
    let b1 = chromosome.plans[d1].remove(i1);
    let b2 = chromosome.plans[d2].remove(i2);
    chromosome.plans[d1].push(b2);
    chromosome.plans[d2].push(b1);
}

/// Swaps two distinct positions within one drone's plan.
pub fn reorder_blocks<R: Rng>(chromosome: &mut Chromosome, rng: &mut R) {
    if chromosome.plans.is_empty() {
        return;
    }
    let d = rng.gen_range(0..chromosome.plans.len());
    let len = chromosome.plans[d].len();
    if len < 2 {
        return;
    }
    let picks = index::sample(rng, len, 2);
    chromosome.plans[d].swap(picks.index(0), picks.index(1));
}

/// Appends an idle period of `[1, deadline - 1)` turns to a random drone.
pub fn insert_wait<R: Rng>(chromosome: &mut Chromosome, deadline: u32, rng: &mut R) {
    if chromosome.plans.is_empty() {
        return;
    }
    let d = rng.gen_range(0..chromosome.plans.len());
    let time = if deadline > 2 {
        rng.gen_range(1..deadline - 1)
    } else {
        1
    };
    chromosome.plans[d].push(Block::Wait(WaitBlock { time }));
}

/// With probability `rate`, applies one to three random mutation operators.
pub fn mutate<R: Rng>(chromosome: &mut Chromosome, rate: f64, deadline: u32, rng: &mut R) {
    if rng.gen::<f64>() >= rate {
        return;
    }
    for _ in 0..rng.gen_range(1..=3) {
        match rng.gen_range(0..3) {
            0 => swap_between_drones(chromosome, rng),
            1 => reorder_blocks(chromosome, rng),
            _ => insert_wait(chromosome, deadline, rng),
        }
    }
}

// =========================================================================
// 4. Local search
// =========================================================================

/// Time a single drone needs for `plan` on its own: travel plus one turn
/// per load and per delivery, ignoring stock and other drones.
pub fn drone_plan_time(simulation: &Simulation, drone: usize, plan: &[Block]) -> u32 {
    let mut location = simulation.drones()[drone].location;
    let mut time = 0;
    for block in plan {
        match block {
            Block::Wait(wait) => time += wait.time,
            Block::Command(command) => {
                let warehouse = simulation.warehouses()[command.warehouse].location;
                let order = simulation.orders()[command.order].location;
                time += location.distance_to(&warehouse) + 1;
                time += warehouse.distance_to(&order) + 1;
                location = order;
            }
        }
    }
    time
}

/// Tries up to `min(10, len - 1)` random adjacent swaps per drone and keeps
/// those that shorten the drone's plan time.
pub fn local_search<R: Rng>(chromosome: &mut Chromosome, simulation: &Simulation, rng: &mut R) {
    for (d, plan) in chromosome.plans.iter_mut().enumerate() {
        let len = plan.len();
        if len < 2 {
            continue;
        }
        let mut best = drone_plan_time(simulation, d, plan);
        for _ in 0..(len - 1).min(10) {
            let i = rng.gen_range(0..len - 1);
            plan.swap(i, i + 1);
            let time = drone_plan_time(simulation, d, plan);
            if time < best {
                best = time;
            } else {
                plan.swap(i, i + 1);
            }
        }
    }
}

// =========================================================================
// 5. Generation loop
// =========================================================================

#[derive(Debug)]
pub struct GeneticAlgorithm {
    config: GeneticConfig,
}

impl GeneticAlgorithm {
    pub fn new(config: GeneticConfig) -> Self {
        Self { config }
    }

    /// Three greedy seeds, then random chromosomes up to the population size.
    pub fn initial_population<R: Rng>(&self, simulation: &Simulation, rng: &mut R) -> Vec<Chromosome> {
        let size = self.config.population_size.max(SEED_STRATEGIES.len());
        let mut population: Vec<Chromosome> = SEED_STRATEGIES
            .iter()
            .map(|&strategy| build_greedy_chromosome(simulation, strategy))
            .collect();

        let blocks = create_blocks(simulation);
        let num_drones = simulation.drones().len();
        while population.len() < size {
            population.push(random_chromosome(&blocks, num_drones, rng));
        }
        population
    }

    fn evaluate(&self, simulation: &Simulation, population: &[Chromosome]) -> Vec<u32> {
        if self.config.parallel {
            population
                .par_iter()
                .map(|c| fitness(c, simulation))
                .collect()
        } else {
            population.iter().map(|c| fitness(c, simulation)).collect()
        }
    }

    /// Binary tournament: two distinct individuals, the fitter one wins.
    fn select<R: Rng>(population: &[Chromosome], fitnesses: &[u32], rng: &mut R) -> Vec<Chromosome> {
        (0..population.len())
            .map(|_| {
                let picks = index::sample(rng, population.len(), 2);
                let (a, b) = (picks.index(0), picks.index(1));
                let winner = if fitnesses[a] > fitnesses[b] { a } else { b };
                population[winner].clone()
            })
            .collect()
    }

    fn breed<R: Rng>(
        &self,
        simulation: &Simulation,
        mating: &[Chromosome],
        rng: &mut R,
    ) -> Vec<Chromosome> {
        let size = mating.len();
        let mut offspring = Vec::with_capacity(size + 1);
        for i in (0..size).step_by(2) {
            let (mut child1, mut child2) = crossover(
                &mating[i],
                &mating[(i + 1) % size],
                self.config.crossover_rate,
                rng,
            );
            for child in [&mut child1, &mut child2] {
                mutate(child, self.config.mutation_rate, simulation.deadline, rng);
                local_search(child, simulation, rng);
            }
            offspring.push(child1);
            offspring.push(child2);
        }
        offspring.truncate(size);
        offspring
    }
}

impl Optimizer for GeneticAlgorithm {
    type Solution = Chromosome;

    fn name(&self) -> &'static str {
        "ga"
    }

    fn run(
        &mut self,
        simulation: &Simulation,
        mut progress: Progress<'_>,
    ) -> Result<OptimizerOutcome<Chromosome>, DeliveryError> {
        let mut rng = seeded_rng(self.config.seed);
        let mut population = self.initial_population(simulation, &mut rng);
        let mut best: Option<(Chromosome, u32)> = None;
        let mut generations = 0;

        for generation in 0..self.config.num_generations {
            let fitnesses = self.evaluate(simulation, &population);
            generations = generation + 1;

            // First index holding the generation's top fitness
            let mut top = 0;
            for (i, &f) in fitnesses.iter().enumerate() {
                if f > fitnesses[top] {
                    top = i;
                }
            }
            if best.as_ref().map_or(true, |(_, f)| fitnesses[top] > *f) {
                best = Some((population[top].clone(), fitnesses[top]));
            }
            let best_fitness = best.as_ref().map_or(0, |(_, f)| *f);

            let worst = fitnesses.iter().copied().min().unwrap_or(0);
            let avg = fitnesses.iter().map(|&f| f as f64).sum::<f64>() / fitnesses.len() as f64;
            debug!(
                "Generation {} | gen best = {}, gen avg = {:.2}, gen worst = {}, global best = {}",
                generation, fitnesses[top], avg, worst, best_fitness
            );

            if report(&mut progress, generation, best_fitness as f64).is_break() {
                info!("GA stopped by caller after generation {}", generation);
                break;
            }

            let mating = Self::select(&population, &fitnesses, &mut rng);
            population = self.breed(simulation, &mating, &mut rng);
        }

        let (solution, score) = match best {
            Some((chromosome, f)) => (chromosome, f),
            None => {
                // No generation ran: fall back to the best seed
                let fitnesses = self.evaluate(simulation, &population);
                let top = (0..population.len())
                    .max_by_key(|&i| (fitnesses[i], std::cmp::Reverse(i)))
                    .unwrap_or(0);
                (population.swap_remove(top), fitnesses.get(top).copied().unwrap_or(0))
            }
        };
        info!("GA finished after {} generations: best fitness {}", generations, score);

        Ok(OptimizerOutcome {
            solution,
            score: score as f64,
            iterations: generations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Drone, Grid, Location, Order, Product, Warehouse};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::ops::ControlFlow;
    use std::sync::Arc;

    fn single_order() -> Simulation {
        let products: Arc<[Product]> = Arc::from(vec![Product { id: 0, weight: 1 }]);
        Simulation::new(
            Grid::new(20, 20),
            100,
            products,
            vec![Drone::new(0, Location::new(0, 0), 10, 1)],
            vec![Warehouse::new(0, Location::new(0, 0), vec![5])],
            vec![Order::from_product_types(0, Location::new(0, 10), &[0; 5])],
        )
        .unwrap()
    }

    fn fleet() -> Simulation {
        let products: Arc<[Product]> = Arc::from(vec![
            Product { id: 0, weight: 3 },
            Product { id: 1, weight: 1 },
            Product { id: 2, weight: 5 },
        ]);
        Simulation::new(
            Grid::new(80, 80),
            120,
            products,
            (0..3).map(|id| Drone::new(id, Location::new(10, 10), 12, 3)).collect(),
            vec![
                Warehouse::new(0, Location::new(10, 10), vec![10, 10, 4]),
                Warehouse::new(1, Location::new(60, 50), vec![10, 10, 4]),
            ],
            vec![
                Order::from_product_types(0, Location::new(15, 30), &[0, 0, 1]),
                Order::from_product_types(1, Location::new(55, 55), &[2, 2, 1, 1, 1]),
                Order::from_product_types(2, Location::new(70, 5), &[0, 2]),
                Order::from_product_types(3, Location::new(20, 12), &[1]),
            ],
        )
        .unwrap()
    }

    fn command(warehouse: usize, product: usize, quantity: u32, order: usize) -> Block {
        Block::Command(CommandBlock {
            warehouse,
            product,
            quantity,
            order,
        })
    }

    fn config() -> GeneticConfig {
        GeneticConfig {
            population_size: 8,
            num_generations: 6,
            crossover_rate: 0.9,
            mutation_rate: 0.5,
            seed: Some(21),
            parallel: false,
        }
    }

    #[test]
    fn empty_chromosome_scores_zero() {
        assert_eq!(fitness(&Chromosome::empty(3), &fleet()), 0);
    }

    #[test]
    fn single_delivery_fitness() {
        let sim = single_order();
        let chromosome = Chromosome {
            plans: vec![vec![command(0, 0, 5, 0)]],
        };
        // load done at 1, delivery done at 12
        assert_eq!(fitness(&chromosome, &sim), 88);

        let waiting = Chromosome {
            plans: vec![vec![Block::Wait(WaitBlock { time: 20 }), command(0, 0, 5, 0)]],
        };
        assert_eq!(fitness(&waiting, &sim), 68);
    }

    #[test]
    fn unneeded_delivery_is_discarded() {
        let sim = single_order();
        let chromosome = Chromosome {
            plans: vec![vec![
                command(0, 0, 5, 0),
                // order already complete: the units are dropped
                command(0, 0, 5, 0),
            ]],
        };
        assert_eq!(fitness(&chromosome, &sim), 88);

        let partial = Chromosome {
            plans: vec![vec![command(0, 0, 2, 0), command(0, 0, 2, 0)]],
        };
        assert_eq!(fitness(&partial, &sim), 0);
    }

    #[test]
    fn records_follow_replayed_actions() {
        let sim = single_order();
        let chromosome = Chromosome {
            plans: vec![vec![command(0, 0, 5, 0)]],
        };
        let records = chromosome.records(&sim);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].action, "load");
        assert_eq!(records[1].action, "deliver");
        assert_eq!(records[1].finish, 12);
    }

    #[test]
    fn blocks_are_split_by_payload() {
        let sim = fleet();
        let blocks = create_blocks(&sim);
        // product 2 weighs 5, so at most 2 units per block with payload 12
        assert!(blocks
            .iter()
            .filter(|b| b.product == 2)
            .all(|b| b.quantity <= 2));
        let order1_heavy: u32 = blocks
            .iter()
            .filter(|b| b.order == 1 && b.product == 2 && b.warehouse == 0)
            .map(|b| b.quantity)
            .sum();
        assert_eq!(order1_heavy, 2);
    }

    #[test]
    fn crossover_swaps_suffixes() {
        let mut rng = StdRng::seed_from_u64(9);
        let p1 = Chromosome {
            plans: vec![
                vec![command(0, 0, 1, 0), command(0, 0, 2, 0), command(0, 0, 3, 0)],
                vec![command(0, 1, 1, 1)],
            ],
        };
        let p2 = Chromosome {
            plans: vec![
                vec![command(1, 0, 4, 2), command(1, 0, 5, 2)],
                vec![command(1, 1, 1, 3), command(1, 1, 2, 3)],
            ],
        };

        let (c1, c2) = crossover(&p1, &p2, 1.0, &mut rng);
        // the only legal cut for drone 0 is 1
        assert_eq!(c1.plans[0], vec![command(0, 0, 1, 0), command(1, 0, 5, 2)]);
        assert_eq!(
            c2.plans[0],
            vec![command(1, 0, 4, 2), command(0, 0, 2, 0), command(0, 0, 3, 0)]
        );
        // drone 1 of parent 1 is too short to cut
        assert_eq!(c1.plans[1], p1.plans[1]);
        assert_eq!(c2.plans[1], p2.plans[1]);

        let (k1, k2) = crossover(&p1, &p2, 0.0, &mut rng);
        assert_eq!((k1, k2), (p1, p2));
    }

    #[test]
    fn mutations_keep_blocks() {
        let sim = fleet();
        let mut rng = StdRng::seed_from_u64(4);
        let original = build_greedy_chromosome(&sim, crate::strategy::greedy::SeedStrategy::Heavy);

        let mut swapped = original.clone();
        for _ in 0..20 {
            swap_between_drones(&mut swapped, &mut rng);
            reorder_blocks(&mut swapped, &mut rng);
        }
        assert_eq!(swapped.num_blocks(), original.num_blocks());

        let mut waited = original.clone();
        for _ in 0..50 {
            insert_wait(&mut waited, sim.deadline, &mut rng);
        }
        let waits: Vec<u32> = waited
            .plans
            .iter()
            .flatten()
            .filter_map(|b| match b {
                Block::Wait(w) => Some(w.time),
                Block::Command(_) => None,
            })
            .collect();
        assert_eq!(waits.len(), 50);
        assert!(waits.iter().all(|&t| (1..sim.deadline - 1).contains(&t)));
    }

    #[test]
    fn local_search_never_slows_a_drone() {
        let sim = fleet();
        let mut rng = StdRng::seed_from_u64(17);
        let blocks = create_blocks(&sim);
        for _ in 0..10 {
            let mut chromosome = random_chromosome(&blocks, 3, &mut rng);
            let before: Vec<u32> = (0..3)
                .map(|d| drone_plan_time(&sim, d, &chromosome.plans[d]))
                .collect();
            local_search(&mut chromosome, &sim, &mut rng);
            for d in 0..3 {
                assert!(drone_plan_time(&sim, d, &chromosome.plans[d]) <= before[d]);
            }
        }
    }

    #[test]
    fn population_starts_with_greedy_seeds() {
        let sim = fleet();
        let ga = GeneticAlgorithm::new(GeneticConfig {
            population_size: 2,
            ..config()
        });
        let mut rng = StdRng::seed_from_u64(1);
        let population = ga.initial_population(&sim, &mut rng);
        assert_eq!(population.len(), 3);
        assert!(population.iter().all(|c| c.plans.len() == 3));
    }

    #[test]
    fn reports_every_generation_and_is_reproducible() {
        let sim = fleet();
        let mut history = Vec::new();
        let mut record = |generation: usize, best: f64| {
            history.push((generation, best));
            ControlFlow::Continue(())
        };
        let outcome = GeneticAlgorithm::new(config())
            .run(&sim, Some(&mut record))
            .unwrap();

        assert_eq!(history.len(), 6);
        assert!(history.windows(2).all(|w| w[1].1 >= w[0].1));
        assert_eq!(history.last().map(|h| h.1), Some(outcome.score));
        assert_eq!(fitness(&outcome.solution, &sim) as f64, outcome.score);

        let again = GeneticAlgorithm::new(config()).run(&sim, None).unwrap();
        assert_eq!(again.score, outcome.score);
        assert_eq!(again.solution, outcome.solution);

        let parallel = GeneticAlgorithm::new(GeneticConfig {
            parallel: true,
            ..config()
        })
        .run(&sim, None)
        .unwrap();
        assert_eq!(parallel.solution, outcome.solution);
    }

    #[test]
    fn greedy_seeds_score_on_feasible_instance() {
        let sim = fleet();
        let mut rng = StdRng::seed_from_u64(2);
        let ga = GeneticAlgorithm::new(config());
        let population = ga.initial_population(&sim, &mut rng);
        assert!(population[..3].iter().all(|c| fitness(c, &sim) > 0));
    }
}
