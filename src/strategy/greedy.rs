// src/strategy/greedy.rs

//! Greedy chromosome builders used to seed the genetic population.
//!
//! Each builder walks the orders, carves every missing product into chunks
//! and picks a warehouse for each chunk against a private copy of the stock.
//! The resulting command blocks are dealt round-robin across the fleet.

use crate::model::Order;
use crate::simulation::context::Simulation;
use crate::strategy::genetic::{Block, Chromosome, CommandBlock};

/// Fixed chunk size of the `small_first` builder.
pub const SMALL_CHUNK: u32 = 3;
/// Fixed chunk size of the `distance_first` builder.
pub const DISTANCE_CHUNK: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedStrategy {
    /// Fill whole payloads, nearest warehouse to the fleet's start first.
    Heavy,
    /// Smallest orders first, small chunks from the first stocked warehouse.
    SmallFirst,
    /// Chunks from the warehouse closest to the order.
    DistanceFirst,
}

pub const SEED_STRATEGIES: [SeedStrategy; 3] = [
    SeedStrategy::Heavy,
    SeedStrategy::SmallFirst,
    SeedStrategy::DistanceFirst,
];

pub fn build_greedy_chromosome(simulation: &Simulation, strategy: SeedStrategy) -> Chromosome {
    let blocks = match strategy {
        SeedStrategy::Heavy => heavy_lifting_blocks(simulation),
        SeedStrategy::SmallFirst => small_orders_blocks(simulation),
        SeedStrategy::DistanceFirst => distance_priority_blocks(simulation),
    };

    let mut chromosome = Chromosome::empty(simulation.drones().len());
    for (i, block) in blocks.into_iter().enumerate() {
        let d = i % chromosome.plans.len();
        chromosome.plans[d].push(Block::Command(block));
    }
    chromosome
}

fn stock_copy(simulation: &Simulation) -> Vec<Vec<u32>> {
    simulation
        .warehouses()
        .iter()
        .map(|w| w.stock.clone())
        .collect()
}

fn by_total_items(simulation: &Simulation) -> Vec<&Order> {
    let mut orders: Vec<&Order> = simulation.orders().iter().collect();
    orders.sort_by_key(|o| o.total_items());
    orders
}

// =========================================================================
// 1. Heavy lifting
// =========================================================================

/// Packs each order into payload-sized trips. A new trip starts whenever
/// the next unit no longer fits.
pub fn heavy_lifting_blocks(simulation: &Simulation) -> Vec<CommandBlock> {
    let mut stock = stock_copy(simulation);
    let start = simulation.start_location();
    let max_load = simulation.max_payload();
    let mut blocks = Vec::new();

    for order in by_total_items(simulation) {
        let mut remaining_capacity = 0;

        for line in &order.items {
            let weight = simulation.products[line.product].weight.max(1);
            let mut needed = line.quantity;

            while needed > 0 {
                if remaining_capacity < weight {
                    remaining_capacity = max_load;
                }

                let nearest = simulation
                    .warehouses()
                    .iter()
                    .filter(|w| stock[w.id][line.product] > 0)
                    .min_by(|a, b| {
                        start
                            .euclidean_distance(&a.location)
                            .total_cmp(&start.euclidean_distance(&b.location))
                    });
                let Some(warehouse) = nearest else { break };

                let quantity = needed
                    .min(stock[warehouse.id][line.product])
                    .min(remaining_capacity / weight);
                if quantity == 0 {
                    break;
                }

                stock[warehouse.id][line.product] -= quantity;
                needed -= quantity;
                remaining_capacity -= quantity * weight;
                blocks.push(CommandBlock {
                    warehouse: warehouse.id,
                    product: line.product,
                    quantity,
                    order: order.id,
                });
            }
        }
    }
    blocks
}

// =========================================================================
// 2. Small orders first
// =========================================================================

pub fn small_orders_blocks(simulation: &Simulation) -> Vec<CommandBlock> {
    let mut stock = stock_copy(simulation);
    let mut blocks = Vec::new();

    for order in by_total_items(simulation) {
        for line in &order.items {
            let mut needed = line.quantity;
            while needed > 0 {
                let Some(w) = stock.iter().position(|s| s[line.product] > 0) else {
                    break;
                };
                let quantity = needed.min(stock[w][line.product]).min(SMALL_CHUNK);
                stock[w][line.product] -= quantity;
                needed -= quantity;
                blocks.push(CommandBlock {
                    warehouse: w,
                    product: line.product,
                    quantity,
                    order: order.id,
                });
            }
        }
    }
    blocks
}

// =========================================================================
// 3. Distance first
// =========================================================================

pub fn distance_priority_blocks(simulation: &Simulation) -> Vec<CommandBlock> {
    let mut stock = stock_copy(simulation);
    let mut blocks = Vec::new();

    for order in simulation.orders() {
        for line in &order.items {
            let mut needed = line.quantity;
            while needed > 0 {
                let closest = simulation
                    .warehouses()
                    .iter()
                    .filter(|w| stock[w.id][line.product] > 0)
                    .min_by(|a, b| {
                        a.location
                            .euclidean_distance(&order.location)
                            .total_cmp(&b.location.euclidean_distance(&order.location))
                    });
                let Some(warehouse) = closest else { break };

                let quantity = needed
                    .min(stock[warehouse.id][line.product])
                    .min(DISTANCE_CHUNK);
                stock[warehouse.id][line.product] -= quantity;
                needed -= quantity;
                blocks.push(CommandBlock {
                    warehouse: warehouse.id,
                    product: line.product,
                    quantity,
                    order: order.id,
                });
            }
        }
    }
    blocks
}
