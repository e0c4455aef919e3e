// src/simulation/engine.rs

use crate::error::DeliveryError;
use crate::model::{DroneAction, OrderLine, Product, WorldState};
use crate::simulation::config::SimulatorConfig;
use crate::simulation::context::Simulation;
use crate::simulation::scoring::schedule_score;
use log::{debug, info, trace};
use serde::Serialize;

// One row of the chronological action log, written to CSV by io::reporting
#[derive(Debug, Clone, Serialize)]
pub struct ActionRecord {
    pub drone: usize,
    pub start: u32,
    pub finish: u32,
    pub action: &'static str,
    pub warehouse: Option<usize>,
    pub order: Option<usize>,
    pub product: usize,
    pub quantity: u32,
}

impl ActionRecord {
    pub fn new(drone: usize, start: u32, finish: u32, action: &DroneAction) -> Self {
        let (warehouse, order) = match *action {
            DroneAction::Load { warehouse, .. } => (Some(warehouse), None),
            DroneAction::Deliver { order, .. } => (None, Some(order)),
        };
        Self {
            drone,
            start,
            finish,
            action: action.kind(),
            warehouse,
            order,
            product: action.product(),
            quantity: action.quantity(),
        }
    }
}

/// An action placed on a drone's timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAction {
    pub start: u32,
    pub finish: u32,
    pub action: DroneAction,
}

/// What a simulator run produced.
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    /// Per drone, actions in the order they were executed.
    pub timeline: Vec<Vec<ScheduledAction>>,
    /// Per order id, the turn its last missing unit arrived.
    pub completions: Vec<Option<u32>>,
    pub score: f64,
    /// Turn at which the last action finished.
    pub turns: u32,
    /// World state after the run.
    pub world: WorldState,
}

impl SimulationOutcome {
    pub fn completed_orders(&self) -> usize {
        self.completions.iter().flatten().count()
    }

    /// Drone-by-drone chronological action log.
    pub fn records(&self) -> Vec<ActionRecord> {
        self.timeline
            .iter()
            .enumerate()
            .flat_map(|(drone, actions)| {
                actions
                    .iter()
                    .map(move |s| ActionRecord::new(drone, s.start, s.finish, &s.action))
            })
            .collect()
    }
}

/// Turn-stepped greedy delivery simulator.
///
/// Idle drones take the first feasible (order, product, warehouse) task in
/// scan order and then execute a load followed by a delivery. There is no
/// lookahead: this is the baseline the optimizers improve on.
pub struct DeliverySimulator<'a> {
    config: SimulatorConfig,
    deadline: u32,
    products: &'a [Product],
    world: WorldState,

    // Orders still waiting for units, in scan order
    pending: Vec<usize>,
    // Per order: units not yet promised to any drone
    unassigned: Vec<Vec<OrderLine>>,
    // Per warehouse, per product: units promised but not yet loaded
    reserved: Vec<Vec<u32>>,

    timeline: Vec<Vec<ScheduledAction>>,
    completions: Vec<Option<u32>>,
    current_turn: u32,
}

impl<'a> DeliverySimulator<'a> {
    /// Prepares a run over `world`, which the simulator consumes.
    /// `order_sequence` lists the order ids to serve, in scan order.
    pub fn new(
        world: WorldState,
        products: &'a [Product],
        deadline: u32,
        order_sequence: &[usize],
        config: SimulatorConfig,
    ) -> Self {
        let unassigned = world.orders.iter().map(|o| o.items.clone()).collect();
        let reserved = world
            .warehouses
            .iter()
            .map(|w| vec![0; w.stock.len()])
            .collect();
        let pending = order_sequence
            .iter()
            .copied()
            .filter(|&o| !world.orders[o].is_fulfilled())
            .collect();

        Self {
            config,
            deadline,
            products,
            timeline: vec![Vec::new(); world.drones.len()],
            completions: vec![None; world.orders.len()],
            world,
            pending,
            unassigned,
            reserved,
            current_turn: 0,
        }
    }

    pub fn run(mut self) -> Result<SimulationOutcome, DeliveryError> {
        self.check_feasible()?;

        while !self.pending.is_empty() {
            if self.config.bounded && self.current_turn > self.deadline {
                debug!(
                    "Turn budget exhausted at turn {} with {} orders pending",
                    self.current_turn,
                    self.pending.len()
                );
                break;
            }
            self.step();

            // Jump straight to the next turn at which some drone frees up
            let next = self
                .world
                .drones
                .iter()
                .map(|d| d.busy_until)
                .filter(|&t| t > self.current_turn)
                .min();
            match next {
                Some(turn) => self.current_turn = turn,
                None if self.pending.is_empty() => break,
                None => {
                    return Err(DeliveryError::Stalled {
                        turn: self.current_turn,
                        pending: self.pending.len(),
                    })
                }
            }
        }

        if self.config.bounded {
            let deadline = self.deadline;
            for completion in self.completions.iter_mut() {
                if completion.map_or(false, |t| t > deadline) {
                    *completion = None;
                }
            }
        }

        let turns = self
            .timeline
            .iter()
            .filter_map(|actions| actions.last())
            .map(|s| s.finish)
            .max()
            .unwrap_or(0);
        let score = schedule_score(self.deadline, &self.completions, self.config.late_policy);
        info!(
            "Simulation finished at turn {}: {}/{} orders completed, score {:.2}",
            turns,
            self.completions.iter().flatten().count(),
            self.completions.len(),
            score
        );

        Ok(SimulationOutcome {
            timeline: self.timeline,
            completions: self.completions,
            score,
            turns,
            world: self.world,
        })
    }

    fn step(&mut self) {
        let turn = self.current_turn;
        for d in 0..self.world.drones.len() {
            if self.world.drones[d].busy_until > turn {
                continue;
            }
            if self.world.drones[d].actions.is_empty() && !self.assign_task(d) {
                continue;
            }
            if let Some(action) = self.world.drones[d].actions.pop_next() {
                self.execute(d, action, turn);
            }
        }
    }

    /// Finds the first (order, product, warehouse) the drone can serve and
    /// queues a load/deliver pair for it.
    fn assign_task(&mut self, d: usize) -> bool {
        let capacity = self.world.drones[d].remaining_capacity();

        for &o in &self.pending {
            for line in self.unassigned[o].iter_mut() {
                if line.quantity == 0 {
                    continue;
                }
                let weight = self.products[line.product].weight.max(1);
                let by_weight = capacity / weight;
                if by_weight == 0 {
                    continue;
                }

                for (w, warehouse) in self.world.warehouses.iter().enumerate() {
                    let free = warehouse
                        .available(line.product)
                        .saturating_sub(self.reserved[w][line.product]);
                    if free == 0 {
                        continue;
                    }

                    let quantity = line.quantity.min(free).min(by_weight);
                    line.quantity -= quantity;
                    self.reserved[w][line.product] += quantity;

                    let drone = &mut self.world.drones[d];
                    drone.actions.push(DroneAction::Load {
                        warehouse: w,
                        product: line.product,
                        quantity,
                    });
                    drone.actions.push(DroneAction::Deliver {
                        order: o,
                        product: line.product,
                        quantity,
                    });
                    trace!(
                        "Turn {}: drone {} takes {} x product {} from warehouse {} to order {}",
                        self.current_turn,
                        d,
                        quantity,
                        line.product,
                        w,
                        o
                    );
                    return true;
                }
            }
        }
        false
    }

    fn execute(&mut self, d: usize, action: DroneAction, turn: u32) {
        let world = &mut self.world;
        let drone = &mut world.drones[d];

        let finish = match action {
            DroneAction::Load {
                warehouse,
                product,
                quantity,
            } => {
                let warehouse_ref = &mut world.warehouses[warehouse];
                let travel = drone.move_to(warehouse_ref.location);
                if !drone.load(warehouse_ref, &self.products[product], quantity) {
                    debug!(
                        "Drone {} could not load {} x product {} at warehouse {}",
                        d, quantity, product, warehouse
                    );
                }
                self.reserved[warehouse][product] =
                    self.reserved[warehouse][product].saturating_sub(quantity);
                turn + travel + 1
            }
            DroneAction::Deliver {
                order,
                product,
                quantity,
            } => {
                let order_ref = &mut world.orders[order];
                let travel = drone.move_to(order_ref.location);
                let finish = turn + travel + 1;
                if !drone.deliver(order_ref, &self.products[product], quantity) {
                    debug!(
                        "Drone {} could not deliver {} x product {} to order {}",
                        d, quantity, product, order
                    );
                }
                if order_ref.is_fulfilled() && self.completions[order].is_none() {
                    self.completions[order] = Some(finish);
                    self.pending.retain(|&o| o != order);
                    debug!("Order {} completed at turn {}", order, finish);
                }
                finish
            }
        };

        drone.busy_until = finish;
        self.timeline[d].push(ScheduledAction {
            start: turn,
            finish,
            action,
        });
    }

    /// Rejects worlds where some product can never be supplied in full or
    /// is too heavy for any drone.
    fn check_feasible(&self) -> Result<(), DeliveryError> {
        let max_payload = self
            .world
            .drones
            .iter()
            .map(|d| d.max_payload)
            .max()
            .ok_or(DeliveryError::EmptyFleet)?;

        let mut demand = vec![0u64; self.products.len()];
        for &o in &self.pending {
            for line in &self.world.orders[o].items {
                if line.quantity == 0 {
                    continue;
                }
                let product = &self.products[line.product];
                if product.weight > max_payload {
                    return Err(DeliveryError::PayloadExceeded {
                        product: product.id,
                        weight: product.weight,
                        max_payload,
                    });
                }
                demand[line.product] += line.quantity as u64;
                if demand[line.product] > self.world.total_stock(line.product) {
                    return Err(DeliveryError::InsufficientStock {
                        product: line.product,
                        order: o,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Runs the simulator on a fresh snapshot of `simulation`.
pub fn simulate(
    simulation: &Simulation,
    order_sequence: &[usize],
    config: &SimulatorConfig,
) -> Result<SimulationOutcome, DeliveryError> {
    DeliverySimulator::new(
        simulation.snapshot(),
        &simulation.products,
        simulation.deadline,
        order_sequence,
        config.clone(),
    )
    .run()
}
