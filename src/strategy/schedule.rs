// src/strategy/schedule.rs

use crate::model::DroneAction;
use crate::simulation::config::LateCompletionPolicy;
use crate::simulation::context::Simulation;
use crate::simulation::engine::{ActionRecord, ScheduledAction, SimulationOutcome};
use crate::simulation::scoring::schedule_score;

/// A drone-tagged step of an order plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Load {
        drone: usize,
        warehouse: usize,
        product: usize,
        quantity: u32,
    },
    Deliver {
        drone: usize,
        order: usize,
        product: usize,
        quantity: u32,
    },
}

impl Command {
    pub fn drone(&self) -> usize {
        match *self {
            Command::Load { drone, .. } | Command::Deliver { drone, .. } => drone,
        }
    }

    pub fn as_action(&self) -> DroneAction {
        match *self {
            Command::Load {
                warehouse,
                product,
                quantity,
                ..
            } => DroneAction::Load {
                warehouse,
                product,
                quantity,
            },
            Command::Deliver {
                order,
                product,
                quantity,
                ..
            } => DroneAction::Deliver {
                order,
                product,
                quantity,
            },
        }
    }
}

/// How one order was served: the drones and warehouses involved and the
/// commands issued, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderPlan {
    pub order: usize,
    pub drones: Vec<usize>,
    pub warehouses: Vec<usize>,
    pub commands: Vec<Command>,
}

impl OrderPlan {
    pub fn new(order: usize) -> Self {
        Self {
            order,
            drones: Vec::new(),
            warehouses: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Appends a command, noting any new drone or warehouse it involves.
    pub fn push(&mut self, command: Command) {
        let drone = command.drone();
        if !self.drones.contains(&drone) {
            self.drones.push(drone);
        }
        if let Command::Load { warehouse, .. } = command {
            if !self.warehouses.contains(&warehouse) {
                self.warehouses.push(warehouse);
            }
        }
        self.commands.push(command);
    }
}

/// Consecutive actions a drone performs for one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderActions {
    pub order: usize,
    pub actions: Vec<DroneAction>,
}

/// Per drone, the sequence of order blocks it works through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroneSchedule {
    pub plans: Vec<Vec<OrderActions>>,
}

/// Timing of a schedule replayed with independent per-drone clocks.
#[derive(Debug, Clone)]
pub struct Replay {
    pub timeline: Vec<Vec<ScheduledAction>>,
    pub completions: Vec<Option<u32>>,
}

impl DroneSchedule {
    /// Groups each drone's simulator timeline into order blocks.
    pub fn from_outcome(outcome: &SimulationOutcome) -> Self {
        let plans = outcome
            .timeline
            .iter()
            .map(|actions| {
                let mut blocks: Vec<OrderActions> = Vec::new();
                let mut current: Option<usize> = None;
                for pair in actions.chunks(2) {
                    let order = pair.iter().find_map(|s| match s.action {
                        DroneAction::Deliver { order, .. } => Some(order),
                        DroneAction::Load { .. } => None,
                    });
                    // A trailing load without its delivery belongs to no order
                    let Some(order) = order else { continue };
                    if current != Some(order) {
                        blocks.push(OrderActions {
                            order,
                            actions: Vec::new(),
                        });
                        current = Some(order);
                    }
                    if let Some(block) = blocks.last_mut() {
                        block.actions.extend(pair.iter().map(|s| s.action));
                    }
                }
                blocks
            })
            .collect();
        Self { plans }
    }

    /// Splits per-order plans back into per-drone sequences, keeping the
    /// plan order. Commands for drones beyond `num_drones` are dropped.
    pub fn from_order_plans(plans: &[OrderPlan], num_drones: usize) -> Self {
        let mut schedule = Self {
            plans: vec![Vec::new(); num_drones],
        };
        for plan in plans {
            for command in &plan.commands {
                let Some(blocks) = schedule.plans.get_mut(command.drone()) else {
                    continue;
                };
                match blocks.last_mut() {
                    Some(block) if block.order == plan.order => block.actions.push(command.as_action()),
                    _ => blocks.push(OrderActions {
                        order: plan.order,
                        actions: vec![command.as_action()],
                    }),
                }
            }
        }
        schedule
    }

    pub fn num_blocks(&self) -> usize {
        self.plans.iter().map(Vec::len).sum()
    }

    /// Times every action assuming each drone flies its own plan from the
    /// fleet's start location, without re-checking stock or payload.
    pub fn replay(&self, simulation: &Simulation) -> Replay {
        let orders = simulation.orders();
        let warehouses = simulation.warehouses();
        let mut delivered: Vec<Vec<u32>> = orders
            .iter()
            .map(|_| vec![0; simulation.products.len()])
            .collect();
        let mut last_delivery: Vec<Option<u32>> = vec![None; orders.len()];

        let timeline = self
            .plans
            .iter()
            .map(|blocks| {
                let mut location = simulation.start_location();
                let mut clock = 0u32;
                let mut scheduled = Vec::new();
                for action in blocks.iter().flat_map(|b| b.actions.iter()) {
                    let target = match *action {
                        DroneAction::Load { warehouse, .. } => warehouses[warehouse].location,
                        DroneAction::Deliver { order, .. } => orders[order].location,
                    };
                    let start = clock;
                    clock += location.distance_to(&target) + 1;
                    location = target;

                    if let DroneAction::Deliver {
                        order,
                        product,
                        quantity,
                    } = *action
                    {
                        delivered[order][product] += quantity;
                        last_delivery[order] = last_delivery[order].max(Some(clock));
                    }
                    scheduled.push(ScheduledAction {
                        start,
                        finish: clock,
                        action: *action,
                    });
                }
                scheduled
            })
            .collect();

        let completions = orders
            .iter()
            .zip(last_delivery)
            .map(|(order, last)| {
                let covered = order
                    .items
                    .iter()
                    .all(|line| delivered[order.id][line.product] >= line.quantity);
                if covered {
                    last
                } else {
                    None
                }
            })
            .collect();

        Replay {
            timeline,
            completions,
        }
    }

    pub fn score(&self, simulation: &Simulation, policy: LateCompletionPolicy) -> f64 {
        let replay = self.replay(simulation);
        schedule_score(simulation.deadline, &replay.completions, policy)
    }

    /// Regroups the schedule per order.
    pub fn to_order_plans(&self) -> Vec<OrderPlan> {
        let mut plans: Vec<OrderPlan> = Vec::new();
        for (drone, blocks) in self.plans.iter().enumerate() {
            for block in blocks {
                let index = match plans.iter().position(|p| p.order == block.order) {
                    Some(index) => index,
                    None => {
                        plans.push(OrderPlan::new(block.order));
                        plans.len() - 1
                    }
                };
                for action in &block.actions {
                    let command = match *action {
                        DroneAction::Load {
                            warehouse,
                            product,
                            quantity,
                        } => Command::Load {
                            drone,
                            warehouse,
                            product,
                            quantity,
                        },
                        DroneAction::Deliver {
                            order,
                            product,
                            quantity,
                        } => Command::Deliver {
                            drone,
                            order,
                            product,
                            quantity,
                        },
                    };
                    plans[index].push(command);
                }
            }
        }
        plans.sort_by_key(|p| p.order);
        plans
    }

    pub fn records(&self, simulation: &Simulation) -> Vec<ActionRecord> {
        self.replay(simulation)
            .timeline
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Drone, Grid, Location, Order, Product, Warehouse};
    use crate::simulation::config::SimulatorConfig;
    use crate::simulation::engine::simulate;
    use std::sync::Arc;

    fn world() -> Simulation {
        let products: Arc<[Product]> = Arc::from(vec![Product { id: 0, weight: 1 }]);
        Simulation::new(
            Grid::new(40, 40),
            100,
            products,
            (0..2).map(|id| Drone::new(id, Location::new(0, 0), 3, 1)).collect(),
            vec![Warehouse::new(0, Location::new(0, 0), vec![20])],
            vec![
                Order::from_product_types(0, Location::new(0, 5), &[0; 4]),
                Order::from_product_types(1, Location::new(6, 8), &[0; 2]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn grouping_keeps_every_action() {
        let sim = world();
        let outcome = simulate(&sim, &[0, 1], &SimulatorConfig::default()).unwrap();
        let schedule = DroneSchedule::from_outcome(&outcome);
        let grouped: usize = schedule
            .plans
            .iter()
            .flatten()
            .map(|b| b.actions.len())
            .sum();
        assert_eq!(grouped, outcome.timeline.iter().map(Vec::len).sum::<usize>());
    }

    #[test]
    fn replay_matches_simulator_when_nobody_waits() {
        let sim = world();
        let outcome = simulate(&sim, &[0, 1], &SimulatorConfig::default()).unwrap();
        let schedule = DroneSchedule::from_outcome(&outcome);
        let replay = schedule.replay(&sim);
        assert_eq!(replay.completions, outcome.completions);
        assert!((schedule.score(&sim, LateCompletionPolicy::Penalize) - outcome.score).abs() < 1e-9);
    }

    #[test]
    fn order_plans_list_drones_and_warehouses() {
        let sim = world();
        let outcome = simulate(&sim, &[0, 1], &SimulatorConfig::default()).unwrap();
        let plans = DroneSchedule::from_outcome(&outcome).to_order_plans();
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].order, 0);
        assert_eq!(plans[0].warehouses, vec![0]);
        assert!(!plans[0].drones.is_empty());
        assert!(plans
            .iter()
            .all(|p| p.commands.len() % 2 == 0 && !p.commands.is_empty()));
    }

    #[test]
    fn dropping_a_delivery_leaves_order_incomplete() {
        let sim = world();
        let outcome = simulate(&sim, &[0, 1], &SimulatorConfig::default()).unwrap();
        let mut schedule = DroneSchedule::from_outcome(&outcome);
        let drone = schedule
            .plans
            .iter()
            .position(|blocks| blocks.iter().any(|b| b.order == 1))
            .unwrap();
        schedule.plans[drone].retain(|b| b.order != 1);
        assert_eq!(schedule.replay(&sim).completions[1], None);
    }

    #[test]
    fn order_plans_split_back_per_drone() {
        let sim = world();
        let outcome = simulate(&sim, &[0, 1], &SimulatorConfig::default()).unwrap();
        let schedule = DroneSchedule::from_outcome(&outcome);
        let rebuilt = DroneSchedule::from_order_plans(&schedule.to_order_plans(), 2);
        let count = |s: &DroneSchedule| -> usize {
            s.plans.iter().flatten().map(|b| b.actions.len()).sum()
        };
        assert_eq!(count(&rebuilt), count(&schedule));
        assert!(rebuilt.replay(&sim).completions.iter().all(Option::is_some));
    }
}
