// src/simulation/context.rs

use crate::error::DeliveryError;
use crate::io::input::ParsedInput;
use crate::model::{Drone, Grid, Location, Order, Product, Warehouse, WorldState};
use std::sync::Arc;

/// The aggregate root of one delivery problem.
///
/// Products, grid and deadline never change; `initial` holds the starting
/// world. Optimizers call [`Simulation::snapshot`] for every trial.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub grid: Grid,
    pub deadline: u32,
    pub products: Arc<[Product]>,
    initial: WorldState,
}

impl Simulation {
    /// Builds the world from parsed input. Every drone starts at warehouse 0.
    pub fn from_input(input: &ParsedInput) -> Result<Self, DeliveryError> {
        let grid = Grid::new(input.rows, input.cols);
        let products: Arc<[Product]> = input
            .product_weights
            .iter()
            .enumerate()
            .map(|(id, &weight)| Product { id, weight })
            .collect();

        let warehouses: Vec<Warehouse> = input
            .warehouses
            .iter()
            .enumerate()
            .map(|(id, w)| {
                let mut stock = w.stock.clone();
                stock.resize(products.len(), 0);
                Warehouse::new(id, Location::new(w.location.0, w.location.1), stock)
            })
            .collect();

        let orders: Vec<Order> = input
            .orders
            .iter()
            .enumerate()
            .map(|(id, o)| {
                Order::from_product_types(
                    id,
                    Location::new(o.destination.0, o.destination.1),
                    &o.product_types,
                )
            })
            .collect();

        let start = warehouses
            .first()
            .map(|w| w.location)
            .ok_or(DeliveryError::NoWarehouses)?;
        let drones = (0..input.num_drones)
            .map(|id| Drone::new(id, start, input.max_payload, products.len()))
            .collect();

        Self::new(grid, input.deadline, products, drones, warehouses, orders)
    }

    /// Assembles a simulation from already-built entities and checks that
    /// they are consistent.
    pub fn new(
        grid: Grid,
        deadline: u32,
        products: Arc<[Product]>,
        drones: Vec<Drone>,
        warehouses: Vec<Warehouse>,
        orders: Vec<Order>,
    ) -> Result<Self, DeliveryError> {
        if drones.is_empty() {
            return Err(DeliveryError::EmptyFleet);
        }
        if warehouses.is_empty() {
            return Err(DeliveryError::NoWarehouses);
        }

        let locations = warehouses
            .iter()
            .map(|w| w.location)
            .chain(orders.iter().map(|o| o.location));
        for location in locations {
            if !grid.is_valid_location(&location) {
                return Err(DeliveryError::OutOfGrid {
                    x: location.x,
                    y: location.y,
                    rows: grid.rows,
                    cols: grid.cols,
                });
            }
        }

        if let Some(line) = orders
            .iter()
            .flat_map(|o| o.items.iter())
            .find(|line| line.product >= products.len())
        {
            return Err(DeliveryError::UnknownProduct(line.product));
        }

        Ok(Self {
            grid,
            deadline,
            products,
            initial: WorldState {
                drones,
                warehouses,
                orders,
            },
        })
    }

    /// A fresh, exclusively owned copy of the starting world.
    pub fn snapshot(&self) -> WorldState {
        self.initial.clone()
    }

    pub fn drones(&self) -> &[Drone] {
        &self.initial.drones
    }

    pub fn warehouses(&self) -> &[Warehouse] {
        &self.initial.warehouses
    }

    pub fn orders(&self) -> &[Order] {
        &self.initial.orders
    }

    pub fn product(&self, id: usize) -> Result<&Product, DeliveryError> {
        self.products.get(id).ok_or(DeliveryError::UnknownProduct(id))
    }

    /// Where the fleet takes off from.
    pub fn start_location(&self) -> Location {
        self.initial.warehouses[0].location
    }

    pub fn max_payload(&self) -> u32 {
        self.initial.drones[0].max_payload
    }
}
