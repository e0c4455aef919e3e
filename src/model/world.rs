// src/model/world.rs

use crate::model::drone::Drone;
use crate::model::geometry::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
    pub id: usize,
    pub weight: u32,
}

/// A stocked depot. `stock` is indexed by product id.
#[derive(Debug, Clone, PartialEq)]
pub struct Warehouse {
    pub id: usize,
    pub location: Location,
    pub stock: Vec<u32>,
}

impl Warehouse {
    pub fn new(id: usize, location: Location, stock: Vec<u32>) -> Self {
        Self { id, location, stock }
    }

    pub fn available(&self, product: usize) -> u32 {
        self.stock.get(product).copied().unwrap_or(0)
    }

    /// Removes `quantity` units from stock. Returns false (and leaves stock
    /// untouched) when there are not enough units.
    pub fn take(&mut self, product: usize, quantity: u32) -> bool {
        match self.stock.get_mut(product) {
            Some(units) if *units >= quantity => {
                *units -= quantity;
                true
            }
            _ => false,
        }
    }
}

/// One product requirement of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    pub product: usize,
    pub quantity: u32,
}

/// A customer order. Lines keep the order in which products were first listed.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: usize,
    pub location: Location,
    pub items: Vec<OrderLine>,
    pub completed: bool,
}

impl Order {
    pub fn new(id: usize, location: Location, items: Vec<OrderLine>) -> Self {
        Self {
            id,
            location,
            items,
            completed: false,
        }
    }

    /// Builds an order from a raw product-type list, merging repeats.
    pub fn from_product_types(id: usize, location: Location, product_types: &[usize]) -> Self {
        let mut items: Vec<OrderLine> = Vec::new();
        for &product in product_types {
            match items.iter_mut().find(|line| line.product == product) {
                Some(line) => line.quantity += 1,
                None => items.push(OrderLine {
                    product,
                    quantity: 1,
                }),
            }
        }
        Self::new(id, location, items)
    }

    pub fn remaining(&self, product: usize) -> u32 {
        self.items
            .iter()
            .find(|line| line.product == product)
            .map(|line| line.quantity)
            .unwrap_or(0)
    }

    pub fn needs(&self, product: usize) -> bool {
        self.remaining(product) > 0
    }

    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    pub fn is_fulfilled(&self) -> bool {
        self.items.iter().all(|line| line.quantity == 0)
    }

    /// Credits up to `quantity` units of `product` and returns how many were
    /// actually needed.
    pub fn receive(&mut self, product: usize, quantity: u32) -> u32 {
        let accepted = match self.items.iter_mut().find(|line| line.product == product) {
            Some(line) => {
                let accepted = quantity.min(line.quantity);
                line.quantity -= accepted;
                accepted
            }
            None => 0,
        };
        if self.is_fulfilled() {
            self.completed = true;
        }
        accepted
    }
}

/// The mutable part of a simulation: everything a run consumes.
///
/// Each simulator run, ant, or fitness evaluation works on its own clone.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldState {
    pub drones: Vec<Drone>,
    pub warehouses: Vec<Warehouse>,
    pub orders: Vec<Order>,
}

impl WorldState {
    pub fn total_stock(&self, product: usize) -> u64 {
        self.warehouses
            .iter()
            .map(|w| w.available(product) as u64)
            .sum()
    }
}
