// src/model/drone.rs

use crate::model::geometry::Location;
use crate::model::queues::ActionQueue;
use crate::model::world::{Order, Product, Warehouse};

/// The state of a single delivery drone.
///
/// Invariant: `payload == sum(inventory[p] * weight[p])` and
/// `payload <= max_payload`. Only `load`, `deliver` and `discard` touch the
/// inventory, and each keeps the two in step.
#[derive(Debug, Clone, PartialEq)]
pub struct Drone {
    // Identity
    pub id: usize,

    // Physical state
    pub location: Location,
    pub max_payload: u32,
    pub payload: u32,
    pub inventory: Vec<u32>, // Units carried, indexed by product id

    // Scheduling state
    pub busy_until: u32,
    pub actions: ActionQueue,
}

impl Drone {
    pub fn new(id: usize, location: Location, max_payload: u32, num_products: usize) -> Self {
        Self {
            id,
            location,
            max_payload,
            payload: 0,
            inventory: vec![0; num_products],
            busy_until: 0,
            actions: ActionQueue::new(),
        }
    }

    /// Flies to `target` and returns the travel cost in turns.
    pub fn move_to(&mut self, target: Location) -> u32 {
        let cost = self.location.distance_to(&target);
        self.location = target;
        cost
    }

    pub fn remaining_capacity(&self) -> u32 {
        self.max_payload - self.payload
    }

    pub fn carrying(&self, product: usize) -> u32 {
        self.inventory.get(product).copied().unwrap_or(0)
    }

    /// Takes `quantity` units of `product` out of `warehouse`.
    ///
    /// Fails without side effects when the warehouse is short or the extra
    /// weight would break the payload limit.
    pub fn load(&mut self, warehouse: &mut Warehouse, product: &Product, quantity: u32) -> bool {
        let added = product.weight.saturating_mul(quantity);
        if warehouse.available(product.id) < quantity || added > self.remaining_capacity() {
            return false;
        }
        if product.id >= self.inventory.len() || !warehouse.take(product.id, quantity) {
            return false;
        }
        self.inventory[product.id] += quantity;
        self.payload += added;
        true
    }

    /// Hands `quantity` units of `product` to `order`.
    ///
    /// Fails when the drone carries fewer units. On success all `quantity`
    /// units leave the drone; units the order no longer needs are dropped.
    pub fn deliver(&mut self, order: &mut Order, product: &Product, quantity: u32) -> bool {
        if self.carrying(product.id) < quantity {
            return false;
        }
        self.inventory[product.id] -= quantity;
        self.payload -= product.weight * quantity;
        order.receive(product.id, quantity);
        true
    }

    /// Drops every carried unit of `product`, returning how many were dropped.
    pub fn discard(&mut self, product: &Product) -> u32 {
        let dropped = self.carrying(product.id);
        if dropped > 0 {
            self.inventory[product.id] = 0;
            self.payload -= product.weight * dropped;
        }
        dropped
    }

    /// Recomputes the payload from the inventory.
    pub fn carried_weight(&self, products: &[Product]) -> u32 {
        self.inventory
            .iter()
            .zip(products)
            .map(|(units, product)| units * product.weight)
            .sum()
    }
}
