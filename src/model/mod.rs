// src/model/mod.rs

pub mod drone;
pub mod geometry;
pub mod queues;
pub mod world;

pub use drone::Drone;
pub use geometry::{Grid, Location};
pub use queues::{ActionQueue, DroneAction};
pub use world::{Order, OrderLine, Product, Warehouse, WorldState};
