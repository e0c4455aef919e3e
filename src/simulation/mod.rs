// src/simulation/mod.rs

pub mod config;
pub mod context;
pub mod engine;
pub mod scoring;

pub use context::Simulation;
pub use engine::{simulate, DeliverySimulator, SimulationOutcome};
