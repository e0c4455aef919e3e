// src/lib.rs

//! Drone delivery scheduling: a discrete-event simulator plus ant colony,
//! simulated annealing and genetic searches over delivery schedules.

pub mod error;
pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{DeliveryError, InputError};
