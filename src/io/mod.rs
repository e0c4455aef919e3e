// src/io/mod.rs

pub mod input;
pub mod instance;
pub mod reporting;
