// src/error.rs

use thiserror::Error;

/// Failures raised by the delivery model, the simulator and the optimizers.
///
/// `InsufficientStock` and `PayloadExceeded` mark an infeasible instance: the
/// run that hit them is aborted and the error is handed back to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeliveryError {
    #[error("no warehouse holds enough stock of product {product} for order {order}")]
    InsufficientStock { product: usize, order: usize },

    #[error("product {product} weighs {weight}, more than the drone payload limit of {max_payload}")]
    PayloadExceeded {
        product: usize,
        weight: u32,
        max_payload: u32,
    },

    #[error("the drone fleet is empty")]
    EmptyFleet,

    #[error("the simulation has no warehouses")]
    NoWarehouses,

    #[error("unknown product id {0}")]
    UnknownProduct(usize),

    #[error("location ({x}, {y}) lies outside the {rows}x{cols} grid")]
    OutOfGrid { x: i32, y: i32, rows: u32, cols: u32 },

    #[error("simulation stalled at turn {turn} with {pending} orders pending")]
    Stalled { turn: u32, pending: usize },
}

/// Failures raised while reading the positional input format.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("input ended early, expected {0}")]
    UnexpectedEof(&'static str),

    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("invalid instance parameters: {0}")]
    InvalidParameters(String),
}
