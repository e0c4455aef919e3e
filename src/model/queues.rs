// src/model/queues.rs

use serde::Serialize;
use std::collections::VecDeque;

/// A single step a drone can be told to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DroneAction {
    Load {
        warehouse: usize,
        product: usize,
        quantity: u32,
    },
    Deliver {
        order: usize,
        product: usize,
        quantity: u32,
    },
}

impl DroneAction {
    pub fn product(&self) -> usize {
        match *self {
            DroneAction::Load { product, .. } | DroneAction::Deliver { product, .. } => product,
        }
    }

    pub fn quantity(&self) -> u32 {
        match *self {
            DroneAction::Load { quantity, .. } | DroneAction::Deliver { quantity, .. } => quantity,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DroneAction::Load { .. } => "load",
            DroneAction::Deliver { .. } => "deliver",
        }
    }
}

/// FIFO of actions a drone has been assigned but not yet started.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionQueue {
    buffer: VecDeque<DroneAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the next action to execute.
    pub fn pop_next(&mut self) -> Option<DroneAction> {
        self.buffer.pop_front()
    }

    pub fn push(&mut self, action: DroneAction) {
        self.buffer.push_back(action);
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }
}
