//! Wizard session state machine

mod controller;
mod navigator;

pub use controller::*;
pub use navigator::*;
