//! Shared widgets

mod spinner;

pub use spinner::*;
