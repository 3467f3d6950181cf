//! Typed models

mod schema;
mod submission;
mod value;

pub use schema::*;
pub use submission::*;
pub use value::*;
