//! Fixed-shape status documents
//!
//! Each snapshot mixes constant fields with small random perturbations
//! around documented base values.

mod analytics;
mod database;
mod health;
mod infrastructure;

pub use analytics::*;
pub use database::*;
pub use health::*;
pub use infrastructure::*;
