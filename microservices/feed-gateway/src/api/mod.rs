//! API module - REST snapshots, exports and the live log stream

pub mod rest;

pub use rest::{create_router, AppState};
