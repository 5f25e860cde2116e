//! Pulse Synth
//!
//! Synthetic telemetry for the monitoring dashboard: time series, alerts,
//! server sweeps, log batches and nested status snapshots, plus the export
//! bundles built from them.
//!
//! Every generator takes the random source and the reference instant as
//! arguments, so a seeded `StdRng` and a fixed `now` reproduce a document
//! exactly. Nothing here performs I/O.

pub mod acknowledge;
pub mod error;
pub mod export;
pub mod generator;
pub mod model;
pub mod notifications;
pub mod snapshots;
pub mod templates;

#[cfg(test)]
mod tests;

pub use acknowledge::{acknowledge, acknowledgement_history, AcknowledgementHistory, AlertAcknowledgement};
pub use error::{Result, SynthError};
pub use export::{ExportBundle, ExportFormat, ExportKind, ExportParams};
pub use generator::{
    environment_multiplier, generate_alerts, generate_log_batch, generate_log_record,
    generate_metric_series, generate_server_snapshots, generate_time_series, point_count_for,
};
pub use model::*;
