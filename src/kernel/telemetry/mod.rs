//! Session telemetry.
//!
//! # SAFETY INVARIANT
//! Telemetry is a READ-ONLY side-effect layer.
//! It must **NEVER** be read inside extraction or the acceptance gate.
//!
//! # PRIVACY INVARIANT
//! Events must **NEVER** contain sentence text. Only action codes, modes and
//! counts are allowed.

pub mod event;
pub mod metrics;
pub mod recorder;

pub use event::{RejectionTarget, TelemetryEvent};
pub use metrics::{compute_snapshot, TelemetrySnapshot};
pub use recorder::TelemetryRecorder;
