//! Application handlers.
//!
//! Handlers orchestrate domain operations across ports.

mod run_cycle;

pub use run_cycle::{
    CyclePorts, RotationSettings, RunCycleError, RunCycleHandler, RunCycleReport,
};
