//! Application layer - Handlers.
//!
//! This layer sequences domain operations and coordinates between ports.
//! The rotation bot has a single use case: run one publishing cycle.

pub mod handlers;

pub use handlers::{CyclePorts, RotationSettings, RunCycleError, RunCycleHandler, RunCycleReport};
