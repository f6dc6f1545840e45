//! Theme Rotation - scheduled post generation over a two-level theme taxonomy.
//!
//! Each run generates a small batch of posts for the active subtheme,
//! publishes them, and advances a persisted cursor so that every subtheme
//! gets the same number of posts before the rotation wraps around.

pub mod adapters;
pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod ports;
