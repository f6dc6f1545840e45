//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, days, timestamps, errors)
//! - `rotation` - Theme catalog, cycle state, transition and progress
//! - `content` - Prompt building and post extraction

pub mod content;
pub mod foundation;
pub mod rotation;
