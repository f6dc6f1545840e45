//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the rotation core to external systems:
//! - `storage` - Cycle state persistence (file, in-memory)
//! - `ai` - LLM provider and content generation
//! - `publishing` - Posting to X, or recording for dry runs
//! - `credentials` - API secrets from config or a secret file
//! - `samples` - Sample posts that set the voice
//! - `clock` - System and fixed clocks

pub mod ai;
pub mod clock;
pub mod credentials;
pub mod publishing;
pub mod samples;
pub mod storage;

pub use clock::{FixedClock, SystemClock};
