//! Publishing Adapters
//!
//! - `XPublisher` - X v2 API with OAuth 1.0a signing
//! - `RecordingPublisher` - In-memory publisher for dry runs and tests

pub mod oauth1;
mod recording_publisher;
mod x_publisher;

pub use recording_publisher::RecordingPublisher;
pub use x_publisher::{XPublisher, XPublisherConfig};
