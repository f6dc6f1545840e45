//! Sample Post Adapters

mod file_sample_source;

pub use file_sample_source::{FileSamplePostSource, StaticSamplePostSource};
