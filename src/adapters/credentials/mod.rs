//! Credentials Adapters
//!
//! - `EnvCredentialsProvider` - Values from configuration / environment
//! - `FileCredentialsProvider` - JSON secret document on disk

mod env_credentials;
mod file_credentials;

pub use env_credentials::EnvCredentialsProvider;
pub use file_credentials::FileCredentialsProvider;
