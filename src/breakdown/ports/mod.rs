//! Port contracts for breakdown generation.

pub mod provider;

pub use provider::{ProviderError, TextGenerationProvider};
