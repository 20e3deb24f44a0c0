//! Application services for breakdown generation.

mod generator;

pub use generator::{BreakdownResult, BreakdownService};
