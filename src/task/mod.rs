//! Task and subtask management.
//!
//! Tasks own an ordered sequence of subtasks. Subtasks arrive either from
//! callers or from AI breakdown generation, and both paths go through the
//! same sequencing rules so positions stay unique per task. The module
//! follows hexagonal architecture:
//!
//! - Domain types and the sequencer in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
