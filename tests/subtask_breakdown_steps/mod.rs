//! Step definitions for subtask breakdown scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
