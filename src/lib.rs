//! Taskbreak: task management with AI-generated subtask breakdowns.
//!
//! Tasks hold an ordered sequence of subtasks. Subtasks can be added by
//! hand or proposed by an external text-generation provider, whose free
//! text is recovered, validated, and sequenced after the task's existing
//! subtasks.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, APIs, etc.)
//! - **Services**: Orchestration over ports
//!
//! # Modules
//!
//! - [`task`]: Tasks, subtasks, and the subtask sequencer
//! - [`breakdown`]: Prompt construction, response recovery, and validation
//! - [`api`]: Transport-agnostic request handlers
//! - [`config`]: Environment-driven configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod api;
pub mod breakdown;
pub mod config;
pub mod task;
pub mod telemetry;
