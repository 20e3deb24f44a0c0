//! AI-assisted subtask breakdown.
//!
//! A task's title and description are rendered into a prompt, sent to an
//! external text-generation provider, and the free-text reply is recovered
//! and validated into an ordered list of subtask candidates. The module
//! follows the same hexagonal split as [`crate::task`]:
//!
//! - Prompt, extraction, and validation in [`domain`]
//! - The provider contract in [`ports`]
//! - Gemini and scripted providers in [`adapters`]
//! - Generation orchestration in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
