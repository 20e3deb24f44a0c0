//! Persistence adapters for the task module.
//!
//! - [`memory::InMemoryTaskRepository`]: thread-safe in-memory storage for
//!   tests and single-process hosts
//! - [`postgres::PostgresTaskRepository`]: `PostgreSQL` persistence using
//!   Diesel ORM

pub mod memory;
pub mod postgres;
