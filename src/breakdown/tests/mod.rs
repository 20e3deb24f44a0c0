//! Unit tests for the breakdown module.
//!
//! Extraction and validation are exercised against raw provider text; the
//! service is driven through a mocked provider.
