//! Unit tests for the task module.

mod sequencer_tests;
