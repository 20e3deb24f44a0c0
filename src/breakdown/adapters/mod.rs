//! Adapter implementations for the text-generation port.

mod canned;
mod gemini;

pub use canned::CannedTextProvider;
pub use gemini::GeminiProvider;
