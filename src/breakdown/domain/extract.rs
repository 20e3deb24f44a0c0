//! Recovery of structured data from free-form provider text.
//!
//! Providers are asked for bare JSON but often wrap it in Markdown or
//! surround it with prose. Each [`ExtractionStrategy`] is one attempt at
//! recovering the JSON; they are tried in [`ExtractionStrategy::ORDERED`]
//! order and none is assumed to succeed.

use serde_json::Value;

const FENCE: &str = "```";
const JSON_TAG: &str = "json";

/// One way of locating JSON inside a provider response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractionStrategy {
    /// Parse the whole response as JSON.
    Direct,
    /// Parse the interior of a fenced code block holding an array.
    FencedBlock,
    /// Parse the span from the first `[` to the last `]`.
    BracketSpan,
}

impl ExtractionStrategy {
    /// Strategies in the order they are attempted.
    pub const ORDERED: [Self; 3] = [Self::Direct, Self::FencedBlock, Self::BracketSpan];

    /// Returns a short name for logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::FencedBlock => "fenced_block",
            Self::BracketSpan => "bracket_span",
        }
    }

    /// Attempts this strategy, returning `None` when it does not apply or
    /// the located text is not valid JSON.
    #[must_use]
    pub fn extract(self, raw: &str) -> Option<Value> {
        match self {
            Self::Direct => serde_json::from_str(raw.trim()).ok(),
            Self::FencedBlock => extract_fenced_array(raw),
            Self::BracketSpan => extract_bracket_span(raw),
        }
    }
}

/// Runs every strategy in order and returns the first success along with
/// the strategy that produced it.
#[must_use]
pub fn extract_json(raw: &str) -> Option<(ExtractionStrategy, Value)> {
    ExtractionStrategy::ORDERED
        .into_iter()
        .find_map(|strategy| strategy.extract(raw).map(|value| (strategy, value)))
}

fn extract_fenced_array(raw: &str) -> Option<Value> {
    let mut rest = raw;
    while let Some(open) = rest.find(FENCE) {
        let after_open = rest.get(open + FENCE.len()..)?;
        let close = after_open.find(FENCE)?;
        if let Some(value) = after_open.get(..close).and_then(parse_fenced_body) {
            return Some(value);
        }
        rest = after_open.get(close + FENCE.len()..)?;
    }
    None
}

fn parse_fenced_body(body: &str) -> Option<Value> {
    let leading = body.trim_start();
    let untagged = leading
        .get(..JSON_TAG.len())
        .filter(|tag| tag.eq_ignore_ascii_case(JSON_TAG))
        .and_then(|_| leading.get(JSON_TAG.len()..))
        .unwrap_or(leading)
        .trim();
    if !(untagged.starts_with('[') && untagged.ends_with(']')) {
        return None;
    }
    serde_json::from_str(untagged).ok()
}

fn extract_bracket_span(raw: &str) -> Option<Value> {
    let start = raw.find('[')?;
    let end = raw.rfind(']')?;
    if end < start {
        return None;
    }
    raw.get(start..=end)
        .and_then(|span| serde_json::from_str(span).ok())
}
