//! Instruction prompt sent to the text-generation provider.

use super::{BreakdownError, BreakdownRequest};
use minijinja::{Environment, context};

/// Title length suggested to the provider, in characters.
///
/// This is guidance only. Stored titles are capped separately at
/// [`MAX_TITLE_CHARS`](crate::task::domain::MAX_TITLE_CHARS).
pub const ADVISORY_TITLE_CHARS: usize = 100;

/// Smallest subtask count requested from the provider.
pub const MIN_REQUESTED_SUBTASKS: usize = 4;

/// Largest subtask count requested from the provider.
pub const MAX_REQUESTED_SUBTASKS: usize = 8;

const BREAKDOWN_TEMPLATE: &str = r#"You are a task breakdown expert. Break down the following task into {{ min_subtasks }}-{{ max_subtasks }} clear, actionable subtasks.

Main Task: {{ title }}
{% if description %}Additional Context: {{ description }}{% endif %}

Requirements:
- Each subtask should be specific and actionable
- Order them logically (what should be done first, second, etc.)
- Keep subtasks focused and not too broad
- Include a brief description for each subtask explaining why it's important

Respond with ONLY a JSON array of objects with this structure (no markdown, no other text):
[
  {
    "title": "Subtask title (max {{ advisory_title_chars }} characters)",
    "description": "Why this subtask is important and what it accomplishes"
  }
]"#;

/// Renders the breakdown instruction for a request.
///
/// # Errors
///
/// Returns [`BreakdownError::Prompt`] when template rendering fails.
pub fn render_prompt(request: &BreakdownRequest) -> Result<String, BreakdownError> {
    let environment = Environment::new();
    environment
        .render_str(
            BREAKDOWN_TEMPLATE,
            context! {
                title => request.title(),
                description => request.description(),
                min_subtasks => MIN_REQUESTED_SUBTASKS,
                max_subtasks => MAX_REQUESTED_SUBTASKS,
                advisory_title_chars => ADVISORY_TITLE_CHARS,
            },
        )
        .map_err(|error| BreakdownError::Prompt(error.to_string()))
}
