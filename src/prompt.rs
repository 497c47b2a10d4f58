/// The fixed token replaced with the user's prompt.
pub const USER_PROMPT_PLACEHOLDER: &str = "{user_prompt}";

/// Outcome of template rendering. A template without the placeholder is passed
/// through unchanged (the user prompt is dropped); callers decide whether to
/// log that, so the condition is a variant rather than a silent no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedPrompt {
    Substituted(String),
    PlaceholderMissing(String),
}

impl RenderedPrompt {
    pub fn text(&self) -> &str {
        match self {
            Self::Substituted(s) | Self::PlaceholderMissing(s) => s,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Substituted(s) | Self::PlaceholderMissing(s) => s,
        }
    }

    pub fn placeholder_found(&self) -> bool {
        matches!(self, Self::Substituted(_))
    }
}

/// Substitute the first `{user_prompt}` occurrence in `template` with
/// `user_prompt`, verbatim. No escaping, no recursive substitution; a second
/// occurrence of the token survives as a literal.
pub fn render(template: &str, user_prompt: &str) -> RenderedPrompt {
    if template.contains(USER_PROMPT_PLACEHOLDER) {
        RenderedPrompt::Substituted(template.replacen(USER_PROMPT_PLACEHOLDER, user_prompt, 1))
    } else {
        RenderedPrompt::PlaceholderMissing(template.to_string())
    }
}
