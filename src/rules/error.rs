use text_size::TextRange;
use thiserror::Error;

/// A rule expression that does not compile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at {}..{}", u32::from(.range.start()), u32::from(.range.end()))]
pub struct RuleError {
    pub message: String,
    pub range: TextRange,
    /// Suggested fix, if one is obvious.
    pub hint: Option<String>,
}

impl RuleError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
