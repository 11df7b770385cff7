//! `TriggerContext` — The ambient event and ref of the hosting CI
//!
//! GitHub Actions exposes the triggering event as `GITHUB_EVENT_NAME` and the
//! ref as `GITHUB_REF`. This is the only place those variables are read; the
//! rest of the crate takes explicit values.

use crate::Reference;

/// Environment variable holding the trigger event name (e.g. `push`).
pub const EVENT_NAME_VAR: &str = "GITHUB_EVENT_NAME";

/// Environment variable holding the raw ref (e.g. `refs/heads/main`).
pub const REF_VAR: &str = "GITHUB_REF";

/// The (event, ref) pair a rule is evaluated against.
///
/// # Example
///
/// ```
/// use refgate::{TriggerContext, EVENT_NAME_VAR, REF_VAR};
///
/// let ctx = TriggerContext::from_lookup(|key| match key {
///     EVENT_NAME_VAR => Some("push".to_string()),
///     REF_VAR => Some("refs/tags/v1.2.0".to_string()),
///     _ => None,
/// });
/// assert_eq!(ctx.event_name(), "push");
/// assert_eq!(ctx.reference().name(), "v1.2.0");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerContext {
    event_name: String,
    git_ref: String,
}

impl TriggerContext {
    /// Create a context from explicit values.
    pub fn new(event_name: impl Into<String>, git_ref: impl Into<String>) -> Self {
        Self {
            event_name: event_name.into(),
            git_ref: git_ref.into(),
        }
    }

    /// Read [`EVENT_NAME_VAR`] and [`REF_VAR`] from the process environment.
    ///
    /// Unset or non-UTF-8 variables become empty strings.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a context from any variable lookup. Missing keys become empty
    /// strings.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let ctx = Self {
            event_name: lookup(EVENT_NAME_VAR).unwrap_or_default(),
            git_ref: lookup(REF_VAR).unwrap_or_default(),
        };
        tracing::trace!(event = %ctx.event_name, git_ref = %ctx.git_ref, "loaded trigger context");
        ctx
    }

    /// Replace the event name (builder pattern).
    #[must_use]
    pub fn with_event_name(mut self, event_name: impl Into<String>) -> Self {
        self.event_name = event_name.into();
        self
    }

    /// Replace the raw ref (builder pattern).
    #[must_use]
    pub fn with_ref(mut self, git_ref: impl Into<String>) -> Self {
        self.git_ref = git_ref.into();
        self
    }

    /// Get the trigger event name.
    #[must_use]
    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    /// Get the raw ref string.
    #[must_use]
    pub fn git_ref(&self) -> &str {
        &self.git_ref
    }

    /// Classify the raw ref.
    #[must_use]
    pub fn reference(&self) -> Reference {
        Reference::parse(&self.git_ref)
    }
}
