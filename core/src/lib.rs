//! refgate - gate automation steps on trigger events and git refs
//!
//! Decides whether an event (a trigger name such as `push`, paired with a git
//! ref such as `refs/heads/main`) satisfies a declared rule.
//!
//! # Architecture
//!
//! - [`Reference`] — A ref classified into a [`RefKind`] and a bare name
//! - [`Pattern`] — Literal or regex, compiled from `main` or `/^release-/i` syntax
//! - [`RuleSet`] — Required event name plus per-kind pattern lists
//! - [`MatchTrace`] — Which step of the algorithm decided, for debugging
//! - [`TriggerContext`] — The ambient (event, ref) pair of the hosting CI
//!
//! # Key Design Insights
//!
//! 1. **Classification is total**: every string classifies, unknown namespaces
//!    land in [`RefKind::Other`].
//!
//! 2. **Construction fails loudly, matching never fails**: a bad `/regex/` is
//!    reported by [`RuleSet::build`]; [`RuleSet::matches`] is a plain predicate.
//!
//! 3. **No hidden environment reads**: the core takes explicit event/ref values.
//!    [`TriggerContext::from_env`] is the only place the environment is touched.
//!
//! # Example
//!
//! ```
//! use refgate::prelude::*;
//!
//! let rules = RuleSet::build(
//!     "push",
//!     RefPatterns::new().branches(["main", "/^release-/"]),
//! )
//! .unwrap();
//!
//! assert!(rules.matches("push", "refs/heads/main"));
//! assert!(rules.matches("push", "refs/heads/release-1.0"));
//! assert!(!rules.matches("push", "refs/heads/develop"));
//! assert!(!rules.matches("push", "refs/tags/v1.0"));
//! assert!(!rules.matches("pull_request", "refs/heads/main"));
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod context;
mod pattern;
mod reference;
mod rule_set;
mod trace;

#[cfg(feature = "serde")]
mod config;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

pub use context::{TriggerContext, EVENT_NAME_VAR, REF_VAR};
pub use pattern::{Pattern, PatternList};
pub use reference::{classify, RefKind, Reference, ToReference};
pub use rule_set::{RefPatterns, RuleSet};
pub use trace::{Decision, MatchTrace};

#[cfg(feature = "serde")]
pub use config::RuleConfig;

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use refgate::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "serde")]
    pub use crate::RuleConfig;
    pub use crate::{
        classify, Decision, MatchTrace, Pattern, PatternList, RefKind, RefPatterns, Reference,
        RuleError, RuleSet, ToReference, TriggerContext,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from rule construction.
///
/// These surface at config load time, never at match time.
/// Fix the configuration and rebuild the [`RuleSet`].
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// A `/body/flags` pattern was rejected by the regex engine.
    #[error("invalid pattern \"{pattern}\": {source}")]
    InvalidPattern {
        /// The pattern specification as written.
        pattern: String,
        /// The regex engine's error.
        source: regex::Error,
    },
    /// A rule config document could not be deserialized.
    #[error("invalid config: {source}")]
    InvalidConfig {
        /// The deserializer's error.
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
