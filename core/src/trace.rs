//! Match trace types for debugging rule decisions.
//!
//! [`MatchTrace`] captures the same boolean as [`RuleSet::matches`](crate::RuleSet::matches)
//! plus *why*: which step of the algorithm decided and, for pattern hits,
//! which pattern fired.
//!
//! # Example
//!
//! ```
//! use refgate::prelude::*;
//!
//! let rules = RuleSet::build("push", RefPatterns::new().tags("/^v/")).unwrap();
//! let trace = rules.match_with_trace("push", "refs/heads/main");
//! assert!(!trace.matched);
//! assert_eq!(trace.decision, Decision::KindNotConfigured);
//! ```

use crate::Reference;
use std::fmt;

/// The step of the matching algorithm that produced the result.
///
/// Steps are checked in declaration order; the first applicable one decides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The rule's event is empty, so any event and ref match.
    WildcardEvent,
    /// The supplied event differs from the rule's event.
    EventMismatch,
    /// The event matched and the rule has no patterns for any kind.
    NoPatterns,
    /// The rule has patterns, but none for this ref's kind.
    KindNotConfigured,
    /// A pattern for this ref's kind matched the name.
    PatternMatched {
        /// Position of the first matching pattern in the kind's list.
        index: usize,
    },
    /// Patterns exist for this ref's kind and none matched the name.
    NoPatternMatched,
}

impl Decision {
    /// The boolean this decision resolves to.
    #[must_use]
    pub fn matched(&self) -> bool {
        match self {
            Self::WildcardEvent | Self::NoPatterns | Self::PatternMatched { .. } => true,
            Self::EventMismatch | Self::KindNotConfigured | Self::NoPatternMatched => false,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WildcardEvent => f.write_str("rule event is empty, any event matches"),
            Self::EventMismatch => f.write_str("event does not match rule event"),
            Self::NoPatterns => f.write_str("event matches and no ref patterns are configured"),
            Self::KindNotConfigured => f.write_str("no patterns configured for this ref kind"),
            Self::PatternMatched { index } => write!(f, "pattern #{index} matches ref name"),
            Self::NoPatternMatched => f.write_str("no pattern matches ref name"),
        }
    }
}

/// Trace of a full [`RuleSet`](crate::RuleSet) evaluation.
///
/// # INV: `matched` == `matches()` result
///
/// The `matched` field always equals what [`RuleSet::matches`](crate::RuleSet::matches)
/// returns for the same event and ref.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTrace {
    /// The final result.
    pub matched: bool,
    /// The event that was supplied.
    pub event: String,
    /// The ref after classification.
    pub reference: Reference,
    /// Which step decided.
    pub decision: Decision,
}

impl fmt::Display for MatchTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, event \"{}\", ref {})",
            self.matched, self.decision, self.event, self.reference
        )
    }
}
