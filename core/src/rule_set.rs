//! `RuleSet` — Event name plus per-kind ref patterns
//!
//! Matching short-circuits in a fixed order:
//!
//! 1. Classify the ref into `(kind, name)`.
//! 2. Empty rule event → match (wildcard, patterns are not consulted).
//! 3. Rule event ≠ supplied event → no match.
//! 4. No patterns configured for any kind → match.
//! 5. No patterns configured for this kind → no match.
//! 6. Match iff any pattern for this kind matches the name.

use crate::{
    Decision, MatchTrace, Pattern, PatternList, RefKind, Reference, RuleError, ToReference,
    TriggerContext,
};
use std::collections::BTreeMap;
use std::fmt;

/// Construction input: optional branch and tag pattern lists.
///
/// # Example
///
/// ```
/// use refgate::RefPatterns;
///
/// let patterns = RefPatterns::new()
///     .branches(["main", "/^release-/"])
///     .tags("/^v\\d+/");
/// assert!(patterns.branches.is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefPatterns {
    /// Patterns for [`RefKind::Branch`] refs.
    pub branches: Option<PatternList>,
    /// Patterns for [`RefKind::Tag`] refs.
    pub tags: Option<PatternList>,
}

impl RefPatterns {
    /// No patterns for any kind.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the branch patterns (builder pattern).
    #[must_use]
    pub fn branches(mut self, patterns: impl Into<PatternList>) -> Self {
        self.branches = Some(patterns.into());
        self
    }

    /// Set the tag patterns (builder pattern).
    #[must_use]
    pub fn tags(mut self, patterns: impl Into<PatternList>) -> Self {
        self.tags = Some(patterns.into());
        self
    }
}

/// An immutable rule: required event plus per-kind pattern lists.
///
/// Build once at config load time and reuse for every match. `RuleSet` is
/// `Send + Sync`.
///
/// # Example
///
/// ```
/// use refgate::{RefPatterns, RuleSet};
///
/// let rules = RuleSet::build("push", RefPatterns::new().branches("main")).unwrap();
/// assert!(rules.matches("push", "refs/heads/main"));
/// assert!(!rules.matches("push", "refs/heads/develop"));
///
/// // Empty event is a wildcard.
/// assert!(RuleSet::new("").matches("anything", "refs/tags/v1"));
/// ```
#[derive(Debug, Clone)]
pub struct RuleSet {
    event: String,
    /// Only kinds with a non-empty list are present.
    patterns: BTreeMap<RefKind, Vec<Pattern>>,
    has_any_patterns: bool,
}

impl RuleSet {
    /// A rule with an event and no ref patterns. Cannot fail.
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            patterns: BTreeMap::new(),
            has_any_patterns: false,
        }
    }

    /// Build a rule from an event and pattern specifications.
    ///
    /// The event is stored verbatim (no trimming, no case folding). Each
    /// specification compiles via [`Pattern::parse`]; an absent or empty list
    /// leaves that kind unconfigured.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidPattern`] if a `/body/flags` specification
    /// is rejected by the regex engine.
    pub fn build(event: impl Into<String>, patterns: RefPatterns) -> Result<Self, RuleError> {
        let mut compiled = BTreeMap::new();
        for (kind, list) in [
            (RefKind::Branch, patterns.branches),
            (RefKind::Tag, patterns.tags),
        ] {
            let Some(list) = list.filter(|l| !l.is_empty()) else {
                continue;
            };
            compiled.insert(kind, list.compile()?);
        }

        let has_any_patterns = compiled.values().any(|l| !l.is_empty());
        Ok(Self {
            event: event.into(),
            patterns: compiled,
            has_any_patterns,
        })
    }

    /// Returns the required event (empty means any event).
    #[must_use]
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Returns the patterns configured for `kind`, if any.
    #[must_use]
    pub fn patterns(&self, kind: RefKind) -> Option<&[Pattern]> {
        self.patterns.get(&kind).map(Vec::as_slice)
    }

    /// Whether at least one kind has patterns.
    #[must_use]
    pub fn has_any_patterns(&self) -> bool {
        self.has_any_patterns
    }

    /// Decide whether `event` and `reference` satisfy this rule.
    ///
    /// `reference` is a raw ref string such as `"refs/heads/main"` or an
    /// already classified [`Reference`]. Never fails.
    #[must_use]
    pub fn matches<R: ToReference + ?Sized>(&self, event: &str, reference: &R) -> bool {
        let reference = reference.to_reference();
        self.decide(event, &reference).matched()
    }

    /// Like [`matches`](Self::matches), but also reports which step decided.
    ///
    /// INV: `match_with_trace(e, r).matched == matches(e, r)`.
    #[must_use]
    pub fn match_with_trace<R: ToReference + ?Sized>(
        &self,
        event: &str,
        reference: &R,
    ) -> MatchTrace {
        let reference = reference.to_reference().into_owned();
        let decision = self.decide(event, &reference);
        MatchTrace {
            matched: decision.matched(),
            event: event.to_owned(),
            reference,
            decision,
        }
    }

    /// Match against the ambient event and ref of the hosting CI.
    #[must_use]
    pub fn matches_context(&self, ctx: &TriggerContext) -> bool {
        self.matches(ctx.event_name(), ctx.git_ref())
    }

    fn decide(&self, event: &str, reference: &Reference) -> Decision {
        let kind = reference.kind();
        let configured = self.patterns(kind);
        tracing::debug!(
            event,
            kind = %kind,
            name = reference.name(),
            rule_event = %self.event,
            rule_patterns = %PatternsDisplay(configured),
            "matching ref against rule"
        );

        if self.event.is_empty() {
            return Decision::WildcardEvent;
        }
        if self.event != event {
            return Decision::EventMismatch;
        }
        if !self.has_any_patterns {
            return Decision::NoPatterns;
        }
        let Some(patterns) = configured else {
            return Decision::KindNotConfigured;
        };

        patterns
            .iter()
            .position(|p| p.is_match(reference.name()))
            .map_or(Decision::NoPatternMatched, |index| Decision::PatternMatched { index })
    }
}

/// Renders an optional pattern list as `[main, /^release-/]`, or `-` if unset.
struct PatternsDisplay<'a>(Option<&'a [Pattern]>);

impl fmt::Display for PatternsDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(patterns) = self.0 else {
            return f.write_str("-");
        };
        f.write_str("[")?;
        for (i, p) in patterns.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{p}")?;
        }
        f.write_str("]")
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.event.is_empty() {
            f.write_str("any event")?;
        } else {
            write!(f, "event \"{}\"", self.event)?;
        }
        for (kind, patterns) in &self.patterns {
            write!(f, ", {kind} {}", PatternsDisplay(Some(patterns.as_slice())))?;
        }
        Ok(())
    }
}
