//! `Pattern` — Literal or regex test against a ref name
//!
//! Patterns are written as plain strings. A string shaped like `/body/flags`
//! compiles to a regular expression, anything else is an exact literal:
//!
//! | Written           | Compiles to                                |
//! |-------------------|--------------------------------------------|
//! | `main`            | literal, equals `main`                     |
//! | `/^release-/`     | regex `^release-`, found anywhere          |
//! | `/^hotfix/i`      | regex `(?i)^hotfix`                        |
//! | `/`, `//`, `/a`   | literals (body must be non-empty)          |
//!
//! Flags are handed to the regex engine as an inline flag group, untouched.
//! Flags the engine does not know (such as `g`) fail at construction.

use crate::RuleError;
use std::fmt;
use std::sync::LazyLock;

/// `/body/flags`: body is non-empty and single-line, flags are word characters.
/// Greedy body, so the *last* slash separates body from flags.
static REGEX_SPEC: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^/([^\n\r\x{2028}\x{2029}]+)/([A-Za-z0-9_]*)$")
        .expect("pattern grammar is a valid regex")
});

/// A compiled ref-name pattern.
///
/// # Example
///
/// ```
/// use refgate::Pattern;
///
/// let literal = Pattern::parse("main").unwrap();
/// assert!(literal.is_match("main"));
/// assert!(!literal.is_match("main-2"));
///
/// let regex = Pattern::parse("/^release-/").unwrap();
/// assert!(regex.is_match("release-1.0"));
/// assert!(!regex.is_match("pre-release-1.0"));
/// ```
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Exact string equality.
    Literal(String),
    /// Regular expression search (unanchored unless the body anchors itself).
    Regex {
        /// Text between the slashes.
        body: String,
        /// Trailing flag token, possibly empty.
        flags: String,
        /// The compiled expression.
        regex: regex::Regex,
    },
}

impl Pattern {
    /// Compile a pattern specification.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidPattern`] if the specification has the
    /// `/body/flags` shape and the regex engine rejects the body or flags.
    pub fn parse(spec: &str) -> Result<Self, RuleError> {
        let Some(caps) = REGEX_SPEC.captures(spec) else {
            return Ok(Self::literal(spec));
        };
        let body = caps.get(1).map_or("", |m| m.as_str());
        let flags = caps.get(2).map_or("", |m| m.as_str());
        Self::regex(body, flags).map_err(|source| RuleError::InvalidPattern {
            pattern: spec.to_owned(),
            source,
        })
    }

    /// Create a literal pattern.
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    /// Create a regex pattern from a body and a flag token.
    ///
    /// # Errors
    ///
    /// Returns the regex engine's error for an invalid body or flag token.
    pub fn regex(body: &str, flags: &str) -> Result<Self, regex::Error> {
        let source = if flags.is_empty() {
            body.to_owned()
        } else {
            format!("(?{flags}){body}")
        };
        let regex = regex::Regex::new(&source)?;
        tracing::trace!(body, flags, "compiled ref pattern");
        Ok(Self::Regex {
            body: body.to_owned(),
            flags: flags.to_owned(),
            regex,
        })
    }

    /// Test a ref name against this pattern.
    #[must_use]
    pub fn is_match(&self, name: &str) -> bool {
        match self {
            Self::Literal(value) => name == value,
            Self::Regex { regex, .. } => regex.is_match(name),
        }
    }

    /// Whether this pattern is a regex.
    #[must_use]
    pub fn is_regex(&self) -> bool {
        matches!(self, Self::Regex { .. })
    }
}

/// Renders the pattern as it would be written in config.
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.write_str(value),
            Self::Regex { body, flags, .. } => write!(f, "/{body}/{flags}"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PatternList
// ═══════════════════════════════════════════════════════════════════════════════

/// One pattern specification or an ordered list of them, as written in config.
///
/// ```yaml
/// branches: main               # One
/// tags: ["/^v\\d+/", latest]   # Many
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum PatternList {
    /// A single specification, equivalent to a one-element list.
    One(String),
    /// An ordered list of specifications.
    Many(Vec<String>),
}

impl PatternList {
    /// The specifications in order.
    #[must_use]
    pub fn specs(&self) -> &[String] {
        match self {
            Self::One(spec) => std::slice::from_ref(spec),
            Self::Many(specs) => specs,
        }
    }

    /// Whether the list holds no specification. A single empty string is
    /// still one specification.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs().is_empty()
    }

    /// Compile every specification in order.
    ///
    /// # Errors
    ///
    /// Returns the first [`RuleError::InvalidPattern`] encountered.
    pub fn compile(&self) -> Result<Vec<Pattern>, RuleError> {
        self.specs().iter().map(|spec| Pattern::parse(spec)).collect()
    }
}

impl From<&str> for PatternList {
    fn from(spec: &str) -> Self {
        Self::One(spec.to_owned())
    }
}

impl From<String> for PatternList {
    fn from(spec: String) -> Self {
        Self::One(spec)
    }
}

impl From<Vec<String>> for PatternList {
    fn from(specs: Vec<String>) -> Self {
        Self::Many(specs)
    }
}

impl From<Vec<&str>> for PatternList {
    fn from(specs: Vec<&str>) -> Self {
        Self::Many(specs.into_iter().map(str::to_owned).collect())
    }
}

impl<const N: usize> From<[&str; N]> for PatternList {
    fn from(specs: [&str; N]) -> Self {
        Self::Many(specs.iter().map(|s| (*s).to_owned()).collect())
    }
}
