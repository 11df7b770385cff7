//! `Reference` — A git ref split into its kind and bare name
//!
//! Classification is a pure function of the raw string:
//!
//! | Raw                    | Kind               | Name          |
//! |------------------------|--------------------|---------------|
//! | `refs/heads/main`      | [`RefKind::Branch`] | `main`        |
//! | `refs/heads/feat/x`    | [`RefKind::Branch`] | `feat/x`      |
//! | `refs/tags/v1.0`       | [`RefKind::Tag`]    | `v1.0`        |
//! | `refs/pull/42/merge`   | [`RefKind::Other`]  | `42/merge`    |
//! | `main`                 | [`RefKind::Other`]  | `main`        |
//! | (empty)                | [`RefKind::Other`]  | (empty)       |

use std::borrow::Cow;
use std::fmt;

/// Namespace segment of branch refs (`refs/heads/...`).
const HEADS: &str = "heads";
/// Namespace segment of tag refs (`refs/tags/...`).
const TAGS: &str = "tags";

/// The category of a git ref.
///
/// Closed set: rules configure patterns for [`Branch`](Self::Branch) and
/// [`Tag`](Self::Tag) only. Everything else is [`Other`](Self::Other).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RefKind {
    /// `refs/heads/<name>`
    Branch,
    /// `refs/tags/<name>`
    Tag,
    /// Any other namespace (pull requests, remotes, notes) or a bare name.
    Other,
}

impl RefKind {
    fn from_segments(root: &str, namespace: &str) -> Self {
        match (root, namespace) {
            ("refs", HEADS) => Self::Branch,
            ("refs", TAGS) => Self::Tag,
            _ => Self::Other,
        }
    }

    /// Convert to string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Branch => "branch",
            Self::Tag => "tag",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified git ref.
///
/// # Example
///
/// ```
/// use refgate::{RefKind, Reference};
///
/// let r = Reference::parse("refs/heads/feature/login");
/// assert_eq!(r.kind(), RefKind::Branch);
/// assert_eq!(r.name(), "feature/login");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reference {
    kind: RefKind,
    name: String,
}

impl Reference {
    /// Create a reference from an already-known kind and name.
    pub fn new(kind: RefKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// Shorthand for a [`RefKind::Branch`] reference.
    pub fn branch(name: impl Into<String>) -> Self {
        Self::new(RefKind::Branch, name)
    }

    /// Shorthand for a [`RefKind::Tag`] reference.
    pub fn tag(name: impl Into<String>) -> Self {
        Self::new(RefKind::Tag, name)
    }

    /// Classify a raw ref string. Never fails.
    ///
    /// Only the first two `/`-separated segments are inspected. The rest is
    /// kept verbatim as the name, including any further slashes.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut segments = raw.splitn(3, '/');
        let (Some(root), Some(namespace)) = (segments.next(), segments.next()) else {
            // Fewer than two segments: nothing to strip.
            return Self::new(RefKind::Other, raw);
        };
        let name = segments.next().unwrap_or_default();
        Self::new(RefKind::from_segments(root, namespace), name)
    }

    /// Returns the ref kind.
    #[must_use]
    pub fn kind(&self) -> RefKind {
        self.kind
    }

    /// Returns the name with its category prefix removed.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}

impl From<&str> for Reference {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ToReference
// ═══════════════════════════════════════════════════════════════════════════════

/// Anything that can be viewed as a classified [`Reference`].
///
/// Raw strings are parsed; a `Reference` passes through borrowed and
/// unchanged, which makes [`classify`] idempotent.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be classified as a git ref",
    label = "expected a raw ref string or a `Reference`",
    note = "pass a `&str` such as \"refs/heads/main\" or an already classified `Reference`"
)]
pub trait ToReference {
    /// View this value as a classified reference.
    fn to_reference(&self) -> Cow<'_, Reference>;
}

impl ToReference for str {
    fn to_reference(&self) -> Cow<'_, Reference> {
        Cow::Owned(Reference::parse(self))
    }
}

impl ToReference for String {
    fn to_reference(&self) -> Cow<'_, Reference> {
        self.as_str().to_reference()
    }
}

impl ToReference for Reference {
    fn to_reference(&self) -> Cow<'_, Reference> {
        Cow::Borrowed(self)
    }
}

impl<T: ToReference + ?Sized> ToReference for &T {
    fn to_reference(&self) -> Cow<'_, Reference> {
        (**self).to_reference()
    }
}

/// Classify a raw ref string, or pass a [`Reference`] through unchanged.
///
/// ```
/// use refgate::{classify, RefKind};
///
/// let once = classify("refs/tags/v2.1.0");
/// assert_eq!(once.kind(), RefKind::Tag);
/// assert_eq!(classify(&once), once);
/// ```
pub fn classify<R: ToReference + ?Sized>(raw: &R) -> Reference {
    raw.to_reference().into_owned()
}
