//! Config type for rule construction from YAML or JSON.
//!
//! ```yaml
//! event: push
//! branches: [main, "/^release-/"]
//! tags: "/^v\\d+/"
//! ```
//!
//! | Config field | Runtime | Notes |
//! |--------------|---------|-------|
//! | `event` | [`RuleSet::event`] | Required, empty string means any event |
//! | `branches` | [`RefKind::Branch`](crate::RefKind::Branch) patterns | String or list, optional |
//! | `tags` | [`RefKind::Tag`](crate::RefKind::Tag) patterns | String or list, optional |

use crate::{PatternList, RefPatterns, RuleError, RuleSet};
use serde::{Deserialize, Serialize};

/// Configuration for a [`RuleSet`].
///
/// Unknown fields are rejected so a typo such as `branch:` fails loudly
/// instead of silently matching every branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    /// The required trigger event.
    pub event: String,

    /// Branch name patterns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branches: Option<PatternList>,

    /// Tag name patterns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<PatternList>,
}

impl RuleConfig {
    /// Parse a config document from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidConfig`] if the document does not match
    /// the config shape.
    pub fn from_yaml(yaml: &str) -> Result<Self, RuleError> {
        serde_yaml::from_str(yaml).map_err(|e| RuleError::InvalidConfig {
            source: Box::new(e),
        })
    }

    /// Parse a config document from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidConfig`] if the document does not match
    /// the config shape.
    pub fn from_json(json: &str) -> Result<Self, RuleError> {
        serde_json::from_str(json).map_err(|e| RuleError::InvalidConfig {
            source: Box::new(e),
        })
    }

    /// Compile into a runtime [`RuleSet`].
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidPattern`] if a regex pattern is invalid.
    pub fn compile(&self) -> Result<RuleSet, RuleError> {
        RuleSet::build(
            self.event.clone(),
            RefPatterns {
                branches: self.branches.clone(),
                tags: self.tags.clone(),
            },
        )
    }
}

impl TryFrom<RuleConfig> for RuleSet {
    type Error = RuleError;

    fn try_from(config: RuleConfig) -> Result<Self, Self::Error> {
        RuleSet::build(
            config.event,
            RefPatterns {
                branches: config.branches,
                tags: config.tags,
            },
        )
    }
}
