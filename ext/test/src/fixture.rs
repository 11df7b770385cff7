//! Conformance test fixture runner
//!
//! Loads YAML fixtures and runs them against refgate.
//!
//! ```yaml
//! name: release branches
//! description: regex on branch names
//! rule:
//!   event: push
//!   branches: "/^release-/"
//! cases:
//!   - name: release branch
//!     event: push
//!     ref: refs/heads/release-1.0
//!     expect: true
//! ---
//! name: pull request refs
//! classify:
//!   - { raw: refs/pull/1/merge, kind: other, name: 1/merge }
//! ---
//! name: broken regex
//! rule: { event: push, tags: "/(/" }
//! expect_error: true
//! ```

use refgate::prelude::*;
use serde::Deserialize;

/// A complete test fixture.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Rule under test. Absent for classification-only fixtures.
    #[serde(default)]
    pub rule: Option<RuleConfig>,
    /// The rule must fail to compile.
    #[serde(default)]
    pub expect_error: bool,
    #[serde(default)]
    pub cases: Vec<TestCase>,
    #[serde(default)]
    pub classify: Vec<ClassifyCase>,
}

/// One `(event, ref) → expect` case.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestCase {
    pub name: String,
    pub event: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub expect: bool,
}

/// One `raw → (kind, name)` classification case.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifyCase {
    pub raw: String,
    pub kind: RefKind,
    pub name: String,
}

/// Errors that stop a fixture from running at all.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("fixture YAML is malformed: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("fixture '{fixture}' has cases but no rule")]
    MissingRule { fixture: String },
    #[error("fixture '{fixture}' rule failed to compile: {source}")]
    Rule {
        fixture: String,
        source: RuleError,
    },
    #[error("fixture '{fixture}' expected a compile error, but the rule compiled")]
    UnexpectedSuccess { fixture: String },
}

// ═══════════════════════════════════════════════════════════════════════════════
// Runner
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of running a single test case
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    pub expected: String,
    pub actual: String,
}

impl Fixture {
    /// Parse a fixture from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, FixtureError> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Run all classification and match cases and return results
    pub fn run(&self) -> Result<Vec<CaseResult>, FixtureError> {
        let mut results: Vec<CaseResult> = self.classify.iter().map(ClassifyCase::run).collect();

        let Some(rule) = &self.rule else {
            if self.cases.is_empty() && !self.expect_error {
                return Ok(results);
            }
            return Err(FixtureError::MissingRule {
                fixture: self.name.clone(),
            });
        };

        let rules = match (rule.compile(), self.expect_error) {
            (Ok(_), true) => {
                return Err(FixtureError::UnexpectedSuccess {
                    fixture: self.name.clone(),
                })
            }
            (Err(_), true) => return Ok(results),
            (Err(source), false) => {
                return Err(FixtureError::Rule {
                    fixture: self.name.clone(),
                    source,
                })
            }
            (Ok(rules), false) => rules,
        };

        results.extend(self.cases.iter().map(|case| case.run(&rules)));
        Ok(results)
    }

    /// Run all test cases and panic on first failure
    pub fn run_and_assert(&self) {
        let results = self
            .run()
            .unwrap_or_else(|e| panic!("Fixture '{}' could not run: {e}", self.name));
        for result in results {
            assert!(
                result.passed,
                "Fixture '{}' case '{}' failed: expected {}, got {}",
                self.name, result.case_name, result.expected, result.actual
            );
        }
    }
}

impl TestCase {
    fn run(&self, rules: &RuleSet) -> CaseResult {
        let trace = rules.match_with_trace(&self.event, self.git_ref.as_str());
        CaseResult {
            case_name: self.name.clone(),
            passed: trace.matched == self.expect,
            expected: self.expect.to_string(),
            actual: trace.to_string(),
        }
    }
}

impl ClassifyCase {
    fn run(&self) -> CaseResult {
        let expected = Reference::new(self.kind, self.name.as_str());
        let actual = classify(self.raw.as_str());
        CaseResult {
            case_name: format!("classify {:?}", self.raw),
            passed: actual == expected,
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_multi_document_file() {
        let yaml = r"
name: one
rule: { event: push }
cases:
  - { name: any ref, event: push, ref: refs/tags/x, expect: true }
---
name: two
classify:
  - { raw: refs/heads/a/b, kind: branch, name: a/b }
";
        let fixtures = Fixture::from_yaml_multi(yaml).unwrap();
        assert_eq!(fixtures.len(), 2);
        for f in &fixtures {
            f.run_and_assert();
        }
    }

    #[test]
    fn failing_case_is_reported() {
        let fixture = Fixture::from_yaml(
            "name: f\nrule: { event: push, branches: main }\ncases:\n  - { name: c, event: push, ref: refs/heads/dev, expect: true }\n",
        )
        .unwrap();
        let results = fixture.run().unwrap();
        assert_eq!(results.len(), 1);
        assert!(!results[0].passed);
        assert_eq!(results[0].expected, "true");
        assert!(results[0].actual.starts_with("false"), "{}", results[0].actual);
    }

    #[test]
    fn expect_error_requires_failure() {
        let ok = Fixture::from_yaml("name: f\nrule: { event: push }\nexpect_error: true\n").unwrap();
        assert!(matches!(ok.run(), Err(FixtureError::UnexpectedSuccess { .. })));

        let bad = Fixture::from_yaml("name: f\nrule: { event: push, tags: \"/(/\" }\nexpect_error: true\n")
            .unwrap();
        assert!(bad.run().unwrap().is_empty());
    }

    #[test]
    fn cases_without_rule_is_error() {
        let f = Fixture::from_yaml(
            "name: f\ncases:\n  - { name: c, event: push, ref: x, expect: true }\n",
        )
        .unwrap();
        assert!(matches!(f.run(), Err(FixtureError::MissingRule { .. })));
    }

    #[test]
    fn unknown_fixture_field_is_error() {
        assert!(Fixture::from_yaml("name: f\nrules: {}\n").is_err());
    }
}
