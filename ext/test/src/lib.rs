//! refgate-test: conformance fixtures for refgate
//!
//! Fixtures are language-neutral YAML documents under `conformance/` at the
//! workspace root. Each document names a rule (in the same config shape the
//! CLI loads) plus cases of `(event, ref) → expect`, or a list of raw refs
//! with their expected classification.
//!
//! # Example
//!
//! ```
//! use refgate_test::fixture::Fixture;
//!
//! let fixture = Fixture::from_yaml(r#"
//! name: literal branch
//! rule:
//!   event: push
//!   branches: main
//! cases:
//!   - { name: hit, event: push, ref: refs/heads/main, expect: true }
//!   - { name: miss, event: push, ref: refs/heads/dev, expect: false }
//! "#).unwrap();
//!
//! fixture.run_and_assert();
//! ```

use std::path::{Path, PathBuf};

#[cfg(feature = "fixtures")]
pub mod fixture;

/// Directory holding the YAML fixtures (`<workspace>/conformance`).
///
/// # Panics
///
/// Panics if the crate is not laid out at `<workspace>/ext/test`.
#[must_use]
pub fn fixtures_dir() -> PathBuf {
    let ext_test = Path::new(env!("CARGO_MANIFEST_DIR"));
    ext_test
        .parent() // ext
        .and_then(Path::parent) // workspace
        .expect("refgate-test lives at <workspace>/ext/test")
        .join("conformance")
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::fixtures_dir;
    #[cfg(feature = "fixtures")]
    pub use crate::fixture::{CaseResult, Fixture, FixtureError};
    pub use refgate::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_dir_points_at_workspace_conformance() {
        let dir = fixtures_dir();
        assert!(dir.ends_with("conformance"));
        assert!(dir.exists(), "missing {}", dir.display());
    }
}
