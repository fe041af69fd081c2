//! Port for issuing generated login credentials.
use std::sync::atomic::{AtomicU32, Ordering};

use crate::domain::{CredentialKind, Credentials};

/// Source of fresh credential pairs.
///
/// Usernames are `kind.username_prefix()` followed by `kind.suffix_len()`
/// lowercase base-36 characters; passwords are `kind.password_len()` of the
/// same alphabet.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialGenerator: Send + Sync {
    /// Draw a new pair for `kind`.
    fn generate(&self, kind: CredentialKind) -> Credentials;
}

/// Draws allowed before [`issue_unique`] gives up.
pub const MAX_CREDENTIAL_DRAWS: usize = 16;

/// Draw pairs until one has a username for which `in_use` is false.
///
/// Returns `None` after [`MAX_CREDENTIAL_DRAWS`] collisions.
pub fn issue_unique(
    generator: &dyn CredentialGenerator,
    kind: CredentialKind,
    in_use: impl Fn(&str) -> bool,
) -> Option<Credentials> {
    std::iter::repeat_with(|| generator.generate(kind))
        .take(MAX_CREDENTIAL_DRAWS)
        .find(|credentials| !in_use(&credentials.username))
}

/// Deterministic generator producing `<prefix>000001`, `<prefix>000002`, ...
///
/// Passwords repeat the counter padded to the kind's password length.
#[derive(Debug, Default)]
pub struct SequentialCredentialGenerator {
    counter: AtomicU32,
}

impl CredentialGenerator for SequentialCredentialGenerator {
    fn generate(&self, kind: CredentialKind) -> Credentials {
        let next = self.counter.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
        Credentials::new(
            format!(
                "{}{next:0width$}",
                kind.username_prefix(),
                width = kind.suffix_len()
            ),
            format!("{next:0width$}", width = kind.password_len()),
        )
    }
}
