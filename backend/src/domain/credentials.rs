//! Login credentials and stored credential pairs.
//!
//! Two shapes live here: [`LoginCredentials`] is what a caller submits and is
//! validated before any lookup, [`Credentials`] is the pair persisted on a
//! syndicate (leader identity) or a member (member identity).

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use super::{FieldViolation, invalid_request_from};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

impl FieldViolation for LoginValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername => "username",
            Self::EmptyPassword => "password",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::EmptyUsername => "empty_username",
            Self::EmptyPassword => "empty_password",
        }
    }
}

invalid_request_from!(LoginValidationError);

/// Validated credentials submitted at login.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller whitespace, so comparisons are
///   exact.
///
/// # Examples
/// ```
/// use syndicate_desk::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin ", "admin123").expect("valid");
/// assert_eq!(creds.username(), "admin");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Submitted username.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Submitted password.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Plain equality against a stored pair.
    #[must_use]
    pub fn matches(&self, stored: &Credentials) -> bool {
        self.username == stored.username && self.password.as_str() == stored.password
    }
}

/// Username/password pair stored alongside a syndicate or member.
///
/// Stored in plain text; comparison is exact equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Credentials {
    /// Login name.
    pub username: String,
    /// Login secret.
    pub password: String,
}

impl Credentials {
    /// Build a pair from owned parts.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Which identity namespace a generated pair belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    /// Syndicate leader credentials.
    Leader,
    /// Member credentials issued at registration.
    Member,
}

impl CredentialKind {
    /// Username prefix for generated pairs.
    #[must_use]
    pub const fn username_prefix(self) -> &'static str {
        match self {
            Self::Leader => "syndicate_",
            Self::Member => "member_",
        }
    }

    /// Length of the random username suffix.
    #[must_use]
    pub const fn suffix_len(self) -> usize {
        6
    }

    /// Length of generated passwords.
    #[must_use]
    pub const fn password_len(self) -> usize {
        match self {
            Self::Leader => 10,
            Self::Member => 8,
        }
    }
}
