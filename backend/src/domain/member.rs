//! Member records, their profile and the enumerations they carry.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Credentials, FieldViolation, MemberId, SyndicateId, invalid_request_from};

/// Marital status captured at registration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    /// Never married.
    #[default]
    Single,
    /// Married.
    Married,
    /// Divorced.
    Divorced,
    /// Widowed.
    Widowed,
}

/// Highest completed education level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EducationLevel {
    /// No formal education.
    #[default]
    None,
    /// Primary school.
    Primary,
    /// Secondary school.
    Secondary,
    /// Technical and vocational training.
    Tvet,
    /// University degree.
    University,
}

impl EducationLevel {
    /// Every level in display order.
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::Primary,
        Self::Secondary,
        Self::Tvet,
        Self::University,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Primary => "Primary",
            Self::Secondary => "Secondary",
            Self::Tvet => "TVET",
            Self::University => "University",
        }
    }
}

/// Editable member details.
///
/// Used both as the registration/edit payload and, flattened, inside the
/// stored [`Member`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberProfile {
    /// Full name.
    pub name: String,
    /// National identity number.
    pub id_number: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Marital status.
    pub marital_status: MaritalStatus,
    /// Administrative location of residence.
    pub administrative_location: String,
    /// Whether the member reports a disability.
    pub disability_status: bool,
    /// Education level.
    pub education_level: EducationLevel,
    /// Employer or institution.
    pub institution_name: String,
    /// Profession.
    pub professional: String,
    /// Whether the member works under a contract.
    pub contract: bool,
    /// Year the member started the job.
    pub year_job_start: Option<i32>,
    /// Social security identifier.
    pub social_security_id: String,
}

/// Validation failures for member profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberValidationError {
    /// Name was blank.
    EmptyName,
    /// Identity number was blank.
    EmptyIdNumber,
    /// Phone number was blank.
    EmptyPhoneNumber,
}

impl fmt::Display for MemberValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "member name must not be empty"),
            Self::EmptyIdNumber => write!(f, "id number must not be empty"),
            Self::EmptyPhoneNumber => write!(f, "phone number must not be empty"),
        }
    }
}

impl std::error::Error for MemberValidationError {}

impl FieldViolation for MemberValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::EmptyIdNumber => "idNumber",
            Self::EmptyPhoneNumber => "phoneNumber",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::EmptyIdNumber => "empty_id_number",
            Self::EmptyPhoneNumber => "empty_phone_number",
        }
    }
}

invalid_request_from!(MemberValidationError);

impl MemberProfile {
    /// Check required fields and trim them.
    pub fn validated(mut self) -> Result<Self, MemberValidationError> {
        self.name = required(&self.name, MemberValidationError::EmptyName)?;
        self.id_number = required(&self.id_number, MemberValidationError::EmptyIdNumber)?;
        self.phone_number = required(&self.phone_number, MemberValidationError::EmptyPhoneNumber)?;
        Ok(self)
    }
}

fn required(value: &str, error: MemberValidationError) -> Result<String, MemberValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(error)
    } else {
        Ok(trimmed.to_owned())
    }
}

/// A registered member of a syndicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Record id.
    pub id: MemberId,
    /// Editable details.
    #[serde(flatten)]
    pub profile: MemberProfile,
    /// Owning syndicate.
    pub syndicate_id: SyndicateId,
    /// Username of whoever registered the member.
    pub registered_by: String,
    /// Registration time.
    pub registered_at: DateTime<Utc>,
    /// Login pair issued at registration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Credentials>,
}

impl Member {
    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.profile.name
    }

    /// Whether the member answers to `username`.
    #[must_use]
    pub fn has_username(&self, username: &str) -> bool {
        self.credentials
            .as_ref()
            .is_some_and(|creds| creds.username == username)
    }

    /// Search match used by the member list.
    ///
    /// The name matches case-insensitively; id and phone numbers match as
    /// plain substrings. A blank query matches everything.
    #[must_use]
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return true;
        }
        self.profile
            .name
            .to_lowercase()
            .contains(&query.to_lowercase())
            || self.profile.id_number.contains(query)
            || self.profile.phone_number.contains(query)
    }
}
