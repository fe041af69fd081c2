//! Training programs and member registration.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::json_fields::local_datetime;
use super::{Error, FieldViolation, MemberId, SyndicateId, TrainingId, invalid_request_from};

/// A training session members can register for.
///
/// `registered_members` never exceeds `capacity`; registration enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Training {
    /// Record id.
    pub id: TrainingId,
    /// Title.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Local start time.
    #[serde(with = "local_datetime")]
    #[schema(value_type = String, example = "2024-05-01T09:00:00")]
    pub start_date: NaiveDateTime,
    /// Local end time.
    #[serde(with = "local_datetime")]
    #[schema(value_type = String, example = "2024-05-01T17:00:00")]
    pub end_date: NaiveDateTime,
    /// Venue.
    pub location: String,
    /// Seat count.
    #[serde(default)]
    pub capacity: u32,
    /// Registered member ids.
    #[serde(default)]
    pub registered_members: Vec<MemberId>,
    /// Owning syndicate; untagged trainings are open to every syndicate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syndicate_id: Option<SyndicateId>,
}

/// Lifecycle stage relative to a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TrainingStatus {
    /// Not started yet.
    Upcoming,
    /// Between start and end, inclusive.
    Ongoing,
    /// Ended.
    Completed,
}

/// Why a registration was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationError {
    /// The member already holds a seat.
    AlreadyRegistered,
    /// Every seat is taken.
    AtCapacity,
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyRegistered => write!(f, "member is already registered for this training"),
            Self::AtCapacity => write!(f, "training is at full capacity"),
        }
    }
}

impl std::error::Error for RegistrationError {}

impl From<RegistrationError> for Error {
    fn from(value: RegistrationError) -> Self {
        let code = match value {
            RegistrationError::AlreadyRegistered => "already_registered",
            RegistrationError::AtCapacity => "at_capacity",
        };
        Error::conflict(value.to_string()).with_details(serde_json::json!({ "code": code }))
    }
}

impl Training {
    /// Stage of the training at `now`.
    #[must_use]
    pub fn status_at(&self, now: NaiveDateTime) -> TrainingStatus {
        if now < self.start_date {
            TrainingStatus::Upcoming
        } else if now > self.end_date {
            TrainingStatus::Completed
        } else {
            TrainingStatus::Ongoing
        }
    }

    /// Whether a leader of `syndicate_id` may see this training.
    #[must_use]
    pub fn visible_to_syndicate(&self, syndicate_id: &SyndicateId) -> bool {
        self.syndicate_id
            .as_ref()
            .is_none_or(|owner| owner == syndicate_id)
    }

    /// Add `member_id`; duplicates are checked before capacity.
    pub fn register(&mut self, member_id: MemberId) -> Result<(), RegistrationError> {
        if self.registered_members.contains(&member_id) {
            return Err(RegistrationError::AlreadyRegistered);
        }
        let capacity = usize::try_from(self.capacity).unwrap_or(usize::MAX);
        if self.registered_members.len() >= capacity {
            return Err(RegistrationError::AtCapacity);
        }
        self.registered_members.push(member_id);
        Ok(())
    }
}

/// Validation failures for new trainings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingValidationError {
    /// Title was blank.
    EmptyTitle,
    /// Start date was blank or unreadable.
    InvalidStartDate,
    /// End date was blank or unreadable.
    InvalidEndDate,
    /// Location was blank.
    EmptyLocation,
    /// Training id was blank.
    EmptyTrainingId,
    /// Member id was blank.
    EmptyMemberId,
}

impl fmt::Display for TrainingValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::InvalidStartDate => write!(f, "start date must be a local date and time"),
            Self::InvalidEndDate => write!(f, "end date must be a local date and time"),
            Self::EmptyLocation => write!(f, "location must not be empty"),
            Self::EmptyTrainingId => write!(f, "training must be selected"),
            Self::EmptyMemberId => write!(f, "member must be selected"),
        }
    }
}

impl std::error::Error for TrainingValidationError {}

impl FieldViolation for TrainingValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "title",
            Self::InvalidStartDate => "startDate",
            Self::InvalidEndDate => "endDate",
            Self::EmptyLocation => "location",
            Self::EmptyTrainingId => "trainingId",
            Self::EmptyMemberId => "memberId",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "empty_title",
            Self::InvalidStartDate => "invalid_start_date",
            Self::InvalidEndDate => "invalid_end_date",
            Self::EmptyLocation => "empty_location",
            Self::EmptyTrainingId => "empty_training_id",
            Self::EmptyMemberId => "empty_member_id",
        }
    }
}

invalid_request_from!(TrainingValidationError);

/// Validated request to create a training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTraining {
    /// Title.
    pub title: String,
    /// Description, possibly empty.
    pub description: String,
    /// Local start time.
    pub start_date: NaiveDateTime,
    /// Local end time.
    pub end_date: NaiveDateTime,
    /// Venue.
    pub location: String,
    /// Seat count.
    pub capacity: u32,
}

impl NewTraining {
    /// Validate raw form values.
    pub fn try_from_parts(
        title: &str,
        description: &str,
        start_date: &str,
        end_date: &str,
        location: &str,
        capacity: u32,
    ) -> Result<Self, TrainingValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TrainingValidationError::EmptyTitle);
        }
        let start_date =
            local_datetime::parse(start_date).ok_or(TrainingValidationError::InvalidStartDate)?;
        let end_date =
            local_datetime::parse(end_date).ok_or(TrainingValidationError::InvalidEndDate)?;
        let location = location.trim();
        if location.is_empty() {
            return Err(TrainingValidationError::EmptyLocation);
        }
        Ok(Self {
            title: title.to_owned(),
            description: description.trim().to_owned(),
            start_date,
            end_date,
            location: location.to_owned(),
            capacity,
        })
    }

    /// Build the stored record.
    #[must_use]
    pub fn into_training(self, id: TrainingId, syndicate_id: Option<SyndicateId>) -> Training {
        Training {
            id,
            title: self.title,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
            location: self.location,
            capacity: self.capacity,
            registered_members: Vec::new(),
            syndicate_id,
        }
    }
}

/// Validated registration of a member into a training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingRegistration {
    /// Target training.
    pub training_id: TrainingId,
    /// Member taking a seat.
    pub member_id: MemberId,
}

impl TrainingRegistration {
    /// Validate that both selections were made.
    pub fn try_from_parts(
        training_id: &str,
        member_id: &str,
    ) -> Result<Self, TrainingValidationError> {
        let training_id = training_id.trim();
        if training_id.is_empty() {
            return Err(TrainingValidationError::EmptyTrainingId);
        }
        let member_id = member_id.trim();
        if member_id.is_empty() {
            return Err(TrainingValidationError::EmptyMemberId);
        }
        Ok(Self {
            training_id: TrainingId::new(training_id),
            member_id: MemberId::new(member_id),
        })
    }
}
