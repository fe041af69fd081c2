//! Driving port for training programs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Error, NewTraining, Session, Training, TrainingRegistration, TrainingStatus,
};

/// Training with its status at request time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrainingView {
    /// Stored record.
    #[serde(flatten)]
    pub training: Training,
    /// Lifecycle stage.
    pub status: TrainingStatus,
}

/// Training operations for administrators and leaders.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrainingCatalogue: Send + Sync {
    /// Visible trainings.
    async fn list(&self, session: &Session) -> Result<Vec<TrainingView>, Error>;

    /// Create a training owned by the caller's syndicate, if any.
    async fn create(&self, session: &Session, input: NewTraining) -> Result<TrainingView, Error>;

    /// Seat a visible member in a visible training.
    async fn register_member(
        &self,
        session: &Session,
        registration: TrainingRegistration,
    ) -> Result<TrainingView, Error>;
}
