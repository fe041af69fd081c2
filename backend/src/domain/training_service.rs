//! Training programme service.
//!
//! Trainings created by a leader belong to their syndicate; trainings created
//! by the administrator are open to every syndicate. Status is derived from
//! the local wall clock on every read and never stored.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::ports::{TrainingCatalogue, TrainingView};
use crate::domain::{
    Error, FeatureArea, Member, NewTraining, RecordStore, Role, ScopeFilter, Session, Training,
    TrainingId, TrainingRegistration,
};

/// Training service backed by the record store.
pub struct TrainingService {
    store: RecordStore,
    clock: Arc<dyn Clock>,
    write_lock: Mutex<()>,
}

impl TrainingService {
    /// Create the service.
    pub fn new(store: RecordStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    fn view(&self, training: Training) -> TrainingView {
        let status = training.status_at(self.clock.local().naive_local());
        TrainingView { training, status }
    }
}

#[async_trait]
impl TrainingCatalogue for TrainingService {
    async fn list(&self, session: &Session) -> Result<Vec<TrainingView>, Error> {
        session.require(FeatureArea::Trainings)?;
        let members: Vec<Member> = self.store.load().await?;
        let trainings: Vec<Training> = self.store.load().await?;
        let visible = ScopeFilter::for_session(session, &members).trainings(trainings);
        Ok(visible.into_iter().map(|t| self.view(t)).collect())
    }

    async fn create(&self, session: &Session, input: NewTraining) -> Result<TrainingView, Error> {
        session.require(FeatureArea::Trainings)?;
        let owner = match session.role() {
            Role::Admin => None,
            _ => session.syndicate_id().cloned(),
        };
        let _guard = self.write_lock.lock().await;
        let mut trainings: Vec<Training> = self.store.load_for_update().await?;
        let training = input.into_training(TrainingId::random(), owner);
        trainings.push(training.clone());
        self.store.save(&trainings).await?;
        info!(
            training_id = %training.id,
            syndicate_id = ?training.syndicate_id,
            capacity = training.capacity,
            "training created"
        );
        Ok(self.view(training))
    }

    async fn register_member(
        &self,
        session: &Session,
        registration: TrainingRegistration,
    ) -> Result<TrainingView, Error> {
        session.require(FeatureArea::Trainings)?;
        let _guard = self.write_lock.lock().await;
        let members: Vec<Member> = self.store.load().await?;
        let mut trainings: Vec<Training> = self.store.load_for_update().await?;
        let filter = ScopeFilter::for_session(session, &members);

        if !members
            .iter()
            .any(|member| member.id == registration.member_id && filter.admits_member(member))
        {
            return Err(Error::not_found(format!(
                "member {} not found",
                registration.member_id
            )));
        }
        let training = trainings
            .iter_mut()
            .find(|t| t.id == registration.training_id && filter.admits_training(t))
            .ok_or_else(|| {
                Error::not_found(format!("training {} not found", registration.training_id))
            })?;
        training.register(registration.member_id.clone())?;
        let updated = training.clone();

        self.store.save(&trainings).await?;
        info!(
            training_id = %updated.id,
            member_id = %registration.member_id,
            seats_taken = updated.registered_members.len(),
            "member registered for training"
        );
        Ok(self.view(updated))
    }
}

#[cfg(test)]
#[path = "training_service_tests.rs"]
mod tests;
