//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`):
//! record builders with stable field values and a settable clock.

use std::sync::Mutex;

use chrono::{DateTime, Local, NaiveDate, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    Contribution, ContributionId, Credentials, EducationLevel, Member, MemberId, MemberProfile,
    PaymentMethod, Period, Syndicate, SyndicateId, Training, TrainingId,
};

/// Noon UTC on 15 June 2024; the same calendar month in every time zone.
pub fn fixture_now() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).single() {
        Some(now) => now,
        None => panic!("fixture timestamp is valid"),
    }
}

/// Clock whose time only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Clock pinned at [`fixture_now`].
    pub fn fixture() -> Self {
        Self::new(fixture_now())
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.lock_clock() = now;
    }

    pub fn advance_days(&self, days: i64) {
        *self.lock_clock() += TimeDelta::days(days);
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Syndicate led through `username` / `password`.
pub fn syndicate(id: &str, name: &str, username: &str, password: &str) -> Syndicate {
    Syndicate {
        id: SyndicateId::new(id),
        name: name.to_owned(),
        leader_id: None,
        leader_credentials: Credentials::new(username, password),
        created_at: fixture_now(),
        member_count: 0,
    }
}

/// Member of `syndicate_id`; `username` becomes the credential username with
/// password `secret`.
pub fn member(id: &str, name: &str, syndicate_id: &str, username: Option<&str>) -> Member {
    Member {
        id: MemberId::new(id),
        profile: MemberProfile {
            name: name.to_owned(),
            id_number: format!("ID-{id}"),
            phone_number: format!("07{id}"),
            education_level: EducationLevel::Secondary,
            year_job_start: Some(2020),
            ..MemberProfile::default()
        },
        syndicate_id: SyndicateId::new(syndicate_id),
        registered_by: "admin".to_owned(),
        registered_at: fixture_now(),
        credentials: username.map(|login| Credentials::new(login, "secret")),
    }
}

/// Cash contribution recorded at [`fixture_now`].
pub fn contribution(id: &str, member_id: &str, amount: u32, period: Period, year: i32) -> Contribution {
    Contribution {
        id: ContributionId::new(id),
        member_id: MemberId::new(member_id),
        amount: f64::from(amount),
        payment_method: PaymentMethod::Cash,
        period,
        year,
        recorded_by: "admin".to_owned(),
        recorded_at: fixture_now(),
    }
}

/// One-day training on 1 July 2024, optionally tagged with a syndicate.
pub fn training(id: &str, syndicate_id: Option<&str>, capacity: u32) -> Training {
    let day = NaiveDate::from_ymd_opt(2024, 7, 1);
    let (Some(start), Some(end)) = (
        day.and_then(|date| date.and_hms_opt(9, 0, 0)),
        day.and_then(|date| date.and_hms_opt(17, 0, 0)),
    ) else {
        panic!("fixture training dates are valid");
    };
    Training {
        id: TrainingId::new(id),
        title: format!("Training {id}"),
        description: String::new(),
        start_date: start,
        end_date: end,
        location: "Hall A".to_owned(),
        capacity,
        registered_members: Vec::new(),
        syndicate_id: syndicate_id.map(SyndicateId::new),
    }
}
