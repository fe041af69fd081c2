//! Tests for the contribution service.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::{ErrorCode, PaymentMethod};
use crate::outbound::blob_store::InMemoryBlobStore;
use crate::test_support::{MutableClock, contribution, fixture_now, member, syndicate};

struct Harness {
    store: RecordStore,
    service: ContributionService,
}

#[fixture]
async fn harness() -> Harness {
    let store = RecordStore::new(Arc::new(InMemoryBlobStore::new()));
    store
        .save(&[
            member("m1", "Jane Doe", "s7", Some("member_jane01")),
            member("m2", "John Roe", "s7", None),
            member("m3", "Ann Poe", "s9", Some("member_ann003")),
        ])
        .await
        .expect("seed members");
    store
        .save(&[
            contribution("c1", "m1", 5000, Period::Jan, 2024),
            contribution("c2", "m3", 7000, Period::Jun, 2024),
        ])
        .await
        .expect("seed contributions");
    let service = ContributionService::new(store.clone(), Arc::new(MutableClock::fixture()));
    Harness { store, service }
}

fn leader_of(id: &str) -> Session {
    Session::leader(&syndicate(id, "Local", "L", "p"), "L")
}

fn jane() -> Session {
    Session::member(&member("m1", "Jane Doe", "s7", Some("member_jane01")), "member_jane01")
}

fn payment(member_id: &str, amount: u32, period: Period) -> NewContribution {
    NewContribution::try_from_parts(member_id, f64::from(amount), PaymentMethod::Momo, period, 2024)
        .expect("valid input")
}

#[rstest]
#[tokio::test]
async fn leader_records_for_own_member(#[future] harness: Harness) {
    let harness = harness.await;

    let recorded = harness
        .service
        .record(&leader_of("s7"), payment("m2", 3000, Period::Jun))
        .await
        .expect("record");

    assert_eq!(recorded.recorded_by, "L");
    assert_eq!(recorded.recorded_at, fixture_now());
    let stored: Vec<Contribution> = harness.store.load().await.expect("load");
    assert_eq!(stored.len(), 3);
}

#[rstest]
#[tokio::test]
async fn duplicate_slot_is_a_conflict_and_writes_nothing(#[future] harness: Harness) {
    let harness = harness.await;
    let before: Vec<Contribution> = harness.store.load().await.expect("load");

    let err = harness
        .service
        .record(&leader_of("s7"), payment("m1", 1, Period::Jan))
        .await
        .expect_err("duplicate");

    assert_eq!(err.code(), ErrorCode::Conflict);
    let after: Vec<Contribution> = harness.store.load().await.expect("load");
    assert_eq!(before, after);
}

#[rstest]
#[tokio::test]
async fn other_syndicates_members_are_out_of_reach(#[future] harness: Harness) {
    let harness = harness.await;
    let err = harness
        .service
        .record(&leader_of("s7"), payment("m3", 100, Period::Feb))
        .await
        .expect_err("out of scope");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn members_view_but_never_record(#[future] harness: Harness) {
    let harness = harness.await;

    let view = harness.service.overview(&jane()).await.expect("overview");
    let ids: Vec<&str> = view.contributions.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["c1"]);
    assert_eq!(view.members.len(), 1);
    assert_eq!(view.summary.contributors, 1);

    let err = harness
        .service
        .record(&jane(), payment("m1", 100, Period::Feb))
        .await
        .expect_err("members cannot record");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn summary_uses_the_clock_month(#[future] harness: Harness) {
    let harness = harness.await;
    let view = harness
        .service
        .overview(&Session::admin("admin-1", "admin"))
        .await
        .expect("overview");
    assert_eq!(view.summary.total, 12000.0);
    assert_eq!(view.summary.current_month_total, 7000.0);
    assert_eq!(view.summary.contributors, 2);
}

#[rstest]
#[tokio::test]
async fn monthly_series_is_scoped(#[future] harness: Harness) {
    let harness = harness.await;
    let series = harness
        .service
        .monthly(&leader_of("s7"), Some(2024))
        .await
        .expect("monthly");
    assert_eq!(series.len(), 12);
    assert_eq!(series[0].amount, 5000.0);
    assert_eq!(series[5].amount, 0.0);
}

#[rstest]
#[tokio::test]
async fn monthly_defaults_to_the_clock_year(#[future] harness: Harness) {
    let harness = harness.await;
    let admin = Session::admin("admin-1", "admin");

    let current = harness.service.monthly(&admin, None).await.expect("monthly");
    let past = harness
        .service
        .monthly(&admin, Some(2023))
        .await
        .expect("monthly");

    assert_eq!(current[5].amount, 7000.0);
    assert!(past.iter().all(|month| month.count == 0));
}
