//! Visibility and write-rule properties checked through the HTTP surface
//! against records seeded straight into the data directory.

mod support;

use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use syndicate_desk::domain::{Contribution, Period, Training};
use syndicate_desk::test_support::{contribution, member, syndicate, training};
use support::{Deployment, login, send};

const SYNDICATES: [(&str, &str, &str); 3] = [("s1", "L1", "p1"), ("s2", "L2", "p2"), ("s3", "L3", "p3")];

/// Three syndicates with uneven membership and one payment per member.
#[fixture]
async fn seeded() -> Deployment {
    let deployment = Deployment::new();
    let store = deployment.store();
    store
        .save(
            &SYNDICATES
                .iter()
                .map(|(id, user, pass)| syndicate(id, &format!("Local {id}"), user, pass))
                .collect::<Vec<_>>(),
        )
        .await
        .expect("seed syndicates");
    let members: Vec<_> = (1..=7)
        .map(|n| {
            let owner = SYNDICATES[n % 2].0;
            member(&format!("m{n}"), &format!("Member {n}"), owner, None)
        })
        .collect();
    store.save(&members).await.expect("seed members");
    let payments: Vec<Contribution> = (1..=7_u32)
        .map(|n| contribution(&format!("c{n}"), &format!("m{n}"), n * 1000, Period::Mar, 2024))
        .collect();
    store.save(&payments).await.expect("seed contributions");
    let trainings: Vec<Training> = vec![training("full", Some("s1"), 0), training("open", None, 3)];
    store.save(&trainings).await.expect("seed trainings");
    deployment
}

fn column<'a>(rows: &'a Value, field: &str) -> Vec<&'a str> {
    let mut values: Vec<&str> = rows
        .as_array()
        .map(|rows| rows.iter().filter_map(|row| row[field].as_str()).collect())
        .unwrap_or_default();
    values.sort_unstable();
    values
}

#[rstest]
#[case("L1", "p1", &["m2", "m4", "m6"])]
#[case("L2", "p2", &["m1", "m3", "m5", "m7"])]
#[case("L3", "p3", &[])]
#[actix_rt::test]
async fn leaders_see_exactly_their_members_and_payments(
    #[future] seeded: Deployment,
    #[case] username: &str,
    #[case] password: &str,
    #[case] expected: &[&str],
) {
    let deployment = seeded.await;
    let app = deployment.start().await;
    let (cookie, _) = login(&app, username, password, None).await;

    let members = send(&app, "GET", "/api/v1/members", Some(&cookie), None).await;
    let ledger = send(&app, "GET", "/api/v1/contributions", Some(&cookie), None).await;
    let again = send(&app, "GET", "/api/v1/contributions", Some(&cookie), None).await;

    assert_eq!(column(&members.body, "id"), expected);
    assert_eq!(column(&ledger.body["contributions"], "memberId"), expected);
    assert_eq!(ledger.body, again.body);
}

#[rstest]
#[actix_rt::test]
async fn duplicate_payment_leaves_the_ledger_untouched(#[future] seeded: Deployment) {
    let deployment = seeded.await;
    let app = deployment.start().await;
    let (cookie, _) = login(&app, "L2", "p2", None).await;
    let before = deployment.store().load::<Contribution>().await.expect("load");

    let reply = send(
        &app,
        "POST",
        "/api/v1/contributions",
        Some(&cookie),
        Some(json!({
            "memberId": "m3",
            "amount": 999,
            "paymentMethod": "bank",
            "period": "mar",
            "year": 2024
        })),
    )
    .await;

    assert_eq!(reply.status, StatusCode::CONFLICT);
    assert_eq!(reply.body["details"]["code"], "duplicate_contribution");
    let after = deployment.store().load::<Contribution>().await.expect("load");
    assert_eq!(before, after);
}

#[rstest]
#[actix_rt::test]
async fn full_training_keeps_its_roster(#[future] seeded: Deployment) {
    let deployment = seeded.await;
    let app = deployment.start().await;
    let (cookie, _) = login(&app, "L1", "p1", None).await;

    let reply = send(
        &app,
        "POST",
        "/api/v1/trainings/full/registrations",
        Some(&cookie),
        Some(json!({ "memberId": "m2" })),
    )
    .await;

    assert_eq!(reply.status, StatusCode::CONFLICT);
    let stored = deployment.store().load::<Training>().await.expect("load");
    let full = stored.iter().find(|t| t.id.as_str() == "full").expect("training");
    assert!(full.registered_members.is_empty());
}

#[rstest]
#[actix_rt::test]
async fn empty_year_has_twelve_zero_months(#[future] seeded: Deployment) {
    let deployment = seeded.await;
    let app = deployment.start().await;
    let (cookie, _) = login(&app, "admin", "admin123", Some("admin")).await;

    let reply = send(
        &app,
        "GET",
        "/api/v1/contributions/monthly?year=1999",
        Some(&cookie),
        None,
    )
    .await;

    let months = reply.body.as_array().expect("series");
    assert_eq!(months.len(), 12);
    assert!(
        months
            .iter()
            .all(|m| m["amount"] == 0.0 && m["count"] == 0)
    );
}
