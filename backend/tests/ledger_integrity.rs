//! Writes never drop records that are already on disk.

mod support;

use std::fs;

use actix_web::http::StatusCode;
use rstest::rstest;
use serde_json::{Value, json};

use syndicate_desk::domain::Contribution;
use syndicate_desk::test_support::{member, syndicate};
use support::{Deployment, login, send};

const FRACTIONAL_LEDGER: &str = r#"[
  {"id": "c1", "memberId": "m1", "amount": 5000, "paymentMethod": "cash",
   "period": "jan", "year": 2024, "recordedBy": "L1", "recordedAt": "2024-01-10T09:00:00Z"},
  {"id": "c2", "memberId": "m1", "amount": 12.5, "paymentMethod": "momo",
   "period": "feb", "year": 2024, "recordedBy": "L1", "recordedAt": "2024-02-10T09:00:00Z"}
]"#;

async fn seeded(ledger: &str) -> Deployment {
    let deployment = Deployment::new();
    let store = deployment.store();
    store
        .save(&[syndicate("s1", "Local 7", "L1", "p1")])
        .await
        .expect("seed syndicates");
    store
        .save(&[member("m1", "Jane Doe", "s1", None)])
        .await
        .expect("seed members");
    fs::write(deployment.dir.path().join("contributions.json"), ledger).expect("seed ledger");
    deployment
}

fn march_payment() -> Value {
    json!({
        "memberId": "m1",
        "amount": 5000,
        "paymentMethod": "bank",
        "period": "mar",
        "year": 2024
    })
}

#[rstest]
#[actix_rt::test]
async fn fractional_ledger_keeps_every_record() {
    let deployment = seeded(FRACTIONAL_LEDGER).await;
    let app = deployment.start().await;
    let (cookie, _) = login(&app, "L1", "p1", None).await;

    let reply = send(&app, "POST", "/api/v1/contributions", Some(&cookie), Some(march_payment())).await;

    assert_eq!(reply.status, StatusCode::CREATED);
    let stored = deployment.store().load::<Contribution>().await.expect("load");
    assert_eq!(stored.len(), 3);
    assert!(stored.iter().any(|c| c.amount == 12.5));
}

#[rstest]
#[actix_rt::test]
async fn unreadable_ledger_is_left_untouched() {
    let garbled = r#"[{"id": "c1", "amount": "a lot"}]"#;
    let deployment = seeded(garbled).await;
    let app = deployment.start().await;
    let (cookie, _) = login(&app, "L1", "p1", None).await;

    let reply = send(&app, "POST", "/api/v1/contributions", Some(&cookie), Some(march_payment())).await;

    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    let on_disk = fs::read_to_string(deployment.dir.path().join("contributions.json"))
        .expect("ledger still on disk");
    assert_eq!(on_disk, garbled);
}
