use serde_json::json;
use uuid::Uuid;

mod unit;

const BASE_URL: &str = "http://127.0.0.1:8000";

async fn post_json(path: &str, body: serde_json::Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{}{}", BASE_URL, path))
        .json(&body)
        .send()
        .await
        .expect("request failed")
}

async fn create_cycle(name: &str) -> serde_json::Value {
    let response = post_json(
        "/cycles",
        json!({
            "name": name,
            "start_date": "2026-09-01",
            "end_date": "2026-12-01",
            "max_mentorships": 10
        }),
    )
    .await;
    assert_eq!(response.status(), 201);
    response.json().await.expect("invalid response body")
}

#[tokio::test]
#[ignore = "requires running server and database"]
async fn cycle_lifecycle_advances_forward_only() {
    let created = create_cycle("Autumn Cohort").await;
    let cycle_id = created["data"]["id"].as_str().expect("cycle id").to_string();
    assert_eq!(created["data"]["status"], "upcoming");

    let launched = post_json(&format!("/cycles/{}/launch", cycle_id), json!({})).await;
    assert_eq!(launched.status(), 200);
    let launched: serde_json::Value = launched.json().await.expect("body");
    assert_eq!(launched["data"]["status"], "active");

    // launching twice violates the forward-only transition table
    let relaunched = post_json(&format!("/cycles/{}/launch", cycle_id), json!({})).await;
    assert_eq!(relaunched.status(), 422);
}

#[tokio::test]
#[ignore = "requires running server and database"]
async fn matching_run_is_idempotent() {
    let created = create_cycle("Matching Cohort").await;
    let cycle_id = created["data"]["id"].as_str().expect("cycle id").to_string();
    post_json(&format!("/cycles/{}/launch", cycle_id), json!({})).await;

    let first = post_json("/matching/run", json!({ "cycle_id": cycle_id })).await;
    assert_eq!(first.status(), 200);
    let first: serde_json::Value = first.json().await.expect("body");

    let second = post_json("/matching/run", json!({ "cycle_id": cycle_id })).await;
    assert_eq!(second.status(), 200);
    let second: serde_json::Value = second.json().await.expect("body");

    let first_created = first["data"]
        .as_array()
        .expect("outcome list")
        .iter()
        .filter(|o| o["created"] == true)
        .count();
    let second_created = second["data"]
        .as_array()
        .expect("outcome list")
        .iter()
        .filter(|o| o["created"] == true)
        .count();
    // whatever the first run created, the second run must create nothing
    assert!(first_created == first["data"].as_array().expect("outcome list").len());
    assert_eq!(second_created, 0);
}

#[tokio::test]
#[ignore = "requires running server and database"]
async fn matching_rejects_out_of_range_threshold() {
    let response = post_json(
        "/matching/run",
        json!({ "cycle_id": Uuid::new_v4(), "min_score": 250 }),
    )
    .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore = "requires running server and database"]
async fn certificate_requires_a_completed_mentorship() {
    let response = post_json(
        &format!("/mentorships/{}/certificate", Uuid::new_v4()),
        json!({}),
    )
    .await;
    // unknown mentorship surfaces as NotFound, never as a silent success
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore = "requires running server and database"]
async fn interest_registration_is_unique_per_cycle() {
    let created = create_cycle("Interest Cohort").await;
    let cycle_id = created["data"]["id"].as_str().expect("cycle id").to_string();
    let user_id = Uuid::new_v4();

    let first = post_json(
        "/interests",
        json!({ "cycle_id": cycle_id, "user_id": user_id, "role": "mentee" }),
    )
    .await;
    assert_eq!(first.status(), 201);

    let second = post_json(
        "/interests",
        json!({ "cycle_id": cycle_id, "user_id": user_id, "role": "mentee" }),
    )
    .await;
    assert_eq!(second.status(), 409);
}
