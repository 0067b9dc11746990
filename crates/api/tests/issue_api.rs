//! HTTP-level integration tests for the `/issues` endpoints: create,
//! transfer between sprint and backlog, update and delete.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, patch_json, post_json, Fixture, UNKNOWN_ID};
use serde_json::json;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_issue_without_properties_returns_400() {
    let fx = Fixture::new().await;
    let response = post_json(fx.app(), "/issues", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_issue_with_invalid_properties_returns_400() {
    let fx = Fixture::new().await;
    let before = fx.sprint(fx.sprint_one).await;

    let response = post_json(
        fx.app(),
        "/issues",
        json!({
            "sprint": fx.sprint_one.to_hex(),
            "issue": {"description": "My first issue.", "createdAt": 1_700_000_000_000_i64}
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(fx.sprint(fx.sprint_one).await, before);
}

#[tokio::test]
async fn create_issue_without_sprint_or_backlog_returns_400() {
    let fx = Fixture::new().await;
    let response = post_json(
        fx.app(),
        "/issues",
        json!({"issue": {"description": "My first issue."}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_issue_without_issue_object_returns_400() {
    let fx = Fixture::new().await;
    let response = post_json(
        fx.app(),
        "/issues",
        json!({"backlog": fx.backlog_one.to_hex()}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(fx.backlog(fx.backlog_one).await.issue.len(), 1);
}

#[tokio::test]
async fn create_issue_with_empty_description_returns_400() {
    let fx = Fixture::new().await;
    let response = post_json(
        fx.app(),
        "/issues",
        json!({"backlog": fx.backlog_one.to_hex(), "issue": {"description": ""}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_issue_for_unknown_backlog_returns_404() {
    let fx = Fixture::new().await;
    let response = post_json(
        fx.app(),
        "/issues",
        json!({"backlog": UNKNOWN_ID, "issue": {"description": "My first issue."}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_issue_returns_201_and_persists() {
    let fx = Fixture::new().await;

    let response = post_json(
        fx.app(),
        "/issues",
        json!({"backlog": fx.backlog_one.to_hex(), "issue": {"description": "My first issue."}}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["description"], "My first issue.");
    assert!(json["todo"].as_array().unwrap().is_empty());

    let backlog = fx.backlog(fx.backlog_one).await;
    let created = backlog
        .issue
        .iter()
        .find(|i| i.id.to_hex() == json["_id"].as_str().unwrap())
        .expect("issue persisted");
    assert_eq!(created.description, "My first issue.");
}

// ---------------------------------------------------------------------------
// Transfer
// ---------------------------------------------------------------------------

#[tokio::test]
async fn transfer_unknown_issue_returns_404() {
    let fx = Fixture::new().await;
    let response = post_json(
        fx.app(),
        "/issues?transferto=sprint",
        json!({"sprint": fx.sprint_two.to_hex(), "issue": UNKNOWN_ID}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn transfer_to_unknown_sprint_returns_404() {
    let fx = Fixture::new().await;
    let response = post_json(
        fx.app(),
        "/issues?transferto=sprint",
        json!({"sprint": UNKNOWN_ID, "issue": fx.issue_two.id.to_hex()}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(fx.backlog(fx.backlog_one).await.issue.len(), 1);
}

#[tokio::test]
async fn transfer_to_unknown_backlog_returns_404() {
    let fx = Fixture::new().await;
    let response = post_json(
        fx.app(),
        "/issues?transferto=backlog",
        json!({"backlog": UNKNOWN_ID, "issue": fx.issue_one.id.to_hex()}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(fx.sprint(fx.sprint_one).await.issue.len(), 1);
}

#[tokio::test]
async fn transfer_without_issue_property_returns_400() {
    let fx = Fixture::new().await;
    let response = post_json(
        fx.app(),
        "/issues?transferto=sprint",
        json!({"sprint": fx.sprint_two.to_hex()}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn transfer_with_both_backlog_and_sprint_returns_400() {
    let fx = Fixture::new().await;
    let response = post_json(
        fx.app(),
        "/issues?transferto=sprint",
        json!({
            "backlog": fx.backlog_one.to_hex(),
            "sprint": fx.sprint_two.to_hex(),
            "issue": fx.issue_two.id.to_hex()
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn transfer_to_sprint_without_sprint_property_returns_400() {
    let fx = Fixture::new().await;
    let response = post_json(
        fx.app(),
        "/issues?transferto=sprint",
        json!({"issue": fx.issue_two.id.to_hex()}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn transfer_to_backlog_without_backlog_property_returns_400() {
    let fx = Fixture::new().await;
    let response = post_json(
        fx.app(),
        "/issues?transferto=backlog",
        json!({"issue": fx.issue_one.id.to_hex()}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn transfer_target_must_match_transferto() {
    let fx = Fixture::new().await;
    let response = post_json(
        fx.app(),
        "/issues?transferto=sprint",
        json!({"backlog": fx.backlog_one.to_hex(), "issue": fx.issue_one.id.to_hex()}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn transfer_with_unknown_transferto_returns_400() {
    let fx = Fixture::new().await;
    let response = post_json(
        fx.app(),
        "/issues?transferto=project",
        json!({"sprint": fx.sprint_two.to_hex(), "issue": fx.issue_two.id.to_hex()}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn transfer_to_sprint_moves_issue_out_of_backlog() {
    let fx = Fixture::new().await;
    let sprint = fx.sprint(fx.sprint_one).await;
    let backlog = fx.backlog(fx.backlog_one).await;

    let response = post_json(
        fx.app(),
        "/issues?transferto=sprint",
        json!({"sprint": fx.sprint_one.to_hex(), "issue": fx.issue_two.id.to_hex()}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["_id"], fx.issue_two.id.to_hex());

    let sprint_updated = fx.sprint(fx.sprint_one).await;
    let backlog_updated = fx.backlog(fx.backlog_one).await;
    assert_eq!(sprint_updated.issue.len(), sprint.issue.len() + 1);
    assert_eq!(backlog_updated.issue.len(), backlog.issue.len() - 1);
}

#[tokio::test]
async fn transfer_to_backlog_moves_issue_with_its_todos() {
    let fx = Fixture::new().await;
    let sprint = fx.sprint(fx.sprint_one).await;
    let backlog = fx.backlog(fx.backlog_one).await;

    let response = post_json(
        fx.app(),
        "/issues?transferto=backlog",
        json!({"backlog": fx.backlog_one.to_hex(), "issue": fx.issue_one.id.to_hex()}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let sprint_updated = fx.sprint(fx.sprint_one).await;
    let backlog_updated = fx.backlog(fx.backlog_one).await;
    assert_eq!(backlog_updated.issue.len(), backlog.issue.len() + 1);
    assert_eq!(sprint_updated.issue.len(), sprint.issue.len() - 1);
    assert_eq!(backlog_updated.find_issue(fx.issue_one.id), Some(&fx.issue_one));
}

#[tokio::test]
async fn transfer_between_sprints() {
    let fx = Fixture::new().await;

    let response = post_json(
        fx.app(),
        "/issues?transferto=sprint",
        json!({"sprint": fx.sprint_two.to_hex(), "issue": fx.issue_one.id.to_hex()}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(fx.sprint(fx.sprint_one).await.issue.is_empty());
    assert_eq!(fx.sprint(fx.sprint_two).await.issue.len(), 1);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_issue_without_properties_returns_400() {
    let fx = Fixture::new().await;
    let response = patch_json(
        fx.app(),
        &format!("/issues/{}?parent=sprint", fx.issue_one.id),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_issue_with_invalid_properties_returns_400() {
    let fx = Fixture::new().await;
    let response = patch_json(
        fx.app(),
        &format!("/issues/{}?parent=sprint", fx.issue_one.id),
        json!({"_id": UNKNOWN_ID, "description": "My first updated issue."}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let sprint = fx.sprint(fx.sprint_one).await;
    assert_eq!(sprint.find_issue(fx.issue_one.id), Some(&fx.issue_one));
}

#[tokio::test]
async fn update_issue_with_empty_description_returns_400() {
    let fx = Fixture::new().await;
    let response = patch_json(
        fx.app(),
        &format!("/issues/{}?parent=sprint", fx.issue_one.id),
        json!({"description": ""}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let sprint = fx.sprint(fx.sprint_one).await;
    assert_eq!(
        sprint.find_issue(fx.issue_one.id).unwrap().description,
        fx.issue_one.description
    );
}

#[tokio::test]
async fn update_issue_with_null_description_returns_400() {
    let fx = Fixture::new().await;
    let before = fx.sprint(fx.sprint_one).await;

    let response = patch_json(
        fx.app(),
        &format!("/issues/{}?parent=sprint", fx.issue_one.id),
        json!({"description": null}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(fx.sprint(fx.sprint_one).await, before);
}

#[tokio::test]
async fn update_nonexistent_issue_returns_404() {
    let fx = Fixture::new().await;
    let response = patch_json(
        fx.app(),
        &format!("/issues/{UNKNOWN_ID}?parent=sprint"),
        json!({"description": "My first updated issue."}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_issue_returns_200() {
    let fx = Fixture::new().await;
    let response = patch_json(
        fx.app(),
        &format!("/issues/{}?parent=sprint", fx.issue_one.id),
        json!({"description": "My first updated issue."}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["description"], "My first updated issue.");
    assert_eq!(json["todo"].as_array().unwrap().len(), 1);

    let sprint = fx.sprint(fx.sprint_one).await;
    let issue = sprint.find_issue(fx.issue_one.id).unwrap();
    assert_eq!(issue.description, "My first updated issue.");
    assert_eq!(issue.todo, fx.issue_one.todo);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_nonexistent_issue_returns_404() {
    let fx = Fixture::new().await;
    let response = delete(fx.app(), &format!("/issues/{UNKNOWN_ID}?parent=sprint")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(fx.sprint(fx.sprint_one).await.issue.len(), 1);
}

#[tokio::test]
async fn delete_issue_returns_removed_issue() {
    let fx = Fixture::new().await;
    let response = delete(fx.app(), &format!("/issues/{}?parent=sprint", fx.issue_one.id)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["_id"], fx.issue_one.id.to_hex());
    assert_eq!(json["todo"][0]["_id"], fx.todo_one.id.to_hex());

    let sprint = fx.sprint(fx.sprint_one).await;
    assert!(sprint.find_issue(fx.issue_one.id).is_none());
}

#[tokio::test]
async fn delete_issue_without_parent_returns_400() {
    let fx = Fixture::new().await;
    let response = delete(fx.app(), &format!("/issues/{}", fx.issue_one.id)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
