mod common;

use axum::http::{Method, StatusCode};
use common::{register, send, test_app};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_register_and_login() {
    let app = test_app();
    let user = register(&app, "jo@air.test", "customer").await;

    assert_eq!(user["email"], "jo@air.test");
    assert_eq!(user["usertype"], "customer");
    assert_eq!(user["approval"], "approved");
    assert!(user.get("password").is_none());

    let (status, logged_in) = send(
        &app,
        Method::POST,
        "/login",
        Some(json!({ "email": "jo@air.test", "password": "s3cret" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(logged_in["_id"], user["_id"]);
}

#[tokio::test]
async fn test_bad_credentials_are_unauthorized() {
    let app = test_app();
    register(&app, "jo@air.test", "customer").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/login",
        Some(json!({ "email": "jo@air.test", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");

    let (status, _) = send(
        &app,
        Method::POST,
        "/login",
        Some(json!({ "email": "nobody@air.test", "password": "s3cret" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let app = test_app();
    register(&app, "jo@air.test", "customer").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/register",
        Some(json!({
            "username": "again",
            "email": "jo@air.test",
            "usertype": "customer",
            "password": "other"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User already exists");

    let (_, users) = send(&app, Method::GET, "/fetch-users", None).await;
    assert_eq!(users.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_operator_approval_workflow() {
    let app = test_app();
    let operator = register(&app, "ops@air.test", "flight-operator").await;
    assert_eq!(operator["approval"], "not-approved");

    let id = operator["_id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::POST, "/approve-operator", Some(json!({ "id": id }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "approved!");

    let (_, fetched) = send(&app, Method::GET, &format!("/fetch-user/{}", id), None).await;
    assert_eq!(fetched["approval"], "approved");

    let (status, body) = send(&app, Method::POST, "/reject-operator", Some(json!({ "id": id }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "rejected!");

    let (_, fetched) = send(&app, Method::GET, &format!("/fetch-user/{}", id), None).await;
    assert_eq!(fetched["approval"], "rejected");
}

#[tokio::test]
async fn test_unknown_users_are_not_found() {
    let app = test_app();
    let missing = Uuid::new_v4();

    let (status, _) = send(&app, Method::GET, &format!("/fetch-user/{}", missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::POST, "/approve-operator", Some(json!({ "id": missing }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_usertype_is_bad_request() {
    let app = test_app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/register",
        Some(json!({
            "username": "x",
            "email": "x@air.test",
            "usertype": "pilot",
            "password": "p"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
