#![allow(dead_code)]

use aerodesk_api::{app, AppState};
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Router over a fresh in-memory store.
pub fn test_app() -> Router {
    app(AppState::in_memory())
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Sends `body` as-is, for requests that are not valid JSON or lack a content type.
pub async fn send_raw(app: &Router, method: Method, uri: &str, content_type: Option<&str>, body: &str) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn register(app: &Router, email: &str, usertype: &str) -> Value {
    let (status, user) = send(
        app,
        Method::POST,
        "/register",
        Some(json!({
            "username": "tester",
            "email": email,
            "usertype": usertype,
            "password": "s3cret"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    user
}

/// Adds a Delhi to Goa flight and returns its stored JSON.
pub async fn add_flight(app: &Router) -> Value {
    let (status, _) = send(
        app,
        Method::POST,
        "/add-flight",
        Some(json!({
            "flightName": "Indigo",
            "flightId": "6E-201",
            "origin": "Delhi",
            "destination": "Goa",
            "departureTime": "09:00",
            "arrivalTime": "11:30",
            "basePrice": 4500.0,
            "totalSeats": 180
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, flights) = send(app, Method::GET, "/fetch-flights", None).await;
    flights.as_array().unwrap().last().unwrap().clone()
}

pub fn booking_body(user: &str, flight: &Value, seat_class: &str, count: usize) -> Value {
    let passengers: Vec<Value> = (0..count)
        .map(|i| json!({ "name": format!("Passenger {}", i + 1), "age": 30 }))
        .collect();

    json!({
        "user": user,
        "flight": flight["_id"],
        "flightName": flight["flightName"],
        "flightId": flight["flightId"],
        "departure": flight["origin"],
        "destination": flight["destination"],
        "email": "jo@air.test",
        "mobile": "9999999999",
        "passengers": passengers,
        "totalPrice": 4500.0 * count as f64,
        "journeyDate": "2024-05-01",
        "journeyTime": "09:00",
        "seatClass": seat_class
    })
}

pub async fn bookings(app: &Router) -> Vec<Value> {
    let (status, body) = send(app, Method::GET, "/fetch-bookings", None).await;
    assert_eq!(status, StatusCode::OK);
    body.as_array().unwrap().clone()
}
