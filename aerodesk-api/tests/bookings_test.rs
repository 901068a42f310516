mod common;

use axum::http::{Method, StatusCode};
use common::{add_flight, booking_body, bookings, register, send, test_app};
use std::collections::HashSet;
use uuid::Uuid;

#[tokio::test]
async fn test_booking_assigns_sequential_seats() {
    let app = test_app();
    let user = register(&app, "jo@air.test", "customer").await;
    let user_id = user["_id"].as_str().unwrap();
    let flight = add_flight(&app).await;

    let (status, body) = send(&app, Method::POST, "/book-ticket", Some(booking_body(user_id, &flight, "economy", 2))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Booking successful!");

    let (status, _) = send(&app, Method::POST, "/book-ticket", Some(booking_body(user_id, &flight, "economy", 1))).await;
    assert_eq!(status, StatusCode::OK);

    let stored = bookings(&app).await;
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0]["seats"], "E-1, E-2");
    assert_eq!(stored[0]["bookingStatus"], "confirmed");
    assert_eq!(stored[1]["seats"], "E-3");
}

#[tokio::test]
async fn test_seat_classes_number_independently() {
    let app = test_app();
    let user_id = Uuid::new_v4().to_string();
    let flight = add_flight(&app).await;

    for (class, expected) in [
        ("economy", "E-1"),
        ("premium-economy", "P-1"),
        ("business", "B-1"),
        ("first-class", "A-1"),
    ] {
        let (status, _) = send(&app, Method::POST, "/book-ticket", Some(booking_body(&user_id, &flight, class, 1))).await;
        assert_eq!(status, StatusCode::OK);

        let stored = bookings(&app).await;
        assert_eq!(stored.last().unwrap()["seats"], expected);
    }
}

#[tokio::test]
async fn test_invalid_seat_class_stores_nothing() {
    let app = test_app();
    let flight = add_flight(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/book-ticket",
        Some(booking_body(&Uuid::new_v4().to_string(), &flight, "luxury", 1)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid seat class: luxury");
    assert!(bookings(&app).await.is_empty());
}

#[tokio::test]
async fn test_booking_without_passengers_is_rejected() {
    let app = test_app();
    let flight = add_flight(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/book-ticket",
        Some(booking_body(&Uuid::new_v4().to_string(), &flight, "economy", 0)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "At least one passenger is required");
    assert!(bookings(&app).await.is_empty());
}

#[tokio::test]
async fn test_cancelled_seats_are_not_reused() {
    let app = test_app();
    let user_id = Uuid::new_v4().to_string();
    let flight = add_flight(&app).await;

    send(&app, Method::POST, "/book-ticket", Some(booking_body(&user_id, &flight, "economy", 2))).await;
    let booking_id = bookings(&app).await[0]["_id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::PUT, &format!("/cancel-ticket/{}", booking_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Booking cancelled");

    send(&app, Method::POST, "/book-ticket", Some(booking_body(&user_id, &flight, "economy", 1))).await;

    let stored = bookings(&app).await;
    assert_eq!(stored[0]["bookingStatus"], "cancelled");
    assert_eq!(stored[1]["seats"], "E-3");
}

#[tokio::test]
async fn test_cancel_unknown_booking_is_not_found() {
    let app = test_app();
    let (status, _) = send(&app, Method::PUT, &format!("/cancel-ticket/{}", Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_bookings_never_share_a_seat() {
    let app = test_app();
    let user_id = Uuid::new_v4().to_string();
    let flight = add_flight(&app).await;

    let mut handles = Vec::new();
    for _ in 0..10 {
        let app = app.clone();
        let body = booking_body(&user_id, &flight, "economy", 1);
        handles.push(tokio::spawn(async move {
            send(&app, Method::POST, "/book-ticket", Some(body)).await.0
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }

    let seats: HashSet<String> = bookings(&app)
        .await
        .iter()
        .map(|b| b["seats"].as_str().unwrap().to_string())
        .collect();
    let expected: HashSet<String> = (1..=10).map(|n| format!("E-{}", n)).collect();
    assert_eq!(seats, expected);
}
