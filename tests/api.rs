//! Route-level tests driven through the router in-process.

use axum::http::{Method, StatusCode};
use box_booking::config::ServiceConfig;
use box_booking::HttpServer;

mod common;
use common::{body_json, body_text, router, send};

const SLOT_A: &str = r#"{"boxId":"A","start":"2024-01-01T10:00","end":"2024-01-01T11:00"}"#;

#[tokio::test]
async fn test_create_returns_booking() {
    let app = router();
    let res = send(&app, Method::POST, "/bookings", Some(SLOT_A)).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert!(res.headers().contains_key("x-request-id"));

    let created = body_json(res).await;
    assert_eq!(created["boxId"], "A");
    assert_eq!(created["start"], "2024-01-01T10:00");
    assert_eq!(created["end"], "2024-01-01T11:00");
    assert!(created["id"].as_str().is_some_and(|id| !id.is_empty()));
}

#[tokio::test]
async fn test_conflict_is_409_and_non_mutating() {
    let app = router();
    send(&app, Method::POST, "/bookings", Some(SLOT_A)).await;

    let res = send(
        &app,
        Method::POST,
        "/bookings",
        Some(r#"{"boxId":"A","start":"2024-01-01T10:30","end":"2024-01-01T11:30"}"#),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert!(body_text(res).await.starts_with("Conflict"));

    let list = body_json(send(&app, Method::GET, "/bookings", None).await).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_touching_bookings_allowed() {
    let app = router();
    send(&app, Method::POST, "/bookings", Some(SLOT_A)).await;
    let res = send(
        &app,
        Method::POST,
        "/bookings",
        Some(r#"{"boxId":"A","start":"2024-01-01T11:00","end":"2024-01-01T12:00"}"#),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_validation() {
    let app = router();

    for body in [
        "",
        "{broken",
        r#"{"boxId":"A"}"#,
        r#"{"boxId":"A","start":"later","end":"2024-01-01T11:00"}"#,
        r#"{"boxId":"A","start":"2024-01-01T11:00","end":"2024-01-01T10:00"}"#,
        r#"{"boxId":"","start":"2024-01-01T10:00","end":"2024-01-01T11:00"}"#,
        r#"{"boxId":1,"start":"2024-01-01T10:00","end":"2024-01-01T11:00"}"#,
    ] {
        let res = send(&app, Method::POST, "/bookings", Some(body)).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "body: {}", body);
    }

    let list = body_json(send(&app, Method::GET, "/bookings", None).await).await;
    assert_eq!(list, serde_json::json!([]));
}

#[tokio::test]
async fn test_list_filters() {
    let app = router();
    send(&app, Method::POST, "/bookings", Some(SLOT_A)).await;
    send(
        &app,
        Method::POST,
        "/bookings",
        Some(r#"{"boxId":"A","start":"2024-01-02T10:00","end":"2024-01-02T11:00"}"#),
    )
    .await;
    send(
        &app,
        Method::POST,
        "/bookings",
        Some(r#"{"boxId":"B","start":"2024-01-01T10:00","end":"2024-01-01T11:00"}"#),
    )
    .await;

    let count = |v: serde_json::Value| v.as_array().unwrap().len();
    assert_eq!(count(body_json(send(&app, Method::GET, "/bookings", None).await).await), 3);
    assert_eq!(count(body_json(send(&app, Method::GET, "/bookings?boxId=A", None).await).await), 2);
    assert_eq!(count(body_json(send(&app, Method::GET, "/bookings?date=2024-01-01", None).await).await), 2);

    let list = body_json(send(&app, Method::GET, "/bookings?boxId=A&date=2024-01-01", None).await).await;
    assert_eq!(count(list.clone()), 1);
    assert_eq!(list[0]["start"], "2024-01-01T10:00");

    assert_eq!(count(body_json(send(&app, Method::GET, "/bookings?boxId=", None).await).await), 3);
}

#[tokio::test]
async fn test_list_accepts_any_query_string() {
    let app = router();
    send(&app, Method::POST, "/bookings", Some(SLOT_A)).await;
    send(
        &app,
        Method::POST,
        "/bookings",
        Some(r#"{"boxId":"B","start":"2024-01-01T10:00","end":"2024-01-01T11:00"}"#),
    )
    .await;

    let cases = [
        ("/bookings?boxId=A&boxId=B", 1),
        ("/bookings?boxId=B&boxId=A", 1),
        ("/bookings?date=2024-01-01&date=2024-01-02", 2),
        ("/bookings?page=2&sort=desc", 2),
        ("/bookings?boxId=&date=2024-01-01&boxId=A", 2),
        ("/bookings?boxId=A&date=", 1),
        ("/bookings?&&=&boxId", 2),
        ("/bookings?boxId=%ZZ", 0),
        ("/bookings?", 2),
    ];
    for (uri, expected) in cases {
        let res = send(&app, Method::GET, uri, None).await;
        assert_eq!(res.status(), StatusCode::OK, "uri: {}", uri);
        let list = body_json(res).await;
        assert_eq!(list.as_array().unwrap().len(), expected, "uri: {}", uri);
    }

    let first_wins = body_json(send(&app, Method::GET, "/bookings?boxId=B&boxId=A", None).await).await;
    assert_eq!(first_wins[0]["boxId"], "B");
}

#[tokio::test]
async fn test_patch_merges_and_revalidates() {
    let app = router();
    let first = body_json(send(&app, Method::POST, "/bookings", Some(SLOT_A)).await).await;
    let second = body_json(
        send(
            &app,
            Method::POST,
            "/bookings",
            Some(r#"{"boxId":"A","start":"2024-01-01T13:00","end":"2024-01-01T14:00"}"#),
        )
        .await,
    )
    .await;

    let uri = format!("/bookings/{}", first["id"].as_str().unwrap());
    let res = send(&app, Method::PATCH, &uri, Some(r#"{"end":"2024-01-01T12:00"}"#)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let updated = body_json(res).await;
    assert_eq!(updated["id"], first["id"]);
    assert_eq!(updated["boxId"], "A");
    assert_eq!(updated["start"], "2024-01-01T10:00");
    assert_eq!(updated["end"], "2024-01-01T12:00");

    // Stretching into the second booking is rejected.
    let res = send(&app, Method::PATCH, &uri, Some(r#"{"end":"2024-01-01T13:30"}"#)).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let second_uri = format!("/bookings/{}", second["id"].as_str().unwrap());
    let unchanged = body_json(send(&app, Method::GET, &uri, None).await).await;
    assert_eq!(unchanged["end"], "2024-01-01T12:00");
    assert_eq!(body_json(send(&app, Method::GET, &second_uri, None).await).await, second);

    // Malformed patch bodies change nothing.
    let res = send(&app, Method::PATCH, &uri, Some("not json")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await, unchanged);
}

#[tokio::test]
async fn test_unknown_ids_are_404() {
    let app = router();
    let missing = "/bookings/00000000-0000-0000-0000-000000000000";

    assert_eq!(send(&app, Method::GET, missing, None).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        send(&app, Method::PATCH, missing, Some(r#"{"end":"2024-01-01T12:00"}"#)).await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(send(&app, Method::DELETE, missing, None).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(send(&app, Method::DELETE, "/bookings/abc", None).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_missing_id_is_404_whatever_the_body() {
    let app = router();
    let missing = "/bookings/00000000-0000-0000-0000-000000000000";

    for body in [
        r#"{"end":"noon"}"#,
        r#"{"boxId":7}"#,
        r#"{"boxId":""}"#,
        r#"{"start":"2024-01-01T12:00","end":"2024-01-01T10:00"}"#,
        "not json",
    ] {
        let res = send(&app, Method::PATCH, missing, Some(body)).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "body: {}", body);
    }

    // The same bad body against an existing booking is a validation error.
    let created = body_json(send(&app, Method::POST, "/bookings", Some(SLOT_A)).await).await;
    let uri = format!("/bookings/{}", created["id"].as_str().unwrap());
    let res = send(&app, Method::PATCH, &uri, Some(r#"{"end":"noon"}"#)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_then_404() {
    let app = router();
    let created = body_json(send(&app, Method::POST, "/bookings", Some(SLOT_A)).await).await;
    let uri = format!("/bookings/{}", created["id"].as_str().unwrap());

    let res = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(body_text(res).await.is_empty());

    assert_eq!(send(&app, Method::DELETE, &uri, None).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unmatched_routes_are_404() {
    let app = router();
    assert_eq!(send(&app, Method::GET, "/nope", None).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(send(&app, Method::PUT, "/bookings", None).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(send(&app, Method::POST, "/bookings/x", Some("{}")).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_schedule_and_allow_list() {
    let mut config = ServiceConfig::default();
    config.store.boxes = vec!["Box 1".into(), "Box 2".into()];
    let app = HttpServer::new(config).router();

    let later = r#"{"boxId":"Box 1","start":"2024-01-01T15:00","end":"2024-01-01T16:00"}"#;
    let earlier = r#"{"boxId":"Box 1","start":"2024-01-01T09:00","end":"2024-01-01T10:00"}"#;
    assert_eq!(send(&app, Method::POST, "/bookings", Some(later)).await.status(), StatusCode::CREATED);
    assert_eq!(send(&app, Method::POST, "/bookings", Some(earlier)).await.status(), StatusCode::CREATED);

    let unknown = r#"{"boxId":"Box 9","start":"2024-01-01T09:00","end":"2024-01-01T10:00"}"#;
    let res = send(&app, Method::POST, "/bookings", Some(unknown)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(res).await, "Unknown box: Box 9");

    let schedule = body_json(send(&app, Method::GET, "/boxes/Box%201/schedule", None).await).await;
    let starts: Vec<&str> = schedule
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["start"].as_str().unwrap())
        .collect();
    assert_eq!(starts, vec!["2024-01-01T09:00", "2024-01-01T15:00"]);

    assert_eq!(
        send(&app, Method::GET, "/boxes/Box%209/schedule", None).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn test_health() {
    let app = router();
    send(&app, Method::POST, "/bookings", Some(SLOT_A)).await;
    let health = body_json(send(&app, Method::GET, "/health", None).await).await;
    assert_eq!(health["status"], "ok");
    assert_eq!(health["bookings"], 1);
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let mut config = ServiceConfig::default();
    config.security.max_body_size = 16;
    let app = HttpServer::new(config).router();

    let res = send(&app, Method::POST, "/bookings", Some(SLOT_A)).await;
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
