//! Endpoint-level tests for the reviews and contact API.
#![cfg(feature = "ssr")]

use actix_web::{http::Method, test, web, App};
use chrono::{DateTime, Utc};
use devera::api::{create_review, get_reviews, reviews_preflight, submit_contact};
use devera::config::{SiteConfig, StoreBackend};
use devera::db::{FileReviewStore, ReviewStore, SqliteReviewStore};
use devera::email::Notifier;
use serde_json::{json, Value};
use std::sync::Arc;

fn test_config() -> SiteConfig {
    SiteConfig {
        store_backend: StoreBackend::Sqlite,
        database_path: ":memory:".to_string(),
        reviews_file: String::new(),
        resend_api_key: None,
        admin_email: "admin@example.com".to_string(),
        site_url: "http://127.0.0.1:3004".to_string(),
    }
}

async fn sqlite_store() -> Arc<dyn ReviewStore> {
    let store = SqliteReviewStore::new(":memory:").unwrap();
    store.create_schema().await.unwrap();
    Arc::new(store)
}

/// A notifier with no API key: sends fail fast without touching the network.
fn unconfigured_notifier() -> Notifier {
    Notifier::new(None)
}

/// A notifier that believes it is configured but points at a dead endpoint.
fn broken_notifier() -> Notifier {
    Notifier::new(Some("re_test_key".to_string())).with_api_base("http://127.0.0.1:1")
}

macro_rules! test_app {
    ($store:expr, $notifier:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($store))
                .app_data(web::Data::new($notifier))
                .app_data(web::Data::new(test_config()))
                .service(
                    web::scope("/api")
                        .route("/reviews", web::get().to(get_reviews))
                        .route("/reviews", web::post().to(create_review))
                        .route(
                            "/reviews",
                            web::method(Method::OPTIONS).to(reviews_preflight),
                        )
                        .route("/contact", web::post().to(submit_contact)),
                ),
        )
        .await
    };
}

#[actix_web::test]
async fn valid_review_is_persisted_and_listed() {
    let app = test_app!(sqlite_store().await, unconfigured_notifier());

    let req = test::TestRequest::post()
        .uri("/api/reviews")
        .set_json(json!({ "name": "Alice", "rating": 4, "comment": "Great work" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["review"]["name"], json!("Alice"));
    assert_eq!(body["review"]["rating"], json!(4));
    assert_eq!(body["review"]["company"], json!(""));

    // The stamped date is close to now
    let date: DateTime<Utc> = body["review"]["date"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!(Utc::now().signed_duration_since(date).num_seconds() < 5);

    let req = test::TestRequest::get().uri("/api/reviews").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["reviews"].as_array().unwrap().len(), 1);
    assert_eq!(body["reviews"][0]["comment"], json!("Great work"));
}

#[actix_web::test]
async fn missing_fields_are_rejected_without_persisting() {
    let app = test_app!(sqlite_store().await, unconfigured_notifier());

    let bodies = [
        json!({}),
        json!({ "name": "   ", "rating": 4, "comment": "x" }),
        json!({ "name": "Alice", "comment": "x" }),
        json!({ "name": "Alice", "rating": 4, "comment": "   " }),
    ];
    for payload in bodies {
        let req = test::TestRequest::post()
            .uri("/api/reviews")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400, "payload: {payload}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["error"],
            json!("Name, rating, and comment are required.")
        );
    }

    let req = test::TestRequest::get().uri("/api/reviews").to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert!(body["reviews"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn out_of_range_or_non_numeric_rating_is_rejected() {
    let app = test_app!(sqlite_store().await, unconfigured_notifier());

    for rating in [json!(0), json!(6), json!(-1), json!("great")] {
        let req = test::TestRequest::post()
            .uri("/api/reviews")
            .set_json(json!({ "name": "Alice", "rating": rating, "comment": "x" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400, "rating: {rating}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["error"],
            json!("Rating must be a number between 1 and 5.")
        );
    }

    let req = test::TestRequest::get().uri("/api/reviews").to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert!(body["reviews"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn listing_returns_all_reviews_newest_first() {
    let app = test_app!(sqlite_store().await, unconfigured_notifier());

    for name in ["First", "Second", "Third"] {
        let req = test::TestRequest::post()
            .uri("/api/reviews")
            .set_json(json!({ "name": name, "rating": 5, "comment": "good" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);
    }

    let req = test::TestRequest::get().uri("/api/reviews").to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let reviews = body["reviews"].as_array().unwrap();
    assert_eq!(reviews.len(), 3);
    assert_eq!(reviews[0]["name"], json!("Third"));
    assert_eq!(reviews[1]["name"], json!("Second"));
    assert_eq!(reviews[2]["name"], json!("First"));

    let dates: Vec<&str> = reviews
        .iter()
        .map(|r| r["date"].as_str().unwrap())
        .collect();
    assert!(dates.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[actix_web::test]
async fn unavailable_store_fails_the_write_path() {
    // The store's parent "directory" is a regular file, so writes cannot land
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    let store: Arc<dyn ReviewStore> = Arc::new(FileReviewStore::new(blocker.join("reviews.json")));

    let app = test_app!(store, unconfigured_notifier());
    let req = test::TestRequest::post()
        .uri("/api/reviews")
        .set_json(json!({ "name": "Alice", "rating": 4, "comment": "Great work" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
}

#[actix_web::test]
async fn unreadable_store_degrades_to_an_empty_listing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reviews.json");
    std::fs::write(&path, "{{{ not json").unwrap();
    let store: Arc<dyn ReviewStore> = Arc::new(FileReviewStore::new(path));

    let app = test_app!(store, unconfigured_notifier());
    let req = test::TestRequest::get().uri("/api/reviews").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["reviews"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn notification_failure_does_not_fail_the_submission() {
    let app = test_app!(sqlite_store().await, broken_notifier());

    let req = test::TestRequest::post()
        .uri("/api/reviews")
        .set_json(json!({ "name": "Alice", "rating": 5, "comment": "Great work" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(true));
}

#[actix_web::test]
async fn preflight_carries_permissive_cors_headers() {
    let app = test_app!(sqlite_store().await, unconfigured_notifier());

    let req = test::TestRequest::default()
        .method(Method::OPTIONS)
        .uri("/api/reviews")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 204);
    let headers = resp.headers();
    assert_eq!(headers.get("Access-Control-Allow-Origin").unwrap(), "*");
    assert_eq!(
        headers.get("Access-Control-Allow-Methods").unwrap(),
        "POST, OPTIONS, GET"
    );
    assert_eq!(
        headers.get("Access-Control-Allow-Headers").unwrap(),
        "Content-Type"
    );
}

#[actix_web::test]
async fn contact_without_api_key_is_a_configuration_error() {
    let app = test_app!(sqlite_store().await, unconfigured_notifier());

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .set_json(json!({
            "name": "Bob",
            "email": "bob@example.com",
            "message": "Hello"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], json!("Server configuration error"));
}

#[actix_web::test]
async fn contact_validates_fields_and_email_shape() {
    let app = test_app!(sqlite_store().await, broken_notifier());

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .set_json(json!({ "name": "", "email": "bob@example.com", "message": "Hi" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], json!("All fields are required"));

    for bad_email in ["not-an-email", "a@b", "a b@c.com", "@c.com"] {
        let req = test::TestRequest::post()
            .uri("/api/contact")
            .set_json(json!({ "name": "Bob", "email": bad_email, "message": "Hi" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400, "email: {bad_email}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], json!("Please enter a valid email address"));
    }
}

#[actix_web::test]
async fn contact_send_failure_is_a_generic_500() {
    let app = test_app!(sqlite_store().await, broken_notifier());

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .set_json(json!({
            "name": "Bob",
            "email": "bob@example.com",
            "message": "Hello"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], json!("Failed to send message. Please try again."));
}
