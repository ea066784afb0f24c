#[cfg(feature = "ssr")]
use actix_web::{web, HttpResponse, HttpResponseBuilder};
#[cfg(feature = "ssr")]
use crate::config::SiteConfig;
#[cfg(feature = "ssr")]
use crate::db::ReviewStore;
#[cfg(feature = "ssr")]
use crate::email::{contact_notification_html, review_notification_html, Notifier};
#[cfg(feature = "ssr")]
use crate::models::review::{NewReview, ReviewsResponse};
#[cfg(feature = "ssr")]
use std::sync::Arc;
#[cfg(feature = "ssr")]
use std::sync::OnceLock;
#[cfg(feature = "ssr")]
use leptos::logging::log;

#[cfg(feature = "ssr")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "ssr")]
#[derive(Serialize, Deserialize)]
pub struct ReviewRequest {
    #[serde(default)]
    pub name: String,
    // Accepted as raw JSON so a non-numeric rating gets its own 400 message
    // instead of a deserialization failure
    pub rating: Option<serde_json::Value>,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub company: String,
}

#[cfg(feature = "ssr")]
#[derive(Serialize, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

// The review endpoints are callable cross-origin, so every response carries
// permissive CORS headers, matching the preflight below.
#[cfg(feature = "ssr")]
fn with_cors(builder: &mut HttpResponseBuilder) -> &mut HttpResponseBuilder {
    builder
        .insert_header(("Access-Control-Allow-Origin", "*"))
        .insert_header(("Access-Control-Allow-Methods", "POST, OPTIONS, GET"))
        .insert_header(("Access-Control-Allow-Headers", "Content-Type"))
}

#[cfg(feature = "ssr")]
fn bad_request(message: &str) -> HttpResponse {
    with_cors(&mut HttpResponse::BadRequest()).json(serde_json::json!({ "error": message }))
}

#[cfg(feature = "ssr")]
fn email_regex() -> &'static regex::Regex {
    static EMAIL_RE: OnceLock<regex::Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
    })
}

/// GET /api/reviews. Never fails the call: a store that cannot be read shows
/// up as an empty list.
#[cfg(feature = "ssr")]
pub async fn get_reviews(store: web::Data<Arc<dyn ReviewStore>>) -> HttpResponse {
    let reviews = store.list().await;
    log!("[API] Returning {} reviews", reviews.len());
    with_cors(&mut HttpResponse::Ok()).json(ReviewsResponse { reviews })
}

/// POST /api/reviews: validate, persist, notify the admin (failures ignored),
/// respond 201 with the persisted review.
#[cfg(feature = "ssr")]
pub async fn create_review(
    store: web::Data<Arc<dyn ReviewStore>>,
    notifier: web::Data<Notifier>,
    config: web::Data<SiteConfig>,
    request: web::Json<ReviewRequest>,
) -> HttpResponse {
    let request = request.into_inner();
    log!("[API] Review submission from '{}'", request.name.trim());

    if request.name.trim().is_empty()
        || request.rating.is_none()
        || request.comment.trim().is_empty()
    {
        return bad_request("Name, rating, and comment are required.");
    }

    let rating = match request.rating.as_ref().and_then(|v| v.as_f64()) {
        Some(r) if (1.0..=5.0).contains(&r) => r as u8,
        _ => return bad_request("Rating must be a number between 1 and 5."),
    };

    let input = NewReview {
        name: request.name,
        rating,
        comment: request.comment,
        company: request.company,
    };
    let review = match store.create(input).await {
        Ok(review) => review,
        Err(e) => {
            leptos::logging::error!("[API] Failed to save review: {}", e);
            return with_cors(&mut HttpResponse::InternalServerError()).json(serde_json::json!({
                "success": false,
                "error": "Failed to submit review. Please try again.",
            }));
        }
    };

    // Notification is fire-and-forget: a dead email provider must never fail
    // a submission that is already persisted.
    let subject = format!("New Review from {}", review.name);
    let html = review_notification_html(&review, &config.site_url);
    if let Err(e) = notifier
        .send(&config.admin_email, &subject, &html, None)
        .await
    {
        leptos::logging::error!("[API] Failed to send review notification: {}", e);
    }

    with_cors(&mut HttpResponse::Created()).json(serde_json::json!({
        "success": true,
        "message": "Review submitted successfully!",
        "review": review,
    }))
}

/// OPTIONS /api/reviews, the CORS preflight.
#[cfg(feature = "ssr")]
pub async fn reviews_preflight() -> HttpResponse {
    with_cors(&mut HttpResponse::NoContent()).finish()
}

/// POST /api/contact. Unlike the review path, a missing email credential fails
/// the whole request: sending the message is all this endpoint does.
#[cfg(feature = "ssr")]
pub async fn submit_contact(
    notifier: web::Data<Notifier>,
    config: web::Data<SiteConfig>,
    request: web::Json<ContactRequest>,
) -> HttpResponse {
    if !notifier.is_configured() {
        leptos::logging::error!("[API] Contact request but no email API key is configured");
        return HttpResponse::InternalServerError()
            .json(serde_json::json!({ "error": "Server configuration error" }));
    }

    let request = request.into_inner();
    let name = request.name.trim();
    let email = request.email.trim();
    let message = request.message.trim();

    if name.is_empty() || email.is_empty() || message.is_empty() {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "All fields are required" }));
    }
    if !email_regex().is_match(email) {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Please enter a valid email address" }));
    }

    let subject = format!("New Contact from {}", name);
    let html = contact_notification_html(name, email, message);
    match notifier
        .send(&config.admin_email, &subject, &html, Some(email))
        .await
    {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Thank you for contacting us! We will get back to you soon.",
        })),
        Err(e) => {
            leptos::logging::error!("[API] Failed to send contact email: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to send message. Please try again.",
            }))
        }
    }
}
