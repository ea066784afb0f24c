// src/models/review.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Review {
    pub id: String,          // Unique ID assigned by the store
    pub name: String,        // Reviewer name ("Anonymous" when left blank)
    pub rating: u8,          // Star rating, 1-5
    pub comment: String,     // The review text
    #[serde(default)]
    pub company: String,     // Optional company, empty string when absent
    pub date: DateTime<Utc>, // Stamped server-side at creation, RFC 3339 on the wire
}

/// Fields a caller supplies when creating a review. Trimming, rating clamping
/// and defaulting happen inside the store.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub name: String,
    pub rating: u8,
    pub comment: String,
    pub company: String,
}

/// Wire shape of `GET /api/reviews`, shared by the handlers and the widget.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ReviewsResponse {
    pub reviews: Vec<Review>,
}
