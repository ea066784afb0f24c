/// Client reviews widget: fetches and renders the review list, paginates it
/// client-side in steps of 3, and submits new reviews through the JSON API.
use leptos::*;
use leptos::logging::log;
use leptos_dom::ev::SubmitEvent;
use crate::models::review::{Review, ReviewsResponse};
use futures::future;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde::{Deserialize, Serialize};
use wasm_bindgen_futures::spawn_local;

const PAGE_SIZE: usize = 3;

#[derive(Serialize, Clone, Debug)]
struct ReviewPayload {
    name: String,
    rating: u8,
    comment: String,
    company: String,
}

#[derive(Deserialize, Clone, Debug, Default)]
struct SubmitReviewResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: String,
    #[serde(default)]
    error: String,
}

#[derive(Clone, Copy, PartialEq)]
enum SubmitStatus {
    Idle,
    Loading,
    Success,
    Error,
}

fn star_row(rating: u8) -> String {
    let rating = rating.min(5) as usize;
    "★".repeat(rating) + &"☆".repeat(5 - rating)
}

#[component]
pub fn ReviewsSection() -> impl IntoView {
    let (reviews, set_reviews) = create_signal(Vec::<Review>::new());
    let (visible_count, set_visible_count) = create_signal(PAGE_SIZE);

    // Form state
    let (name, set_name) = create_signal(String::new());
    let (company, set_company) = create_signal(String::new());
    let (rating, set_rating) = create_signal(5u8);
    let (comment, set_comment) = create_signal(String::new());
    let (status, set_status) = create_signal(SubmitStatus::Idle);
    let (response_message, set_response_message) = create_signal(String::new());

    let fetch_reviews = move || {
        spawn_local(async move {
            match Request::get("/api/reviews").send().await {
                Ok(response) => match response.json::<ReviewsResponse>().await {
                    Ok(data) => set_reviews.set(data.reviews),
                    Err(e) => log!("[REVIEWS] Failed to parse reviews: {}", e),
                },
                Err(e) => log!("[REVIEWS] Failed to fetch reviews: {}", e),
            }
        });
    };

    // Initial load, browser only
    create_effect(move |_| {
        fetch_reviews();
    });

    let submit_review = move |ev: SubmitEvent| {
        ev.prevent_default();

        // Client-side check in addition to the server's validation
        if name.get().trim().is_empty() || comment.get().trim().is_empty() {
            set_status.set(SubmitStatus::Error);
            set_response_message.set("Name and review are required.".to_string());
            spawn_local(async move {
                TimeoutFuture::new(5_000).await;
                set_status.set(SubmitStatus::Idle);
                set_response_message.set(String::new());
            });
            return;
        }

        set_status.set(SubmitStatus::Loading);
        set_response_message.set(String::new());

        let payload = ReviewPayload {
            name: name.get().trim().to_string(),
            rating: rating.get(),
            comment: comment.get().trim().to_string(),
            company: company.get().trim().to_string(),
        };

        spawn_local(async move {
            // Keep the loading indicator up for at least a second so a fast
            // response does not flash it
            let delay = TimeoutFuture::new(1_000);
            let sent = match Request::post("/api/reviews").json(&payload) {
                Ok(request) => {
                    let (result, _) = future::join(request.send(), delay).await;
                    result
                }
                Err(e) => Err(e),
            };

            match sent {
                Ok(response) => {
                    let ok = response.ok();
                    let body = response
                        .json::<SubmitReviewResponse>()
                        .await
                        .unwrap_or_default();
                    if ok && body.success {
                        set_status.set(SubmitStatus::Success);
                        set_response_message.set(if body.message.is_empty() {
                            "Thank you for your review!".to_string()
                        } else {
                            body.message
                        });
                        set_name.set(String::new());
                        set_company.set(String::new());
                        set_rating.set(5);
                        set_comment.set(String::new());
                        // The write may not be visible to an immediate read,
                        // so give the store a moment before refreshing
                        TimeoutFuture::new(500).await;
                        fetch_reviews();
                    } else {
                        set_status.set(SubmitStatus::Error);
                        set_response_message.set(if body.error.is_empty() {
                            "Failed to submit review. Please try again.".to_string()
                        } else {
                            body.error
                        });
                    }
                }
                Err(e) => {
                    log!("[REVIEWS] Submission failed: {}", e);
                    set_status.set(SubmitStatus::Error);
                    set_response_message
                        .set("Failed to submit review. Please try again.".to_string());
                }
            }

            TimeoutFuture::new(5_000).await;
            set_status.set(SubmitStatus::Idle);
            set_response_message.set(String::new());
        });
    };

    view! {
        <section id="reviews" class="reviews-section">
            <h2>{ "Client Reviews" }</h2>
            <p class="section-subtitle">{ "What our clients say about us" }</p>

            <div class="reviews-grid">
                <div class="reviews-list">
                    <h3>{ "Recent Reviews" }</h3>
                    {move || {
                        let all = reviews.get();
                        if all.is_empty() {
                            view! {
                                <p class="no-reviews">
                                    { "No reviews yet. Be the first to leave a review!" }
                                </p>
                            }
                            .into_view()
                        } else {
                            all.iter()
                                .take(visible_count.get())
                                .map(|review| {
                                    view! {
                                        <div class="review-card">
                                            <div class="review-header">
                                                <strong>{ review.name.clone() }</strong>
                                                {(!review.company.is_empty()).then(|| view! {
                                                    <span class="review-company">
                                                        { review.company.clone() }
                                                    </span>
                                                })}
                                                <span class="review-stars">
                                                    { star_row(review.rating) }
                                                </span>
                                            </div>
                                            <p class="review-comment">{ review.comment.clone() }</p>
                                            <p class="review-date">
                                                { review.date.format("%b %e, %Y").to_string() }
                                            </p>
                                        </div>
                                    }
                                })
                                .collect::<Vec<_>>()
                                .into_view()
                        }
                    }}
                    {move || {
                        let total = reviews.get().len();
                        (visible_count.get() < total).then(|| view! {
                            <button
                                class="load-more"
                                on:click=move |_| {
                                    set_visible_count.update(|c| *c = (*c + PAGE_SIZE).min(total))
                                }
                            >
                                { "Load More" }
                            </button>
                        })
                    }}
                </div>

                <form class="review-form" on:submit=submit_review>
                    <h3>{ "Leave a Review" }</h3>
                    <label for="review-name">{ "Your Name *" }</label>
                    <input
                        type="text"
                        id="review-name"
                        placeholder="John Doe"
                        prop:value=move || name.get()
                        on:input=move |e| set_name.set(event_target_value(&e))
                    />
                    <label for="review-company">{ "Company (Optional)" }</label>
                    <input
                        type="text"
                        id="review-company"
                        placeholder="Your Company"
                        prop:value=move || company.get()
                        on:input=move |e| set_company.set(event_target_value(&e))
                    />
                    <label>{ "Rating *" }</label>
                    <div class="star-picker">
                        {(1..=5u8).map(|star| view! {
                            <button
                                type="button"
                                class="star"
                                class:filled=move || { rating.get() >= star }
                                on:click=move |_| set_rating.set(star)
                            >
                                {move || if rating.get() >= star { "★" } else { "☆" }}
                            </button>
                        }).collect::<Vec<_>>()}
                    </div>
                    <label for="review-comment">{ "Your Review *" }</label>
                    <textarea
                        id="review-comment"
                        placeholder="Share your experience with Devera..."
                        prop:value=move || comment.get()
                        on:input=move |e| set_comment.set(event_target_value(&e))
                    />
                    {move || {
                        let message = response_message.get();
                        (!message.is_empty()).then(|| view! {
                            <p class:success=move || status.get() == SubmitStatus::Success
                               class:error=move || status.get() == SubmitStatus::Error>
                                { message.clone() }
                            </p>
                        })
                    }}
                    <button type="submit" disabled=move || status.get() == SubmitStatus::Loading>
                        {move || if status.get() == SubmitStatus::Loading {
                            "Submitting..."
                        } else {
                            "Submit Review"
                        }}
                    </button>
                </form>
            </div>
        </section>
    }
}
