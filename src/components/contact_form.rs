/// Contact form: posts name/email/message to the contact endpoint and shows
/// the server's response, with the same minimum-loading and auto-reset
/// behavior as the reviews widget.
use leptos::*;
use leptos::logging::log;
use leptos_dom::ev::SubmitEvent;
use futures::future;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde::{Deserialize, Serialize};
use wasm_bindgen_futures::spawn_local;

#[derive(Serialize, Clone, Debug)]
struct ContactPayload {
    name: String,
    email: String,
    message: String,
}

#[derive(Deserialize, Clone, Debug, Default)]
struct ContactResponse {
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

#[component]
pub fn ContactForm() -> impl IntoView {
    let (name, set_name) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (message, set_message) = create_signal(String::new());
    let (status, set_status) = create_signal(SubmitStatus::Idle);
    let (response_message, set_response_message) = create_signal(String::new());

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        set_status.set(SubmitStatus::Loading);
        set_response_message.set(String::new());

        let payload = ContactPayload {
            name: name.get(),
            email: email.get(),
            message: message.get(),
        };

        spawn_local(async move {
            // Minimum one second of perceived loading
            let delay = TimeoutFuture::new(1_000);
            let sent = match Request::post("/api/contact").json(&payload) {
                Ok(request) => {
                    let (result, _) = future::join(request.send(), delay).await;
                    result
                }
                Err(e) => Err(e),
            };

            match sent {
                Ok(response) => {
                    let ok = response.ok();
                    let body = response.json::<ContactResponse>().await.unwrap_or_default();
                    if ok {
                        set_status.set(SubmitStatus::Success);
                        set_response_message.set(body.message);
                        set_name.set(String::new());
                        set_email.set(String::new());
                        set_message.set(String::new());
                    } else {
                        set_status.set(SubmitStatus::Error);
                        set_response_message.set(if body.error.is_empty() {
                            "Something went wrong".to_string()
                        } else {
                            body.error
                        });
                    }
                }
                Err(e) => {
                    log!("[CONTACT] Request failed: {}", e);
                    set_status.set(SubmitStatus::Error);
                    set_response_message
                        .set("Failed to send message. Please try again.".to_string());
                }
            }

            TimeoutFuture::new(5_000).await;
            set_status.set(SubmitStatus::Idle);
            set_response_message.set(String::new());
        });
    };

    view! {
        <section id="contact" class="contact-section">
            <h2>{ "Get In Touch" }</h2>
            <p class="section-subtitle">{ "Let's discuss your next project" }</p>

            <form class="contact-form" on:submit=handle_submit>
                <label for="contact-name">{ "Your Name" }</label>
                <input
                    type="text"
                    id="contact-name"
                    placeholder="John Doe"
                    required=true
                    prop:value=move || name.get()
                    on:input=move |e| set_name.set(event_target_value(&e))
                />
                <label for="contact-email">{ "Email Address" }</label>
                <input
                    type="email"
                    id="contact-email"
                    placeholder="john@example.com"
                    required=true
                    prop:value=move || email.get()
                    on:input=move |e| set_email.set(event_target_value(&e))
                />
                <label for="contact-message">{ "Message" }</label>
                <textarea
                    id="contact-message"
                    placeholder="Tell us about your project..."
                    required=true
                    prop:value=move || message.get()
                    on:input=move |e| set_message.set(event_target_value(&e))
                />
                {move || {
                    let msg = response_message.get();
                    (!msg.is_empty()).then(|| view! {
                        <p class:success=move || status.get() == SubmitStatus::Success
                           class:error=move || status.get() == SubmitStatus::Error>
                            { msg.clone() }
                        </p>
                    })
                }}
                <button type="submit" disabled=move || status.get() == SubmitStatus::Loading>
                    {move || if status.get() == SubmitStatus::Loading {
                        "Sending..."
                    } else {
                        "Send Message"
                    }}
                </button>
            </form>
        </section>
    }
}
