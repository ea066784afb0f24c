#[cfg(feature = "ssr")]
mod email_impl {
    use crate::errors::EmailError;
    use crate::models::review::Review;
    use leptos::logging;
    use leptos::logging::log;
    use serde_json::json;

    const DEFAULT_API_BASE: &str = "https://api.resend.com";
    const FROM_ADDRESS: &str = "Devera <onboarding@resend.dev>";

    /// Sends admin notification emails through the Resend HTTP API. Callers on
    /// the review path ignore failures; the contact path checks
    /// `is_configured` upfront and returns a configuration error without it.
    #[derive(Debug, Clone)]
    pub struct Notifier {
        client: reqwest::Client,
        api_key: Option<String>,
        api_base: String,
    }

    impl Notifier {
        pub fn new(api_key: Option<String>) -> Self {
            Notifier {
                client: reqwest::Client::new(),
                api_key,
                api_base: DEFAULT_API_BASE.to_string(),
            }
        }

        /// Point the notifier at a different provider endpoint (used in tests).
        pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
            self.api_base = api_base.into();
            self
        }

        pub fn is_configured(&self) -> bool {
            self.api_key.is_some()
        }

        pub async fn send(
            &self,
            to: &str,
            subject: &str,
            html: &str,
            reply_to: Option<&str>,
        ) -> Result<(), EmailError> {
            let api_key = self.api_key.as_deref().ok_or(EmailError::MissingApiKey)?;

            let mut payload = json!({
                "from": FROM_ADDRESS,
                "to": [to],
                "subject": subject,
                "html": html,
            });
            if let Some(reply_to) = reply_to {
                payload["reply_to"] = json!(reply_to);
            }

            let response = self
                .client
                .post(format!("{}/emails", self.api_base))
                .bearer_auth(api_key)
                .json(&payload)
                .send()
                .await?;

            if !response.status().is_success() {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                logging::error!("[EMAIL] Provider returned {}: {}", status, body);
                return Err(EmailError::Provider { status, body });
            }

            log!("[EMAIL] Sent '{}' to {}", subject, to);
            Ok(())
        }
    }

    // Admin notification for a new review: star row, reviewer, quoted comment
    // and a dashboard link. Sent to a fixed admin address, so fields go in
    // unescaped just like the rest of the message.
    pub fn review_notification_html(review: &Review, site_url: &str) -> String {
        let stars = "★".repeat(review.rating as usize) + &"☆".repeat(5 - review.rating as usize);
        let company = if review.company.is_empty() {
            String::new()
        } else {
            format!(
                r#"<span style="color: #6B7280; margin-left: 10px;">({})</span>"#,
                review.company
            )
        };
        format!(
            r#"<div style="font-family: Arial, sans-serif; line-height: 1.6; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #4F46E5;">⭐ New Review Received</h2>
  <div style="background: #F9FAFB; padding: 20px; border-radius: 8px; margin: 20px 0;">
    <div style="display: flex; align-items: center; margin-bottom: 10px;">
      <div style="font-size: 24px; color: #F59E0B; margin-right: 10px;">{stars}</div>
      <span style="font-weight: 600;">{name}</span>
      {company}
    </div>
    <div style="padding: 10px 0; border-top: 1px solid #E5E7EB; margin: 10px 0;">
      <p style="font-style: italic; color: #4B5563;">"{comment}"</p>
    </div>
    <div style="font-size: 12px; color: #9CA3AF; text-align: right;">{date}</div>
  </div>
  <div style="margin-top: 30px; padding-top: 20px; border-top: 1px solid #E5E7EB;">
    <p>View all reviews in your dashboard or moderate this review.</p>
    <a href="{site_url}/dashboard/reviews"
       style="display: inline-block; padding: 8px 16px; background-color: #4F46E5; color: white; text-decoration: none; border-radius: 6px; margin-top: 10px;">
      View Dashboard
    </a>
  </div>
</div>"#,
            stars = stars,
            name = review.name,
            company = company,
            comment = review.comment,
            date = review.date.format("%Y-%m-%d %H:%M:%S UTC"),
            site_url = site_url,
        )
    }

    // Admin notification for a contact-form submission, with a mailto link so
    // replying is one click.
    pub fn contact_notification_html(name: &str, email: &str, message: &str) -> String {
        format!(
            r#"<div style="font-family: Arial, sans-serif; line-height: 1.6;">
  <h2>New Contact Form Submission</h2>
  <p><strong>Name:</strong> {name}</p>
  <p><strong>Email:</strong> <a href="mailto:{email}">{email}</a></p>
  <p><strong>Message:</strong></p>
  <div style="background: #f5f5f5; padding: 15px; border-radius: 5px; margin: 10px 0;">{message}</div>
  <hr style="border: 0; border-top: 1px solid #eee; margin: 20px 0;">
  <p style="color: #666; font-size: 0.9em;">Sent from the Devera website</p>
</div>"#,
            name = name,
            email = email,
            message = message.replace('\n', "<br>"),
        )
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::Utc;

        fn sample_review(rating: u8, company: &str) -> Review {
            Review {
                id: "abc".into(),
                name: "Alice".into(),
                rating,
                comment: "Great work".into(),
                company: company.into(),
                date: Utc::now(),
            }
        }

        #[tokio::test]
        async fn test_send_without_api_key_fails_fast() {
            let notifier = Notifier::new(None);
            assert!(!notifier.is_configured());
            let result = notifier.send("admin@example.com", "s", "<p>x</p>", None).await;
            assert!(matches!(result, Err(EmailError::MissingApiKey)));
        }

        #[test]
        fn test_review_html_renders_star_row() {
            let html = review_notification_html(&sample_review(4, ""), "https://devera.agency");
            assert!(html.contains("★★★★☆"));
            assert!(html.contains("Alice"));
            assert!(html.contains("\"Great work\""));
            assert!(html.contains("https://devera.agency/dashboard/reviews"));
        }

        #[test]
        fn test_review_html_omits_empty_company() {
            let with = review_notification_html(&sample_review(5, "Acme"), "");
            let without = review_notification_html(&sample_review(5, ""), "");
            assert!(with.contains("(Acme)"));
            assert!(!without.contains("()"));
        }

        #[test]
        fn test_contact_html_breaks_newlines() {
            let html = contact_notification_html("Bob", "bob@example.com", "line one\nline two");
            assert!(html.contains("line one<br>line two"));
            assert!(html.contains("mailto:bob@example.com"));
        }
    }
}

#[cfg(feature = "ssr")]
pub use email_impl::{contact_notification_html, review_notification_html, Notifier};
