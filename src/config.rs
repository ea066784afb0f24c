#[cfg(feature = "ssr")]
mod config_impl {
    use leptos::logging::log;

    /// Which review store backend to run against, chosen once at startup.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum StoreBackend {
        Sqlite,
        File,
    }

    /// Environment-driven configuration, built once in `main` and handed to
    /// every worker through `web::Data`.
    #[derive(Debug, Clone)]
    pub struct SiteConfig {
        pub store_backend: StoreBackend,
        pub database_path: String,
        pub reviews_file: String,
        pub resend_api_key: Option<String>,
        pub admin_email: String,
        pub site_url: String,
    }

    impl SiteConfig {
        pub fn from_env() -> Self {
            let store_backend = match std::env::var("REVIEW_STORE").as_deref() {
                Ok("file") => StoreBackend::File,
                _ => StoreBackend::Sqlite,
            };
            let resend_api_key = std::env::var("RESEND_API_KEY").ok().filter(|k| !k.is_empty());
            let config = SiteConfig {
                store_backend,
                database_path: std::env::var("DATABASE_PATH")
                    .unwrap_or_else(|_| "devera.db".to_string()),
                reviews_file: std::env::var("REVIEWS_FILE")
                    .unwrap_or_else(|_| "data/reviews.json".to_string()),
                resend_api_key,
                admin_email: std::env::var("ADMIN_EMAIL")
                    .unwrap_or_else(|_| "hello@devera.agency".to_string()),
                site_url: std::env::var("SITE_URL")
                    .unwrap_or_else(|_| "http://127.0.0.1:3004".to_string()),
            };
            log!(
                "[CONFIG] store: {:?}, email configured: {}",
                config.store_backend,
                config.resend_api_key.is_some()
            );
            config
        }
    }
}

#[cfg(feature = "ssr")]
pub use config_impl::{SiteConfig, StoreBackend};
