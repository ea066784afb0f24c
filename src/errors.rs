#[cfg(feature = "ssr")]
mod errors_impl {
    use thiserror::Error;

    /// Failures of the review persistence layer. Write-path callers map these
    /// to a 500; the read path logs and degrades to an empty list instead.
    #[derive(Debug, Error)]
    pub enum StoreError {
        #[error("review store is unavailable: {0}")]
        Unavailable(String),
        #[error("database error: {0}")]
        Database(#[from] rusqlite::Error),
        #[error("store file error: {0}")]
        Io(#[from] std::io::Error),
        #[error("store file is corrupt: {0}")]
        Corrupt(#[from] serde_json::Error),
    }

    /// Failures of the email notifier. Never surfaced to review submitters;
    /// the contact path maps them to a generic 500.
    #[derive(Debug, Error)]
    pub enum EmailError {
        #[error("email provider API key is not configured")]
        MissingApiKey,
        #[error("email request failed: {0}")]
        Transport(#[from] reqwest::Error),
        #[error("email provider rejected the message ({status}): {body}")]
        Provider { status: u16, body: String },
    }
}

#[cfg(feature = "ssr")]
pub use errors_impl::{EmailError, StoreError};
