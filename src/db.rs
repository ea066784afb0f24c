#[cfg(feature = "ssr")]
mod db_impl {
    use crate::errors::StoreError;
    use crate::models::review::{NewReview, Review};
    use async_trait::async_trait;
    use chrono::{DateTime, SecondsFormat, Utc};
    use leptos::logging;
    use leptos::logging::log;
    use rusqlite::Connection;
    use std::fs;
    use std::io::ErrorKind;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tokio::sync::Mutex;


    /// Persistence contract for reviews. `list` never errors: review display is
    /// non-critical, so read failures are logged and degrade to an empty list.
    /// `create` durably persists one record before returning.
    #[async_trait]
    pub trait ReviewStore: Send + Sync {
        async fn list(&self) -> Vec<Review>;
        async fn create(&self, input: NewReview) -> Result<Review, StoreError>;
    }

    // Trim fields, default a blank name, clamp the rating and stamp the date.
    fn normalize(input: NewReview, id: String) -> Review {
        let name = input.name.trim().to_string();
        Review {
            id,
            name: if name.is_empty() {
                "Anonymous".to_string()
            } else {
                name
            },
            rating: input.rating.clamp(1, 5),
            comment: input.comment.trim().to_string(),
            company: input.company.trim().to_string(),
            date: Utc::now(),
        }
    }

    fn parse_stored_date(raw: &str) -> DateTime<Utc> {
        match DateTime::parse_from_rfc3339(raw) {
            Ok(date) => date.with_timezone(&Utc),
            Err(e) => {
                logging::warn!("[STORE] Unparseable review date '{}': {}", raw, e);
                Utc::now()
            }
        }
    }

    /// SQLite-backed review store, the default backend.
    #[derive(Debug)]
    pub struct SqliteReviewStore {
        conn: Arc<Mutex<Connection>>,
    }

    impl SqliteReviewStore {
        // Open (or create) the database file
        pub fn new(db_path: &str) -> Result<Self, StoreError> {
            let conn = Connection::open(db_path)?;
            logging::log!("[STORE] Database connection established at: {}", db_path);
            Ok(SqliteReviewStore {
                conn: Arc::new(Mutex::new(conn)),
            })
        }

        // Create the reviews table if it is not there yet
        pub async fn create_schema(&self) -> Result<(), StoreError> {
            let conn = self.conn.lock().await;
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS reviews (
                    id TEXT PRIMARY KEY,
                    name TEXT NOT NULL,
                    rating INTEGER NOT NULL,
                    comment TEXT NOT NULL,
                    company TEXT NOT NULL DEFAULT '',
                    date TEXT NOT NULL
                );",
            )?;
            Ok(())
        }

        async fn query_all(&self) -> Result<Vec<Review>, StoreError> {
            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(
                "SELECT id, name, rating, comment, company, date
                 FROM reviews
                 ORDER BY date DESC, rowid DESC",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, u8>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                ))
            })?;

            let mut reviews = Vec::new();
            for row in rows {
                let (id, name, rating, comment, company, date) = row?;
                reviews.push(Review {
                    id,
                    name,
                    rating,
                    comment,
                    company,
                    date: parse_stored_date(&date),
                });
            }
            Ok(reviews)
        }
    }

    #[async_trait]
    impl ReviewStore for SqliteReviewStore {
        async fn list(&self) -> Vec<Review> {
            match self.query_all().await {
                Ok(reviews) => {
                    log!("[STORE] Fetched {} reviews", reviews.len());
                    reviews
                }
                Err(e) => {
                    logging::error!("[STORE] Failed to read reviews: {}", e);
                    Vec::new()
                }
            }
        }

        async fn create(&self, input: NewReview) -> Result<Review, StoreError> {
            let review = normalize(input, uuid::Uuid::new_v4().to_string());
            let conn = self.conn.lock().await;
            conn.execute(
                "INSERT INTO reviews (id, name, rating, comment, company, date)
                 VALUES (?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    review.id,
                    review.name,
                    review.rating,
                    review.comment,
                    review.company,
                    // fixed-width UTC so lexicographic order matches time order
                    review.date.to_rfc3339_opts(SecondsFormat::Micros, true),
                ],
            )?;
            log!("[STORE] Saved review {} from '{}'", review.id, review.name);
            Ok(review)
        }
    }

    /// File-backed review store: one JSON array, newest entry first, rewritten
    /// in full on every write. Writes serialize behind an async mutex and land
    /// via a temp file plus rename, so readers never see a torn file.
    #[derive(Debug)]
    pub struct FileReviewStore {
        path: PathBuf,
        lock: Mutex<()>,
    }

    impl FileReviewStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            let path = path.into();
            logging::log!("[STORE] Using review file at: {}", path.display());
            FileReviewStore {
                path,
                lock: Mutex::new(()),
            }
        }

        fn read_all(&self) -> Result<Vec<Review>, StoreError> {
            match fs::read_to_string(&self.path) {
                Ok(contents) => Ok(serde_json::from_str(&contents)?),
                // No file yet is just an empty store
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
                Err(e) => Err(e.into()),
            }
        }

        fn write_all(&self, reviews: &[Review]) -> Result<(), StoreError> {
            if let Some(dir) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(dir).map_err(|e| {
                    StoreError::Unavailable(format!("{}: {}", dir.display(), e))
                })?;
            }
            let tmp = self.path.with_extension("json.tmp");
            fs::write(&tmp, serde_json::to_string_pretty(reviews)?)?;
            fs::rename(&tmp, &self.path)?;
            Ok(())
        }
    }

    #[async_trait]
    impl ReviewStore for FileReviewStore {
        async fn list(&self) -> Vec<Review> {
            let _guard = self.lock.lock().await;
            match self.read_all() {
                Ok(reviews) => reviews,
                Err(e) => {
                    logging::error!("[STORE] Failed to read review file: {}", e);
                    Vec::new()
                }
            }
        }

        async fn create(&self, input: NewReview) -> Result<Review, StoreError> {
            let _guard = self.lock.lock().await;
            let mut reviews = self.read_all()?;

            // Timestamp-derived ID, bumped until free so bursts stay unique
            let mut id = Utc::now().timestamp_millis();
            while reviews.iter().any(|r| r.id == id.to_string()) {
                id += 1;
            }

            let review = normalize(input, id.to_string());
            reviews.insert(0, review.clone());
            self.write_all(&reviews)?;
            log!("[STORE] Saved review {} from '{}'", review.id, review.name);
            Ok(review)
        }
    }
}

#[cfg(feature = "ssr")]
pub use db_impl::{FileReviewStore, ReviewStore, SqliteReviewStore};
