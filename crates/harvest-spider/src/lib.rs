/// Company profile scraping: CSV of company pages in, JSON of extracted profiles out.
pub mod companies;

/// Runtime settings for both pipelines, read from the environment (`.env`) with fixed defaults.
pub mod config;

/// Dump loading: download an archive, extract it, and bulk-load its CSVs into SQLite.
pub mod dump;

pub mod error;
pub mod fs;

pub(crate) mod tui;

pub use error::{Result, SpiderError};

/// Shortcut for required API elements.
pub mod http {
    pub use dotenv::var;
    pub use reqwest::Client as HttpClient;
    pub use sqlx::SqliteConnection as DbConn;
}

/// Build the standard HTTP client, identifying with `USER_AGENT` when it is set.
pub fn std_client_build() -> Result<http::HttpClient> {
    let user_agent = http::var("USER_AGENT")
        .unwrap_or_else(|_| format!("harvest/{}", env!("CARGO_PKG_VERSION")));
    let client = reqwest::ClientBuilder::new()
        .user_agent(user_agent)
        .build()
        .map_err(|source| SpiderError::Client { source })?;
    Ok(client)
}

/// Format the time elapsed since `time` for log lines.
pub(crate) fn time_elapsed(time: std::time::Instant) -> String {
    format!("time elapsed: {:.2?}", time.elapsed())
}
