use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SpiderError>;

/// Every way a pipeline stage can fail.
#[derive(Debug, Error)]
pub enum SpiderError {
    /// File system failure (open, create, read, write, remove).
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV row could not be decoded against the expected headers.
    #[error("failed to parse csv {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to (de)serialize json {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to build http client: {source}")]
    Client {
        #[source]
        source: reqwest::Error,
    },

    /// Transport failure: connection refused, reset, truncated body.
    #[error("network error fetching {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered, but not with a success status.
    #[error("{url} responded with status {status}")]
    Http {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Malformed gzip or tar input.
    #[error("failed to extract archive {path}: {source}")]
    Extract {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no file named {name} found under {dir}")]
    MissingFile { dir: PathBuf, name: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The store rejected a batch insert; earlier batches stay committed.
    #[error("batch {batch} insert into {table} rejected: {source}")]
    Insert {
        table: &'static str,
        batch: usize,
        #[source]
        source: sqlx::Error,
    },

    /// Strict scrape runs fail when any company could not be fetched.
    #[error("{failed} of {total} company pages could not be scraped")]
    Incomplete { failed: usize, total: usize },

    #[error("worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("invalid progress bar template: {0}")]
    Template(#[from] indicatif::style::TemplateError),
}

impl SpiderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SpiderError::Io {
            path: path.into(),
            source,
        }
    }
}
