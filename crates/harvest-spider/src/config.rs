use crate::http::var;
use std::path::PathBuf;

const COMPANIES_CSV: &str = "./data/companies.csv";
const COMPANIES_JSON: &str = "./output/companies.json";

const DUMP_URL: &str = "https://example.com/dumps/dump.tar.gz";
const DUMP_DIR: &str = "./buffer/dump";
const DUMP_DATABASE: &str = "./buffer/dump.db";

/// Settings for the company scrape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompaniesConfig {
    /// CSV with `Company Name` and `YC URL` columns.
    pub input: PathBuf,

    /// Destination of the pretty-printed JSON array.
    pub output: PathBuf,

    /// Number of concurrent page fetches.
    pub workers: usize,

    /// Fail the run (and write nothing) if any page could not be fetched.
    pub strict: bool,
}

impl Default for CompaniesConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(COMPANIES_CSV),
            output: PathBuf::from(COMPANIES_JSON),
            workers: num_cpus::get(),
            strict: false,
        }
    }
}

impl CompaniesConfig {
    /// Defaults, overridden by `COMPANIES_CSV`, `COMPANIES_JSON` and `SCRAPE_WORKERS`.
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            input: var("COMPANIES_CSV").map(PathBuf::from).unwrap_or(default.input),
            output: var("COMPANIES_JSON")
                .map(PathBuf::from)
                .unwrap_or(default.output),
            workers: var("SCRAPE_WORKERS")
                .ok()
                .and_then(|workers| workers.parse::<usize>().ok())
                .filter(|workers| *workers > 0)
                .unwrap_or(default.workers),
            strict: default.strict,
        }
    }
}

/// Settings for the dump download & load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DumpConfig {
    pub url: String,

    /// Holds the downloaded archive and its extracted contents.
    pub work_dir: PathBuf,

    /// SQLite database file.
    pub database: PathBuf,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            url: DUMP_URL.to_string(),
            work_dir: PathBuf::from(DUMP_DIR),
            database: PathBuf::from(DUMP_DATABASE),
        }
    }
}

impl DumpConfig {
    /// Defaults, overridden by `DUMP_URL`, `DUMP_DIR` and `DUMP_DATABASE`.
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            url: var("DUMP_URL").unwrap_or(default.url),
            work_dir: var("DUMP_DIR").map(PathBuf::from).unwrap_or(default.work_dir),
            database: var("DUMP_DATABASE")
                .map(PathBuf::from)
                .unwrap_or(default.database),
        }
    }

    pub fn archive_path(&self) -> PathBuf {
        self.work_dir.join("dump.tar.gz")
    }

    pub fn extract_dir(&self) -> PathBuf {
        self.work_dir.join("extracted")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dump_paths_live_under_work_dir() {
        let config = DumpConfig {
            work_dir: PathBuf::from("/tmp/harvest"),
            ..DumpConfig::default()
        };
        assert_eq!(config.archive_path(), PathBuf::from("/tmp/harvest/dump.tar.gz"));
        assert_eq!(config.extract_dir(), PathBuf::from("/tmp/harvest/extracted"));
    }

    #[test]
    fn default_workers_is_never_zero() {
        assert!(CompaniesConfig::default().workers > 0);
    }
}
