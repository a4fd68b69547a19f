mod sql;

pub mod loader;
pub mod records;
pub mod schema;

pub use loader::{load_csv, LoadReport, Table, BATCH_SIZE};
pub use records::{CustomerRecord, OrganizationRecord};
pub use schema::{connect, migrate, recreate, Migration, RECREATE_TABLES};

use crate::config::DumpConfig;
use crate::fs::{download_file, extract_tar_gz, find_file};
use crate::http::*;
use crate::{tui, Result};
use sqlx::Connection;
use tracing::{debug, error, info};

// 1. download the archive
// 2. extract it
// 3. recreate the tables
// 4. load organizations.csv, then customers.csv

const ORGANIZATIONS_CSV: &str = "organizations.csv";
const CUSTOMERS_CSV: &str = "customers.csv";

/// Outcome of a dump load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DumpReport {
    pub bytes: u64,
    pub entries: usize,
    pub organizations: LoadReport,
    pub customers: LoadReport,
}

/// Download, extract and load the dump described by `config`.
pub async fn scrape(config: &DumpConfig, tui: bool) -> Result<DumpReport> {
    let http_client = crate::std_client_build()?;
    scrape_with(&http_client, config, tui).await
}

/// [`scrape`] with a caller-supplied HTTP client.
pub async fn scrape_with(
    http_client: &HttpClient,
    config: &DumpConfig,
    tui: bool,
) -> Result<DumpReport> {
    let time = std::time::Instant::now();
    let archive = config.archive_path();
    let extract_dir = config.extract_dir();

    tui::banner("dump", tui);
    debug!("downloading {}", config.url);
    let bytes = download_file(http_client, &config.url, &archive, tui)
        .await
        .map_err(|err| {
            error!("failed to download {}: {err}", config.url);
            err
        })?;

    debug!("extracting {}", archive.display());
    let entries = extract_tar_gz(&archive, &extract_dir, tui)
        .await
        .map_err(|err| {
            error!("failed to extract {}: {err}", archive.display());
            err
        })?;

    let organizations_csv = find_file(&extract_dir, ORGANIZATIONS_CSV)?;
    let customers_csv = find_file(&extract_dir, CUSTOMERS_CSV)?;

    // one connection for both tables, closed whatever the outcome
    let mut conn = connect(&config.database).await?;
    let loaded = async {
        migrate(&mut conn, &RECREATE_TABLES).await?;
        let organizations =
            load_csv::<OrganizationRecord>(&mut conn, &organizations_csv, tui).await?;
        let customers = load_csv::<CustomerRecord>(&mut conn, &customers_csv, tui).await?;
        Ok::<_, crate::SpiderError>((organizations, customers))
    }
    .await;
    let closed = conn.close().await;
    let (organizations, customers) = loaded?;
    closed?;

    info!(
        "dump loaded into {}, {}",
        config.database.display(),
        crate::time_elapsed(time)
    );

    if tui {
        println!("dump loaded\n");
    }

    Ok(DumpReport {
        bytes,
        entries,
        organizations,
        customers,
    })
}
