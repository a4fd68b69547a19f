use crate::cli::{CompaniesArgs, DumpArgs, Pipeline};
use harvest_spider as spider;
use harvest_spider::config::{CompaniesConfig, DumpConfig};
use std::path::PathBuf;
use tracing::{error, info};

/// Environment defaults, overridden by any CLI flags.
pub(crate) fn companies_config(args: CompaniesArgs) -> CompaniesConfig {
    let config = CompaniesConfig::from_env();
    CompaniesConfig {
        input: args.input.unwrap_or(config.input),
        output: args.output.unwrap_or(config.output),
        workers: args.workers.filter(|w| *w > 0).unwrap_or(config.workers),
        strict: args.strict || config.strict,
    }
}

/// Environment defaults, overridden by any CLI flags.
pub(crate) fn dump_config(args: DumpArgs) -> DumpConfig {
    let config = DumpConfig::from_env();
    DumpConfig {
        url: args.url.unwrap_or(config.url),
        work_dir: args.dir.unwrap_or(config.work_dir),
        database: args.database.unwrap_or(config.database),
    }
}

/// Run each pipeline in turn. A failing pipeline is logged and the next one still runs.
pub(crate) async fn run(
    pipelines: Vec<Pipeline>,
    companies: CompaniesConfig,
    dump: DumpConfig,
    tui: bool,
) {
    let time = std::time::Instant::now();
    for pipeline in pipelines {
        match pipeline {
            Pipeline::Companies => run_companies(&companies, tui).await,
            Pipeline::Dump => run_dump(&dump, tui).await,
        }
    }

    info!("harvest finished, time elapsed: {:?}", time.elapsed());
}

pub(crate) async fn run_companies(config: &CompaniesConfig, tui: bool) {
    let time = std::time::Instant::now();
    match spider::companies::scrape(config, tui).await {
        Ok(report) => info!(
            "companies collected ({} profiles, {} failed), time elapsed: {:?}",
            report.profiles.len(),
            report.failed.len(),
            time.elapsed()
        ),
        Err(err) => report_failure("companies pipeline failed", &err, tui),
    }
}

pub(crate) async fn run_dump(config: &DumpConfig, tui: bool) {
    let time = std::time::Instant::now();
    match spider::dump::scrape(config, tui).await {
        Ok(report) => info!(
            "dump loaded ({} organizations, {} customers), time elapsed: {:?}",
            report.organizations.rows,
            report.customers.rows,
            time.elapsed()
        ),
        Err(err) => report_failure("dump pipeline failed", &err, tui),
    }
}

pub(crate) async fn run_migrate(database: Option<PathBuf>, tui: bool) {
    let database = database.unwrap_or(DumpConfig::from_env().database);
    match spider::dump::schema::recreate(&database).await {
        Ok(()) => info!("tables recreated in {}", database.display()),
        Err(err) => report_failure("migration failed", &err, tui),
    }
}

// without a tracing subscriber (tui mode) errors still reach stderr
fn report_failure(context: &str, err: &spider::SpiderError, tui: bool) {
    error!("{context}: {err}");
    if tui {
        eprintln!("{context}: {err}");
    }
}
