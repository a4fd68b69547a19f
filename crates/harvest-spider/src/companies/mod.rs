mod page;
mod pool;
mod source;

pub use page::{
    extract_profile, fetch_profile, CompanyProfile, FounderRef, JobListing, NOT_AVAILABLE,
};
pub use pool::run_ordered;
pub use source::{read_companies, CompanyRef};

use crate::config::CompaniesConfig;
use crate::http::*;
use crate::{fs, tui, Result, SpiderError};
use tracing::{debug, error, info, warn};

/// Outcome of a company scrape.
#[derive(Debug)]
pub struct ScrapeReport {
    /// One profile per input row, in input order (as written to the output file).
    pub profiles: Vec<CompanyProfile>,

    /// Companies whose page could not be fetched, with the reason.
    pub failed: Vec<(CompanyRef, SpiderError)>,
}

/// Scrape every company listed in `config.input` and write the profiles to `config.output`.
pub async fn scrape(config: &CompaniesConfig, tui: bool) -> Result<ScrapeReport> {
    let http_client = crate::std_client_build()?;
    scrape_with(&http_client, config, tui).await
}

/// [`scrape`] with a caller-supplied HTTP client.
///
/// Fetches run on a pool of `config.workers` tasks. A company that cannot be fetched is logged
/// and written as [`CompanyProfile::unavailable`], unless `config.strict` is set, in which case
/// the run fails with [`SpiderError::Incomplete`] once every fetch has settled and nothing is
/// written.
pub async fn scrape_with(
    http_client: &HttpClient,
    config: &CompaniesConfig,
    tui: bool,
) -> Result<ScrapeReport> {
    let time = std::time::Instant::now();
    tui::banner("companies", tui);

    let companies = source::read_companies(&config.input)?;
    let total = companies.len();
    info!(
        "scraping {total} company pages with {} workers ...",
        config.workers
    );

    let progress = tui::multi_progress(total, tui)?;
    let client = http_client.clone();
    let outcomes = run_ordered(
        companies,
        config.workers,
        move |company: CompanyRef| {
            let client = client.clone();
            async move {
                let outcome = fetch_profile(&client, &company).await;
                (company, outcome)
            }
        },
        |(company, outcome): &(CompanyRef, Result<CompanyProfile>)| {
            progress.total.inc(1);
            match outcome {
                Ok(_) => {
                    debug!("profile of {} collected", company.name);
                    progress.success.inc(1);
                }
                Err(_) => progress.fails.inc(1),
            }
        },
    )
    .await?;
    progress.finish();

    let mut profiles = Vec::with_capacity(total);
    let mut failed = vec![];
    for (company, outcome) in outcomes {
        match outcome {
            Ok(profile) => profiles.push(profile),
            Err(err) => {
                warn!("no profile for {} ({}), error({err})", company.name, company.url);
                profiles.push(CompanyProfile::unavailable(&company));
                failed.push((company, err));
            }
        }
    }

    if config.strict && !failed.is_empty() {
        error!(
            "{} of {total} company pages failed; nothing written to {}",
            failed.len(),
            config.output.display()
        );
        return Err(SpiderError::Incomplete {
            failed: failed.len(),
            total,
        });
    }

    fs::write_json(&config.output, &profiles).await?;
    info!(
        "{} profiles written to {} ({} failed), {}",
        profiles.len(),
        config.output.display(),
        failed.len(),
        crate::time_elapsed(time)
    );

    if tui {
        println!("collecting companies ... done\n");
    }

    Ok(ScrapeReport { profiles, failed })
}
