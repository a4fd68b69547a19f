use crate::{Result, SpiderError};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, error};

/// A company to scrape, as listed in the input CSV.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct CompanyRef {
    #[serde(rename = "Company Name")]
    pub name: String,

    #[serde(rename = "YC URL")]
    pub url: String,
}

/// Read every `CompanyRef` from the CSV at `path`, in file order.
///
/// The header row must name `Company Name` and `YC URL`; other columns are ignored and field
/// contents are taken as-is.
pub fn read_companies(path: &Path) -> Result<Vec<CompanyRef>> {
    let file = std::fs::File::open(path).map_err(|err| {
        error!("failed to open {}, error({err})", path.display());
        SpiderError::io(path, err)
    })?;

    let companies = csv::Reader::from_reader(file)
        .deserialize()
        .collect::<std::result::Result<Vec<CompanyRef>, csv::Error>>()
        .map_err(|source| {
            error!("failed to parse {}, error({source})", path.display());
            SpiderError::Csv {
                path: path.to_path_buf(),
                source,
            }
        })?;

    debug!("{} companies read from {}", companies.len(), path.display());
    Ok(companies)
}
