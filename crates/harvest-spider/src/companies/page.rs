use super::CompanyRef;
use crate::http::*;
use crate::{Result, SpiderError};
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::{error, trace};

/// Placeholder for text fields missing from a profile page.
pub const NOT_AVAILABLE: &str = "N/A";

const FOUNDED_LABEL: &str = "Founded:";
const TEAM_SIZE_LABEL: &str = "Team Size:";

// selectors are constants; parsing them cannot fail
lazy_static::lazy_static! {
    static ref NAME: Selector = Selector::parse("h1").expect("name selector");
    static ref DESCRIPTION: Selector =
        Selector::parse("p.whitespace-pre-line").expect("description selector");
    static ref LABEL: Selector = Selector::parse("span").expect("label selector");
    static ref JOB: Selector = Selector::parse("div.job-listing").expect("job selector");
    static ref JOB_TITLE: Selector = Selector::parse(".job-title").expect("job title selector");
    static ref JOB_LOCATION: Selector =
        Selector::parse(".job-location").expect("job location selector");
    static ref FOUNDER: Selector = Selector::parse("div.founder-card").expect("founder selector");
    static ref FOUNDER_NAME: Selector =
        Selector::parse(".founder-name").expect("founder name selector");
}

/// Everything extracted from one company's profile page.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub name: String,
    pub founded: String,
    pub description: String,
    pub team_size: u32,
    pub jobs: Vec<JobListing>,
    pub founders: Vec<FounderRef>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct JobListing {
    pub title: String,
    pub location: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct FounderRef {
    pub name: String,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        Self {
            name: NOT_AVAILABLE.to_string(),
            founded: NOT_AVAILABLE.to_string(),
            description: NOT_AVAILABLE.to_string(),
            team_size: 0,
            jobs: vec![],
            founders: vec![],
        }
    }
}

impl CompanyProfile {
    /// Stand-in for a company whose page could not be fetched: the CSV name, all else defaulted.
    pub fn unavailable(company: &CompanyRef) -> Self {
        Self {
            name: company.name.clone(),
            ..Self::default()
        }
    }
}

/// GET a company's profile page and extract its [`CompanyProfile`].
///
/// Only transport failures and non-success statuses are errors; missing page elements fall
/// back to defaults.
pub async fn fetch_profile(
    http_client: &HttpClient,
    company: &CompanyRef,
) -> Result<CompanyProfile> {
    trace!("fetching profile page for {} at {}", company.name, company.url);
    let network = |source: reqwest::Error| {
        error!("failed to fetch {} at {}, error({source})", company.name, company.url);
        SpiderError::Network {
            url: company.url.clone(),
            source,
        }
    };

    let response = http_client.get(&company.url).send().await.map_err(network)?;
    let status = response.status();
    if !status.is_success() {
        error!("{} at {} responded with status {status}", company.name, company.url);
        return Err(SpiderError::Http {
            url: company.url.clone(),
            status,
        });
    }

    let html = response.text().await.map_err(network)?;
    Ok(extract_profile(&html))
}

/// Extract a [`CompanyProfile`] from profile page markup.
///
/// Each field is looked up independently; absent scalars become `"N/A"` or `0`, absent
/// job/founder blocks become empty lists.
pub fn extract_profile(html: &str) -> CompanyProfile {
    let document = Html::parse_document(html);
    let default = CompanyProfile::default();

    let jobs = document
        .select(&JOB)
        .map(|job| JobListing {
            title: first_text(&job, &JOB_TITLE).unwrap_or_default(),
            location: first_text(&job, &JOB_LOCATION).unwrap_or_default(),
        })
        .filter(|job| !job.title.is_empty() || !job.location.is_empty())
        .collect();

    let founders = document
        .select(&FOUNDER)
        .filter_map(|founder| first_text(&founder, &FOUNDER_NAME))
        .map(|name| FounderRef { name })
        .collect();

    CompanyProfile {
        name: select_text(&document, &NAME).unwrap_or(default.name),
        founded: labelled_value(&document, FOUNDED_LABEL).unwrap_or(default.founded),
        description: document
            .select(&DESCRIPTION)
            .next()
            .and_then(|element| non_empty(trimmed_text(&element)))
            .unwrap_or(default.description),
        team_size: labelled_value(&document, TEAM_SIZE_LABEL)
            .map(|size| parse_team_size(&size))
            .unwrap_or(default.team_size),
        jobs,
        founders,
    }
}

// Whitespace-normalised text content of an element.
fn text_of(element: &ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

// Text content trimmed at the ends only; inner line breaks are kept.
fn trimmed_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn select_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|element| non_empty(text_of(&element)))
}

fn first_text(scope: &ElementRef, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .and_then(|element| non_empty(text_of(&element)))
}

// `<span>Founded:</span><span>2012</span>`: the value is the label's next sibling element.
fn labelled_value(document: &Html, label: &str) -> Option<String> {
    document
        .select(&LABEL)
        .find(|span| text_of(span) == label)
        .and_then(|span| span.next_siblings().find_map(ElementRef::wrap))
        .and_then(|value| non_empty(text_of(&value)))
}

// "1,200" -> 1200; anything without digits (or too large) -> 0
fn parse_team_size(text: &str) -> u32 {
    text.chars()
        .filter(char::is_ascii_digit)
        .collect::<String>()
        .parse()
        .unwrap_or(0)
}
