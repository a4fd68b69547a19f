mod common;

use axum::response::Html;
use axum::routing::get;
use axum::Router;
use harvest_spider::companies::{
    extract_profile, read_companies, scrape_with, CompanyProfile, CompanyRef, FounderRef,
    JobListing, NOT_AVAILABLE,
};
use harvest_spider::config::CompaniesConfig;
use harvest_spider::fs::{read_json, write_json};
use harvest_spider::SpiderError;
use std::net::SocketAddr;
use std::path::Path;

fn acme_page() -> String {
    common::profile_page(
        "Acme",
        "2012",
        "1,200",
        "Acme makes   everything.",
        &[("Backend Engineer", "San Francisco, CA"), ("Designer", "Remote")],
        &["Wile E. Coyote", "Road Runner"],
    )
}

fn beta_page() -> String {
    common::profile_page(
        "Beta",
        "2020",
        "8",
        "Beta tests things.",
        &[("Founding Engineer", "NYC")],
        &["Ada"],
    )
}

async fn serve_companies() -> SocketAddr {
    let (acme, beta) = (acme_page(), beta_page());
    common::serve(
        Router::new()
            .route("/companies/acme", get(move || async move { Html(acme) }))
            .route("/companies/beta", get(move || async move { Html(beta) })),
    )
    .await
}

fn write_csv(dir: &Path, rows: &[(&str, String)]) -> std::path::PathBuf {
    let path = dir.join("companies.csv");
    let mut csv = String::from("Company Name,YC URL,Batch\n");
    for (name, url) in rows {
        csv.push_str(&format!("{name},{url},W21\n"));
    }
    std::fs::write(&path, csv).unwrap();
    path
}

// CSVSource
// ----------------------------------------------------------------------------

#[test]
fn companies_are_read_in_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        &[
            ("Acme", "https://example.com/acme".to_string()),
            ("Beta", "https://example.com/beta".to_string()),
            ("Gamma", "https://example.com/gamma".to_string()),
        ],
    );

    let companies = read_companies(&path).unwrap();
    assert_eq!(
        companies.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        vec!["Acme", "Beta", "Gamma"]
    );
    assert_eq!(companies[2].url, "https://example.com/gamma");
}

#[test]
fn missing_header_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("companies.csv");
    std::fs::write(&path, "Company Name,Website\nAcme,https://acme.example\n").unwrap();

    let err = read_companies(&path).unwrap_err();
    assert!(matches!(err, SpiderError::Csv { .. }), "{err:?}");
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_companies(&dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, SpiderError::Io { .. }), "{err:?}");
}

// PageFetcher
// ----------------------------------------------------------------------------

#[test]
fn full_page_extracts_every_field() {
    let profile = extract_profile(&acme_page());
    assert_eq!(
        profile,
        CompanyProfile {
            name: "Acme".to_string(),
            founded: "2012".to_string(),
            description: "Acme makes   everything.".to_string(),
            team_size: 1200,
            jobs: vec![
                JobListing {
                    title: "Backend Engineer".to_string(),
                    location: "San Francisco, CA".to_string(),
                },
                JobListing {
                    title: "Designer".to_string(),
                    location: "Remote".to_string(),
                },
            ],
            founders: vec![
                FounderRef {
                    name: "Wile E. Coyote".to_string()
                },
                FounderRef {
                    name: "Road Runner".to_string()
                },
            ],
        }
    );
}

#[test]
fn multi_line_description_keeps_its_breaks() {
    let page = common::profile_page(
        "Gamma",
        "2019",
        "3",
        "\n  We build rockets.\n\nAnd the pads they launch from.\n",
        &[],
        &["Grace"],
    );
    let profile = extract_profile(&page);
    assert_eq!(
        profile.description,
        "We build rockets.\n\nAnd the pads they launch from."
    );

    // the breaks survive the json sink too
    let json = serde_json::to_string(&profile).unwrap();
    let read: CompanyProfile = serde_json::from_str(&json).unwrap();
    assert_eq!(read.description, profile.description);
}

#[test]
fn missing_elements_fall_back_to_defaults() {
    let profile = extract_profile(
        "<html><body><h1>Sparse</h1><div><span>Team Size:</span><span></span></div></body></html>",
    );
    assert_eq!(profile.name, "Sparse");
    assert_eq!(profile.founded, NOT_AVAILABLE);
    assert_eq!(profile.description, NOT_AVAILABLE);
    assert_eq!(profile.team_size, 0);
    assert!(profile.jobs.is_empty());
    assert!(profile.founders.is_empty());

    // empty lists are still present once serialized
    let json = serde_json::to_value(&profile).unwrap();
    assert_eq!(json["jobs"], serde_json::json!([]));
    assert_eq!(json["founders"], serde_json::json!([]));
    assert_eq!(json["teamSize"], serde_json::json!(0));
}

// ResultSink
// ----------------------------------------------------------------------------

#[tokio::test]
async fn sink_round_trips_and_creates_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/output/companies.json");
    let profiles = vec![extract_profile(&acme_page()), CompanyProfile::default()];

    write_json(&path, &profiles).await.unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("[\n  {\n    \"name\": \"Acme\""), "{text}");

    let read: Vec<CompanyProfile> = read_json(&path).await.unwrap();
    assert_eq!(read, profiles);

    // overwrites
    write_json(&path, &Vec::<CompanyProfile>::new()).await.unwrap();
    let read: Vec<CompanyProfile> = read_json(&path).await.unwrap();
    assert!(read.is_empty());
}

// scrape
// ----------------------------------------------------------------------------

#[tokio::test]
async fn scrape_writes_one_profile_per_company_in_order() {
    let addr = serve_companies().await;
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(
        dir.path(),
        &[
            ("Acme", format!("http://{addr}/companies/acme")),
            ("Beta", format!("http://{addr}/companies/beta")),
        ],
    );
    let config = CompaniesConfig {
        input,
        output: dir.path().join("out/companies.json"),
        workers: 2,
        strict: false,
    };

    let report = scrape_with(&reqwest::Client::new(), &config, false)
        .await
        .unwrap();
    assert!(report.failed.is_empty());

    let written: Vec<CompanyProfile> = read_json(&config.output).await.unwrap();
    assert_eq!(written, report.profiles);
    assert_eq!(
        written.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        vec!["Acme", "Beta"]
    );
    for profile in &written {
        assert_ne!(profile.founded, NOT_AVAILABLE);
        assert_ne!(profile.description, NOT_AVAILABLE);
        assert!(profile.team_size > 0);
        assert!(!profile.jobs.is_empty());
        assert!(!profile.founders.is_empty());
    }
}

#[tokio::test]
async fn failed_pages_are_isolated() {
    let addr = serve_companies().await;
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(
        dir.path(),
        &[
            ("Acme", format!("http://{addr}/companies/acme")),
            ("Gone", format!("http://{addr}/companies/gone")),
            ("Beta", format!("http://{addr}/companies/beta")),
        ],
    );
    let config = CompaniesConfig {
        input,
        output: dir.path().join("companies.json"),
        workers: 1,
        strict: false,
    };

    let report = scrape_with(&reqwest::Client::new(), &config, false)
        .await
        .unwrap();

    assert_eq!(report.failed.len(), 1);
    let (company, err) = &report.failed[0];
    assert_eq!(
        company,
        &CompanyRef {
            name: "Gone".to_string(),
            url: format!("http://{addr}/companies/gone"),
        }
    );
    assert!(
        matches!(err, SpiderError::Http { status, .. } if status.as_u16() == 404),
        "{err:?}"
    );

    let written: Vec<CompanyProfile> = read_json(&config.output).await.unwrap();
    assert_eq!(written.len(), 3);
    assert_eq!(written[0].name, "Acme");
    assert_eq!(
        written[1],
        CompanyProfile {
            name: "Gone".to_string(),
            ..CompanyProfile::default()
        }
    );
    assert_eq!(written[2].name, "Beta");
}

#[tokio::test]
async fn strict_scrape_writes_nothing_on_failure() {
    let addr = serve_companies().await;
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(
        dir.path(),
        &[
            ("Acme", format!("http://{addr}/companies/acme")),
            ("Gone", format!("http://{addr}/companies/gone")),
        ],
    );
    let config = CompaniesConfig {
        input,
        output: dir.path().join("companies.json"),
        workers: 4,
        strict: true,
    };

    let err = scrape_with(&reqwest::Client::new(), &config, false)
        .await
        .unwrap_err();
    assert!(
        matches!(err, SpiderError::Incomplete { failed: 1, total: 2 }),
        "{err:?}"
    );
    assert!(!config.output.exists());
}
