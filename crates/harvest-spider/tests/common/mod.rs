#![allow(dead_code)]

use axum::Router;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::net::SocketAddr;

/// Serve `router` on an ephemeral local port.
pub async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// A gzip-compressed tar archive holding `files` as `(path, contents)`.
pub fn tar_gz(files: &[(&str, &str)]) -> Vec<u8> {
    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    for (path, contents) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(contents.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, path, contents.as_bytes())
            .unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}

/// A company profile page carrying every field the extractor looks for.
pub fn profile_page(
    name: &str,
    founded: &str,
    team_size: &str,
    description: &str,
    jobs: &[(&str, &str)],
    founders: &[&str],
) -> String {
    let jobs: String = jobs
        .iter()
        .map(|(title, location)| {
            format!(
                r#"<div class="job-listing">
                     <a class="job-title" href="/jobs/1">{title}</a>
                     <span class="job-location">{location}</span>
                   </div>"#
            )
        })
        .collect();
    let founders: String = founders
        .iter()
        .map(|founder| {
            format!(r#"<div class="founder-card"><div class="founder-name">{founder}</div></div>"#)
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
        <html>
          <head><title>{name} | Y Combinator</title></head>
          <body>
            <h1 class="text-3xl font-bold">{name}</h1>
            <p class="whitespace-pre-line">{description}</p>
            <div class="flex flex-row justify-between">
              <span>Founded:</span><span>{founded}</span>
            </div>
            <div class="flex flex-row justify-between">
              <span>Team Size:</span><span>{team_size}</span>
            </div>
            <section>{jobs}</section>
            <section>{founders}</section>
          </body>
        </html>"#
    )
}
