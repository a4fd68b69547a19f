use crate::http::*;
use crate::{tui, Result, SpiderError};
use flate2::read::GzDecoder;
use futures::StreamExt;
use indicatif::ProgressBar;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use std::collections::VecDeque;
use tracing::{debug, error, info, trace, warn};

/// GET request a file from `url` and stream it to `path`, chunk by chunk.
///
/// The destination is opened (and truncated) before the request is sent, so every call starts
/// from byte zero. If the transport fails after that point the partial file is deleted; a
/// non-success status leaves the file in place. Returns the number of bytes written.
pub async fn download_file(
    http_client: &HttpClient,
    url: &str,
    path: &Path,
    tui: bool,
) -> Result<u64> {
    // ensure the directory exists
    trace!("checking directory path: {:?}", path);
    if let Some(dir_path) = path.parent() {
        tokio::fs::create_dir_all(dir_path)
            .await
            .map_err(|err| SpiderError::io(dir_path, err))?;
    }

    let mut file = File::create(path)
        .await
        .map_err(|err| SpiderError::io(path, err))?;

    let response = match http_client.get(url).send().await {
        Ok(response) => response,
        Err(source) => {
            error!("failed to reach {url}, error({source})");
            drop(file);
            discard(path).await;
            return Err(SpiderError::Network {
                url: url.to_string(),
                source,
            });
        }
    };

    let status = response.status();
    if !status.is_success() {
        error!("{url} responded with status {status}");
        return Err(SpiderError::Http {
            url: url.to_string(),
            status,
        });
    }

    let file_size = response.content_length().unwrap_or(0);
    debug!("downloading {file_size} bytes from {url}");
    let pb = tui::bytes_bar(
        file_size,
        format!("downloading file from {url} to {} ...", path.display()),
        tui,
    )?;

    // stream the body to disk
    let mut written: u64 = 0;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(source) => {
                error!("download of {url} interrupted after {written} bytes, error({source})");
                pb.abandon();
                drop(file);
                discard(path).await;
                return Err(SpiderError::Network {
                    url: url.to_string(),
                    source,
                });
            }
        };
        file.write_all(&chunk)
            .await
            .map_err(|err| SpiderError::io(path, err))?;
        written += chunk.len() as u64;
        pb.inc(chunk.len() as u64);
    }
    file.flush().await.map_err(|err| SpiderError::io(path, err))?;

    pb.finish_and_clear();
    info!("{url} downloaded to {} ({written} bytes)", path.display());

    if tui {
        println!("downloading file ... done");
    }

    Ok(written)
}

// Remove a partially written download.
async fn discard(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!("removed partial download {}", path.display()),
        Err(err) => error!("failed to remove partial download {}: {err}", path.display()),
    }
}

/// Reads a `.json` file from `path`.
pub async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    trace!("reading file path: {}", path.display());
    let file = tokio::fs::read(path)
        .await
        .map_err(|err| SpiderError::io(path, err))?;
    trace!("file read; deserializing bytes ...");
    let data: T = serde_json::from_slice(&file).map_err(|source| SpiderError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(data)
}

/// Writes `value` to `path` as pretty-printed JSON, creating the parent directory first.
///
/// Any existing file is overwritten in place; the write is not atomic.
pub async fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(dir_path) = path.parent() {
        tokio::fs::create_dir_all(dir_path)
            .await
            .map_err(|err| SpiderError::io(dir_path, err))?;
    }
    let bytes = serde_json::to_vec_pretty(value).map_err(|source| SpiderError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    tokio::fs::write(path, bytes)
        .await
        .map_err(|err| SpiderError::io(path, err))?;
    debug!("json written to {}", path.display());
    Ok(())
}

/// Decompress and unpack a `.tar.gz` file (`archive`) into a target directory (`to_dir`), in a
/// single streamed pass. Returns the number of entries unpacked.
///
/// `to_dir` is created as necessary. A failure part way through leaves whatever was already
/// unpacked in place.
pub async fn extract_tar_gz(archive: &Path, to_dir: &Path, tui: bool) -> Result<usize> {
    debug!("extracting {} to {}", archive.display(), to_dir.display());

    // ensure the target directory exists
    tokio::fs::create_dir_all(to_dir)
        .await
        .map_err(|err| SpiderError::io(to_dir, err))?;

    let pb = tui::count_spinner(
        format!("extracting {} ...", archive.display()),
        "files",
        tui,
    )?;

    // tar & flate2 are blocking readers
    let archive_path = archive.to_path_buf();
    let dir = to_dir.to_path_buf();
    let task_pb = pb.clone();
    let entries =
        tokio::task::spawn_blocking(move || unpack(&archive_path, &dir, &task_pb)).await??;

    pb.finish_and_clear();
    info!(
        "{} extracted to {} ({entries} entries)",
        archive.display(),
        to_dir.display()
    );

    if tui {
        println!("extracting file ... done");
    }

    Ok(entries)
}

fn unpack(archive: &Path, to_dir: &Path, pb: &ProgressBar) -> Result<usize> {
    let file = std::fs::File::open(archive).map_err(|err| SpiderError::io(archive, err))?;
    let mut tar = tar::Archive::new(GzDecoder::new(BufReader::new(file)));
    let corrupt = |source: std::io::Error| {
        error!("failed to extract {}, {source}", archive.display());
        SpiderError::Extract {
            path: archive.to_path_buf(),
            source,
        }
    };

    let mut count = 0;
    for entry in tar.entries().map_err(corrupt)? {
        let mut entry = entry.map_err(corrupt)?;
        trace!("unpacking {:?} to {}", entry.path(), to_dir.display());
        if !entry.unpack_in(to_dir).map_err(corrupt)? {
            warn!("skipped {:?}: it would unpack outside {}", entry.path(), to_dir.display());
            continue;
        }
        count += 1;
        pb.inc(1);
    }

    Ok(count)
}

/// Locate a file called `name` anywhere beneath `dir`; files closer to `dir` win, and ties at
/// the same depth go to the first path in sorted order.
pub fn find_file(dir: &Path, name: &str) -> Result<PathBuf> {
    fn walk(dir: &Path, name: &str) -> std::io::Result<Option<PathBuf>> {
        // breadth first, one directory level at a time
        let mut queue = VecDeque::from([dir.to_path_buf()]);
        while let Some(current) = queue.pop_front() {
            let mut entries = std::fs::read_dir(&current)?.collect::<std::io::Result<Vec<_>>>()?;
            entries.sort_by_key(|entry| entry.path());

            for entry in entries {
                if entry.file_type()?.is_dir() {
                    queue.push_back(entry.path());
                } else if entry.file_name().to_str() == Some(name) {
                    return Ok(Some(entry.path()));
                }
            }
        }
        Ok(None)
    }

    match walk(dir, name) {
        Ok(Some(path)) => Ok(path),
        Ok(None) => Err(SpiderError::MissingFile {
            dir: dir.to_path_buf(),
            name: name.to_string(),
        }),
        Err(err) => Err(SpiderError::io(dir, err)),
    }
}
