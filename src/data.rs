//! Dataset download and management.
//!
//! This module handles downloading the WordNet JSON dataset from GitHub,
//! caching it in the user's data directory, and reading it back in
//! (transparently decompressing a gzip-compressed copy).

use crate::error::{OewnLogicError, Result};
use crate::progress::{ProgressUpdate, Reporter};
use directories_next::ProjectDirs;
use flate2::read::GzDecoder;
use futures::StreamExt;
use log::info;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Subdirectory name within the user's data directory
pub const DATA_SUBDIR: &str = "oewn-logic";
const DATA_FILENAME: &str = "wordnet.data";
const DATA_DOWNLOAD_URL: &str =
    "https://raw.githubusercontent.com/hviana/wordnet_ts/main/wordnet.data";

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Gets the project's data directory path.
/// Creates the directory if it doesn't exist.
fn get_data_dir() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("org", "OewnLogic", DATA_SUBDIR)
        .ok_or(OewnLogicError::DataDirNotFound)?;
    let data_dir = proj_dirs.data_dir().to_path_buf();
    fs::create_dir_all(&data_dir)?;
    Ok(data_dir)
}

/// The location the dataset is cached at when no explicit path is given.
pub fn default_data_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join(DATA_FILENAME))
}

/// Downloads a file from a URL to a specified path using streaming with progress reporting.
async fn download_file(url: &str, dest_path: &Path, reporter: &Reporter) -> Result<()> {
    let stage_desc = "Downloading WordNet dataset".to_string();

    info!(
        "Downloading data from {} to {:?} (streaming)...",
        url, dest_path
    );
    let response = reqwest::get(url).await?.error_for_status()?;

    let total_size = response.content_length();
    reporter.report(ProgressUpdate::new_stage(stage_desc.clone(), total_size));

    // Remove the partial file unless the download runs to completion.
    let mut partial = scopeguard::guard(Some(dest_path.to_path_buf()), |path| {
        if let Some(path) = path {
            let _ = fs::remove_file(path);
        }
    });

    let mut dest_file = BufWriter::new(File::create(dest_path)?);
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result?;
        dest_file.write_all(&chunk)?;
        downloaded += chunk.len() as u64;

        reporter.report(ProgressUpdate {
            stage_description: stage_desc.clone(),
            current_item: downloaded,
            total_items: total_size,
            message: None,
        });
    }

    dest_file.flush()?;
    *partial = None;

    reporter.report(ProgressUpdate {
        stage_description: stage_desc,
        current_item: total_size.unwrap_or(downloaded),
        total_items: total_size.or(Some(downloaded)),
        message: Some("Download complete.".to_string()),
    });

    info!("Download complete.");
    Ok(())
}

/// Reads the dataset file into a string. A gzip-compressed copy (as some
/// mirrors serve it) is decompressed transparently, sniffed by magic bytes
/// rather than file extension.
pub async fn read_dataset(path: &Path) -> Result<String> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || -> Result<String> {
        let mut reader = BufReader::new(File::open(&path)?);
        let gzipped = reader.fill_buf()?.starts_with(&GZIP_MAGIC);

        let mut content = String::new();
        if gzipped {
            info!("Dataset file {:?} is gzip-compressed; decompressing.", path);
            GzDecoder::new(reader).read_to_string(&mut content)?;
        } else {
            reader.read_to_string(&mut content)?;
        }
        Ok(content)
    })
    .await?
}

/// Ensures the WordNet dataset file is present in the data directory.
/// Downloads it when missing, or unconditionally when `force_download` is set.
pub async fn ensure_data(reporter: &Reporter, force_download: bool) -> Result<PathBuf> {
    let data_path = default_data_path()?;

    if data_path.exists() && !force_download {
        info!("Found existing WordNet dataset file: {:?}", data_path);
        return Ok(data_path);
    }
    if force_download && data_path.exists() {
        info!("Forcing a fresh download over {:?}.", data_path);
    } else {
        info!(
            "WordNet dataset file not found at {:?}. Downloading...",
            data_path
        );
    }

    download_file(DATA_DOWNLOAD_URL, &data_path, reporter).await?;
    Ok(data_path)
}

/// Removes the cached dataset file, if present.
pub fn remove_cached_data() -> Result<()> {
    let data_path = default_data_path()?;
    if data_path.exists() {
        info!("Removing cached dataset file: {:?}", data_path);
        fs::remove_file(&data_path)?;
    } else {
        info!("No cached dataset file at {:?}; nothing to remove.", data_path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use tempfile::tempdir;

    // Helper to create a gz file for testing transparent decompression
    fn create_dummy_gz(path: &Path, content: &str) -> io::Result<()> {
        use flate2::Compression;
        use flate2::write::GzEncoder;

        let file = File::create(path)?;
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
        encoder.write_all(content.as_bytes())?;
        encoder.finish()?;
        Ok(())
    }

    #[tokio::test]
    async fn test_read_dataset_plain() {
        let _ = env_logger::builder().is_test(true).try_init();
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let data_path = temp_dir.path().join("wordnet.data");
        let content = r#"{"synsets":[],"links":[]}"#;

        fs::write(&data_path, content).expect("Failed to write dataset");
        let read_back = read_dataset(&data_path).await.expect("Read failed");
        assert_eq!(read_back, content);
    }

    #[tokio::test]
    async fn test_read_dataset_gzipped() {
        let _ = env_logger::builder().is_test(true).try_init();
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let data_path = temp_dir.path().join("wordnet.data.gz");
        let content = r#"{"synsets":[],"links":[]}"#;

        create_dummy_gz(&data_path, content).expect("Failed to create dummy GZ");
        let read_back = read_dataset(&data_path).await.expect("Read failed");
        assert_eq!(read_back, content);
    }

    #[tokio::test]
    async fn test_read_dataset_missing_file() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let data_path = temp_dir.path().join("nope.data");
        let result = read_dataset(&data_path).await;
        assert!(result.is_err());
    }
}
