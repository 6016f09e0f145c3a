//! Archive creation.
//!
//! Walks the staging directory and streams every regular file into a zip
//! entry keyed by its path relative to the staging root, preserving
//! subdirectory structure. Entries are written one at a time; file content
//! is never buffered whole in memory. A failure partway leaves a partial
//! archive on disk, which the caller must treat as fatal.

use std::fmt;
use std::path::Path;

use async_zip::tokio::write::ZipFileWriter;
use async_zip::{Compression, ZipEntryBuilder};
use tokio::fs::File;
use tokio_util::compat::TokioAsyncReadCompatExt;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{ExportError, Result};

/// Zip the staging directory into `output`.
///
/// Returns the number of files archived.
pub async fn write_archive(staging: &Path, output: &Path) -> Result<usize> {
    let file = File::create(output).await.map_err(archive_err)?;
    let mut writer = ZipFileWriter::with_tokio(file);

    let mut files_archived = 0usize;
    for entry in WalkDir::new(staging) {
        let entry = entry.map_err(archive_err)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(staging)
            .map_err(archive_err)?
            .to_string_lossy()
            .into_owned();

        let builder = ZipEntryBuilder::new(relative.clone().into(), Compression::Deflate);
        let mut entry_writer = writer
            .write_entry_stream(builder)
            .await
            .map_err(archive_err)?;

        let source = File::open(entry.path()).await.map_err(archive_err)?;
        futures::io::copy(source.compat(), &mut entry_writer)
            .await
            .map_err(archive_err)?;
        entry_writer.close().await.map_err(archive_err)?;

        debug!("archived '{}'", relative);
        files_archived += 1;
    }

    writer.close().await.map_err(archive_err)?;
    Ok(files_archived)
}

fn archive_err<E: fmt::Display>(error: E) -> ExportError {
    ExportError::Archive(error.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use async_zip::tokio::read::seek::ZipFileReader;

    use super::*;

    async fn stage_file(staging: &Path, relative: &str, content: &str) {
        let path = staging.join(relative);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.unwrap();
        }
        tokio::fs::write(path, content).await.unwrap();
    }

    async fn read_entries(archive: &Path) -> BTreeMap<String, String> {
        let mut file = tokio::io::BufReader::new(File::open(archive).await.unwrap());
        let mut reader = ZipFileReader::with_tokio(&mut file).await.unwrap();

        let names: Vec<String> = reader
            .file()
            .entries()
            .iter()
            .map(|entry| entry.filename().as_str().unwrap().to_string())
            .collect();

        let mut contents = BTreeMap::new();
        for (index, name) in names.into_iter().enumerate() {
            let mut body = String::new();
            reader
                .reader_with_entry(index)
                .await
                .unwrap()
                .read_to_string_checked(&mut body)
                .await
                .unwrap();
            contents.insert(name, body);
        }
        contents
    }

    #[tokio::test]
    async fn test_archive_preserves_relative_paths() {
        let staging = tempfile::tempdir().unwrap();
        stage_file(staging.path(), "metadata.json", "{}").await;
        stage_file(staging.path(), "movr.schema.txt", "CREATE TABLE rides ()").await;
        stage_file(staging.path(), "nested/deep/file.csv", "a,b\n1,2\n").await;

        let output_dir = tempfile::tempdir().unwrap();
        let output = output_dir.path().join("export.zip");
        let count = write_archive(staging.path(), &output).await.unwrap();
        assert_eq!(count, 3);

        let entries = read_entries(&output).await;
        assert_eq!(entries.len(), 3);
        assert_eq!(entries["metadata.json"], "{}");
        assert_eq!(entries["movr.schema.txt"], "CREATE TABLE rides ()");
        assert_eq!(entries["nested/deep/file.csv"], "a,b\n1,2\n");
    }

    #[tokio::test]
    async fn test_archive_skips_empty_directories() {
        let staging = tempfile::tempdir().unwrap();
        stage_file(staging.path(), "zone_configurations.txt", "").await;
        tokio::fs::create_dir_all(staging.path().join("empty/dir"))
            .await
            .unwrap();

        let output_dir = tempfile::tempdir().unwrap();
        let output = output_dir.path().join("export.zip");
        let count = write_archive(staging.path(), &output).await.unwrap();
        assert_eq!(count, 1);

        let entries = read_entries(&output).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries["zone_configurations.txt"], "");
    }

    #[tokio::test]
    async fn test_archive_of_empty_staging_is_valid_and_empty() {
        let staging = tempfile::tempdir().unwrap();
        let output_dir = tempfile::tempdir().unwrap();
        let output = output_dir.path().join("export.zip");

        let count = write_archive(staging.path(), &output).await.unwrap();
        assert_eq!(count, 0);
        assert!(read_entries(&output).await.is_empty());
    }
}
