// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Local filesystem implementation of the file storage port.
//!
//! Files land under `<root>/<folder>/<unique>-<filename>` and are exposed
//! through URLs rooted at the configured base URL. Suitable for
//! development and single-node deployments; blob-store backends implement
//! the same port outside this crate.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::application::ports::FileStorage;
use crate::domain::error::DomainError;
use crate::domain::value_objects::FileUrl;

pub struct LocalFileStorage {
    root: PathBuf,
    base_url: String,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Strip any path components a caller-supplied filename may carry.
    fn sanitize(filename: &str) -> String {
        Path::new(filename)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "archivo".to_string())
    }

    fn path_for(&self, url: &FileUrl) -> Result<PathBuf, DomainError> {
        let relative = url
            .as_str()
            .strip_prefix(&self.base_url)
            .map(|rest| rest.trim_start_matches('/'))
            .ok_or_else(|| {
                DomainError::internal(format!("file URL outside storage root: {url}"))
            })?;
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn upload(
        &self,
        bytes: &[u8],
        folder: &str,
        filename: &str,
    ) -> Result<FileUrl, DomainError> {
        let dir = self.root.join(folder);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| DomainError::internal(format!("failed to create {dir:?}: {e}")))?;

        let unique_name = format!("{}-{}", Uuid::new_v4().simple(), Self::sanitize(filename));
        let path = dir.join(&unique_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| DomainError::internal(format!("failed to write {path:?}: {e}")))?;

        debug!(?path, "file stored");
        FileUrl::new(format!("{}/{}/{}", self.base_url, folder, unique_name))
    }

    async fn delete(&self, url: &FileUrl) -> Result<(), DomainError> {
        let path = self.path_for(url)?;
        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| DomainError::internal(format!("failed to delete {path:?}: {e}")))?;
        debug!(?path, "file deleted");
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_then_delete_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path(), "http://localhost:8080/files");

        let url = storage
            .upload(b"pdf-bytes", "menus", "carta.pdf")
            .await
            .unwrap();
        assert!(url.as_str().starts_with("http://localhost:8080/files/menus/"));
        assert!(url.as_str().ends_with("carta.pdf"));

        storage.delete(&url).await.unwrap();
        // Second delete fails: the file is gone.
        assert!(storage.delete(&url).await.is_err());
    }

    #[tokio::test]
    async fn filenames_are_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path(), "http://localhost:8080/files");

        let url = storage
            .upload(b"x", "documents", "../../etc/passwd")
            .await
            .unwrap();
        assert!(url.as_str().contains("/documents/"));
        assert!(!url.as_str().contains(".."));
    }

    #[tokio::test]
    async fn delete_rejects_foreign_urls() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path(), "http://localhost:8080/files");
        let foreign = FileUrl::new("https://elsewhere.example/x.pdf").unwrap();
        assert!(storage.delete(&foreign).await.is_err());
    }
}
