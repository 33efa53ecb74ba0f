// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, #[source] source: std::io::Error },

    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, #[source] source: std::io::Error },

    #[error("failed to rename {tmp} to {path}: {source}")]
    Rename { tmp: PathBuf, path: PathBuf, #[source] source: std::io::Error },

    #[error("malformed json in {path}: {source}")]
    Deserialize { path: PathBuf, #[source] source: serde_json::Error },

    #[error("failed to serialize value for {path}: {source}")]
    Serialize { path: PathBuf, #[source] source: serde_json::Error },

    #[error("job record not found: {0}")]
    JobNotFound(String),
}
