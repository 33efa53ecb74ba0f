// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Write-to-temp-then-rename primitives used by every file-backed
//! singleton. Avoids torn reads from a concurrent invocation racing a
//! write (§5 "Shared resources").

use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::StorageError;

/// Read and parse `path` as JSON, returning `T::default()` if the file does
/// not exist (the "init-on-read" singleton pattern, §9).
pub fn read_json_or_default<T>(path: &Path) -> Result<T, StorageError>
where
    T: DeserializeOwned + Default,
{
    match std::fs::read_to_string(path) {
        Ok(text) => {
            serde_json::from_str(&text).map_err(|source| StorageError::Deserialize { path: path.to_path_buf(), source })
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(T::default()),
        Err(source) => Err(StorageError::Read { path: path.to_path_buf(), source }),
    }
}

/// Serialize `value` and atomically replace `path` with it.
pub fn write_json_atomic<T>(path: &Path, value: &T) -> Result<(), StorageError>
where
    T: Serialize,
{
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| StorageError::Write { path: path.to_path_buf(), source })?;
    }
    let body = serde_json::to_vec_pretty(value).map_err(|source| StorageError::Serialize { path: path.to_path_buf(), source })?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, &body).map_err(|source| StorageError::Write { path: tmp.clone(), source })?;
    std::fs::rename(&tmp, path).map_err(|source| StorageError::Rename { tmp, path: path.to_path_buf(), source })
}

/// Append one line to a file, creating parent directories and the file as
/// needed. Used for the append-only logs, which don't need the
/// rename-swap dance since a partial line at the tail is tolerable and
/// readers skip unparseable trailing lines.
pub fn append_line(path: &Path, line: &str) -> Result<(), StorageError> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| StorageError::Write { path: path.to_path_buf(), source })?;
    }
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| StorageError::Write { path: path.to_path_buf(), source })?;
    writeln!(file, "{line}").map_err(|source| StorageError::Write { path: path.to_path_buf(), source })
}

#[cfg(test)]
#[path = "atomic_tests.rs"]
mod tests;
