// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! C1: the periodic-task adapter. Three operations over the host's real
//! crontab — list, append, remove-by-substring — implemented by shelling
//! out to the `crontab` binary.

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::AdapterError;

#[async_trait]
pub trait TaskTableAdapter: Send + Sync {
    async fn list_entries(&self) -> Result<Vec<String>, AdapterError>;
    async fn add_entry(&self, line: &str) -> Result<(), AdapterError>;
    async fn remove_by_pattern(&self, pattern: &str) -> Result<(), AdapterError>;
}

/// Shells out to `crontab -l` / `crontab -` against the invoking user's
/// table. Every mutation re-reads the table immediately before writing,
/// with one retry on an empty read (§5, §7 "transient list failure") —
/// an empty `crontab -l` can mean either a genuinely empty table or a
/// transient failure of the crontab daemon, and writing a table we read
/// as empty could silently wipe every foreign entry.
pub struct CrontabAdapter {
    crontab_bin: String,
}

impl Default for CrontabAdapter {
    fn default() -> Self {
        Self { crontab_bin: "crontab".to_string() }
    }
}

impl CrontabAdapter {
    pub fn new(crontab_bin: impl Into<String>) -> Self {
        Self { crontab_bin: crontab_bin.into() }
    }

    async fn read_raw(&self) -> Result<String, AdapterError> {
        let output = Command::new(&self.crontab_bin)
            .arg("-l")
            .output()
            .await
            .map_err(AdapterError::CrontabSpawn)?;
        // A missing crontab exits non-zero with "no crontab for <user>" on
        // stderr; that is a legitimately empty table, not a failure.
        if !output.status.success() {
            return Ok(String::new());
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    async fn read_with_retry(&self) -> Result<Vec<String>, AdapterError> {
        let first = self.read_raw().await?;
        if !first.trim().is_empty() {
            return Ok(first.lines().map(str::to_string).collect());
        }
        let second = self.read_raw().await?;
        Ok(second.lines().map(str::to_string).collect())
    }

    async fn write_all(&self, lines: &[String]) -> Result<(), AdapterError> {
        use std::process::Stdio;
        use tokio::io::AsyncWriteExt;

        let mut body = lines.join("\n");
        if !body.is_empty() {
            body.push('\n');
        }

        let mut child = Command::new(&self.crontab_bin)
            .arg("-")
            .stdin(Stdio::piped())
            .spawn()
            .map_err(AdapterError::CrontabSpawn)?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(body.as_bytes()).await.map_err(AdapterError::CrontabSpawn)?;
        }

        let status = child.wait().await.map_err(AdapterError::CrontabSpawn)?;
        if !status.success() {
            return Err(AdapterError::CrontabStatus(status.code().unwrap_or(-1)));
        }
        Ok(())
    }
}

#[async_trait]
impl TaskTableAdapter for CrontabAdapter {
    async fn list_entries(&self) -> Result<Vec<String>, AdapterError> {
        self.read_with_retry().await
    }

    async fn add_entry(&self, line: &str) -> Result<(), AdapterError> {
        let mut lines = self.read_with_retry().await?;
        lines.retain(|l| !l.trim().is_empty());
        lines.push(line.to_string());
        self.write_all(&lines).await
    }

    async fn remove_by_pattern(&self, pattern: &str) -> Result<(), AdapterError> {
        let lines = self.read_with_retry().await?;
        let kept: Vec<String> = lines.into_iter().filter(|l| !l.contains(pattern) && !l.trim().is_empty()).collect();
        self.write_all(&kept).await
    }
}

#[cfg(any(test, feature = "test-support"))]
pub mod fake {
    use super::*;
    use parking_lot::Mutex;

    /// In-memory stand-in that preserves the same foreign-line semantics
    /// as [`CrontabAdapter`], for tests that don't want to shell out.
    #[derive(Default)]
    pub struct FakeTaskTable {
        lines: Mutex<Vec<String>>,
    }

    impl FakeTaskTable {
        pub fn seed(&self, lines: impl IntoIterator<Item = impl Into<String>>) {
            self.lines.lock().extend(lines.into_iter().map(Into::into));
        }
    }

    #[async_trait]
    impl TaskTableAdapter for FakeTaskTable {
        async fn list_entries(&self) -> Result<Vec<String>, AdapterError> {
            Ok(self.lines.lock().clone())
        }

        async fn add_entry(&self, line: &str) -> Result<(), AdapterError> {
            self.lines.lock().push(line.to_string());
            Ok(())
        }

        async fn remove_by_pattern(&self, pattern: &str) -> Result<(), AdapterError> {
            self.lines.lock().retain(|l| !l.contains(pattern));
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "task_table_tests.rs"]
mod tests;
