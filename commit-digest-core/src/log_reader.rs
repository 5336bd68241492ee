use std::fs;
use std::path::PathBuf;
use std::process::Command;

use crate::contract::LogReader;
use crate::error::CollaboratorError;

pub const DEFAULT_SINCE: &str = "2022-01-01";

/// Reads `git log -p --since=<since>` from a local repository.
#[derive(Debug, Clone)]
pub struct GitLogReader {
    pub repo_path: PathBuf,
    pub since: String,
}

impl GitLogReader {
    pub fn new(repo_path: impl Into<PathBuf>, since: impl Into<String>) -> Self {
        Self {
            repo_path: repo_path.into(),
            since: since.into(),
        }
    }
}

#[async_trait::async_trait]
impl LogReader for GitLogReader {
    async fn read_lines(&self) -> Result<Vec<String>, CollaboratorError> {
        let since_arg = format!("--since={}", self.since);

        // `git -C <repo_path> log -p --since=<since>`
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo_path)
            .arg("log")
            .arg("-p")
            .arg(&since_arg)
            .output();

        match output {
            Ok(out) if out.status.success() => {
                let stdout = String::from_utf8_lossy(&out.stdout);
                let lines: Vec<String> = stdout.lines().map(str::to_owned).collect();
                tracing::info!(
                    repo_path = %self.repo_path.display(),
                    since = %self.since,
                    lines = lines.len(),
                    "Read git log"
                );
                Ok(lines)
            }
            Ok(out) => {
                let stderr = String::from_utf8_lossy(&out.stderr);
                tracing::error!(
                    repo_path = %self.repo_path.display(),
                    since = %self.since,
                    status = ?out.status,
                    stderr = %stderr.trim(),
                    "Git log exited with non-zero code"
                );
                Err(format!("git log exited with {}: {}", out.status, stderr.trim()).into())
            }
            Err(e) => {
                tracing::error!(
                    error = ?e,
                    repo_path = %self.repo_path.display(),
                    "Failed to launch git process"
                );
                Err(Box::new(e))
            }
        }
    }
}

/// Reads a log dump that was written to disk beforehand.
#[derive(Debug, Clone)]
pub struct FileLogReader {
    pub path: PathBuf,
}

impl FileLogReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl LogReader for FileLogReader {
    async fn read_lines(&self) -> Result<Vec<String>, CollaboratorError> {
        let bytes = fs::read(&self.path).map_err(|e| {
            tracing::error!(error = ?e, path = %self.path.display(), "Failed to read log file");
            e
        })?;
        let lines: Vec<String> = String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_owned)
            .collect();
        tracing::info!(path = %self.path.display(), lines = lines.len(), "Read log file");
        Ok(lines)
    }
}
