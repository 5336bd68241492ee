//! # contract: collaborator interfaces around the segmentation core
//!
//! The core never touches git, the filesystem or the network directly. It
//! talks to three collaborators:
//! - [`LogReader`] produces the raw log lines (git, a file dump, a test fixture).
//! - [`ArtifactWriter`] persists a named text artifact (chunk or summary).
//! - [`Summariser`] turns a chunk's text into an opaque textual result.
//!
//! All traits are async, `Send + Sync`, and return boxed errors.
//!
//! ## Mocking & Testing
//! - The traits are annotated for `mockall` so consumers get `MockLogReader`,
//!   `MockArtifactWriter` and `MockSummariser` under the `test-export-mocks`
//!   feature (on by default).

use std::path::PathBuf;

use async_trait::async_trait;
#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;
use serde::Serialize;

use crate::error::CollaboratorError;

/// Describes an artifact after it has been persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenArtifact {
    pub name: String,
    pub path: PathBuf,
    /// Number of bytes written, after encoding.
    pub bytes: usize,
    /// sha256 of the UTF-8 content, lowercase hex.
    pub content_hash: String,
}

/// Source of the raw log lines for one segmentation pass.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait LogReader: Send + Sync {
    /// Read the full log, one entry per line, in emitted order.
    async fn read_lines(&self) -> Result<Vec<String>, CollaboratorError>;
}

/// Sink for named text artifacts.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ArtifactWriter: Send + Sync {
    /// Persist `content` under `name`, replacing any previous artifact of that name.
    async fn write(&self, name: &str, content: &str)
        -> Result<WrittenArtifact, CollaboratorError>;
}

/// Remote (or local) summarisation of a single chunk.
///
/// The returned text is opaque to the core; it is stored as-is.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Summariser: Send + Sync {
    async fn summarise(&self, prompt: &str) -> Result<String, CollaboratorError>;
}
