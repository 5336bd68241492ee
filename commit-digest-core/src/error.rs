//! Error types shared by the core pipeline.
//!
//! Configuration problems are rejected before a single line is read.
//! Collaborator failures (git, disk, summarisation API) are carried as boxed
//! errors, the same contract the collaborator traits use.

use thiserror::Error;

/// Boxed error returned by collaborator implementations.
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

/// Rejected configuration. Raised before processing begins.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("chunk limit must be a positive number of lines, got {0}")]
    ChunkLimit(usize),

    #[error("commit boundary token must not be empty")]
    EmptyCommitToken,

    #[error("reset rule must contain at least one matcher")]
    EmptyResetRule,

    #[error("filter group {index} has no matchers")]
    EmptyFilterGroup { index: usize },

    #[error("empty pattern in {rule}")]
    EmptyPattern { rule: String },

    #[error("summarisation concurrency must be at least 1, got {0}")]
    Concurrency(usize),
}

/// Failure of a full digest run.
#[derive(Debug, Error)]
pub enum DigestError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read log: {0}")]
    Read(#[source] CollaboratorError),

    #[error("failed to write artifact {name}: {source}")]
    Write {
        name: String,
        #[source]
        source: CollaboratorError,
    },

    #[error("failed to summarise chunk {chunk_index} of commit {commit_index}: {source}")]
    Summarise {
        commit_index: usize,
        chunk_index: usize,
        #[source]
        source: CollaboratorError,
    },
}
