//! Splitting commit buffers into bounded-size chunks.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::segment::Commit;

pub const DEFAULT_CHUNK_LIMIT: usize = 900;

/// Maximum number of lines per chunk. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct ChunkLimit(NonZeroUsize);

impl ChunkLimit {
    pub fn new(lines: usize) -> Result<Self, ConfigError> {
        NonZeroUsize::new(lines)
            .map(Self)
            .ok_or(ConfigError::ChunkLimit(lines))
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for ChunkLimit {
    fn default() -> Self {
        Self(NonZeroUsize::new(DEFAULT_CHUNK_LIMIT).unwrap_or(NonZeroUsize::MIN))
    }
}

impl TryFrom<usize> for ChunkLimit {
    type Error = ConfigError;

    fn try_from(lines: usize) -> Result<Self, Self::Error> {
        Self::new(lines)
    }
}

impl From<ChunkLimit> for usize {
    fn from(limit: ChunkLimit) -> Self {
        limit.get()
    }
}

/// A read-only slice of one commit's recorded lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub commit_index: usize,
    pub chunk_index: usize,
    pub lines: &'a [String],
}

impl Chunk<'_> {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Chunk content with every line newline-terminated.
    pub fn text(&self) -> String {
        let capacity = self.lines.iter().map(|l| l.len() + 1).sum();
        let mut text = String::with_capacity(capacity);
        for line in self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }

    pub fn artifact_name(&self) -> String {
        format!("{}_{}.txt", self.commit_index, self.chunk_index)
    }

    pub fn summary_name(&self) -> String {
        format!("{}_{}.summary.txt", self.commit_index, self.chunk_index)
    }
}

/// Split a commit into consecutive chunks of at most `limit` lines.
/// A commit without recorded lines yields no chunks.
pub fn chunk(commit: &Commit, limit: ChunkLimit) -> Vec<Chunk<'_>> {
    commit
        .lines
        .chunks(limit.get())
        .enumerate()
        .map(|(chunk_index, lines)| Chunk {
            commit_index: commit.index,
            chunk_index,
            lines,
        })
        .collect()
}

/// Chunks of all commits, ordered by (commit_index, chunk_index).
pub fn chunk_all(commits: &[Commit], limit: ChunkLimit) -> Vec<Chunk<'_>> {
    commits.iter().flat_map(|c| chunk(c, limit)).collect()
}
