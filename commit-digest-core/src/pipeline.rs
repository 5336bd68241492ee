//! High-level pipeline: read log → segment → chunk → write → (summarise).
//!
//! This module wires the pure segmentation core to its collaborators:
//!   - A [`LogReader`] supplies the full log as lines
//!   - The [`Segmenter`](crate::segment::Segmenter) groups recorded lines per commit
//!   - Every commit is split into chunks of at most `chunk_limit` lines
//!   - Each chunk is persisted through an [`ArtifactWriter`] as `<commit>_<chunk>.txt`
//!   - Optionally, every chunk is sent to a [`Summariser`] and the result is
//!     persisted as `<commit>_<chunk>.summary.txt`
//!
//! # Error Handling
//! Configuration is validated before the log is read. Any collaborator
//! failure aborts the run with a [`DigestError`]; nothing is retried.
//!
//! # Concurrency
//! Summarisation requests run with at most `concurrency` in flight. Results
//! come back in (commit_index, chunk_index) order regardless of completion order.

use futures::stream::{self, StreamExt, TryStreamExt};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::chunk::{chunk, Chunk, ChunkLimit};
use crate::config::{DigestConfig, DEFAULT_CONCURRENCY};
use crate::contract::{ArtifactWriter, LogReader, Summariser, WrittenArtifact};
use crate::error::{ConfigError, DigestError};
use crate::segment::{segment, SegmentRules};

/// What the pipeline needs from the configuration.
#[derive(Debug, Clone)]
pub struct DigestOptions {
    pub rules: SegmentRules,
    pub chunk_limit: ChunkLimit,
    /// Maximum number of summarisation requests in flight.
    pub concurrency: usize,
}

impl Default for DigestOptions {
    fn default() -> Self {
        Self {
            rules: SegmentRules::default(),
            chunk_limit: ChunkLimit::default(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl From<&DigestConfig> for DigestOptions {
    fn from(config: &DigestConfig) -> Self {
        Self {
            rules: config.segment.clone(),
            chunk_limit: config.chunk_limit,
            concurrency: config
                .summarise
                .as_ref()
                .map_or(DEFAULT_CONCURRENCY, |s| s.concurrency),
        }
    }
}

impl DigestOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rules.validate()?;
        if self.concurrency == 0 {
            return Err(ConfigError::Concurrency(self.concurrency));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DigestReport {
    pub lines_read: usize,
    pub lines_recorded: usize,
    pub preamble_dropped: usize,
    pub commits: Vec<CommitReport>,
}

impl DigestReport {
    pub fn chunk_count(&self) -> usize {
        self.commits.iter().map(|c| c.chunks.len()).sum()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommitReport {
    pub commit_index: usize,
    pub lines_seen: usize,
    pub lines_recorded: usize,
    pub chunks: Vec<ChunkReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChunkReport {
    pub chunk_index: usize,
    pub lines: usize,
    pub artifact: WrittenArtifact,
    pub summary: Option<WrittenArtifact>,
}

pub async fn digest(
    options: &DigestOptions,
    reader: &dyn LogReader,
    writer: &dyn ArtifactWriter,
    summariser: Option<&dyn Summariser>,
) -> Result<DigestReport, DigestError> {
    options.validate().map_err(|e| {
        error!(error = %e, "[DIGEST][ERROR] Invalid configuration");
        e
    })?;
    info!(
        chunk_limit = options.chunk_limit.get(),
        summarise = summariser.is_some(),
        "[DIGEST] Starting digest pipeline"
    );

    // Step 1: Read
    let lines = reader.read_lines().await.map_err(|e| {
        error!(error = %e, "[DIGEST][ERROR] Reading log failed");
        DigestError::Read(e)
    })?;
    let lines_read = lines.len();
    info!(lines = lines_read, "[DIGEST] Log read");

    // Step 2: Segment
    let segmentation = segment(&options.rules, lines)?;

    // Step 3: Chunk and write
    let mut commits = Vec::with_capacity(segmentation.commits.len());
    let mut chunks: Vec<Chunk<'_>> = Vec::new();
    for commit in &segmentation.commits {
        let commit_chunks = chunk(commit, options.chunk_limit);
        let mut chunk_reports = Vec::with_capacity(commit_chunks.len());
        for c in &commit_chunks {
            let artifact = write_artifact(writer, &c.artifact_name(), &c.text()).await?;
            chunk_reports.push(ChunkReport {
                chunk_index: c.chunk_index,
                lines: c.len(),
                artifact,
                summary: None,
            });
        }
        debug!(
            commit_index = commit.index,
            chunks = chunk_reports.len(),
            "[DIGEST] Commit written"
        );
        commits.push(CommitReport {
            commit_index: commit.index,
            lines_seen: commit.lines_seen,
            lines_recorded: commit.lines.len(),
            chunks: chunk_reports,
        });
        chunks.extend(commit_chunks);
    }
    info!(
        commits = commits.len(),
        chunks = chunks.len(),
        "[DIGEST] All chunks written"
    );

    // Step 4: Summarise
    if let Some(summariser) = summariser {
        let summaries = summarise_chunks(summariser, &chunks, options.concurrency).await?;
        for (c, summary) in chunks.iter().zip(summaries) {
            let artifact = write_artifact(writer, &c.summary_name(), &summary).await?;
            commits[c.commit_index].chunks[c.chunk_index].summary = Some(artifact);
        }
        info!(summaries = chunks.len(), "[DIGEST] All summaries written");
    }

    let report = DigestReport {
        lines_read,
        lines_recorded: segmentation.lines_recorded(),
        preamble_dropped: segmentation.preamble_dropped,
        commits,
    };
    match serde_json::to_string(&report) {
        Ok(json) => debug!(json = %json, "[DIGEST][DEBUG] Report as JSON"),
        Err(e) => error!(error = ?e, "[DIGEST][DEBUG] Failed to serialize report as JSON"),
    }
    Ok(report)
}

async fn write_artifact(
    writer: &dyn ArtifactWriter,
    name: &str,
    content: &str,
) -> Result<WrittenArtifact, DigestError> {
    writer.write(name, content).await.map_err(|source| {
        error!(artifact = name, error = %source, "[DIGEST][ERROR] Writing artifact failed");
        DigestError::Write {
            name: name.to_string(),
            source,
        }
    })
}

/// Summaries in the same order as `chunks`.
async fn summarise_chunks(
    summariser: &dyn Summariser,
    chunks: &[Chunk<'_>],
    concurrency: usize,
) -> Result<Vec<String>, DigestError> {
    let requests = chunks.iter().map(|c| {
        let prompt = c.text();
        let (commit_index, chunk_index) = (c.commit_index, c.chunk_index);
        async move {
            debug!(commit_index, chunk_index, "[DIGEST] Summarising chunk");
            summariser.summarise(&prompt).await.map_err(|source| {
                error!(commit_index, chunk_index, error = %source, "[DIGEST][ERROR] Summarisation failed");
                DigestError::Summarise {
                    commit_index,
                    chunk_index,
                    source,
                }
            })
        }
    });
    stream::iter(requests)
        .buffered(concurrency)
        .try_collect()
        .await
}
