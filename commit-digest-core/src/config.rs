use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::chunk::ChunkLimit;
use crate::error::ConfigError;
use crate::log_reader::DEFAULT_SINCE;
use crate::segment::SegmentRules;
use crate::writer::OutputEncoding;

pub const DEFAULT_CONCURRENCY: usize = 4;

/// Full configuration of a digest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestConfig {
    pub output_dir: PathBuf,
    #[serde(default)]
    pub log: LogSection,
    #[serde(default)]
    pub segment: SegmentRules,
    #[serde(default)]
    pub chunk_limit: ChunkLimit,
    #[serde(default)]
    pub encoding: OutputEncoding,
    #[serde(default)]
    pub summarise: Option<SummariseSection>,
}

/// Where the git log comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSection {
    #[serde(default = "default_repo_path")]
    pub repo_path: PathBuf,
    #[serde(default = "default_since")]
    pub since: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            repo_path: default_repo_path(),
            since: default_since(),
        }
    }
}

fn default_repo_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_since() -> String {
    DEFAULT_SINCE.to_string()
}

/// Remote summarisation settings. The API key is not part of the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummariseSection {
    pub endpoint: String,
    pub model: String,
    pub instruction: String,
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

impl DigestConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.segment.validate()?;
        if let Some(summarise) = &self.summarise {
            if summarise.concurrency == 0 {
                return Err(ConfigError::Concurrency(0));
            }
        }
        Ok(())
    }

    pub fn trace_loaded(&self) {
        info!(
            output_dir = %self.output_dir.display(),
            repo_path = %self.log.repo_path.display(),
            since = %self.log.since,
            chunk_limit = self.chunk_limit.get(),
            filter_groups = self.segment.filters.groups.len(),
            summarise = self.summarise.is_some(),
            "Loaded DigestConfig"
        );
        debug!(segment = ?self.segment, "Segment rules loaded (full debug)");
    }
}
