//! Streaming segmentation of a git log dump into per-commit line buffers.
//!
//! Every line goes through four steps, in a fixed order:
//! 1. boundary: a line starting with the commit token opens a new commit;
//! 2. reset: a line passing the reset group turns recording back on;
//! 3. suppression: a line passing the filter set turns recording off;
//! 4. append: while recording, the line goes into the current commit.
//!
//! Later steps win over earlier ones for the same line, so a line that
//! matches both the reset rule and a filter is not recorded.
//! Lines before the first commit boundary are dropped.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::matcher::{FilterSet, Group, Matcher};

pub const DEFAULT_COMMIT_TOKEN: &str = "commit ";
pub const DEFAULT_DIFF_TOKEN: &str = "diff ";

/// Configuration of the segmentation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentRules {
    /// Prefix marking the start of a new commit record.
    pub commit_token: String,
    /// Group that re-enables recording, typically the per-file diff header.
    pub reset: Group,
    /// Any passing group suppresses recording until the next reset.
    pub filters: FilterSet,
}

impl Default for SegmentRules {
    /// Drops `[package]` manifest sections and every diff section whose
    /// header does not mention a `.rs` path.
    fn default() -> Self {
        Self {
            commit_token: DEFAULT_COMMIT_TOKEN.to_string(),
            reset: Matcher::starts_with(DEFAULT_DIFF_TOKEN).into(),
            filters: FilterSet::new(vec![
                Matcher::contains("[package]").into(),
                Group::new(vec![
                    Matcher::starts_with(DEFAULT_DIFF_TOKEN),
                    Matcher::contains(".rs").negated(),
                ]),
            ]),
        }
    }
}

impl SegmentRules {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.commit_token.is_empty() {
            return Err(ConfigError::EmptyCommitToken);
        }
        if self.reset.is_empty() {
            return Err(ConfigError::EmptyResetRule);
        }
        if self.reset.matchers.iter().any(|m| m.pattern.is_empty()) {
            return Err(ConfigError::EmptyPattern {
                rule: "reset".to_string(),
            });
        }
        for (i, group) in self.filters.groups.iter().enumerate() {
            // An empty group passes every line.
            if group.is_empty() {
                return Err(ConfigError::EmptyFilterGroup { index: i });
            }
            if group.matchers.iter().any(|m| m.pattern.is_empty()) {
                return Err(ConfigError::EmptyPattern {
                    rule: format!("filters[{i}]"),
                });
            }
        }
        Ok(())
    }

    fn is_boundary(&self, line: &str) -> bool {
        line.starts_with(self.commit_token.as_str())
    }
}

/// Recorded lines of one commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    /// Zero-based position in the order boundaries were encountered.
    pub index: usize,
    pub lines: Vec<String>,
    /// Every line assigned to this commit, recorded or not.
    pub lines_seen: usize,
}

impl Commit {
    fn new(index: usize) -> Self {
        Self {
            index,
            lines: Vec::new(),
            lines_seen: 0,
        }
    }
}

/// Result of a complete segmentation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    pub commits: Vec<Commit>,
    /// Lines seen before the first commit boundary.
    pub preamble_dropped: usize,
}

impl Segmentation {
    pub fn lines_recorded(&self) -> usize {
        self.commits.iter().map(|c| c.lines.len()).sum()
    }
}

/// State of one segmentation pass. Independent passes share nothing.
#[derive(Debug)]
pub struct Segmenter<'r> {
    rules: &'r SegmentRules,
    recording: bool,
    commits: Vec<Commit>,
    preamble_dropped: usize,
}

impl<'r> Segmenter<'r> {
    pub fn new(rules: &'r SegmentRules) -> Result<Self, ConfigError> {
        rules.validate()?;
        Ok(Self {
            rules,
            recording: true,
            commits: Vec::new(),
            preamble_dropped: 0,
        })
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();

        if self.rules.is_boundary(&line) {
            let index = self.commits.len();
            self.commits.push(Commit::new(index));
            debug!(commit_index = index, "New commit boundary");
        }

        if self.rules.reset.passes(&line) {
            self.recording = true;
        }

        if self.rules.filters.passes(&line) {
            self.recording = false;
        }

        let recording = self.recording;
        match self.commits.last_mut() {
            Some(commit) => {
                commit.lines_seen += 1;
                if recording {
                    commit.lines.push(line);
                }
            }
            None => self.preamble_dropped += 1,
        }
    }

    pub fn finish(self) -> Segmentation {
        let segmentation = Segmentation {
            commits: self.commits,
            preamble_dropped: self.preamble_dropped,
        };
        info!(
            commits = segmentation.commits.len(),
            lines_recorded = segmentation.lines_recorded(),
            preamble_dropped = segmentation.preamble_dropped,
            "Segmentation finished"
        );
        segmentation
    }
}

/// Run a whole pass over `lines`.
pub fn segment<I, S>(rules: &SegmentRules, lines: I) -> Result<Segmentation, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut segmenter = Segmenter::new(rules)?;
    for line in lines {
        segmenter.push(line);
    }
    Ok(segmenter.finish())
}
