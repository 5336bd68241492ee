use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, error};

use crate::contract::{ArtifactWriter, WrittenArtifact};
use crate::error::CollaboratorError;

/// Text encoding of written artifacts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputEncoding {
    #[default]
    Utf8,
    /// Little-endian UTF-16 without a byte order mark.
    Utf16Le,
}

impl OutputEncoding {
    pub fn encode(self, content: &str) -> Vec<u8> {
        match self {
            OutputEncoding::Utf8 => content.as_bytes().to_vec(),
            OutputEncoding::Utf16Le => content.encode_utf16().flat_map(u16::to_le_bytes).collect(),
        }
    }
}

/// Writes each artifact as its own file under `output_dir`.
#[derive(Debug, Clone)]
pub struct FileArtifactWriter {
    output_dir: PathBuf,
    encoding: OutputEncoding,
}

impl FileArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>, encoding: OutputEncoding) -> Self {
        Self {
            output_dir: output_dir.into(),
            encoding,
        }
    }

    pub fn output_dir(&self) -> &std::path::Path {
        &self.output_dir
    }
}

pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[async_trait::async_trait]
impl ArtifactWriter for FileArtifactWriter {
    async fn write(
        &self,
        name: &str,
        content: &str,
    ) -> Result<WrittenArtifact, CollaboratorError> {
        if !self.output_dir.exists() {
            fs::create_dir_all(&self.output_dir).map_err(|e| {
                error!(error = ?e, path = %self.output_dir.display(), "Failed to create output directory");
                e
            })?;
            debug!(path = %self.output_dir.display(), "Created output directory");
        }

        let path = self.output_dir.join(name);
        let bytes = self.encoding.encode(content);
        fs::write(&path, &bytes).map_err(|e| {
            error!(error = ?e, path = %path.display(), "Failed to write artifact");
            e
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), "Wrote artifact");

        Ok(WrittenArtifact {
            name: name.to_string(),
            path,
            bytes: bytes.len(),
            content_hash: content_hash(content),
        })
    }
}
