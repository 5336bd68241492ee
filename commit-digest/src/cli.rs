//! CLI interface for commit-digest: command parsing and orchestration glue.
//!
//! All segmentation and chunking logic lives in `commit-digest-core`. This
//! module only maps arguments and the loaded config onto the core pipeline
//! and its collaborators (git or file log reader, file writer, LLM client).
use crate::load_config::{inject_api_key, read_config};
use crate::summarise::LLMClient;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commit_digest_core::contract::{LogReader, Summariser};
use commit_digest_core::log_reader::{FileLogReader, GitLogReader};
use commit_digest_core::pipeline::{digest, DigestOptions, DigestReport};
use commit_digest_core::writer::FileArtifactWriter;
use std::path::PathBuf;

/// CLI for commit-digest: split a git log into per-commit chunks.
#[derive(Parser)]
#[clap(
    name = "commit-digest",
    version,
    about = "Split a git log into filtered per-commit chunks and optionally summarise them"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read the log, write one file per chunk and (optionally) its summary
    Digest {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        /// Only include commits newer than this date (overrides log.since)
        #[clap(long)]
        since: Option<String>,
        /// Directory for the chunk files (overrides output_dir)
        #[clap(long)]
        output_dir: Option<PathBuf>,
        /// Read a saved `git log -p` dump instead of invoking git
        #[clap(long)]
        log_file: Option<PathBuf>,
        /// Skip summarisation even if the config has a summarise section
        #[clap(long)]
        no_summarise: bool,
    },
}

/// Async CLI entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<DigestReport> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Digest {
            config,
            since,
            output_dir,
            log_file,
            no_summarise,
        } => {
            let mut config = read_config(config)?;
            if let Some(since) = since {
                config.log.since = since;
            }
            if let Some(output_dir) = output_dir {
                config.output_dir = output_dir;
            }
            if no_summarise {
                config.summarise = None;
            }
            // Only after the overrides: --no-summarise must not need a key.
            let api_key = inject_api_key(&config)?;
            tracing::info!(command = "digest", "Starting digest");

            let reader: Box<dyn LogReader> = match log_file {
                Some(path) => Box::new(FileLogReader::new(path)),
                None => Box::new(GitLogReader::new(
                    config.log.repo_path.clone(),
                    config.log.since.clone(),
                )),
            };
            let writer =
                FileArtifactWriter::new(config.output_dir.clone(), config.encoding);
            let summariser = match (&config.summarise, api_key) {
                (Some(section), Some(api_key)) => Some(
                    LLMClient::new(section, api_key).context("Failed to construct summariser")?,
                ),
                _ => None,
            };

            let options = DigestOptions::from(&config);
            let result = digest(
                &options,
                reader.as_ref(),
                &writer,
                summariser.as_ref().map(|s| s as &dyn Summariser),
            )
            .await;
            match result {
                Ok(report) => {
                    tracing::info!(
                        command = "digest",
                        commits = report.commits.len(),
                        chunks = report.chunk_count(),
                        "Digest complete"
                    );
                    Ok(report)
                }
                Err(e) => {
                    tracing::error!(command = "digest", error = %e, "Digest failed");
                    Err(anyhow::Error::new(e))
                }
            }
        }
    }
}
