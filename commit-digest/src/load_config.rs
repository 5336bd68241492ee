/// `load_config` module: loads a static YAML config and injects secrets from the environment.
///
/// This is the only place where user-supplied YAML is parsed. Rules, chunk
/// limits and tokens are validated here, before any git or network work starts.
///
/// # Errors
/// All errors use `anyhow::Error` with messages naming the file, the parse
/// step, the invalid setting or the missing environment variable.
use anyhow::Result;
use commit_digest_core::config::DigestConfig;
use std::fs;
use std::path::Path;
use tracing::{error, info};

/// Environment variable holding the summarisation API key.
pub const API_KEY_ENV: &str = "SUMMARY_API_KEY";

#[derive(Debug)]
pub struct LoadedConfig {
    pub digest: DigestConfig,
    /// Present whenever the config has a summarise section.
    pub api_key: Option<String>,
}

/// Reads, parses and validates the YAML file and injects the API key.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<LoadedConfig> {
    let digest = read_config(path)?;
    let api_key = inject_api_key(&digest)?;
    Ok(LoadedConfig { digest, api_key })
}

/// Reads, parses and validates the YAML file. No environment access.
pub fn read_config<P: AsRef<Path>>(path: P) -> Result<DigestConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let digest: DigestConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    if let Err(e) = digest.validate() {
        error!(error = %e, config_path = ?path_ref, "Invalid configuration");
        return Err(anyhow::anyhow!("Invalid configuration: {e}"));
    }

    digest.trace_loaded();
    Ok(digest)
}

/// Reads the API key from the environment when `digest` has a summarise section.
pub fn inject_api_key(digest: &DigestConfig) -> Result<Option<String>> {
    match &digest.summarise {
        Some(_) => match std::env::var(API_KEY_ENV) {
            Ok(key) => {
                info!("{API_KEY_ENV} found in env");
                Ok(Some(key))
            }
            Err(e) => {
                error!(error = ?e, "{API_KEY_ENV} environment variable not set");
                Err(anyhow::anyhow!(
                    "{API_KEY_ENV} environment variable not set: {e}"
                ))
            }
        },
        None => Ok(None),
    }
}
