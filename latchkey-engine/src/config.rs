use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Engine configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Simulated inbound refresh delay in milliseconds.
    pub refresh_delay_ms: u64,
    /// Simulated outbound publish delay in milliseconds.
    pub publish_delay_ms: u64,
    /// Directory the decisions artifact is written to.
    pub export_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            refresh_delay_ms: 2_000,
            publish_delay_ms: 2_500,
            export_dir: PathBuf::from("."),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let refresh_delay_ms = match env::var("LATCHKEY_REFRESH_DELAY_MS") {
            Ok(value) => value
                .parse::<u64>()
                .context("LATCHKEY_REFRESH_DELAY_MS must be a valid number of milliseconds")?,
            Err(_) => defaults.refresh_delay_ms,
        };

        let publish_delay_ms = match env::var("LATCHKEY_PUBLISH_DELAY_MS") {
            Ok(value) => value
                .parse::<u64>()
                .context("LATCHKEY_PUBLISH_DELAY_MS must be a valid number of milliseconds")?,
            Err(_) => defaults.publish_delay_ms,
        };

        let export_dir = env::var("LATCHKEY_EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.export_dir);

        Ok(Self {
            refresh_delay_ms,
            publish_delay_ms,
            export_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_simulated_collaborator_timings() {
        let config = EngineConfig::default();
        assert_eq!(config.refresh_delay_ms, 2_000);
        assert_eq!(config.publish_delay_ms, 2_500);
        assert_eq!(config.export_dir, PathBuf::from("."));
    }
}
