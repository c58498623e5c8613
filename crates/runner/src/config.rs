//! Runner configuration and file loading

use crate::error::{RunnerError, RunnerResult};
use atoll_conversion::RateTable;
use atoll_strategy::TraderConfig;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::path::Path;

/// Configuration for a replay run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Product table for the fair value taker
    pub trader: TraderConfig,
    /// Capacity of the tick and order channels
    pub channel_capacity: usize,
    /// Delay between ticks during replay (0 = as fast as possible)
    pub tick_interval_ms: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            trader: TraderConfig::default(),
            channel_capacity: 1024,
            tick_interval_ms: 0,
        }
    }
}

impl RunnerConfig {
    /// Load and validate a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> RunnerResult<Self> {
        let config: Self = read_json(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> RunnerResult<()> {
        if self.channel_capacity == 0 {
            return Err(RunnerError::InvalidSetting(
                "channel_capacity must be at least 1".to_string(),
            ));
        }
        self.trader.validate()?;
        Ok(())
    }
}

/// Load and validate a `{from: {to: rate}}` JSON rate table
pub fn load_rate_table(path: impl AsRef<Path>) -> RunnerResult<RateTable> {
    let table: RateTable = read_json(path)?;
    table.validate()?;
    Ok(table)
}

/// Read a file and parse it as JSON
pub(crate) fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> RunnerResult<T> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| RunnerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| RunnerError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = RunnerConfig::default();
        assert_eq!(config.channel_capacity, 1024);
        assert_eq!(config.tick_interval_ms, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let file = write_temp(r#"{"tick_interval_ms": 5, "trader": {"position_limit": 20}}"#);
        let config = RunnerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.tick_interval_ms, 5);
        assert_eq!(config.trader.position_limit, 20);
        assert_eq!(config.trader.threshold_for("SQUID_INK"), 0.02);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let file = write_temp(r#"{"channel_capacity": 0}"#);
        assert!(matches!(
            RunnerConfig::from_file(file.path()),
            Err(RunnerError::InvalidSetting(_))
        ));

        let file = write_temp(
            r#"{"trader": {"products": {"KELP": {"default_fair_value": 100.0, "threshold": -0.1}}}}"#,
        );
        assert!(matches!(
            RunnerConfig::from_file(file.path()),
            Err(RunnerError::Config(_))
        ));

        let file = write_temp("{ not json");
        assert!(matches!(
            RunnerConfig::from_file(file.path()),
            Err(RunnerError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = RunnerConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, RunnerError::Io { .. }));
    }

    #[test]
    fn test_load_rate_table() {
        let file = write_temp(r#"{"A": {"B": 2.0}, "B": {"A": 0.4}}"#);
        let table = load_rate_table(file.path()).unwrap();
        assert_eq!(table.rate("B", "A"), Some(0.4));

        let file = write_temp(r#"{"A": {"B": -2.0}}"#);
        assert!(matches!(
            load_rate_table(file.path()),
            Err(RunnerError::Conversion(_))
        ));
    }
}
