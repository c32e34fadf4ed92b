//! TOML configuration.
//!
//! Every key is optional:
//!
//! ```toml
//! poll_interval_ms = 10      # sleep between poll ticks
//! gamepad = 0                # native gamepad id; first connected when absent
//! backend = "native"         # "native" | "xinput" (Windows)
//! test_duration_secs = 10    # how long `--test` streams changes
//! max_ticks = 1000           # stop the run loop after this many ticks
//! output = "log"             # "log" | "json"
//! channels = "all"           # "all" | "analog" | "digital"
//! ```

use crate::error::{Error, Result};
use crate::eventbus::ChannelFilter;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Native,
    XInput,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Log,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub poll_interval_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gamepad: Option<usize>,
    pub backend: BackendKind,
    pub test_duration_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ticks: Option<u64>,
    pub output: OutputFormat,
    pub channels: ChannelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_interval_ms: 10,
            gamepad: None,
            backend: BackendKind::Native,
            test_duration_secs: 10,
            max_ticks: None,
            output: OutputFormat::Log,
            channels: ChannelFilter::All,
        }
    }
}

impl Config {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|e| Error::NoFile(path.to_owned(), e))?;
        Self::from_str(&s, path)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str<P: AsRef<Path>>(s: &str, path: P) -> Result<Self> {
        let path: PathBuf = path.as_ref().to_owned();
        let config: Config =
            toml::from_str(s).map_err(|e| Error::TomlParseFailure(path, e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(Error::InvalidConfig(
                "poll_interval_ms must be greater than 0".into(),
            ));
        }
        if self.backend == BackendKind::XInput && !cfg!(all(windows, feature = "xinput")) {
            return Err(Error::InvalidConfig(
                "the xinput backend is only available on Windows builds with the `xinput` feature"
                    .into(),
            ));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn test_duration(&self) -> Duration {
        Duration::from_secs(self.test_duration_secs)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::InvalidConfig(e.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_empty_is_default() {
        let c = Config::from_str("", "empty.toml").unwrap();
        assert_eq!(c, Config::default());
        assert_eq!(c.poll_interval(), Duration::from_millis(10));
        assert_eq!(c.test_duration(), Duration::from_secs(10));
    }

    #[test]
    fn test_parse_all_keys() {
        let s = r#"
poll_interval_ms = 5
gamepad = 2
backend = "native"
test_duration_secs = 3
max_ticks = 100
output = "json"
channels = "digital"
"#;
        let c = Config::from_str(s, "a.toml").unwrap();
        assert_eq!(c.poll_interval_ms, 5);
        assert_eq!(c.gamepad, Some(2));
        assert_eq!(c.max_ticks, Some(100));
        assert_eq!(c.output, OutputFormat::Json);
        assert_eq!(c.channels, ChannelFilter::Digital);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            Config::from_str("poll_interval_ms = 0", "a.toml"),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Config::from_str("unknown_key = 1", "a.toml"),
            Err(Error::TomlParseFailure(..))
        ));
        assert!(matches!(
            Config::from_str("output = \"xml\"", "a.toml"),
            Err(Error::TomlParseFailure(..))
        ));
    }

    #[test]
    fn test_default_round_trips_through_toml() {
        let s = Config::default().to_toml().unwrap();
        assert_eq!(Config::from_str(&s, "default.toml").unwrap(), Config::default());
    }
}
