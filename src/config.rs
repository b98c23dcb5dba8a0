use crate::debugger::Debugger;
use crate::filter::FilterParseError;
use crate::writer::{LineWriter, Sink};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Environment variable holding the debug specification
pub const SPEC_ENV: &str = "DEBUG";
/// Environment variable selecting the output: `stderr`, `stdout` or a file path
///
/// The keywords match case-insensitively; anything else is used as a path verbatim.
pub const OUTPUT_ENV: &str = "DEBUG_OUTPUT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to open debug output '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Filter(#[from] FilterParseError),
}

/// Where debug lines are written
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    #[default]
    Stderr,
    Stdout,
    /// Appended to, created if missing
    File(PathBuf),
}

impl FromStr for OutputTarget {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.to_lowercase().as_str() {
            "" | "stderr" => OutputTarget::Stderr,
            "stdout" => OutputTarget::Stdout,
            _ => OutputTarget::File(PathBuf::from(s)),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Comma-separated globs; `-` prefix excludes. Empty enables nothing.
    pub spec: String,
    pub output: OutputTarget,
}

impl DebugConfig {
    /// Defaults overlaid with `DEBUG` and `DEBUG_OUTPUT`
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay values found through `lookup` (keyed by environment variable name)
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(spec) = lookup(SPEC_ENV) {
            self.spec = spec;
        }
        if let Some(output) = lookup(OUTPUT_ENV) {
            self.output = output.parse().unwrap_or_default();
        }
        self
    }

    pub fn open_sink(&self) -> Result<Sink, ConfigError> {
        match &self.output {
            OutputTarget::Stderr => Ok(Box::new(io::stderr())),
            OutputTarget::Stdout => Ok(Box::new(io::stdout())),
            OutputTarget::File(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|source| ConfigError::Open {
                        path: path.display().to_string(),
                        source,
                    })?;
                Ok(Box::new(file))
            }
        }
    }

    /// Compile the specification and open the output
    pub fn build(&self) -> Result<Debugger, ConfigError> {
        let sink = self.open_sink()?;
        Ok(Debugger::with_writer(&self.spec, LineWriter::new(sink))?)
    }
}

pub fn load_config(path: Option<&Path>) -> Result<DebugConfig, ConfigError> {
    if let Some(path) = path {
        load_config_from_path(path)
    } else {
        Ok(DebugConfig::default())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<DebugConfig, ConfigError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_display.clone(),
        source,
    })?;

    toml::from_str::<DebugConfig>(&raw).map_err(|source| ConfigError::Parse {
        path: path_display,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DebugConfig::default();
        assert_eq!(config.spec, "");
        assert_eq!(config.output, OutputTarget::Stderr);
    }

    #[test]
    fn test_env_overrides() {
        let config = DebugConfig::default().with_env_overrides(lookup(&[
            ("DEBUG", "app:*,-app:db"),
            ("DEBUG_OUTPUT", "stdout"),
        ]));
        assert_eq!(config.spec, "app:*,-app:db");
        assert_eq!(config.output, OutputTarget::Stdout);
    }

    #[test]
    fn test_missing_env_keeps_values() {
        let config = DebugConfig {
            spec: "x".to_string(),
            output: OutputTarget::Stdout,
        }
        .with_env_overrides(lookup(&[]));
        assert_eq!(config.spec, "x");
        assert_eq!(config.output, OutputTarget::Stdout);
    }

    #[test]
    fn test_output_target_from_str() {
        assert_eq!("".parse::<OutputTarget>().unwrap(), OutputTarget::Stderr);
        assert_eq!("STDERR".parse::<OutputTarget>().unwrap(), OutputTarget::Stderr);
        assert_eq!("stdout".parse::<OutputTarget>().unwrap(), OutputTarget::Stdout);
        assert_eq!(
            "/tmp/debug.log".parse::<OutputTarget>().unwrap(),
            OutputTarget::File(PathBuf::from("/tmp/debug.log"))
        );
        assert_eq!(
            "Logs/Debug.LOG".parse::<OutputTarget>().unwrap(),
            OutputTarget::File(PathBuf::from("Logs/Debug.LOG"))
        );
    }

    #[test]
    fn test_parse_toml() {
        let config: DebugConfig = toml::from_str(
            r#"
            spec = "server:*,-server:health"
            output = { file = "/var/log/app-debug.log" }
            "#,
        )
        .unwrap();
        assert_eq!(config.spec, "server:*,-server:health");
        assert_eq!(
            config.output,
            OutputTarget::File(PathBuf::from("/var/log/app-debug.log"))
        );

        let config: DebugConfig = toml::from_str(r#"output = "stdout""#).unwrap();
        assert_eq!(config.spec, "");
        assert_eq!(config.output, OutputTarget::Stdout);
    }

    #[test]
    fn test_load_config_without_path_is_default() {
        let config = load_config(None).unwrap();
        assert_eq!(config.spec, "");
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let err = load_config_from_path(Path::new("/nonexistent/nsdebug.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
