//! Browser settings.
//!
//! Settings are YAML. Before parsing, the text is rendered as a `tera`
//! template so values can come from the environment:
//!
//! ```yaml
//! baseline:
//!   location: {{ get_env(name="BASELINE_LOCATION", default="https://schema.org/version/latest/schemaorg-all-https.jsonld") }}
//!   prefix: schema
//! logger:
//!   level: debug
//!   format: json
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const DEFAULT_BASELINE_LOCATION: &str =
    "https://schema.org/version/latest/schemaorg-all-https.jsonld";
const DEFAULT_BASELINE_PREFIX: &str = "schema";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BrowserSettings {
    pub baseline: BaselineSettings,
    pub logger: LoggerSettings,
}

/// The upper vocabulary merged into every session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BaselineSettings {
    /// URL of the baseline document, or the document itself.
    pub location: String,
    /// Vocabulary name of the baseline, excluded from session listings.
    pub prefix: String,
}

impl Default for BaselineSettings {
    fn default() -> Self {
        Self {
            location: DEFAULT_BASELINE_LOCATION.to_string(),
            prefix: DEFAULT_BASELINE_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggerSettings {
    pub enable: bool,
    pub level: LogLevel,
    pub format: LogFormat,
    /// Full `EnvFilter` directive replacing the one built from `level`.
    pub override_filter: Option<String>,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            enable: true,
            level: LogLevel::default(),
            format: LogFormat::default(),
            override_filter: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

impl BrowserSettings {
    /// Renders `content` through tera, then parses the result as YAML.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let rendered = tera::Tera::one_off(content, &tera::Context::new(), false)?;
        Ok(serde_yaml::from_str(&rendered)?)
    }

    /// Reads settings from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|err| {
            Error::Message(format!("cannot read config `{}`: {err}", path.display()))
        })?;
        Self::from_yaml_str(&content)
    }
}
