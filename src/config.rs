use crate::classifier::{CommandClassifier, LabelMapping};
use crate::decision::{DEFAULT_CONFIDENCE_THRESHOLD, DecisionEngine, DecisionError, Threshold};
use crate::input::DEFAULT_MIN_CHARS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding `decision.confidence_threshold`.
pub const THRESHOLD_ENV: &str = "CONFIDENCE_THRESHOLD";

pub const DEFAULT_MODEL: &str = "AhmadDS04/arabert-fake-news";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{var} must be a number, got '{value}'")]
    InvalidEnv { var: &'static str, value: String },
    #[error(transparent)]
    Invalid(#[from] DecisionError),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CliConfig {
    #[serde(default)]
    pub decision: DecisionConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DecisionConfig {
    pub confidence_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    pub min_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Program and arguments of the model host; empty when none is configured.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,
    pub model: String,
    pub real_label: String,
    pub fake_label: String,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            min_chars: DEFAULT_MIN_CHARS,
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        let labels = LabelMapping::default();
        Self {
            command: Vec::new(),
            model: DEFAULT_MODEL.to_string(),
            real_label: labels.real,
            fake_label: labels.fake,
        }
    }
}

impl CliConfig {
    /// Load from `path`, or from the default location when `path` is `None`.
    ///
    /// A missing default file yields the defaults; a missing explicit file is
    /// an error. Values are not validated here, see [`CliConfig::threshold`].
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match Self::config_file_path() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };

        match std::fs::read_to_string(&path) {
            Ok(content) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::from_toml(&content, &path)
            }
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }

    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `CONFIDENCE_THRESHOLD` from the environment, if set.
    pub fn apply_env(mut self) -> Result<Self, ConfigError> {
        if let Some(raw) = std::env::var_os(THRESHOLD_ENV) {
            let raw = raw.to_string_lossy();
            let raw = raw.trim();
            if !raw.is_empty() {
                self.decision.confidence_threshold =
                    raw.parse().map_err(|_| ConfigError::InvalidEnv {
                        var: THRESHOLD_ENV,
                        value: raw.to_string(),
                    })?;
            }
        }
        Ok(self)
    }

    pub fn with_threshold(mut self, threshold: Option<f64>) -> Self {
        if let Some(t) = threshold {
            self.decision.confidence_threshold = t;
        }
        self
    }

    pub fn threshold(&self) -> Result<Threshold, ConfigError> {
        Ok(Threshold::new(self.decision.confidence_threshold)?)
    }

    pub fn engine(&self) -> Result<DecisionEngine, ConfigError> {
        Ok(DecisionEngine::new(self.threshold()?))
    }

    pub fn labels(&self) -> LabelMapping {
        LabelMapping::new(
            self.classifier.real_label.clone(),
            self.classifier.fake_label.clone(),
        )
    }

    pub fn command_classifier(&self) -> Option<CommandClassifier> {
        CommandClassifier::from_argv(&self.classifier.command)
            .map(|c| c.model(self.classifier.model.clone()))
    }

    pub fn config_file_path() -> Option<PathBuf> {
        Self::config_dir().map(|mut path| {
            path.push("config.toml");
            path
        })
    }

    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("newscheck");
            path
        })
    }
}
