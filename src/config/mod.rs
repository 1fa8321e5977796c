//! Configuration system (layered: built-in defaults < config file < env).

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{ColloqError, Result};
use crate::models::ChatModel;
use crate::session::{validate_temperature, SessionConfig, DEFAULT_TEMPERATURE};
use crate::transport::http::DEFAULT_TIMEOUT;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a friendly, helpful, and concise assistant that answers clearly and professionally.";
pub const DEFAULT_AGENT_NAME: &str = "assistant";

pub const API_KEY_VAR: &str = "GROQ_API_KEY";
pub const BASE_URL_VAR: &str = "GROQ_BASE_URL";
pub const MODEL_VAR: &str = "COLLOQ_MODEL";
pub const TEMPERATURE_VAR: &str = "COLLOQ_TEMPERATURE";
pub const SYSTEM_PROMPT_VAR: &str = "COLLOQ_SYSTEM_PROMPT";
pub const TIMEOUT_VAR: &str = "COLLOQ_TIMEOUT_SECS";

/// Session parameters new conversations start from.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionDefaults {
    pub name: String,
    pub model: ChatModel,
    pub temperature: f64,
    pub system_prompt: Option<String>,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            name: DEFAULT_AGENT_NAME.to_string(),
            model: ChatModel::default(),
            temperature: DEFAULT_TEMPERATURE,
            system_prompt: Some(DEFAULT_SYSTEM_PROMPT.to_string()),
        }
    }
}

/// On-disk configuration (`~/.colloq/config.toml`).
///
/// ```toml
/// base_url = "https://api.groq.com/openai/v1"
/// timeout_secs = 60
///
/// [defaults]
/// model = "llama-3.1-8b-instant"
/// temperature = 0.3
/// system_prompt = "You are a terse assistant."
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub defaults: FileDefaults,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileDefaults {
    pub name: Option<String>,
    pub model: Option<ChatModel>,
    pub temperature: Option<f64>,
    pub system_prompt: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ColloqError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::parse(&raw)
            .map_err(|e| ColloqError::Configuration(format!("{}: {e}", path.display())))
    }

    pub fn parse(raw: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}

/// Default location of the config file, if a home directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    directories::UserDirs::new().map(|dirs| dirs.home_dir().join(".colloq").join("config.toml"))
}

/// Resolved runtime configuration.
///
/// The credential comes from the environment only; it is never read from the
/// config file and never printed.
#[derive(Clone)]
pub struct ColloqConfig {
    api_key: String,
    base_url: String,
    timeout: Duration,
    defaults: SessionDefaults,
}

impl fmt::Debug for ColloqConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColloqConfig")
            .field("api_key", &"..")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("defaults", &self.defaults)
            .finish()
    }
}

impl ColloqConfig {
    /// Config with built-in defaults and the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            defaults: SessionDefaults::default(),
        }
    }

    /// Load `.env` (if present), the default config file (if present) and the
    /// process environment.
    pub fn from_env() -> Result<Self> {
        Self::load(None, None)
    }

    /// Like [`from_env`](Self::from_env), with explicit files. Explicit paths
    /// must exist.
    pub fn load(env_file: Option<&Path>, config_file: Option<&Path>) -> Result<Self> {
        match env_file {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| {
                    ColloqError::Configuration(format!("cannot load {}: {e}", path.display()))
                })?;
            }
            None => {
                let _ = dotenvy::dotenv(); // load .env if present, ignore error
            }
        }

        let file = match config_file {
            Some(path) => Some(FileConfig::load(path)?),
            None => match default_config_path() {
                Some(path) if path.exists() => Some(FileConfig::load(&path)?),
                _ => None,
            },
        };

        Self::resolve(file, |var| std::env::var(var).ok())
    }

    /// Merge a parsed file layer and an environment lookup over the defaults.
    pub fn resolve(
        file: Option<FileConfig>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let env = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        let api_key = env(API_KEY_VAR)
            .ok_or_else(|| ColloqError::Configuration(format!("Missing {API_KEY_VAR}")))?;
        let mut config = Self::new(api_key.trim());

        if let Some(file) = file {
            if let Some(url) = file.base_url {
                config.base_url = url;
            }
            if let Some(secs) = file.timeout_secs {
                config.timeout = timeout_from_secs(secs)?;
            }
            let defaults = file.defaults;
            if let Some(name) = defaults.name {
                config.defaults.name = name;
            }
            if let Some(model) = defaults.model {
                config.defaults.model = model;
            }
            if let Some(temperature) = defaults.temperature {
                config.defaults.temperature = temperature;
            }
            if let Some(prompt) = defaults.system_prompt {
                config.defaults.system_prompt = Some(prompt);
            }
        }

        if let Some(url) = env(BASE_URL_VAR) {
            config.base_url = url;
        }
        if let Some(raw) = env(TIMEOUT_VAR) {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                ColloqError::Configuration(format!("{TIMEOUT_VAR} must be whole seconds, got {raw:?}"))
            })?;
            config.timeout = timeout_from_secs(secs)?;
        }
        if let Some(model) = env(MODEL_VAR) {
            config.defaults.model = ChatModel::from(model.trim());
        }
        if let Some(raw) = env(TEMPERATURE_VAR) {
            config.defaults.temperature = raw.trim().parse::<f64>().map_err(|_| {
                ColloqError::Configuration(format!("{TEMPERATURE_VAR} must be a number, got {raw:?}"))
            })?;
        }
        // An explicitly empty prompt disables the system turn.
        if let Some(prompt) = lookup(SYSTEM_PROMPT_VAR) {
            config.defaults.system_prompt = Some(prompt);
        }

        validate_temperature(config.defaults.temperature)
            .map_err(|e| ColloqError::Configuration(e.to_string()))?;

        Ok(config)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_defaults(mut self, defaults: SessionDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn defaults(&self) -> &SessionDefaults {
        &self.defaults
    }

    /// Session parameters built from the configured defaults.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::builder()
            .name(self.defaults.name.clone())
            .model(self.defaults.model.clone())
            .temperature(self.defaults.temperature)
            .maybe_system_prompt(self.defaults.system_prompt.clone())
            .build()
    }
}

fn timeout_from_secs(secs: u64) -> Result<Duration> {
    if secs == 0 {
        return Err(ColloqError::Configuration(
            "timeout must be at least one second".into(),
        ));
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_api_key_is_fatal() {
        let err = ColloqConfig::resolve(None, env(&[])).unwrap_err();
        assert!(matches!(err, ColloqError::Configuration(ref m) if m.contains("GROQ_API_KEY")));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let err = ColloqConfig::resolve(None, env(&[(API_KEY_VAR, "  ")])).unwrap_err();
        assert!(matches!(err, ColloqError::Configuration(_)));
    }

    #[test]
    fn env_only_uses_builtin_defaults() {
        let config = ColloqConfig::resolve(None, env(&[(API_KEY_VAR, "gsk_abc")])).unwrap();
        assert_eq!(config.api_key(), "gsk_abc");
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(config.defaults(), &SessionDefaults::default());
    }

    #[test]
    fn env_overrides_file() {
        let file = FileConfig::parse(
            r#"
            base_url = "http://file.example/v1"
            timeout_secs = 30

            [defaults]
            model = "gemma2-9b-it"
            temperature = 1.5
            "#,
        )
        .unwrap();
        let config = ColloqConfig::resolve(
            Some(file),
            env(&[
                (API_KEY_VAR, "k"),
                (BASE_URL_VAR, "http://env.example/v1"),
                (TEMPERATURE_VAR, "0.2"),
            ]),
        )
        .unwrap();

        assert_eq!(config.base_url(), "http://env.example/v1");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.defaults().model, ChatModel::Gemma2_9bIt);
        assert_eq!(config.defaults().temperature, 0.2);
    }

    #[test]
    fn out_of_range_temperature_is_a_config_error() {
        let err = ColloqConfig::resolve(None, env(&[(API_KEY_VAR, "k"), (TEMPERATURE_VAR, "3")]))
            .unwrap_err();
        assert!(matches!(err, ColloqError::Configuration(_)));

        let err = ColloqConfig::resolve(None, env(&[(API_KEY_VAR, "k"), (TEMPERATURE_VAR, "hot")]))
            .unwrap_err();
        assert!(matches!(err, ColloqError::Configuration(_)));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = ColloqConfig::resolve(None, env(&[(API_KEY_VAR, "k"), (TIMEOUT_VAR, "0")]))
            .unwrap_err();
        assert!(matches!(err, ColloqError::Configuration(_)));
    }

    #[test]
    fn empty_system_prompt_var_disables_seed() {
        let config =
            ColloqConfig::resolve(None, env(&[(API_KEY_VAR, "k"), (SYSTEM_PROMPT_VAR, "")])).unwrap();
        let session = crate::session::ConversationSession::new(config.session_config()).unwrap();
        assert!(session.is_empty());
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        assert!(FileConfig::parse("api_key = \"nope\"").is_err());
    }

    #[test]
    fn debug_output_redacts_key() {
        let config = ColloqConfig::new("gsk_secret");
        assert!(!format!("{config:?}").contains("gsk_secret"));
    }
}
