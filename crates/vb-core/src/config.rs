//! Configuration management
//!
//! Settings are resolved in the following order:
//! 1. Environment variables
//! 2. vb-gateway.toml config file
//! 3. Default values
//!
//! Inside the config file, `${VAR_NAME}` expands to the value of the
//! corresponding environment variable.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Error;

/// Default config file name, looked up in the current directory
const CONFIG_FILE: &str = "vb-gateway.toml";

/// Chat completion (Groq) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key
    pub api_key: String,

    /// Model to use
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Base URL (optional, for custom endpoints)
    pub base_url: Option<String>,

    /// Port for the response-and-emotion HTTP server
    #[serde(default = "default_response_port")]
    pub port: u16,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_llm_model(),
            base_url: None,
            port: default_response_port(),
        }
    }
}

impl LlmConfig {
    /// The credential is read once at startup and held immutably for the
    /// process lifetime; an empty key is a fatal startup condition.
    pub fn require_api_key(&self) -> crate::Result<()> {
        if self.api_key.is_empty() {
            return Err(Error::Config(
                "Missing GROQ_API_KEY. Set it in your environment or .env file.".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_llm_model() -> String {
    "meta-llama/llama-4-scout-17b-16e-instruct".to_string()
}

fn default_response_port() -> u16 {
    8001
}

/// Speech-to-text-translate (Sarvam) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SttConfig {
    /// API subscription key
    pub api_key: String,

    /// Default translation model
    #[serde(default = "default_stt_model")]
    pub model: String,

    /// Base URL (optional, for custom endpoints)
    pub base_url: Option<String>,

    /// Port for the speech-to-text-translate HTTP server
    #[serde(default = "default_stt_port")]
    pub port: u16,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_stt_model(),
            base_url: None,
            port: default_stt_port(),
        }
    }
}

impl SttConfig {
    /// Same lifecycle as [`LlmConfig::require_api_key`], distinct credential.
    pub fn require_api_key(&self) -> crate::Result<()> {
        if self.api_key.is_empty() {
            return Err(Error::Config(
                "Missing SARVAM_API_KEY. Set it in your environment or .env file.".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_stt_model() -> String {
    "saaras:v2".to_string()
}

fn default_stt_port() -> u16 {
    8000
}

/// Main configuration for vb-gateway
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Chat completion configuration
    #[serde(default)]
    pub llm: LlmConfig,

    /// Speech-to-text-translate configuration
    #[serde(default)]
    pub stt: SttConfig,
}

impl Config {
    /// Expand `${VAR_NAME}` occurrences to environment variable values.
    ///
    /// Unknown variables expand to the empty string.
    fn expand_env_vars(value: &str) -> String {
        let mut result = String::new();
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next(); // consume '{'

                let mut var_name = String::new();
                while let Some(&c) = chars.peek() {
                    if c == '}' {
                        chars.next(); // consume '}'
                        break;
                    }
                    var_name.push(chars.next().unwrap());
                }

                if let Ok(env_value) = std::env::var(&var_name) {
                    result.push_str(&env_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// Load configuration from a TOML file.
    ///
    /// `${VAR_NAME}` in the file is replaced with the environment variable's
    /// value before parsing. Environment variables still take precedence
    /// over values from the file.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();

        let toml_content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let expanded_content = Self::expand_env_vars(&toml_content);

        let config: TomlConfig = toml::from_str(&expanded_content)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;

        let mut cfg = Self::from_toml_config(config);
        cfg.apply_env_overrides();

        Ok(cfg)
    }

    /// Load configuration from the default locations.
    ///
    /// Tries `./vb-gateway.toml` first and falls back to environment
    /// variables only.
    pub fn load() -> crate::Result<Self> {
        if Path::new(CONFIG_FILE).exists() {
            return Self::from_toml_file(CONFIG_FILE);
        }

        Self::from_env()
    }

    /// Build a Config from the parsed TOML structure
    fn from_toml_config(toml: TomlConfig) -> Self {
        let llm = toml.llm.unwrap_or_default();
        let llm_config = LlmConfig {
            api_key: llm.api_key.unwrap_or_default(),
            model: llm.model.unwrap_or_else(default_llm_model),
            base_url: llm.base_url,
            port: llm.port.unwrap_or_else(default_response_port),
        };

        let stt = toml.stt.unwrap_or_default();
        let stt_config = SttConfig {
            api_key: stt.api_key.unwrap_or_default(),
            model: stt.model.unwrap_or_else(default_stt_model),
            base_url: stt.base_url,
            port: stt.port.unwrap_or_else(default_stt_port),
        };

        Config {
            llm: llm_config,
            stt: stt_config,
        }
    }

    /// Override configuration with environment variables
    fn apply_env_overrides(&mut self) {
        if let Ok(api_key) = std::env::var("GROQ_API_KEY") {
            self.llm.api_key = api_key;
        }
        if let Ok(model) = std::env::var("GROQ_MODEL") {
            if !model.is_empty() {
                self.llm.model = model;
            }
        }
        if let Ok(base_url) = std::env::var("GROQ_BASE_URL") {
            if !base_url.is_empty() {
                self.llm.base_url = Some(base_url);
            }
        }
        if let Ok(port) = std::env::var("RESPONSE_PORT") {
            if let Ok(p) = port.parse() {
                self.llm.port = p;
            }
        }

        if let Ok(api_key) = std::env::var("SARVAM_API_KEY") {
            self.stt.api_key = api_key;
        }
        if let Ok(model) = std::env::var("SARVAM_MODEL") {
            if !model.is_empty() {
                self.stt.model = model;
            }
        }
        if let Ok(base_url) = std::env::var("SARVAM_BASE_URL") {
            if !base_url.is_empty() {
                self.stt.base_url = Some(base_url);
            }
        }
        if let Ok(port) = std::env::var("STT_PORT") {
            if let Ok(p) = port.parse() {
                self.stt.port = p;
            }
        }
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();
        config.apply_env_overrides();
        Ok(config)
    }
}

// ============================================================================
// TOML structures (file parsing)
// ============================================================================

/// Top-level structure of vb-gateway.toml
#[derive(Debug, Deserialize)]
struct TomlConfig {
    llm: Option<TomlLlmConfig>,
    stt: Option<TomlSttConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlLlmConfig {
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    port: Option<u16>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlSttConfig {
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    port: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_config_default() {
        let config = LlmConfig::default();
        assert_eq!(config.model, "meta-llama/llama-4-scout-17b-16e-instruct");
        assert_eq!(config.port, 8001);
        assert!(config.api_key.is_empty());
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_stt_config_default() {
        let config = SttConfig::default();
        assert_eq!(config.model, "saaras:v2");
        assert_eq!(config.port, 8000);
        assert!(config.api_key.is_empty());
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_require_api_key_missing() {
        let llm = LlmConfig::default();
        let err = llm.require_api_key().unwrap_err();
        assert!(err.to_string().contains("GROQ_API_KEY"));

        let stt = SttConfig::default();
        let err = stt.require_api_key().unwrap_err();
        assert!(err.to_string().contains("SARVAM_API_KEY"));
    }

    #[test]
    fn test_require_api_key_present() {
        let llm = LlmConfig {
            api_key: "gsk-test".to_string(),
            ..LlmConfig::default()
        };
        assert!(llm.require_api_key().is_ok());
    }

    #[test]
    fn test_expand_env_vars() {
        unsafe {
            std::env::set_var("VB_GATEWAY_TEST_VAR", "test_value");
        }

        let result = Config::expand_env_vars("prefix_${VB_GATEWAY_TEST_VAR}_suffix");
        assert_eq!(result, "prefix_test_value_suffix");

        // Unknown variables expand to the empty string
        let result = Config::expand_env_vars("prefix_${NONEXISTENT_VAR}_suffix");
        assert_eq!(result, "prefix__suffix");

        unsafe {
            std::env::remove_var("VB_GATEWAY_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_env_vars_no_braces() {
        let result = Config::expand_env_vars("no_vars_here");
        assert_eq!(result, "no_vars_here");
    }

    #[test]
    fn test_toml_config_parsing() {
        let toml_content = r#"
[llm]
api_key = "gsk_test"
model = "llama-test"
base_url = "https://api.example.com/openai/v1"
port = 9001

[stt]
api_key = "sarvam_test"
port = 9000
"#;

        let toml_config: TomlConfig = toml::from_str(toml_content).unwrap();
        let config = Config::from_toml_config(toml_config);

        assert_eq!(config.llm.api_key, "gsk_test");
        assert_eq!(config.llm.model, "llama-test");
        assert_eq!(
            config.llm.base_url,
            Some("https://api.example.com/openai/v1".to_string())
        );
        assert_eq!(config.llm.port, 9001);

        assert_eq!(config.stt.api_key, "sarvam_test");
        // Unset values fall back to defaults
        assert_eq!(config.stt.model, "saaras:v2");
        assert!(config.stt.base_url.is_none());
        assert_eq!(config.stt.port, 9000);
    }

    #[test]
    fn test_toml_config_empty_sections() {
        let toml_config: TomlConfig = toml::from_str("").unwrap();
        let config = Config::from_toml_config(toml_config);

        assert!(config.llm.api_key.is_empty());
        assert_eq!(config.llm.port, 8001);
        assert_eq!(config.stt.port, 8000);
    }
}
