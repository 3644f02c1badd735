use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DelphiError;

/// Top-level configuration loaded from `.delphi.toml`.
///
/// Every field is defaulted, so an empty file (or no file at all)
/// yields a usable configuration.
///
/// # Examples
///
/// ```
/// use delphi_core::DelphiConfig;
///
/// let config = DelphiConfig::default();
/// assert_eq!(config.retrieval.top_k, 5);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DelphiConfig {
    /// Completion provider settings.
    #[serde(default)]
    pub llm: LlmConfig,
    /// Retrieval limits.
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

impl DelphiConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DelphiError::Io`] if the file cannot be read, or
    /// [`DelphiError::Toml`] if the content is not valid TOML.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use delphi_core::DelphiConfig;
    /// use std::path::Path;
    ///
    /// let config = DelphiConfig::from_file(Path::new(".delphi.toml")).unwrap();
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, DelphiError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`DelphiError::Toml`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use delphi_core::DelphiConfig;
    ///
    /// let toml = r#"
    /// [retrieval]
    /// top_k = 8
    /// "#;
    /// let config = DelphiConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.retrieval.top_k, 8);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, DelphiError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }
}

/// Completion provider configuration.
///
/// # Examples
///
/// ```
/// use delphi_core::LlmConfig;
///
/// let config = LlmConfig::default();
/// assert_eq!(config.model, "gpt-4-turbo");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider name (e.g. `"openai"`, `"ollama"`, `"vllm"`).
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Model identifier sent with every completion request.
    #[serde(default = "default_model")]
    pub model: String,
    /// API key for the provider. Falls back to the `OPENAI_API_KEY`
    /// environment variable when absent.
    pub api_key: Option<String>,
    /// Custom base URL for API requests.
    pub base_url: Option<String>,
}

fn default_provider() -> String {
    "openai".into()
}

fn default_model() -> String {
    "gpt-4-turbo".into()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            api_key: None,
            base_url: None,
        }
    }
}

impl LlmConfig {
    /// Resolve the API key from config, falling back to the
    /// `OPENAI_API_KEY` environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
    }
}

/// Retrieval limits for the three engine operations.
///
/// # Examples
///
/// ```
/// use delphi_core::RetrievalConfig;
///
/// let config = RetrievalConfig::default();
/// assert_eq!(config.top_k, 5);
/// assert_eq!(config.file_chunk_limit, 20);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Maximum chunks retrieved for query answering (default: 5).
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Maximum chunks fetched per file for the whole-file operations
    /// (default: 20).
    #[serde(default = "default_file_chunk_limit")]
    pub file_chunk_limit: usize,
}

fn default_top_k() -> usize {
    5
}

fn default_file_chunk_limit() -> usize {
    20
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            file_chunk_limit: default_file_chunk_limit(),
        }
    }
}
