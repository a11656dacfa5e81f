use std::env;
use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use little_chat_openai_model::{
    DEFAULT_MODEL, OpenAIConfig, OpenAIConfigBuilder,
};

/// Errors that prevent a session from starting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The API key variable is unset or empty.
    MissingApiKey,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingApiKey => write!(
                f,
                "Please set the {} environment variable to your Groq API key, \
                 from here: https://console.groq.com/keys.",
                Config::API_KEY_VAR
            ),
        }
    }
}

impl Error for ConfigError {}

/// Startup configuration, read once and passed to the session.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    api_key: String,
    model: Option<String>,
    base_url: Option<String>,
}

impl Config {
    /// Holds the credential. Required.
    pub const API_KEY_VAR: &'static str = "API_KEY";
    /// Overrides the model identifier.
    pub const MODEL_VAR: &'static str = "MODEL";
    /// Overrides the endpoint base URL.
    pub const BASE_URL_VAR: &'static str = "BASE_URL";

    /// Reads the configuration from the process environment.
    #[inline]
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable
    /// name to its value. Empty values count as unset.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = var(Self::API_KEY_VAR).ok_or(ConfigError::MissingApiKey)?;
        Ok(Self {
            api_key,
            model: var(Self::MODEL_VAR),
            base_url: var(Self::BASE_URL_VAR),
        })
    }

    /// Returns the model identifier to use.
    #[inline]
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// Returns `true` if no model was configured and the fallback is used.
    #[inline]
    pub fn uses_default_model(&self) -> bool {
        self.model.is_none()
    }

    /// Converts into the provider configuration.
    pub fn to_openai_config(&self) -> OpenAIConfig {
        let mut builder = OpenAIConfigBuilder::with_api_key(&self.api_key)
            .with_model(self.model());
        if let Some(base_url) = &self.base_url {
            builder = builder.with_base_url(base_url);
        }
        builder.build()
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<deducted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}
