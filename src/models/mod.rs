//! Chat model catalog.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Models served by the default endpoint.
///
/// Unknown identifiers parse into [`ChatModel::Custom`], so any model the
/// endpoint accepts can be selected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChatModel {
    Llama33_70bVersatile,
    Llama31_70bVersatile,
    Llama31_8bInstant,
    Mixtral8x7b32768,
    Gemma2_9bIt,
    /// Custom/unknown model by ID.
    Custom(String),
}

/// Relative response latency of a catalog model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum SpeedTier {
    Medium,
    Fast,
}

impl ChatModel {
    /// Every model in the built-in catalog, most capable first.
    pub const KNOWN: [ChatModel; 5] = [
        ChatModel::Llama33_70bVersatile,
        ChatModel::Llama31_70bVersatile,
        ChatModel::Llama31_8bInstant,
        ChatModel::Mixtral8x7b32768,
        ChatModel::Gemma2_9bIt,
    ];

    /// Get the API model identifier.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Llama33_70bVersatile => "llama-3.3-70b-versatile",
            Self::Llama31_70bVersatile => "llama-3.1-70b-versatile",
            Self::Llama31_8bInstant => "llama-3.1-8b-instant",
            Self::Mixtral8x7b32768 => "mixtral-8x7b-32768",
            Self::Gemma2_9bIt => "gemma2-9b-it",
            Self::Custom(id) => id,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    /// One-line description for model pickers.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Llama33_70bVersatile => "LLaMA 3.3 70B, the most capable and balanced",
            Self::Llama31_70bVersatile => "LLaMA 3.1 70B, previous generation, very capable",
            Self::Llama31_8bInstant => "LLaMA 3.1 8B, fast and efficient",
            Self::Mixtral8x7b32768 => "Mixtral 8x7B, suited to long contexts",
            Self::Gemma2_9bIt => "Gemma2 9B, compact",
            Self::Custom(_) => "Custom model",
        }
    }

    pub fn speed(&self) -> Option<SpeedTier> {
        match self {
            Self::Llama31_8bInstant | Self::Gemma2_9bIt => Some(SpeedTier::Fast),
            Self::Custom(_) => None,
            _ => Some(SpeedTier::Medium),
        }
    }

    /// Context window in tokens, when known.
    pub fn context_window(&self) -> Option<u32> {
        match self {
            Self::Mixtral8x7b32768 => Some(32_768),
            Self::Custom(_) => None,
            _ => Some(8_192),
        }
    }
}

impl Default for ChatModel {
    fn default() -> Self {
        Self::Llama33_70bVersatile
    }
}

impl fmt::Display for ChatModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ChatModel {
    fn from(id: String) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|model| model.as_str() == id)
            .unwrap_or(Self::Custom(id))
    }
}

impl From<&str> for ChatModel {
    fn from(id: &str) -> Self {
        Self::from(id.to_string())
    }
}

impl FromStr for ChatModel {
    type Err = Infallible;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(id))
    }
}

impl From<ChatModel> for String {
    fn from(model: ChatModel) -> Self {
        model.as_str().to_string()
    }
}
