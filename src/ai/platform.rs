//! Supported AI chat platforms and their API defaults.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Wire protocol spoken by a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFlavor {
    /// `POST /chat/completions` with bearer auth.
    OpenAiCompatible,
    /// Anthropic `POST /v1/messages` with `x-api-key` auth.
    AnthropicMessages,
}

/// An AI chat platform queried during monitoring.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// OpenAI ChatGPT.
    #[value(name = "chatgpt")]
    ChatGpt,
    /// Anthropic Claude.
    Claude,
    /// Perplexity.
    Perplexity,
    /// Google Gemini.
    Gemini,
    /// xAI Grok.
    Grok,
}

impl Platform {
    /// All platforms in report order.
    pub const ALL: [Platform; 5] = [
        Platform::ChatGpt,
        Platform::Claude,
        Platform::Perplexity,
        Platform::Gemini,
        Platform::Grok,
    ];

    /// Human-readable platform name.
    pub fn display_name(self) -> &'static str {
        match self {
            Platform::ChatGpt => "ChatGPT",
            Platform::Claude => "Claude",
            Platform::Perplexity => "Perplexity",
            Platform::Gemini => "Gemini",
            Platform::Grok => "Grok",
        }
    }

    /// Lower-case identifier used in config files and on the command line.
    pub fn id(self) -> &'static str {
        match self {
            Platform::ChatGpt => "chatgpt",
            Platform::Claude => "claude",
            Platform::Perplexity => "perplexity",
            Platform::Gemini => "gemini",
            Platform::Grok => "grok",
        }
    }

    /// Protocol the platform speaks.
    pub fn flavor(self) -> ApiFlavor {
        match self {
            Platform::Claude => ApiFlavor::AnthropicMessages,
            _ => ApiFlavor::OpenAiCompatible,
        }
    }

    /// Default request endpoint.
    pub fn default_endpoint(self) -> &'static str {
        match self {
            Platform::ChatGpt => "https://api.openai.com/v1/chat/completions",
            Platform::Claude => "https://api.anthropic.com/v1/messages",
            Platform::Perplexity => "https://api.perplexity.ai/chat/completions",
            Platform::Gemini => {
                "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions"
            }
            Platform::Grok => "https://api.x.ai/v1/chat/completions",
        }
    }

    /// Default model identifier.
    pub fn default_model(self) -> &'static str {
        match self {
            Platform::ChatGpt => "gpt-4o",
            Platform::Claude => "claude-sonnet-4-20250514",
            Platform::Perplexity => "sonar",
            Platform::Gemini => "gemini-2.0-flash",
            Platform::Grok => "grok-3",
        }
    }

    /// Environment variables holding the API key, in lookup order.
    pub fn api_key_vars(self) -> &'static [&'static str] {
        match self {
            Platform::ChatGpt => &["OPENAI_API_KEY"],
            Platform::Claude => &["ANTHROPIC_API_KEY", "CLAUDE_API_KEY"],
            Platform::Perplexity => &["PERPLEXITY_API_KEY"],
            Platform::Gemini => &["GEMINI_API_KEY", "GOOGLE_API_KEY"],
            Platform::Grok => &["XAI_API_KEY", "GROK_API_KEY"],
        }
    }

    /// Prefix for the `<PREFIX>_MODEL` and `<PREFIX>_BASE_URL` overrides.
    pub fn env_prefix(self) -> &'static str {
        match self {
            Platform::ChatGpt => "OPENAI",
            Platform::Claude => "ANTHROPIC",
            Platform::Perplexity => "PERPLEXITY",
            Platform::Gemini => "GEMINI",
            Platform::Grok => "XAI",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chatgpt" | "openai" => Ok(Platform::ChatGpt),
            "claude" | "anthropic" => Ok(Platform::Claude),
            "perplexity" => Ok(Platform::Perplexity),
            "gemini" | "google" => Ok(Platform::Gemini),
            "grok" | "xai" => Ok(Platform::Grok),
            other => Err(format!("unknown platform: {other}")),
        }
    }
}
