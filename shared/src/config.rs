//! Configuration management for the vitals coach Lambda.

use std::env;

use crate::context::DEFAULT_CONTEXT_TOKENS;
use crate::{Error, Result};

/// Grounded life-coach wording; the default profile.
pub const COACH_SYSTEM_PROMPT: &str = "You are a helpful life coach. \
When referring to the patient's personal measurements \
(glucose, weight, blood pressure, etc.), rely ONLY on the data \
contained in the assistant message named 'vitals'. \
Do NOT fabricate or assume additional values or time-window \
statistics. If information is unavailable, state that it is \
missing. Use correct units and keep the answer concise and clear.";

/// Short clinical-assistant wording.
pub const CLINICAL_SYSTEM_PROMPT: &str = "You are a helpful clinical assistant.";

const DEFAULT_MAX_ANSWER_TOKENS: u32 = 2000;
const DEFAULT_WINDOW_HOURS: u32 = 168;

/// Where the core vitals are fetched from when the caller omits them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeriesSourceConfig {
    /// No backend lookups; every fetch yields no data.
    Disabled,
    /// Amazon Timestream table holding `measure_name`/`measure_value::double` rows.
    Timestream {
        database: String,
        table: String,
        window_hours: u32,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bedrock model identifier. Absence is reported per request, not at startup.
    pub model_id: Option<String>,
    /// System prompt sent ahead of the vitals context
    pub system_prompt: String,
    /// `max_tokens` hint sent to the model
    pub max_answer_tokens: u32,
    /// Token budget for the vitals context block
    pub max_context_tokens: usize,
    /// Time-series backend
    pub series_source: SeriesSourceConfig,
    /// AWS region
    pub aws_region: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_id: None,
            system_prompt: COACH_SYSTEM_PROMPT.to_string(),
            max_answer_tokens: DEFAULT_MAX_ANSWER_TOKENS,
            max_context_tokens: DEFAULT_CONTEXT_TOKENS,
            series_source: SeriesSourceConfig::Disabled,
            aws_region: "us-east-1".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let system_prompt = match get("SYSTEM_PROMPT") {
            Some(prompt) => prompt,
            None => match get("PROMPT_PROFILE").as_deref() {
                None | Some("coach") => COACH_SYSTEM_PROMPT.to_string(),
                Some("clinical") => CLINICAL_SYSTEM_PROMPT.to_string(),
                Some(other) => {
                    return Err(Error::Config(format!(
                        "Unknown PROMPT_PROFILE '{}' (expected 'coach' or 'clinical')",
                        other
                    )))
                }
            },
        };

        let series_source = match get("SERIES_SOURCE").as_deref() {
            None | Some("disabled") => SeriesSourceConfig::Disabled,
            Some("timestream") => SeriesSourceConfig::Timestream {
                database: get("DB_NAME")
                    .ok_or_else(|| Error::Config("DB_NAME not set".to_string()))?,
                table: get("TABLE").ok_or_else(|| Error::Config("TABLE not set".to_string()))?,
                window_hours: parse_or("SERIES_WINDOW_HOURS", get("SERIES_WINDOW_HOURS"), DEFAULT_WINDOW_HOURS)?,
            },
            Some(other) => {
                return Err(Error::Config(format!(
                    "Unknown SERIES_SOURCE '{}' (expected 'disabled' or 'timestream')",
                    other
                )))
            }
        };

        Ok(Self {
            model_id: get("MODEL_ID"),
            system_prompt,
            max_answer_tokens: parse_or("MAX_ANSWER_TOKENS", get("MAX_ANSWER_TOKENS"), DEFAULT_MAX_ANSWER_TOKENS)?,
            max_context_tokens: parse_or("MAX_CONTEXT_TOKENS", get("MAX_CONTEXT_TOKENS"), DEFAULT_CONTEXT_TOKENS)?,
            series_source,
            aws_region: get("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, value: Option<String>, default: T) -> Result<T> {
    match value {
        Some(raw) => raw
            .parse()
            .map_err(|_| Error::Config(format!("{} must be a non-negative integer, got '{}'", key, raw))),
        None => Ok(default),
    }
}
