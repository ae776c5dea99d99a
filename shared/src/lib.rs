//! Shared library for the vitals coach Lambda.
//!
//! Turns a question plus raw vitals series into a bounded, grounded context
//! block, asks a Bedrock model, and normalizes whatever the model returns.

pub mod assistant;
pub mod bedrock;
pub mod budget;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod models;
pub mod response;
pub mod series;
pub mod summary;
pub mod timeseries;
pub mod validate;

pub use assistant::VitalsAssistant;
pub use bedrock::{BedrockInvoker, ModelInvoker};
pub use budget::{estimate_tokens, truncate_to_budget};
pub use config::{Config, SeriesSourceConfig};
pub use context::{build_context, summarize_vitals};
pub use error::{Error, Result};
pub use models::{AskResponse, ChatMessage, ErrorBody, ModelRequest, Role};
pub use response::normalize_response;
pub use series::{coerce_series, NumericSeries, SeriesSet};
pub use summary::{describe_blood_pressure, describe_series, SeriesStats, Windows};
pub use timeseries::{DisabledSeriesSource, SeriesSource, TimestreamSeriesSource};
pub use validate::validate_payload;
