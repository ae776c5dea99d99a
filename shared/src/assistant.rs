//! The request pipeline: validate, ground, ask, normalize.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::bedrock::ModelInvoker;
use crate::budget::estimate_tokens;
use crate::context::{build_context, CORE_VITALS};
use crate::models::ModelRequest;
use crate::response::normalize_response;
use crate::series::SeriesSet;
use crate::timeseries::SeriesSource;
use crate::validate::validate_payload;
use crate::{Config, Error, Result};

/// Answers vitals questions.
///
/// Built once per execution environment; every call works on fresh,
/// request-scoped data only.
pub struct VitalsAssistant {
    config: Config,
    series_source: Arc<dyn SeriesSource>,
    model: Arc<dyn ModelInvoker>,
}

impl VitalsAssistant {
    pub fn new(config: Config, series_source: Arc<dyn SeriesSource>, model: Arc<dyn ModelInvoker>) -> Self {
        Self {
            config,
            series_source,
            model,
        }
    }

    /// Answer the question in a decoded request body.
    ///
    /// Validation and missing-model errors come back before any outbound
    /// call. Failures of the model call itself are returned unchanged.
    pub async fn answer(&self, payload: &Value) -> Result<String> {
        let (question, supplied) = validate_payload(payload)?;

        let model_id = self
            .config
            .model_id
            .as_deref()
            .ok_or_else(|| Error::Config("MODEL_ID not configured on Lambda".to_string()))?;

        let series = self.merge_series(supplied).await;
        let context = build_context(&series, self.config.max_context_tokens);
        info!(
            series = series.len(),
            points = series.point_count(),
            context_tokens = estimate_tokens(&context),
            "Built vitals context"
        );

        let request = ModelRequest::grounded(
            &self.config.system_prompt,
            &context,
            &question,
            self.config.max_answer_tokens,
        );
        let raw = self.model.invoke(model_id, &request).await?;

        Ok(normalize_response(&raw))
    }

    /// Combine caller-supplied series with backend lookups for the core vitals.
    ///
    /// A non-empty caller series always wins. Otherwise a non-empty fetch is
    /// used; failing that, the vital is kept as empty when the caller named
    /// it or the source is live, and left out when neither holds.
    async fn merge_series(&self, supplied: SeriesSet) -> SeriesSet {
        let mut merged = SeriesSet::new();

        for name in CORE_VITALS {
            let caller = supplied.get(name);
            if let Some(values) = caller.filter(|v| !v.is_empty()) {
                merged.insert(name, values.to_vec());
                continue;
            }

            let fetched = match self.series_source.fetch_latest(name).await {
                Ok(values) => values,
                Err(e) => {
                    warn!(series = name, error = %e, "Series fetch failed, continuing without it");
                    Vec::new()
                }
            };

            if !fetched.is_empty() || caller.is_some() || self.series_source.is_live() {
                merged.insert(name, fetched);
            }
        }

        for (name, values) in supplied.iter().filter(|(name, _)| !CORE_VITALS.contains(name)) {
            merged.insert(name, values.to_vec());
        }

        merged
    }
}
