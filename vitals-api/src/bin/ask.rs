//! Ask Lambda - Handles the /ask endpoint.
//!
//! Validates the question and vitals series in the request body, grounds a
//! Bedrock model on a summary of those vitals, and returns `{"answer": ...}`.

use std::sync::Arc;

use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};
use shared::http::{answer_response, parse_event_body};
use shared::{
    BedrockInvoker, Config, DisabledSeriesSource, SeriesSource, SeriesSourceConfig, TimestreamSeriesSource,
    VitalsAssistant,
};
use tracing::{error, info, info_span, Instrument};
use tracing_subscriber::EnvFilter;

/// Application state shared across requests.
struct AppState {
    assistant: VitalsAssistant,
}

impl AppState {
    async fn new() -> Result<Self, Error> {
        let config = Config::from_env()?;
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.aws_region.clone()))
            .load()
            .await;

        let series_source: Arc<dyn SeriesSource> = match &config.series_source {
            SeriesSourceConfig::Disabled => Arc::new(DisabledSeriesSource),
            SeriesSourceConfig::Timestream {
                database,
                table,
                window_hours,
            } => {
                let (client, reload) = aws_sdk_timestreamquery::Client::new(&sdk_config)
                    .with_endpoint_discovery_enabled()
                    .await
                    .map_err(|e| format!("Failed to discover Timestream endpoint: {}", e))?;
                tokio::spawn(reload.reload_task());

                Arc::new(TimestreamSeriesSource::new(
                    client,
                    database.clone(),
                    table.clone(),
                    *window_hours,
                ))
            }
        };

        let bedrock_client = aws_sdk_bedrockruntime::Client::new(&sdk_config);

        info!(
            model_configured = config.model_id.is_some(),
            live_series = series_source.is_live(),
            max_answer_tokens = config.max_answer_tokens,
            "Ask Lambda initialized"
        );

        Ok(Self {
            assistant: VitalsAssistant::new(config, series_source, Arc::new(BedrockInvoker::new(bedrock_client))),
        })
    }
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    let request_id = event
        .lambda_context_ref()
        .map(|ctx| ctx.request_id.clone())
        .unwrap_or_default();

    async move {
        let outcome = match parse_event_body(event.body()) {
            Ok(payload) => state.assistant.answer(&payload).await,
            Err(e) => Err(e),
        };

        if let Err(e) = &outcome {
            if !e.is_client_visible() {
                error!("Ask request failed: {}", e);
            }
        }

        answer_response(outcome)
    }
    .instrument(info_span!("ask", request_id = %request_id))
    .await
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::new().await?);

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}
