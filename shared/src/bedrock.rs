//! Model invocation through Amazon Bedrock.

use async_trait::async_trait;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use tracing::info;

use crate::models::ModelRequest;
use crate::{Error, Result};

/// Sends a chat request to a language model and returns the raw reply bytes.
///
/// The reply shape is provider specific; see [`crate::response`].
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    async fn invoke(&self, model_id: &str, request: &ModelRequest) -> Result<Vec<u8>>;
}

/// [`ModelInvoker`] backed by Bedrock `InvokeModel`.
pub struct BedrockInvoker {
    client: BedrockClient,
}

impl BedrockInvoker {
    pub fn new(client: BedrockClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ModelInvoker for BedrockInvoker {
    async fn invoke(&self, model_id: &str, request: &ModelRequest) -> Result<Vec<u8>> {
        let body = serde_json::to_vec(request)?;

        info!(model_id, messages = request.messages.len(), "Invoking Bedrock model");

        let response = self
            .client
            .invoke_model()
            .model_id(model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| Error::Aws(format!("Failed to invoke model: {}", e)))?;

        Ok(response.body.into_inner())
    }
}
