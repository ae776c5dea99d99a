//! HTTP helpers for the API Gateway Lambda.

use lambda_http::{Body, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::models::{AskResponse, ErrorBody};
use crate::{Error, Result};

/// Create a JSON response with the given status code and data.
pub fn json_response<T: Serialize>(status: u16, data: &T) -> std::result::Result<Response<Body>, lambda_http::Error> {
    let response = Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(data)?))
        .map_err(Box::new)?;

    Ok(response)
}

/// Create an `{"error": ...}` response with the given status code.
pub fn error_response(status: u16, message: impl Into<String>) -> std::result::Result<Response<Body>, lambda_http::Error> {
    json_response(status, &ErrorBody { error: message.into() })
}

/// Decode the request body. An absent body counts as `{}`.
pub fn parse_event_body(body: &Body) -> Result<Value> {
    let bytes: &[u8] = body.as_ref();
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }

    serde_json::from_slice(bytes).map_err(|e| Error::Validation(format!("Invalid JSON body: {}", e)))
}

/// Map a pipeline outcome onto the HTTP surface.
///
/// Answers become 200 `{"answer": ...}`; validation and configuration errors
/// become `{"error": ...}` with their status code. Anything else, notably a
/// failed model call, is handed back to the Lambda runtime.
pub fn answer_response(outcome: Result<String>) -> std::result::Result<Response<Body>, lambda_http::Error> {
    match outcome {
        Ok(answer) => json_response(200, &AskResponse { answer }),
        Err(e) if e.is_client_visible() => {
            warn!(status = e.status_code(), error = %e, "Rejecting request");
            error_response(e.status_code(), e.to_string())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body_json(response: &Response<Body>) -> Value {
        serde_json::from_slice(response.body().as_ref()).unwrap()
    }

    #[test]
    fn test_empty_body_is_empty_object() {
        assert_eq!(parse_event_body(&Body::Empty).unwrap(), json!({}));
        assert_eq!(parse_event_body(&Body::from("  ")).unwrap(), json!({}));
    }

    #[test]
    fn test_body_decodes() {
        let body = Body::from(r#"{"question":"hi"}"#);
        assert_eq!(parse_event_body(&body).unwrap(), json!({"question": "hi"}));
    }

    #[test]
    fn test_invalid_body_is_validation_error() {
        let err = parse_event_body(&Body::from("{not json")).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_answer_maps_to_200() {
        let response = answer_response(Ok("Looks fine".to_string())).unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["content-type"], "application/json");
        assert_eq!(body_json(&response), json!({"answer": "Looks fine"}));
    }

    #[test]
    fn test_validation_maps_to_400() {
        let outcome = Err(Error::Validation("Missing or empty 'question' field.".to_string()));
        let response = answer_response(outcome).unwrap();
        assert_eq!(response.status(), 400);
        assert_eq!(body_json(&response), json!({"error": "Missing or empty 'question' field."}));
    }

    #[test]
    fn test_config_maps_to_500() {
        let outcome = Err(Error::Config("MODEL_ID not configured on Lambda".to_string()));
        let response = answer_response(outcome).unwrap();
        assert_eq!(response.status(), 500);
        assert_eq!(body_json(&response), json!({"error": "MODEL_ID not configured on Lambda"}));
    }

    #[test]
    fn test_upstream_failure_propagates() {
        let err = answer_response(Err(Error::Aws("service unavailable".to_string()))).unwrap_err();
        assert!(err.to_string().contains("service unavailable"));
    }
}
