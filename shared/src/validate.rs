//! Inbound payload validation.

use serde_json::Value;

use crate::series::{cap_series, coerce_series, SeriesSet, MAX_INPUT_POINTS};
use crate::{Error, Result};

/// Validate a decoded request body.
///
/// Expected shape:
///
/// ```json
/// { "question": "string", "series": { "glucose": [..], "weight": [..], "bp_sys": [..], "bp_dia": [..] } }
/// ```
///
/// `prompt` and `timeseries` are accepted as legacy names for `question` and
/// `series`. Returns the trimmed question and the cleaned series.
pub fn validate_payload(payload: &Value) -> Result<(String, SeriesSet)> {
    let question = field(payload, "question", "prompt")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| Error::Validation("Missing or empty 'question' field.".to_string()))?;

    let series = match field(payload, "series", "timeseries") {
        None | Some(Value::Null) => SeriesSet::new(),
        Some(Value::Object(entries)) => entries
            .iter()
            .filter_map(|(name, raw)| {
                let values = raw.as_array()?;
                Some((name.as_str(), cap_series(coerce_series(values), MAX_INPUT_POINTS)))
            })
            .collect(),
        Some(_) => return Err(Error::Validation("'series' must be an object.".to_string())),
    };

    Ok((question.to_string(), series))
}

fn field<'a>(payload: &'a Value, primary: &str, legacy: &str) -> Option<&'a Value> {
    payload.get(primary).or_else(|| payload.get(legacy))
}
