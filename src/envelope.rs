//! Decoding for the remote API's double-encoded response envelope.
//!
//! SYSTEM CONTEXT
//! ==============
//! The API gateway in front of the experiment service returns every payload
//! as `{ "body": "<json document as a string>" }`, so the document has to be
//! decoded twice. This looks like a server-side inconsistency rather than a
//! contract anyone chose; it is contained here and nothing the client sends
//! is encoded this way.

#[cfg(test)]
#[path = "envelope_test.rs"]
mod envelope_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::model::Experiment;

/// Raw response shape: a JSON object whose `body` is itself JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Envelope {
    pub body: String,
}

/// Malformed-response failures. All of them surface to users the same way as
/// transport failures.
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    #[error("response is not valid JSON: {0}")]
    Outer(#[source] serde_json::Error),
    #[error("response has no string `body` field")]
    MissingBody,
    #[error("envelope body is not valid JSON: {0}")]
    Inner(#[source] serde_json::Error),
    #[error("envelope body has an unexpected shape: {0}")]
    Shape(#[source] serde_json::Error),
}

/// Payload of `GET /experiments?userId=`.
///
/// The list never shows populations, so records are read without theirs and
/// one unreadable record is dropped instead of failing the whole page. A
/// missing or `null` list reads as empty.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExperimentPage {
    #[serde(default, deserialize_with = "deserialize_summaries")]
    pub experiments: Vec<Experiment>,
}

/// Payload of `GET /experiments?experimentId=`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExperimentDetail {
    pub experiment: Experiment,
}

/// Unwrap the envelope and return the inner JSON document.
///
/// # Errors
///
/// Returns an [`EnvelopeError`] when the outer document is not JSON, has no
/// string `body`, or the body is not JSON.
pub fn unwrap_body(raw: &str) -> Result<Value, EnvelopeError> {
    let outer: Value = serde_json::from_str(raw).map_err(EnvelopeError::Outer)?;
    let Some(body) = outer.get("body").and_then(Value::as_str) else {
        return Err(EnvelopeError::MissingBody);
    };
    serde_json::from_str(body).map_err(EnvelopeError::Inner)
}

/// Unwrap the envelope and decode the inner document as `T`.
///
/// # Errors
///
/// Returns an [`EnvelopeError`] for any envelope failure, or
/// [`EnvelopeError::Shape`] when the inner document does not match `T`.
pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, EnvelopeError> {
    let inner = unwrap_body(raw)?;
    serde_json::from_value(inner).map_err(EnvelopeError::Shape)
}

/// Best-effort extraction of the id assigned to a newly created experiment.
///
/// The create endpoint sometimes echoes the record, sometimes wraps it in an
/// envelope, and sometimes returns nothing useful; none of these is an error.
#[must_use]
pub fn created_experiment_id(raw: &str) -> Option<String> {
    let Ok(outer) = serde_json::from_str::<Value>(raw) else {
        return None;
    };
    if let Some(id) = experiment_id_in(&outer) {
        return Some(id);
    }
    let body = outer.get("body").and_then(Value::as_str)?;
    let Ok(inner) = serde_json::from_str::<Value>(body) else {
        return None;
    };
    experiment_id_in(&inner)
}

fn experiment_id_in(document: &Value) -> Option<String> {
    document
        .get("experimentId")
        .or_else(|| document.get("experiment").and_then(|e| e.get("experimentId")))
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(ToOwned::to_owned)
}

fn deserialize_summaries<'de, D>(deserializer: D) -> Result<Vec<Experiment>, D::Error>
where
    D: Deserializer<'de>,
{
    let records = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(records
        .into_iter()
        .enumerate()
        .filter_map(|(index, mut record)| {
            if let Some(fields) = record.as_object_mut() {
                fields.remove("population");
            }
            match serde_json::from_value::<Experiment>(record) {
                Ok(experiment) => Some(experiment),
                Err(error) => {
                    tracing::warn!(index, %error, "skipping unreadable experiment record");
                    None
                }
            }
        })
        .collect())
}
