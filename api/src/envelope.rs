//! Generic response envelope
//!
//! Mutating todo-list and task endpoints wrap their payload:
//!
//! ```json
//! { "resultCode": 0, "messages": [], "fieldsErrors": [], "data": { "item": { ... } } }
//! ```
//!
//! A non-zero `resultCode` is a business-logic failure even though the HTTP
//! status was 2xx.

use crate::error::ApiError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `resultCode` of a successful envelope
pub const RESULT_CODE_SUCCESS: i64 = 0;

/// Field-level error reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Offending request field
    pub field: String,
    /// Error text
    pub error: String,
}

/// The envelope around a payload `D`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseResponse<D = Value> {
    /// `0` on success
    pub result_code: i64,
    /// Human-readable messages
    #[serde(default)]
    pub messages: Vec<String>,
    /// Field-level errors
    #[serde(default)]
    pub fields_errors: Vec<FieldError>,
    /// Payload
    pub data: D,
}

/// Payload of create/update endpoints: `{ "item": T }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemData<T> {
    /// The created or updated entity
    pub item: T,
}

impl<D> BaseResponse<D> {
    /// A successful envelope around `data`
    #[must_use]
    pub const fn success(data: D) -> Self {
        Self {
            result_code: RESULT_CODE_SUCCESS,
            messages: Vec::new(),
            fields_errors: Vec::new(),
            data,
        }
    }
}

impl BaseResponse {
    /// A failed envelope with `messages` and an empty payload
    #[must_use]
    pub fn failure(result_code: i64, messages: Vec<String>) -> Self {
        Self {
            result_code,
            messages,
            fields_errors: Vec::new(),
            data: Value::Object(serde_json::Map::new()),
        }
    }
}

/// Decode a bare (non-enveloped) body
///
/// # Errors
///
/// Returns [`ApiError::Decode`] if the body does not have the shape of `T`.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Check an envelope's result code and return its raw payload
///
/// # Errors
///
/// - [`ApiError::Decode`] if the body is not an envelope
/// - [`ApiError::Application`] if `resultCode` is not `0`
pub fn open(value: Value) -> Result<Value, ApiError> {
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct RawEnvelope {
        result_code: i64,
        #[serde(default)]
        messages: Vec<String>,
        #[serde(default)]
        fields_errors: Vec<FieldError>,
        #[serde(default)]
        data: Value,
    }

    let envelope: RawEnvelope = decode(value)?;
    if envelope.result_code != RESULT_CODE_SUCCESS {
        return Err(ApiError::Application {
            result_code: envelope.result_code,
            messages: envelope.messages,
            field_errors: envelope.fields_errors,
        });
    }
    Ok(envelope.data)
}

/// Unwrap a `{ "item": T }` envelope
///
/// # Errors
///
/// See [`open`]; additionally [`ApiError::Decode`] if the payload is not an item.
pub fn item<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    let data: ItemData<T> = decode(open(value)?)?;
    Ok(data.item)
}

/// Check an envelope that carries no meaningful payload
///
/// # Errors
///
/// See [`open`].
pub fn ack(value: Value) -> Result<(), ApiError> {
    open(value).map(drop)
}
