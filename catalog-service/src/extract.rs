use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use common_http_errors::ApiError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// JSON body extractor that answers every binding failure with a 400 `{"error": ...}`.
///
/// The content type is not checked. The body must be a JSON object; arrays and
/// scalars are rejected before `T` sees them, so fields never bind by position.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request("invalid_body", rejection.body_text()))?;
        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|err| ApiError::bad_request("invalid_body", err.to_string()))?;
        if !value.is_object() {
            return Err(ApiError::bad_request(
                "invalid_body",
                format!("invalid type: {}, expected a JSON object", json_kind(&value)),
            ));
        }
        serde_json::from_value(value)
            .map(JsonBody)
            .map_err(|err| ApiError::bad_request("invalid_body", err.to_string()))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Path ids that are not integers can never match a row.
pub fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}
