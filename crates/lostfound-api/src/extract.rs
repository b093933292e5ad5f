use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header,
};
use lostfound_types::api::Fields;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ApiError;

/// Request body as a field map, from either an HTML form post or JSON.
///
/// JSON values that are not strings are dropped, so a field sent as a number
/// is treated as missing.
pub struct FormFields(pub Fields);

impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mime = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(|v| v.trim().to_ascii_lowercase())
            .unwrap_or_default();

        match mime.as_str() {
            "application/x-www-form-urlencoded" => {
                let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                    .await
                    .map_err(|e| {
                        debug!("Rejected form body: {}", e);
                        ApiError::MalformedBody
                    })?;
                Ok(FormFields(Fields::new(pairs)))
            }
            "application/json" => {
                let Json(map) = Json::<Map<String, Value>>::from_request(req, state)
                    .await
                    .map_err(|e| {
                        debug!("Rejected JSON body: {}", e);
                        ApiError::MalformedBody
                    })?;
                Ok(FormFields(
                    map.into_iter()
                        .filter_map(|(k, v)| match v {
                            Value::String(s) => Some((k, s)),
                            _ => None,
                        })
                        .collect(),
                ))
            }
            other => {
                debug!("Rejected content type {:?}", other);
                Err(ApiError::UnsupportedContentType)
            }
        }
    }
}
