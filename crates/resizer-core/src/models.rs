//! Request and response bodies of the upload-URL endpoint.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

const MISSING_FIELDS: &str = "Missing 'filename' or 'contentType' in request body.";

/// Body of `POST /upload-url`, e.g. `{"filename": "cat.png", "contentType": "image/png"}`.
///
/// Both fields are optional at the serde level so that an absent field is a
/// validation failure with a readable message rather than a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
}

/// An [`UploadRequest`] with both fields present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUpload {
    pub filename: String,
    pub content_type: String,
}

impl UploadRequest {
    /// Parse a raw request body. An empty body is treated as `{}`.
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let value: serde_json::Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(AppError::Validation(
                "Request body must be a JSON object.".to_string(),
            ));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn validate(self) -> Result<ValidatedUpload, AppError> {
        match (self.filename, self.content_type) {
            (Some(filename), Some(content_type))
                if !filename.is_empty() && !content_type.is_empty() =>
            {
                Ok(ValidatedUpload {
                    filename,
                    content_type,
                })
            }
            _ => Err(AppError::Validation(MISSING_FIELDS.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlResponse {
    pub upload_url: String,
    pub download_url: String,
    pub destination_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
