use serde::Deserialize;
use thiserror::Error;

/// Failure taxonomy for backend calls. Callers branch on these: only
/// `Unauthorized` forces a logout, everything else surfaces as a retry-later
/// or connectivity message.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized - session expired or invalid")]
    Unauthorized,

    #[error("API error {status}: {reason}")]
    Api {
        status: u16,
        reason: String,
        body: Option<serde_json::Value>,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// One entry of the backend's validation error body:
/// `{ detail: [{loc, msg, type}] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationDetail {
    #[serde(default)]
    pub loc: Vec<serde_json::Value>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Deserialize)]
struct ValidationBody {
    detail: Vec<ValidationDetail>,
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            // Back off to a char boundary so the cut never splits a
            // multibyte character.
            let mut cut = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..cut],
                body.len()
            )
        }
    }

    /// Build an error from a non-2xx response. The body is kept as parsed
    /// JSON when possible so callers can pull structured detail out of it.
    pub fn from_status(status: u16, reason: &str, body: &str) -> Self {
        if status == 401 {
            return ApiError::Unauthorized;
        }
        let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
        let reason = if reason.is_empty() {
            Self::truncate_body(body)
        } else {
            reason.to_string()
        };
        ApiError::Api {
            status,
            reason,
            body: parsed,
        }
    }

    /// Validation messages from a `{detail: [...]}` error body, if this is
    /// one. Used by forms to show the backend's field complaints inline.
    pub fn validation_details(&self) -> Vec<ValidationDetail> {
        match self {
            ApiError::Api {
                body: Some(body), ..
            } => serde_json::from_value::<ValidationBody>(body.clone())
                .map(|b| b.detail)
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }
}
