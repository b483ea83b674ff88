use thiserror::Error;

/// Failure classes for one endpoint call.
///
/// All four collapse into the same fallback path in the data service;
/// the distinction only matters for logging.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("endpoint returned HTTP {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("endpoint reported failure: {0}")]
    Application(String),

    #[error("malformed response: {0}")]
    Validation(String),
}

/// Maximum length for error response bodies carried in error messages
const MAX_ERROR_BODY_LENGTH: usize = 300;

impl ApiError {
    /// Truncate a response body to avoid dragging whole documents into logs
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        ApiError::HttpStatus {
            status,
            body: Self::truncate_body(body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_keeps_short_body() {
        let err = ApiError::from_status(reqwest::StatusCode::BAD_GATEWAY, "upstream down");
        match err {
            ApiError::HttpStatus { status, body } => {
                assert_eq!(status.as_u16(), 502);
                assert_eq!(body, "upstream down");
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn test_from_status_truncates_long_body() {
        let long = "x".repeat(2000);
        let err = ApiError::from_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, &long);
        match err {
            ApiError::HttpStatus { body, .. } => {
                assert!(body.len() < 400);
                assert!(body.contains("truncated"));
                assert!(body.contains("2000 total bytes"));
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
    }
}
