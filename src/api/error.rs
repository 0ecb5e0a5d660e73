//! HTTP mapping for [`GazetteError`].
//!
//! Only a missing article is a 404. Everything else, including storage
//! failures, is reported as a 400 with a human-readable message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{debug, warn};

use super::envelope::Envelope;
use crate::error::GazetteError;

impl GazetteError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GazetteError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for GazetteError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            GazetteError::Sqlite(_)
            | GazetteError::Io(_)
            | GazetteError::Unavailable(_)
            | GazetteError::Json(_) => warn!(error = %self, "Request failed"),
            _ => debug!(error = %self, status = status.as_u16(), "Request rejected"),
        }

        (status, Json(Envelope::fail(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            GazetteError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            GazetteError::Validation(vec!["Title is required".into()]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GazetteError::Unavailable("down".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GazetteError::InvalidId("nope".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = GazetteError::DuplicateTitle("Some title".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
