// Error handling module for the Facility API
// Provides the root error type and its HTTP response conversion

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use tracing::{debug, error};

use crate::availability::AvailabilityError;
use crate::timeslot::SlotError;

/// Root error type for the API
///
/// Admin and availability handlers return `Result<T, ApiError>`; the booking
/// path has its own richer error type (`booking::BookingError`) that covers
/// commit-time unavailability.
#[derive(Debug)]
pub enum ApiError {
    /// Request validation failures from the validator crate
    /// Maps to HTTP 400 Bad Request
    ValidationError(validator::ValidationErrors),

    /// Malformed or out-of-range input (bad timestamps, inverted intervals,
    /// hours outside 0-23, ...)
    /// Maps to HTTP 400 Bad Request
    InvalidInput(String),

    /// Referenced entity does not exist
    /// Maps to HTTP 404 Not Found
    NotFound { resource: &'static str, id: i32 },

    /// An internal invariant was observed broken (a ledger bug, not a user
    /// error); logged in full, surfaced as a generic failure
    /// Maps to HTTP 500 Internal Server Error
    InternalInvariant(String),
}

/// Error response body
///
/// The browser client reads only `message`; `errorCode` is a stable
/// machine-readable tag alongside it.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error_code: &'static str,
    pub message: String,
}

impl ApiError {
    fn to_response_parts(&self) -> (StatusCode, ErrorBody) {
        match self {
            ApiError::ValidationError(errors) => {
                debug!("Validation error: {:?}", errors);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorBody {
                        error_code: "INVALID_INPUT",
                        message: format!("Request validation failed: {}", errors),
                    },
                )
            }
            ApiError::InvalidInput(message) => {
                debug!("Invalid input: {}", message);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorBody {
                        error_code: "INVALID_INPUT",
                        message: message.clone(),
                    },
                )
            }
            ApiError::NotFound { resource, id } => {
                debug!("Resource not found: {} with id {}", resource, id);
                (
                    StatusCode::NOT_FOUND,
                    ErrorBody {
                        error_code: "NOT_FOUND",
                        message: format!("{} with id {} not found", resource, id),
                    },
                )
            }
            ApiError::InternalInvariant(detail) => {
                // Full detail stays in the log; the caller sees a generic message
                error!("Internal invariant violation: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error_code: "INTERNAL_ERROR",
                        message: "An internal server error occurred".to_string(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.to_response_parts();
        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(errors)
    }
}

impl From<SlotError> for ApiError {
    fn from(err: SlotError) -> Self {
        ApiError::InvalidInput(err.to_string())
    }
}

impl From<AvailabilityError> for ApiError {
    fn from(err: AvailabilityError) -> Self {
        match err {
            AvailabilityError::DurationExceedsLimit { .. } => {
                ApiError::InvalidInput(err.to_string())
            }
            AvailabilityError::OvercommittedEquipment { .. } => {
                ApiError::InternalInvariant(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_resource() {
        let err = ApiError::NotFound {
            resource: "Court",
            id: 7,
        };
        let (status, body) = err.to_response_parts();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "Court with id 7 not found");
    }

    #[test]
    fn test_invariant_violation_is_not_exposed() {
        let err = ApiError::InternalInvariant("negative availability for equipment 3".to_string());
        let (status, body) = err.to_response_parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.message.contains("equipment"));
    }

    #[test]
    fn test_slot_error_maps_to_invalid_input() {
        let err: ApiError = SlotError::EmptyInterval.into();
        let (status, _) = err.to_response_parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_body_uses_camel_case() {
        let body = ErrorBody {
            error_code: "INVALID_INPUT",
            message: "bad".to_string(),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"errorCode\""));
        assert!(json.contains("\"message\""));
    }
}
