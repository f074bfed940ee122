use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{debug, error};

use crate::availability::AvailabilityError;
use crate::error::ErrorBody;
use crate::timeslot::SlotError;

/// Error types for the booking path
///
/// Commit-time unavailability maps to 409 Conflict with a message that names
/// the contended resource; the client surfaces `message` verbatim.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Request validation failed: {0}")]
    ValidationError(validator::ValidationErrors),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{resource} with id {id} not found")]
    NotFound { resource: &'static str, id: i32 },

    #[error("Court '{name}' is already booked for the requested time")]
    CourtUnavailable { name: String },

    #[error("Coach '{name}' is not available for the requested time")]
    CoachUnavailable { name: String },

    #[error("Equipment '{name}': requested {requested} units but only {available} available")]
    EquipmentShort {
        name: String,
        requested: u32,
        available: u32,
    },

    #[error("Internal invariant violation: {0}")]
    InvariantViolation(String),
}

impl From<validator::ValidationErrors> for BookingError {
    fn from(errors: validator::ValidationErrors) -> Self {
        BookingError::ValidationError(errors)
    }
}

impl From<SlotError> for BookingError {
    fn from(err: SlotError) -> Self {
        BookingError::InvalidInput(err.to_string())
    }
}

impl From<AvailabilityError> for BookingError {
    fn from(err: AvailabilityError) -> Self {
        match err {
            AvailabilityError::DurationExceedsLimit { .. } => {
                BookingError::InvalidInput(err.to_string())
            }
            AvailabilityError::OvercommittedEquipment { .. } => {
                BookingError::InvariantViolation(err.to_string())
            }
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            BookingError::ValidationError(_) | BookingError::InvalidInput(_) => {
                debug!("Booking rejected as invalid: {}", self);
                (StatusCode::BAD_REQUEST, "INVALID_INPUT", self.to_string())
            }
            BookingError::NotFound { .. } => {
                debug!("Booking referenced a missing resource: {}", self);
                (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string())
            }
            BookingError::CourtUnavailable { .. }
            | BookingError::CoachUnavailable { .. }
            | BookingError::EquipmentShort { .. } => {
                debug!("Booking conflicts with committed state: {}", self);
                (
                    StatusCode::CONFLICT,
                    "RESOURCE_UNAVAILABLE",
                    self.to_string(),
                )
            }
            BookingError::InvariantViolation(detail) => {
                // Full detail stays in the log; the caller sees a generic message
                error!("Internal invariant violation: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        // Same body shape as the root ApiError responses
        let body = ErrorBody {
            error_code,
            message,
        };
        (status, Json(body)).into_response()
    }
}
