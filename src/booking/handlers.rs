// HTTP handler for the booking endpoint

use axum::{extract::State, http::StatusCode, Json};

use super::error::BookingError;
use super::models::{BookingResponse, CreateBooking};
use super::orchestrator::BookingOrchestrator;
use crate::AppState;

/// Create a booking
#[utoipa::path(
    post,
    path = "/bookings",
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking committed", body = BookingResponse),
        (status = 400, description = "Invalid payload or interval"),
        (status = 404, description = "Referenced resource not found"),
        (status = 409, description = "A requested resource is no longer available"),
    ),
    tag = "bookings"
)]
pub async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<CreateBooking>,
) -> Result<(StatusCode, Json<BookingResponse>), BookingError> {
    let orchestrator = BookingOrchestrator::new(state.store.clone());
    let response = orchestrator.commit(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
