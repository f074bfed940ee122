// Booking request and response types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::ledger::EquipmentSelection;
use crate::pricing::PriceBreakdown;

/// Payload for POST /bookings
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    #[validate(length(min = 1, message = "userName is required"))]
    pub user_name: String,
    #[validate(email(message = "userEmail must be a valid email address"))]
    pub user_email: String,
    /// Requested start, "YYYY-MM-DD HH:MM:SS"
    pub start_time: String,
    /// Requested end, "YYYY-MM-DD HH:MM:SS"
    pub end_time: String,
    pub court_id: i32,
    #[serde(default)]
    #[validate]
    pub equipment: Vec<EquipmentSelection>,
    #[serde(default)]
    pub coach_id: Option<i32>,
}

/// Response for a committed booking
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub booking_id: i32,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_price: Decimal,
    pub price_breakdown: PriceBreakdown,
}
