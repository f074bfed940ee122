// GET /availability handler

use axum::{
    extract::{Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use super::resolver;
use crate::error::ApiError;
use crate::timeslot::TimeSlot;
use crate::AppState;

/// Query parameters for the availability endpoint
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    /// Requested start, "YYYY-MM-DD HH:MM:SS"
    pub start_time: String,
    /// Requested end, "YYYY-MM-DD HH:MM:SS"
    pub end_time: String,
}

/// A court with its availability for the requested slot
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourtAvailability {
    pub id: i32,
    pub name: String,
    pub is_indoor: bool,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub base_hourly_rate: Decimal,
    pub is_available: bool,
}

/// An equipment type with its remaining quantity for the requested slot
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentAvailability {
    pub id: i32,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price_per_unit: Decimal,
    pub available_quantity: u32,
}

/// A coach with their availability for the requested slot
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoachAvailability {
    pub id: i32,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub hourly_rate: Decimal,
    pub is_available: bool,
}

/// Availability of every catalog resource for the requested slot
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub courts: Vec<CourtAvailability>,
    pub equipment: Vec<EquipmentAvailability>,
    pub coaches: Vec<CoachAvailability>,
}

/// Get resource availability for a time slot
#[utoipa::path(
    get,
    path = "/availability",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Availability for the requested slot", body = AvailabilityResponse),
        (status = 400, description = "Malformed or inverted interval"),
    ),
    tag = "availability"
)]
pub async fn get_availability(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let slot = TimeSlot::parse(&query.start_time, &query.end_time)?;

    let catalog = state.store.catalog.read().await;
    let ledger = state.store.ledger.read().await;
    let report = resolver::resolve(&catalog, &ledger, &slot, &state.store.limits())?;

    info!(
        start = %slot.start(),
        end = %slot.end(),
        courts = report.courts.len(),
        coaches = report.coaches.len(),
        "Resolved availability"
    );

    Ok(Json(AvailabilityResponse {
        courts: report
            .courts
            .into_iter()
            .map(|(court, available)| CourtAvailability {
                id: court.id,
                name: court.name,
                is_indoor: court.is_indoor,
                base_hourly_rate: court.base_hourly_rate,
                is_available: available,
            })
            .collect(),
        equipment: report
            .equipment
            .into_iter()
            .map(|(equipment, available)| EquipmentAvailability {
                id: equipment.id,
                name: equipment.name,
                price_per_unit: equipment.price_per_unit,
                available_quantity: available,
            })
            .collect(),
        coaches: report
            .coaches
            .into_iter()
            .map(|(coach, available)| CoachAvailability {
                id: coach.id,
                name: coach.name,
                hourly_rate: coach.hourly_rate,
                is_available: available,
            })
            .collect(),
    }))
}
