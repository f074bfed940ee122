// HTTP handlers for the admin catalog endpoints
//
// Each endpoint validates its payload, takes the catalog write lock, and
// returns the created entity with its allocated id.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::catalog::models::{
    Coach, CoachAvailabilitySlot, Court, CreateCoach, CreateCoachAvailabilitySlot, CreateCourt,
    CreateEquipmentType, CreatePricingRule, EquipmentType, PricingRule,
};
use crate::error::ApiError;
use crate::AppState;

/// Register a court
#[utoipa::path(
    post,
    path = "/admin/courts",
    request_body = CreateCourt,
    responses(
        (status = 201, description = "Court created", body = Court),
        (status = 400, description = "Invalid payload"),
    ),
    tag = "admin"
)]
pub async fn create_court(
    State(state): State<AppState>,
    Json(payload): Json<CreateCourt>,
) -> Result<(StatusCode, Json<Court>), ApiError> {
    payload.validate()?;

    let mut catalog = state.store.catalog.write().await;
    let court = catalog.add_court(payload);

    tracing::info!(id = court.id, name = %court.name, "Created court");
    Ok((StatusCode::CREATED, Json(court)))
}

/// Register an equipment type with its quantity pool
#[utoipa::path(
    post,
    path = "/admin/equipment",
    request_body = CreateEquipmentType,
    responses(
        (status = 201, description = "Equipment type created", body = EquipmentType),
        (status = 400, description = "Invalid payload"),
    ),
    tag = "admin"
)]
pub async fn create_equipment_type(
    State(state): State<AppState>,
    Json(payload): Json<CreateEquipmentType>,
) -> Result<(StatusCode, Json<EquipmentType>), ApiError> {
    payload.validate()?;

    let mut catalog = state.store.catalog.write().await;
    let equipment = catalog.add_equipment_type(payload);

    tracing::info!(
        id = equipment.id,
        name = %equipment.name,
        quantity = equipment.total_quantity,
        "Created equipment type"
    );
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// Register a coach
#[utoipa::path(
    post,
    path = "/admin/coaches",
    request_body = CreateCoach,
    responses(
        (status = 201, description = "Coach created", body = Coach),
        (status = 400, description = "Invalid payload"),
    ),
    tag = "admin"
)]
pub async fn create_coach(
    State(state): State<AppState>,
    Json(payload): Json<CreateCoach>,
) -> Result<(StatusCode, Json<Coach>), ApiError> {
    payload.validate()?;

    let mut catalog = state.store.catalog.write().await;
    let coach = catalog.add_coach(payload);

    tracing::info!(id = coach.id, name = %coach.name, "Created coach");
    Ok((StatusCode::CREATED, Json(coach)))
}

/// Add a recurring weekly availability window to a coach
///
/// Windows never span midnight; an end hour of 24 runs the window to
/// midnight, one past the 0-23 range start hours use.
#[utoipa::path(
    post,
    path = "/admin/coaches/{id}/availability",
    params(("id" = i32, Path, description = "Coach id")),
    request_body = CreateCoachAvailabilitySlot,
    responses(
        (status = 201, description = "Availability window created", body = CoachAvailabilitySlot),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Coach not found"),
    ),
    tag = "admin"
)]
pub async fn create_coach_availability(
    State(state): State<AppState>,
    Path(coach_id): Path<i32>,
    Json(payload): Json<CreateCoachAvailabilitySlot>,
) -> Result<(StatusCode, Json<CoachAvailabilitySlot>), ApiError> {
    payload.validate()?;

    let mut catalog = state.store.catalog.write().await;
    let slot = catalog
        .add_coach_slot(coach_id, payload)
        .ok_or(ApiError::NotFound {
            resource: "Coach",
            id: coach_id,
        })?;

    tracing::info!(
        coach_id,
        day = slot.day_of_week,
        start = slot.start_hour,
        end = slot.end_hour,
        "Added coach availability window"
    );
    Ok((StatusCode::CREATED, Json(slot)))
}

/// Register a pricing rule
#[utoipa::path(
    post,
    path = "/admin/pricing-rules",
    request_body = CreatePricingRule,
    responses(
        (status = 201, description = "Pricing rule created", body = PricingRule),
        (status = 400, description = "Invalid payload"),
    ),
    tag = "admin"
)]
pub async fn create_pricing_rule(
    State(state): State<AppState>,
    Json(payload): Json<CreatePricingRule>,
) -> Result<(StatusCode, Json<PricingRule>), ApiError> {
    payload.validate()?;

    let mut catalog = state.store.catalog.write().await;
    let rule = catalog.add_pricing_rule(payload);

    tracing::info!(
        id = rule.id,
        name = %rule.name,
        applies_to = %rule.applies_to,
        rule_type = %rule.rule_type,
        "Created pricing rule"
    );
    Ok((StatusCode::CREATED, Json(rule)))
}
