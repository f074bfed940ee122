pub mod availability;
pub mod booking;
pub mod catalog;
pub mod error;
pub mod ledger;
pub mod pricing;
pub mod store;
pub mod timeslot;
pub mod validation;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use rust_decimal::Decimal;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use store::{EngineLimits, FacilityStore};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        availability::handlers::get_availability,
        booking::handlers::create_booking,
        catalog::handlers::create_court,
        catalog::handlers::create_equipment_type,
        catalog::handlers::create_coach,
        catalog::handlers::create_coach_availability,
        catalog::handlers::create_pricing_rule,
    ),
    components(
        schemas(
            availability::handlers::AvailabilityResponse,
            availability::handlers::CourtAvailability,
            availability::handlers::EquipmentAvailability,
            availability::handlers::CoachAvailability,
            booking::CreateBooking,
            booking::BookingResponse,
            catalog::Court,
            catalog::EquipmentType,
            catalog::Coach,
            catalog::CoachAvailabilitySlot,
            catalog::PricingRule,
            catalog::AppliesTo,
            catalog::RuleKind,
            catalog::CreateCourt,
            catalog::CreateEquipmentType,
            catalog::CreateCoach,
            catalog::CreateCoachAvailabilitySlot,
            catalog::CreatePricingRule,
            ledger::EquipmentSelection,
            pricing::Adjustment,
            pricing::PriceBreakdown,
        )
    ),
    tags(
        (name = "availability", description = "Resource availability for a time slot"),
        (name = "bookings", description = "Transactional booking commits"),
        (name = "admin", description = "Catalog administration endpoints")
    ),
    info(
        title = "Facility Booking API",
        version = "1.0.0",
        description = "Availability and pricing engine for sports facility bookings"
    )
)]
struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FacilityStore>,
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds CORS middleware
pub fn create_router(store: Arc<FacilityStore>) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    let state = AppState { store };

    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Client-facing routes
        .route("/availability", get(availability::handlers::get_availability))
        .route("/bookings", post(booking::handlers::create_booking))
        // Admin routes
        .route("/admin/courts", post(catalog::handlers::create_court))
        .route(
            "/admin/equipment",
            post(catalog::handlers::create_equipment_type),
        )
        .route("/admin/coaches", post(catalog::handlers::create_coach))
        .route(
            "/admin/coaches/:id/availability",
            post(catalog::handlers::create_coach_availability),
        )
        .route(
            "/admin/pricing-rules",
            post(catalog::handlers::create_pricing_rule),
        )
        .layer(cors)
        .with_state(state)
}

/// Read engine limits from the environment
fn limits_from_env() -> EngineLimits {
    let max_booking_hours = std::env::var("MAX_BOOKING_HOURS")
        .ok()
        .and_then(|raw| raw.parse::<Decimal>().ok());
    EngineLimits { max_booking_hours }
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Facility Booking API - Starting...");

    // Get configuration from environment variables
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());

    let limits = limits_from_env();
    if let Some(max) = limits.max_booking_hours {
        tracing::info!("Maximum booking duration: {} hours", max);
    }

    let store = Arc::new(FacilityStore::with_limits(limits));
    let app = create_router(store);

    // Start the Axum server
    let addr = format!("{}:{}", host, port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Facility Booking API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await.expect("Server error");
}
