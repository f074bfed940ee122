// Catalog entities and their admin creation payloads
//
// Everything here is administered data: courts, equipment pools, coaches,
// recurring coach availability windows, and pricing rules. Ids are
// sequential i32 values allocated by the catalog store; the browser client
// treats every id as a JSON number.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::validation::{validate_hour, validate_non_negative_rate};

/// Booking component a pricing rule is evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppliesTo {
    Court,
    Equipment,
    Coach,
    Overall,
}

impl fmt::Display for AppliesTo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppliesTo::Court => write!(f, "COURT"),
            AppliesTo::Equipment => write!(f, "EQUIPMENT"),
            AppliesTo::Coach => write!(f, "COACH"),
            AppliesTo::Overall => write!(f, "OVERALL"),
        }
    }
}

/// How a pricing rule's value is applied
///
/// A multiplier scales its target component (1.5 = +50%); a flat rule adds a
/// signed currency amount after all multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleKind {
    Multiplier,
    Flat,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Multiplier => write!(f, "MULTIPLIER"),
            RuleKind::Flat => write!(f, "FLAT"),
        }
    }
}

/// A bookable court: single exclusive unit
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Court {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Center Court")]
    pub name: String,
    pub is_indoor: bool,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 1000.0)]
    pub base_hourly_rate: Decimal,
}

/// An equipment type with a bounded quantity pool
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentType {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Racket")]
    pub name: String,
    #[schema(example = 5)]
    pub total_quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 50.0)]
    pub price_per_unit: Decimal,
}

/// A coach with an hourly rate and a recurring weekly calendar
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Coach {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Alex Moreno")]
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 800.0)]
    pub hourly_rate: Decimal,
    pub bio: Option<String>,
}

/// One recurring weekly availability window for a coach
///
/// `day_of_week` follows the client's JavaScript convention: 0 = Sunday
/// through 6 = Saturday. Windows never span midnight; the per-day union of
/// windows defines when the coach can be booked.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoachAvailabilitySlot {
    pub id: i32,
    pub coach_id: i32,
    #[schema(minimum = 0, maximum = 6)]
    pub day_of_week: i32,
    #[schema(minimum = 0, maximum = 23)]
    pub start_hour: i32,
    /// Exclusive end hour; 24 means the window runs to midnight
    #[schema(minimum = 1, maximum = 24)]
    pub end_hour: i32,
}

/// A conditional, stackable pricing rule
///
/// `None` in a condition field means the condition does not constrain
/// matching. Rules matched to a committed booking are snapshotted into its
/// breakdown, so later edits never rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingRule {
    pub id: i32,
    #[schema(example = "Weekend surcharge")]
    pub name: String,
    pub applies_to: AppliesTo,
    pub rule_type: RuleKind,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 1.5)]
    pub value: Decimal,
    pub is_weekend: Option<bool>,
    pub indoor_only: Option<bool>,
    pub start_hour: Option<i32>,
    pub end_hour: Option<i32>,
    pub is_active: bool,
}

// ---- Admin creation payloads ----

/// Payload for POST /admin/courts
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourt {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub is_indoor: bool,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    #[validate(custom = "validate_non_negative_rate")]
    pub base_hourly_rate: Decimal,
}

/// Payload for POST /admin/equipment
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEquipmentType {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(range(
        min = 0,
        max = 4_294_967_295,
        message = "totalQuantity out of range"
    ))]
    pub total_quantity: i64,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    #[validate(custom = "validate_non_negative_rate")]
    pub price_per_unit: Decimal,
}

/// Payload for POST /admin/coaches
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCoach {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    #[validate(custom = "validate_non_negative_rate")]
    pub hourly_rate: Decimal,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Payload for POST /admin/coaches/{id}/availability
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_slot_hour_order"))]
pub struct CreateCoachAvailabilitySlot {
    #[validate(custom = "crate::validation::validate_day_of_week")]
    pub day_of_week: i32,
    #[validate(custom = "crate::validation::validate_hour")]
    #[schema(minimum = 0, maximum = 23)]
    pub start_hour: i32,
    /// Exclusive end hour, 1-24; 24 means the window runs to midnight
    #[validate(custom = "crate::validation::validate_end_hour")]
    #[schema(minimum = 1, maximum = 24)]
    pub end_hour: i32,
}

fn validate_slot_hour_order(slot: &CreateCoachAvailabilitySlot) -> Result<(), ValidationError> {
    if slot.start_hour >= slot.end_hour {
        return Err(ValidationError::new("start_hour_must_precede_end_hour"));
    }
    Ok(())
}

/// Payload for POST /admin/pricing-rules
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_rule_conditions"))]
pub struct CreatePricingRule {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub applies_to: AppliesTo,
    pub rule_type: RuleKind,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub value: Decimal,
    #[serde(default)]
    pub is_weekend: Option<bool>,
    #[serde(default)]
    pub indoor_only: Option<bool>,
    #[serde(default)]
    pub start_hour: Option<i32>,
    #[serde(default)]
    pub end_hour: Option<i32>,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}

fn validate_rule_conditions(rule: &CreatePricingRule) -> Result<(), ValidationError> {
    if let Some(hour) = rule.start_hour {
        validate_hour(hour)?;
    }
    if let Some(hour) = rule.end_hour {
        validate_hour(hour)?;
    }
    // A negative multiplier has no sensible meaning; flat amounts may be
    // negative (discounts).
    if rule.rule_type == RuleKind::Multiplier && rule.value < Decimal::ZERO {
        return Err(ValidationError::new("multiplier_must_not_be_negative"));
    }
    Ok(())
}
