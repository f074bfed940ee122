// Pricing types: the candidate fed to the rule engine and the breakdown it
// produces. The breakdown is the auditable artifact: it is snapshotted into
// the booking at commit time and rendered line by line by the client.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::catalog::{AppliesTo, Coach, Court, EquipmentType};
use crate::timeslot::TimeSlot;

/// A candidate booking to be priced
///
/// Carries the already-resolved catalog entities so the engine stays a pure
/// function with no store access.
#[derive(Debug, Clone)]
pub struct PricingCandidate {
    pub court: Court,
    /// Selected equipment with requested quantity
    pub equipment: Vec<(EquipmentType, u32)>,
    pub coach: Option<Coach>,
    pub slot: TimeSlot,
}

/// One applied rule's net contribution to the price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Adjustment {
    pub rule_id: i32,
    pub name: String,
    pub applies_to: AppliesTo,
    /// Signed currency delta introduced by this rule, rounded to 2 decimals
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub amount: Decimal,
}

/// Line-by-line price breakdown
///
/// Invariant: `total` equals the sum of the three bases and every adjustment
/// amount, exactly as serialized. All figures are rounded half-up at two
/// decimals when recorded, so the invariant survives serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub base_court: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub base_equipment: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub base_coach: Decimal,
    pub adjustments: Vec<Adjustment>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total: Decimal,
}

impl PriceBreakdown {
    /// Recompute the total from the recorded figures
    pub fn recomputed_total(&self) -> Decimal {
        self.base_court
            + self.base_equipment
            + self.base_coach
            + self
                .adjustments
                .iter()
                .map(|a| a.amount)
                .sum::<Decimal>()
    }
}
