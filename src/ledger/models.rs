// Booking record types
//
// A committed booking claims a court for an interval, zero or more
// equipment units for the same interval, and optionally a coach. The price
// breakdown computed at commit time is stored with the booking so later
// rule or rate edits never alter history.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::pricing::PriceBreakdown;
use crate::timeslot::TimeSlot;

/// One equipment line in a booking: a type and a claimed quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentSelection {
    pub equipment_type_id: i32,
    #[validate(range(min = 1, message = "quantity must be positive"))]
    pub quantity: u32,
}

/// A committed booking, the unit of record in the ledger
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: i32,
    pub user_name: String,
    pub user_email: String,
    pub slot: TimeSlot,
    pub court_id: i32,
    pub coach_id: Option<i32>,
    pub equipment: Vec<EquipmentSelection>,
    pub breakdown: PriceBreakdown,
}
