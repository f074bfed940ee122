// Availability resolver
//
// Pure interval logic over a catalog snapshot and the ledger: which courts,
// equipment quantities, and coaches are free for a requested slot. The
// booking orchestrator runs the same checks under the ledger write lock, so
// a quote and a commit can never disagree about the rules.

use thiserror::Error;

use crate::catalog::{Catalog, Coach, Court, EquipmentType};
use crate::ledger::Ledger;
use crate::store::EngineLimits;
use crate::timeslot::TimeSlot;

#[derive(Debug, Error)]
pub enum AvailabilityError {
    #[error("Requested duration exceeds the maximum of {max_hours} hours")]
    DurationExceedsLimit { max_hours: String },

    #[error("Equipment '{name}' has more units reserved than exist ({reserved} > {total})")]
    OvercommittedEquipment {
        name: String,
        reserved: u32,
        total: u32,
    },
}

/// Availability of every catalog resource for one requested slot
#[derive(Debug, Clone)]
pub struct AvailabilityReport {
    pub courts: Vec<(Court, bool)>,
    pub equipment: Vec<(EquipmentType, u32)>,
    pub coaches: Vec<(Coach, bool)>,
}

impl AvailabilityReport {
    pub fn court_is_available(&self, court_id: i32) -> bool {
        self.courts
            .iter()
            .any(|(court, available)| court.id == court_id && *available)
    }

    pub fn equipment_available(&self, equipment_type_id: i32) -> Option<u32> {
        self.equipment
            .iter()
            .find(|(equipment, _)| equipment.id == equipment_type_id)
            .map(|(_, available)| *available)
    }

    pub fn coach_is_available(&self, coach_id: i32) -> bool {
        self.coaches
            .iter()
            .any(|(coach, available)| coach.id == coach_id && *available)
    }
}

/// Resolve the availability of every resource for the requested slot
pub fn resolve(
    catalog: &Catalog,
    ledger: &Ledger,
    slot: &TimeSlot,
    limits: &EngineLimits,
) -> Result<AvailabilityReport, AvailabilityError> {
    if let Some(max_hours) = limits.max_booking_hours {
        if slot.duration_hours() > max_hours {
            return Err(AvailabilityError::DurationExceedsLimit {
                max_hours: max_hours.to_string(),
            });
        }
    }

    let courts = catalog
        .courts()
        .iter()
        .map(|court| {
            let free = ledger.court_is_free(court.id, slot);
            (court.clone(), free)
        })
        .collect();

    let equipment = catalog
        .equipment()
        .iter()
        .map(|equipment| {
            let reserved = ledger.equipment_reserved(equipment.id, slot);
            if reserved > equipment.total_quantity {
                return Err(AvailabilityError::OvercommittedEquipment {
                    name: equipment.name.clone(),
                    reserved,
                    total: equipment.total_quantity,
                });
            }
            Ok((equipment.clone(), equipment.total_quantity - reserved))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let coaches = catalog
        .coaches()
        .iter()
        .map(|coach| {
            let free = calendar_covers(catalog, coach.id, slot)
                && ledger.coach_is_free(coach.id, slot);
            (coach.clone(), free)
        })
        .collect();

    Ok(AvailabilityReport {
        courts,
        equipment,
        coaches,
    })
}

/// Whether the coach's recurring weekly windows cover the whole slot
///
/// The slot is split per calendar day; each portion must be covered by the
/// union of that weekday's windows. Adjacent windows (9-12 and 12-17)
/// compose into continuous coverage.
fn calendar_covers(catalog: &Catalog, coach_id: i32, slot: &TimeSlot) -> bool {
    slot.day_portions().iter().all(|portion| {
        let mut windows: Vec<(u32, u32)> = catalog
            .coach_slots_for_day(coach_id, portion.day_of_week)
            .map(|window| {
                (
                    window.start_hour as u32 * 3600,
                    window.end_hour as u32 * 3600,
                )
            })
            .collect();
        windows.sort_unstable();

        let mut covered_until = portion.start_second;
        for (start, end) in windows {
            if start > covered_until {
                break;
            }
            covered_until = covered_until.max(end);
        }
        covered_until >= portion.end_second
    })
}
