// Booking Ledger
//
// The authoritative record of committed bookings and the source of truth
// for conflict detection. Alongside the bookings themselves the ledger
// keeps per-resource indexes (resource id -> start-sorted claim list) so
// the commit-time re-validation never scans the full table.

use std::collections::HashMap;

use super::models::Booking;
use crate::timeslot::TimeSlot;

/// An exclusive interval claim on a court or coach
#[derive(Debug, Clone)]
struct IntervalClaim {
    slot: TimeSlot,
    booking_id: i32,
}

/// A quantity claim on an equipment pool over an interval
#[derive(Debug, Clone)]
struct QuantityClaim {
    slot: TimeSlot,
    quantity: u32,
}

/// The booking ledger
#[derive(Debug, Default)]
pub struct Ledger {
    bookings: HashMap<i32, Booking>,
    court_claims: HashMap<i32, Vec<IntervalClaim>>,
    coach_claims: HashMap<i32, Vec<IntervalClaim>>,
    equipment_claims: HashMap<i32, Vec<QuantityClaim>>,
    next_booking_id: i32,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            next_booking_id: 1,
            ..Default::default()
        }
    }

    /// Whether no committed booking claims the court over an overlapping
    /// interval
    pub fn court_is_free(&self, court_id: i32, slot: &TimeSlot) -> bool {
        self.court_conflict(court_id, slot).is_none()
    }

    /// Id of a booking already claiming the court over an overlapping
    /// interval, if any
    pub fn court_conflict(&self, court_id: i32, slot: &TimeSlot) -> Option<i32> {
        Self::first_overlap(self.court_claims.get(&court_id), slot)
    }

    /// Whether no committed booking claims the coach over an overlapping
    /// interval
    pub fn coach_is_free(&self, coach_id: i32, slot: &TimeSlot) -> bool {
        self.coach_conflict(coach_id, slot).is_none()
    }

    /// Id of a booking already claiming the coach over an overlapping
    /// interval, if any
    pub fn coach_conflict(&self, coach_id: i32, slot: &TimeSlot) -> Option<i32> {
        Self::first_overlap(self.coach_claims.get(&coach_id), slot)
    }

    /// Units of one equipment type reserved by bookings overlapping the slot
    pub fn equipment_reserved(&self, equipment_type_id: i32, slot: &TimeSlot) -> u32 {
        self.equipment_claims
            .get(&equipment_type_id)
            .map(|claims| {
                claims
                    .iter()
                    .take_while(|claim| claim.slot.start() < slot.end())
                    .filter(|claim| claim.slot.overlaps(slot))
                    .map(|claim| claim.quantity)
                    .sum()
            })
            .unwrap_or(0)
    }

    fn first_overlap(claims: Option<&Vec<IntervalClaim>>, slot: &TimeSlot) -> Option<i32> {
        claims.and_then(|claims| {
            claims
                .iter()
                // Claims are sorted by start; nothing past the query end
                // can overlap a half-open interval
                .take_while(|claim| claim.slot.start() < slot.end())
                .find(|claim| claim.slot.overlaps(slot))
                .map(|claim| claim.booking_id)
        })
    }

    /// Allocate the id the next committed booking will receive
    pub fn next_id(&self) -> i32 {
        self.next_booking_id
    }

    /// Append a committed booking and index its claims
    ///
    /// The orchestrator has already validated availability under the same
    /// write lock; this only records.
    pub fn append(&mut self, booking: Booking) -> i32 {
        let id = booking.id;
        Self::insert_sorted(
            self.court_claims.entry(booking.court_id).or_default(),
            IntervalClaim {
                slot: booking.slot,
                booking_id: id,
            },
        );
        if let Some(coach_id) = booking.coach_id {
            Self::insert_sorted(
                self.coach_claims.entry(coach_id).or_default(),
                IntervalClaim {
                    slot: booking.slot,
                    booking_id: id,
                },
            );
        }
        for selection in &booking.equipment {
            let claims = self
                .equipment_claims
                .entry(selection.equipment_type_id)
                .or_default();
            let index = claims.partition_point(|c| c.slot.start() <= booking.slot.start());
            claims.insert(
                index,
                QuantityClaim {
                    slot: booking.slot,
                    quantity: selection.quantity,
                },
            );
        }
        self.next_booking_id = self.next_booking_id.max(id + 1);
        self.bookings.insert(id, booking);
        id
    }

    fn insert_sorted(claims: &mut Vec<IntervalClaim>, claim: IntervalClaim) {
        let index = claims.partition_point(|c| c.slot.start() <= claim.slot.start());
        claims.insert(index, claim);
    }

    pub fn booking(&self, id: i32) -> Option<&Booking> {
        self.bookings.get(&id)
    }

    pub fn booking_count(&self) -> usize {
        self.bookings.len()
    }
}
