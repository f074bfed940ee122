// Resource catalog store
//
// In-memory administered data: courts, equipment pools, coaches, coach
// calendars, and pricing rules. Mutated only by the admin handlers; read by
// the availability resolver and the booking orchestrator. The store is a
// plain struct so tests can build isolated instances; locking lives in
// `crate::store::FacilityStore`.

use super::models::{
    Coach, CoachAvailabilitySlot, Court, CreateCoach, CreateCoachAvailabilitySlot, CreateCourt,
    CreateEquipmentType, CreatePricingRule, EquipmentType, PricingRule,
};

/// The resource catalog
#[derive(Debug, Default)]
pub struct Catalog {
    courts: Vec<Court>,
    equipment: Vec<EquipmentType>,
    coaches: Vec<Coach>,
    coach_slots: Vec<CoachAvailabilitySlot>,
    rules: Vec<PricingRule>,
    next_court_id: i32,
    next_equipment_id: i32,
    next_coach_id: i32,
    next_slot_id: i32,
    next_rule_id: i32,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            next_court_id: 1,
            next_equipment_id: 1,
            next_coach_id: 1,
            next_slot_id: 1,
            next_rule_id: 1,
            ..Default::default()
        }
    }

    pub fn add_court(&mut self, payload: CreateCourt) -> Court {
        let court = Court {
            id: self.next_court_id,
            name: payload.name,
            is_indoor: payload.is_indoor,
            base_hourly_rate: payload.base_hourly_rate,
        };
        self.next_court_id += 1;
        self.courts.push(court.clone());
        court
    }

    pub fn add_equipment_type(&mut self, payload: CreateEquipmentType) -> EquipmentType {
        let equipment = EquipmentType {
            id: self.next_equipment_id,
            name: payload.name,
            // Validated non-negative before reaching the store
            total_quantity: payload.total_quantity as u32,
            price_per_unit: payload.price_per_unit,
        };
        self.next_equipment_id += 1;
        self.equipment.push(equipment.clone());
        equipment
    }

    pub fn add_coach(&mut self, payload: CreateCoach) -> Coach {
        let coach = Coach {
            id: self.next_coach_id,
            name: payload.name,
            hourly_rate: payload.hourly_rate,
            bio: payload.bio,
        };
        self.next_coach_id += 1;
        self.coaches.push(coach.clone());
        coach
    }

    /// Add a recurring availability window for an existing coach
    ///
    /// Returns None if the coach does not exist.
    pub fn add_coach_slot(
        &mut self,
        coach_id: i32,
        payload: CreateCoachAvailabilitySlot,
    ) -> Option<CoachAvailabilitySlot> {
        self.coach(coach_id)?;
        let slot = CoachAvailabilitySlot {
            id: self.next_slot_id,
            coach_id,
            day_of_week: payload.day_of_week,
            start_hour: payload.start_hour,
            end_hour: payload.end_hour,
        };
        self.next_slot_id += 1;
        self.coach_slots.push(slot.clone());
        Some(slot)
    }

    pub fn add_pricing_rule(&mut self, payload: CreatePricingRule) -> PricingRule {
        let rule = PricingRule {
            id: self.next_rule_id,
            name: payload.name,
            applies_to: payload.applies_to,
            rule_type: payload.rule_type,
            value: payload.value,
            is_weekend: payload.is_weekend,
            indoor_only: payload.indoor_only,
            start_hour: payload.start_hour,
            end_hour: payload.end_hour,
            is_active: payload.is_active,
        };
        self.next_rule_id += 1;
        self.rules.push(rule.clone());
        rule
    }

    pub fn courts(&self) -> &[Court] {
        &self.courts
    }

    pub fn equipment(&self) -> &[EquipmentType] {
        &self.equipment
    }

    pub fn coaches(&self) -> &[Coach] {
        &self.coaches
    }

    pub fn rules(&self) -> &[PricingRule] {
        &self.rules
    }

    pub fn court(&self, id: i32) -> Option<&Court> {
        self.courts.iter().find(|c| c.id == id)
    }

    pub fn equipment_type(&self, id: i32) -> Option<&EquipmentType> {
        self.equipment.iter().find(|e| e.id == id)
    }

    pub fn coach(&self, id: i32) -> Option<&Coach> {
        self.coaches.iter().find(|c| c.id == id)
    }

    /// Recurring windows for one coach on one day of week
    pub fn coach_slots_for_day(
        &self,
        coach_id: i32,
        day_of_week: u32,
    ) -> impl Iterator<Item = &CoachAvailabilitySlot> {
        self.coach_slots
            .iter()
            .filter(move |s| s.coach_id == coach_id && s.day_of_week as u32 == day_of_week)
    }
}
