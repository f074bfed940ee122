// Booking orchestrator
//
// Drives a booking request through its lifecycle: resolve the referenced
// catalog entities, re-check availability under the ledger write lock,
// price the booking, and append it to the ledger. Holding the write lock
// across the re-check and the append is what makes commit atomic: two
// requests racing for the last court slot or the last equipment unit are
// serialized here, and the loser gets a conflict instead of an oversell.

use std::sync::Arc;

use tracing::{debug, info};
use validator::Validate;

use super::error::BookingError;
use super::lifecycle::{BookingPhase, LifecycleMachine};
use super::models::{BookingResponse, CreateBooking};
use crate::availability;
use crate::ledger::Booking;
use crate::pricing::{self, PricingCandidate};
use crate::store::FacilityStore;
use crate::timeslot::TimeSlot;

pub struct BookingOrchestrator {
    store: Arc<FacilityStore>,
}

impl BookingOrchestrator {
    pub fn new(store: Arc<FacilityStore>) -> Self {
        Self { store }
    }

    /// Commit a booking request, or reject it without side effects
    pub async fn commit(&self, request: CreateBooking) -> Result<BookingResponse, BookingError> {
        let phase = BookingPhase::Requested;

        request.validate()?;
        let slot = TimeSlot::parse(&request.start_time, &request.end_time)?;

        // Lock order everywhere is catalog before ledger
        let catalog = self.store.catalog.read().await;

        let court = catalog
            .court(request.court_id)
            .cloned()
            .ok_or(BookingError::NotFound {
                resource: "Court",
                id: request.court_id,
            })?;

        let mut equipment = Vec::with_capacity(request.equipment.len());
        for selection in &request.equipment {
            let kind = catalog
                .equipment_type(selection.equipment_type_id)
                .cloned()
                .ok_or(BookingError::NotFound {
                    resource: "Equipment",
                    id: selection.equipment_type_id,
                })?;
            equipment.push((kind, selection.quantity));
        }

        let coach = match request.coach_id {
            Some(coach_id) => Some(catalog.coach(coach_id).cloned().ok_or(
                BookingError::NotFound {
                    resource: "Coach",
                    id: coach_id,
                },
            )?),
            None => None,
        };

        let phase = LifecycleMachine::transition(phase, BookingPhase::Validated)
            .map_err(BookingError::InvariantViolation)?;

        // Re-check availability under the ledger write lock, with the same
        // resolver the quote endpoint uses. The catalog read lock is still
        // held, so windows and quantities cannot shift underneath.
        let mut ledger = self.store.ledger.write().await;
        let report =
            availability::resolve(&catalog, &ledger, &slot, &self.store.limits())?;

        if !report.court_is_available(court.id) {
            Self::reject(phase, &format!("court {}", court.id))?;
            debug!(
                court_id = court.id,
                conflict = ?ledger.court_conflict(court.id, &slot),
                "Booking rejected: court conflict"
            );
            return Err(BookingError::CourtUnavailable { name: court.name });
        }

        for (kind, requested) in &equipment {
            let available =
                report
                    .equipment_available(kind.id)
                    .ok_or(BookingError::NotFound {
                        resource: "Equipment",
                        id: kind.id,
                    })?;
            if *requested > available {
                Self::reject(phase, &format!("equipment {}", kind.id))?;
                return Err(BookingError::EquipmentShort {
                    name: kind.name.clone(),
                    requested: *requested,
                    available,
                });
            }
        }

        if let Some(coach) = &coach {
            if !report.coach_is_available(coach.id) {
                Self::reject(phase, &format!("coach {}", coach.id))?;
                debug!(
                    coach_id = coach.id,
                    conflict = ?ledger.coach_conflict(coach.id, &slot),
                    "Booking rejected: coach unavailable"
                );
                return Err(BookingError::CoachUnavailable {
                    name: coach.name.clone(),
                });
            }
        }

        let candidate = PricingCandidate {
            court: court.clone(),
            equipment,
            coach: coach.clone(),
            slot,
        };
        let breakdown = pricing::price(&candidate, catalog.rules());

        let phase = LifecycleMachine::transition(phase, BookingPhase::Committed)
            .map_err(BookingError::InvariantViolation)?;

        let booking = Booking {
            id: ledger.next_id(),
            user_name: request.user_name,
            user_email: request.user_email,
            slot,
            court_id: court.id,
            coach_id: coach.as_ref().map(|c| c.id),
            equipment: request.equipment,
            breakdown: breakdown.clone(),
        };
        let booking_id = ledger.append(booking);

        info!(
            booking_id,
            %phase,
            court_id = court.id,
            total = %breakdown.total,
            "Committed booking"
        );

        Ok(BookingResponse {
            booking_id,
            total_price: breakdown.total,
            price_breakdown: breakdown,
        })
    }

    fn reject(phase: BookingPhase, reason: &str) -> Result<BookingPhase, BookingError> {
        let rejected = LifecycleMachine::transition(phase, BookingPhase::Rejected)
            .map_err(BookingError::InvariantViolation)?;
        debug!(%rejected, reason, "Booking left the commit path");
        Ok(rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::{
        AppliesTo, CreateCoach, CreateCoachAvailabilitySlot, CreateCourt, CreateEquipmentType,
        CreatePricingRule, RuleKind,
    };
    use crate::ledger::EquipmentSelection;
    use crate::store::EngineLimits;
    use rust_decimal_macros::dec;

    async fn seeded_store() -> Arc<FacilityStore> {
        let store = Arc::new(FacilityStore::new());
        {
            let mut catalog = store.catalog.write().await;
            catalog.add_court(CreateCourt {
                name: "Center Court".to_string(),
                is_indoor: true,
                base_hourly_rate: dec!(1000),
            });
            catalog.add_equipment_type(CreateEquipmentType {
                name: "Racket".to_string(),
                total_quantity: 5,
                price_per_unit: dec!(50),
            });
            let coach = catalog.add_coach(CreateCoach {
                name: "Alex Moreno".to_string(),
                hourly_rate: dec!(800),
                bio: None,
            });
            // Monday 9-17
            catalog
                .add_coach_slot(
                    coach.id,
                    CreateCoachAvailabilitySlot {
                        day_of_week: 1,
                        start_hour: 9,
                        end_hour: 17,
                    },
                )
                .unwrap();
        }
        store
    }

    fn request(start: &str, end: &str) -> CreateBooking {
        CreateBooking {
            user_name: "Demo User".to_string(),
            user_email: "demo@example.com".to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            court_id: 1,
            equipment: vec![],
            coach_id: None,
        }
    }

    #[tokio::test]
    async fn test_commit_records_booking_and_breakdown() {
        let store = seeded_store().await;
        let orchestrator = BookingOrchestrator::new(store.clone());

        // Monday, 2 hours at 1000/h
        let response = orchestrator
            .commit(request("2025-12-15 10:00:00", "2025-12-15 12:00:00"))
            .await
            .unwrap();
        assert_eq!(response.booking_id, 1);
        assert_eq!(response.total_price, dec!(2000));
        assert_eq!(response.price_breakdown.base_court, dec!(2000));

        let ledger = store.ledger.read().await;
        assert_eq!(ledger.booking_count(), 1);
    }

    #[tokio::test]
    async fn test_double_booking_is_rejected_without_side_effects() {
        let store = seeded_store().await;
        let orchestrator = BookingOrchestrator::new(store.clone());

        orchestrator
            .commit(request("2025-12-15 10:00:00", "2025-12-15 12:00:00"))
            .await
            .unwrap();
        let err = orchestrator
            .commit(request("2025-12-15 11:00:00", "2025-12-15 13:00:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::CourtUnavailable { .. }));

        let ledger = store.ledger.read().await;
        assert_eq!(ledger.booking_count(), 1);
    }

    #[tokio::test]
    async fn test_abutting_booking_commits() {
        let store = seeded_store().await;
        let orchestrator = BookingOrchestrator::new(store);

        orchestrator
            .commit(request("2025-12-15 10:00:00", "2025-12-15 12:00:00"))
            .await
            .unwrap();
        let response = orchestrator
            .commit(request("2025-12-15 12:00:00", "2025-12-15 13:00:00"))
            .await
            .unwrap();
        assert_eq!(response.booking_id, 2);
    }

    #[tokio::test]
    async fn test_court_conflict_checked_before_equipment() {
        let store = seeded_store().await;
        let orchestrator = BookingOrchestrator::new(store);

        let mut first = request("2025-12-15 10:00:00", "2025-12-15 12:00:00");
        first.equipment = vec![EquipmentSelection {
            equipment_type_id: 1,
            quantity: 3,
        }];
        orchestrator.commit(first).await.unwrap();

        let mut second = request("2025-12-15 11:00:00", "2025-12-15 13:00:00");
        second.court_id = 1;
        second.equipment = vec![EquipmentSelection {
            equipment_type_id: 1,
            quantity: 3,
        }];
        let err = orchestrator.commit(second).await.unwrap_err();
        // Court conflict fires first for the same court; use a second court
        // to isolate the equipment check
        assert!(matches!(err, BookingError::CourtUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_equipment_short_on_free_court() {
        let store = seeded_store().await;
        {
            let mut catalog = store.catalog.write().await;
            catalog.add_court(CreateCourt {
                name: "Court B".to_string(),
                is_indoor: false,
                base_hourly_rate: dec!(800),
            });
        }
        let orchestrator = BookingOrchestrator::new(store);

        let mut first = request("2025-12-15 10:00:00", "2025-12-15 12:00:00");
        first.equipment = vec![EquipmentSelection {
            equipment_type_id: 1,
            quantity: 3,
        }];
        orchestrator.commit(first).await.unwrap();

        let mut second = request("2025-12-15 11:00:00", "2025-12-15 13:00:00");
        second.court_id = 2;
        second.equipment = vec![EquipmentSelection {
            equipment_type_id: 1,
            quantity: 3,
        }];
        let err = orchestrator.commit(second).await.unwrap_err();
        match err {
            BookingError::EquipmentShort {
                requested,
                available,
                ..
            } => {
                assert_eq!(requested, 3);
                assert_eq!(available, 2);
            }
            other => panic!("expected EquipmentShort, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_coach_outside_calendar_is_rejected() {
        let store = seeded_store().await;
        let orchestrator = BookingOrchestrator::new(store);

        // Tuesday: coach only works Mondays
        let mut req = request("2025-12-16 10:00:00", "2025-12-16 12:00:00");
        req.coach_id = Some(1);
        let err = orchestrator.commit(req).await.unwrap_err();
        assert!(matches!(err, BookingError::CoachUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_unknown_references_are_not_found() {
        let store = seeded_store().await;
        let orchestrator = BookingOrchestrator::new(store);

        let mut req = request("2025-12-15 10:00:00", "2025-12-15 12:00:00");
        req.court_id = 99;
        assert!(matches!(
            orchestrator.commit(req).await.unwrap_err(),
            BookingError::NotFound {
                resource: "Court",
                ..
            }
        ));

        let mut req = request("2025-12-15 10:00:00", "2025-12-15 12:00:00");
        req.coach_id = Some(99);
        assert!(matches!(
            orchestrator.commit(req).await.unwrap_err(),
            BookingError::NotFound {
                resource: "Coach",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_pricing_rules_flow_into_committed_total() {
        let store = seeded_store().await;
        {
            let mut catalog = store.catalog.write().await;
            catalog.add_pricing_rule(CreatePricingRule {
                name: "Weekend surcharge".to_string(),
                applies_to: AppliesTo::Court,
                rule_type: RuleKind::Multiplier,
                value: dec!(1.5),
                is_weekend: Some(true),
                indoor_only: None,
                start_hour: None,
                end_hour: None,
                is_active: true,
            });
        }
        let orchestrator = BookingOrchestrator::new(store);

        // Saturday, 2 hours
        let response = orchestrator
            .commit(request("2025-12-13 10:00:00", "2025-12-13 12:00:00"))
            .await
            .unwrap();
        assert_eq!(response.total_price, dec!(3000));
        assert_eq!(response.price_breakdown.adjustments.len(), 1);
        assert_eq!(response.price_breakdown.adjustments[0].amount, dec!(1000));
    }

    #[tokio::test]
    async fn test_duration_limit_blocks_commit() {
        let store = Arc::new(FacilityStore::with_limits(EngineLimits {
            max_booking_hours: Some(dec!(2)),
        }));
        {
            let mut catalog = store.catalog.write().await;
            catalog.add_court(CreateCourt {
                name: "Court".to_string(),
                is_indoor: true,
                base_hourly_rate: dec!(1000),
            });
        }
        let orchestrator = BookingOrchestrator::new(store);

        let err = orchestrator
            .commit(request("2025-12-15 10:00:00", "2025-12-15 13:00:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::InvalidInput(_)));
    }
}
