// Booking lifecycle machine
//
// A booking request moves Requested -> Validated -> Committed, or drops to
// Rejected from either pre-commit phase. Committed and Rejected are
// terminal. The orchestrator drives every phase change through this
// machine so an out-of-order step surfaces as an internal error instead of
// silently corrupting the ledger.

use std::fmt;

/// Phase of a booking request inside the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingPhase {
    Requested,
    Validated,
    Committed,
    Rejected,
}

impl fmt::Display for BookingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingPhase::Requested => write!(f, "Requested"),
            BookingPhase::Validated => write!(f, "Validated"),
            BookingPhase::Committed => write!(f, "Committed"),
            BookingPhase::Rejected => write!(f, "Rejected"),
        }
    }
}

/// Service for managing booking phase transitions
pub struct LifecycleMachine;

impl LifecycleMachine {
    /// Check if a phase transition is valid
    ///
    /// Valid transitions:
    /// - Requested → Validated, Rejected
    /// - Validated → Committed, Rejected
    /// - Committed → (terminal)
    /// - Rejected → (terminal)
    /// - Any phase → same phase (idempotent)
    pub fn is_valid_transition(from: BookingPhase, to: BookingPhase) -> bool {
        if from == to {
            return true;
        }

        matches!(
            (from, to),
            (BookingPhase::Requested, BookingPhase::Validated)
                | (BookingPhase::Requested, BookingPhase::Rejected)
                | (BookingPhase::Validated, BookingPhase::Committed)
                | (BookingPhase::Validated, BookingPhase::Rejected)
        )
    }

    /// Attempt to transition from one phase to another
    ///
    /// Returns `Ok(to)` if the transition is valid, `Err(message)` otherwise.
    pub fn transition(from: BookingPhase, to: BookingPhase) -> Result<BookingPhase, String> {
        if Self::is_valid_transition(from, to) {
            Ok(to)
        } else {
            Err(format!("Invalid booking phase transition from {} to {}", from, to))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_to_validated() {
        assert!(LifecycleMachine::is_valid_transition(
            BookingPhase::Requested,
            BookingPhase::Validated
        ));
    }

    #[test]
    fn test_validated_to_committed() {
        assert!(LifecycleMachine::is_valid_transition(
            BookingPhase::Validated,
            BookingPhase::Committed
        ));
    }

    #[test]
    fn test_rejection_from_pre_commit_phases() {
        assert!(LifecycleMachine::is_valid_transition(
            BookingPhase::Requested,
            BookingPhase::Rejected
        ));
        assert!(LifecycleMachine::is_valid_transition(
            BookingPhase::Validated,
            BookingPhase::Rejected
        ));
    }

    #[test]
    fn test_cannot_skip_validation() {
        assert!(!LifecycleMachine::is_valid_transition(
            BookingPhase::Requested,
            BookingPhase::Committed
        ));
    }

    #[test]
    fn test_terminal_phases() {
        assert!(!LifecycleMachine::is_valid_transition(
            BookingPhase::Committed,
            BookingPhase::Rejected
        ));
        assert!(!LifecycleMachine::is_valid_transition(
            BookingPhase::Rejected,
            BookingPhase::Validated
        ));
        assert!(!LifecycleMachine::is_valid_transition(
            BookingPhase::Committed,
            BookingPhase::Requested
        ));
    }

    #[test]
    fn test_same_phase_is_idempotent() {
        for phase in [
            BookingPhase::Requested,
            BookingPhase::Validated,
            BookingPhase::Committed,
            BookingPhase::Rejected,
        ] {
            assert!(LifecycleMachine::is_valid_transition(phase, phase));
        }
    }

    #[test]
    fn test_transition_error_names_phases() {
        let err = LifecycleMachine::transition(BookingPhase::Committed, BookingPhase::Validated)
            .unwrap_err();
        assert!(err.contains("Committed"));
        assert!(err.contains("Validated"));
    }
}
