// Facility store
//
// Process-wide state behind one explicit object: the resource catalog and
// the booking ledger, each behind its own RwLock. Availability reads take
// read locks and run in parallel; the orchestrator's commit step holds the
// ledger write lock for its whole check-then-append, which is the single
// serialization point for writes. Tests build isolated instances.

use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::catalog::Catalog;
use crate::ledger::Ledger;

/// Administrator-configured defensive bounds
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineLimits {
    /// Maximum booking duration in hours; None = unbounded
    pub max_booking_hours: Option<Decimal>,
}

/// The one shared mutable state of the engine
#[derive(Debug)]
pub struct FacilityStore {
    pub catalog: RwLock<Catalog>,
    pub ledger: RwLock<Ledger>,
    limits: EngineLimits,
}

impl FacilityStore {
    pub fn new() -> Self {
        Self::with_limits(EngineLimits::default())
    }

    pub fn with_limits(limits: EngineLimits) -> Self {
        Self {
            catalog: RwLock::new(Catalog::new()),
            ledger: RwLock::new(Ledger::new()),
            limits,
        }
    }

    pub fn limits(&self) -> EngineLimits {
        self.limits
    }
}

impl Default for FacilityStore {
    fn default() -> Self {
        Self::new()
    }
}
