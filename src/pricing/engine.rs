// Pricing Rule Engine
//
// Evaluates the conditional pricing rules against a candidate booking and
// produces an auditable line-by-line breakdown. The engine is a pure
// function over an immutable rule list: same candidate + same rules = same
// breakdown, bit for bit.
//
// Combination semantics, per target component independently:
// all matching MULTIPLIER rules first (combined multiplicatively, ascending
// rule id), then all matching FLAT rules (summed). OVERALL rules apply the
// same multiply-then-add ordering to the sum of the three adjusted
// component totals. Adjustments are recorded in the order: component
// multipliers, component flats, overall multipliers, overall flats, ties
// broken by ascending rule id.

use rust_decimal::{Decimal, RoundingStrategy};

use super::models::{Adjustment, PriceBreakdown, PricingCandidate};
use crate::catalog::{AppliesTo, PricingRule, RuleKind};

/// Round a currency amount half-up at two decimals
///
/// The single rounding rule used for every recorded figure, so the
/// breakdown's total always equals the sum of its serialized lines.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Price a candidate booking against the given rules
pub fn price(candidate: &PricingCandidate, rules: &[PricingRule]) -> PriceBreakdown {
    let duration = candidate.slot.duration_hours();

    let base_court = round_currency(candidate.court.base_hourly_rate * duration);
    let equipment_rate: Decimal = candidate
        .equipment
        .iter()
        .map(|(kind, quantity)| kind.price_per_unit * Decimal::from(*quantity))
        .sum();
    let base_equipment = round_currency(equipment_rate * duration);
    let base_coach = candidate
        .coach
        .as_ref()
        .map(|coach| round_currency(coach.hourly_rate * duration))
        .unwrap_or(Decimal::ZERO);

    let has_equipment = !candidate.equipment.is_empty();
    let has_coach = candidate.coach.is_some();

    // Rules whose conditions hold for this candidate, in ascending id order
    let mut matched: Vec<&PricingRule> = rules
        .iter()
        .filter(|rule| rule.is_active && conditions_match(rule, candidate))
        .collect();
    matched.sort_by_key(|rule| rule.id);

    let mut adjustments = Vec::new();
    let mut court_total = base_court;
    let mut equipment_total = base_equipment;
    let mut coach_total = base_coach;

    // Per-component multipliers, then per-component flats. A component with
    // nothing selected is skipped entirely: there is nothing to scale.
    for kind in [RuleKind::Multiplier, RuleKind::Flat] {
        for rule in matched.iter().filter(|r| r.rule_type == kind) {
            let running = match rule.applies_to {
                AppliesTo::Court => &mut court_total,
                AppliesTo::Equipment if has_equipment => &mut equipment_total,
                AppliesTo::Coach if has_coach => &mut coach_total,
                _ => continue,
            };
            let delta = match kind {
                RuleKind::Multiplier => round_currency(*running * rule.value - *running),
                RuleKind::Flat => round_currency(rule.value),
            };
            *running += delta;
            adjustments.push(adjustment_for(rule, delta));
        }
    }

    // OVERALL rules scale the sum of the adjusted component totals
    let mut overall = court_total + equipment_total + coach_total;
    for kind in [RuleKind::Multiplier, RuleKind::Flat] {
        for rule in matched
            .iter()
            .filter(|r| r.applies_to == AppliesTo::Overall && r.rule_type == kind)
        {
            let delta = match kind {
                RuleKind::Multiplier => round_currency(overall * rule.value - overall),
                RuleKind::Flat => round_currency(rule.value),
            };
            overall += delta;
            adjustments.push(adjustment_for(rule, delta));
        }
    }

    PriceBreakdown {
        base_court,
        base_equipment,
        base_coach,
        adjustments,
        total: overall,
    }
}

fn adjustment_for(rule: &PricingRule, amount: Decimal) -> Adjustment {
    Adjustment {
        rule_id: rule.id,
        name: rule.name.clone(),
        applies_to: rule.applies_to,
        amount,
    }
}

/// Whether the rule's condition fields all hold for the candidate
///
/// `indoor_only` is always evaluated against the selected court, whatever
/// the rule targets. The hour range checks the booking's start hour; an
/// inverted pair wraps past midnight, a half-specified pair is unbounded on
/// the missing side.
fn conditions_match(rule: &PricingRule, candidate: &PricingCandidate) -> bool {
    if let Some(weekend) = rule.is_weekend {
        if weekend != candidate.slot.starts_on_weekend() {
            return false;
        }
    }
    if let Some(indoor) = rule.indoor_only {
        if indoor != candidate.court.is_indoor {
            return false;
        }
    }
    start_hour_in_range(
        candidate.slot.start_hour() as i32,
        rule.start_hour,
        rule.end_hour,
    )
}

fn start_hour_in_range(hour: i32, start: Option<i32>, end: Option<i32>) -> bool {
    match (start, end) {
        (None, None) => true,
        (Some(start), None) => hour >= start,
        (None, Some(end)) => hour < end,
        (Some(start), Some(end)) => {
            if start < end {
                hour >= start && hour < end
            } else if start > end {
                // Overnight window, e.g. 22 to 2
                hour >= start || hour < end
            } else {
                false
            }
        }
    }
}
