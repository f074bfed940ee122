// Validation utilities module
// Custom validation functions for domain-specific rules shared by the
// admin payloads (rates, hour ranges, day-of-week)

use rust_decimal::Decimal;
use validator::ValidationError;

/// Validates that a monetary rate is not negative
///
/// Takes a reference: the Validate derive passes non-primitive field types
/// by reference to custom functions.
pub fn validate_non_negative_rate(rate: &Decimal) -> Result<(), ValidationError> {
    if *rate < Decimal::ZERO {
        Err(ValidationError::new("rate_must_not_be_negative"))
    } else {
        Ok(())
    }
}

/// Validates that an hour of day is within 0-23
pub fn validate_hour(hour: i32) -> Result<(), ValidationError> {
    if (0..=23).contains(&hour) {
        Ok(())
    } else {
        Err(ValidationError::new("hour_out_of_range"))
    }
}

/// Validates that a window end hour is within 1-24 (24 = midnight)
pub fn validate_end_hour(hour: i32) -> Result<(), ValidationError> {
    if (1..=24).contains(&hour) {
        Ok(())
    } else {
        Err(ValidationError::new("end_hour_out_of_range"))
    }
}

/// Validates that a day of week is within 0-6 (0 = Sunday)
pub fn validate_day_of_week(day: i32) -> Result<(), ValidationError> {
    if (0..=6).contains(&day) {
        Ok(())
    } else {
        Err(ValidationError::new("day_of_week_out_of_range"))
    }
}
