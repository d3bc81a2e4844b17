use crate::error::ValidationErrors;
use rust_decimal::Decimal;
use std::fmt::Display;

/// Input checks run at the HTTP boundary, before any service logic.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Length in characters, not bytes ("İstanbul" is 8).
pub(crate) fn check_length(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) {
    let len = value.chars().count();
    if len < min {
        errors.push(field, format!("must be at least {min} characters long"));
    } else if len > max {
        errors.push(field, format!("must be at most {max} characters long"));
    }
}

pub(crate) fn check_range<T>(errors: &mut ValidationErrors, field: &'static str, value: T, min: T, max: T)
where
    T: PartialOrd + Display + Copy,
{
    if value < min || value > max {
        errors.push(field, format!("must be between {min} and {max}"));
    }
}

pub(crate) fn check_at_least<T>(errors: &mut ValidationErrors, field: &'static str, value: T, min: T)
where
    T: PartialOrd + Display + Copy,
{
    if value < min {
        errors.push(field, format!("must be greater than or equal to {min}"));
    }
}

pub(crate) fn check_non_negative(errors: &mut ValidationErrors, field: &'static str, value: Decimal) {
    if value.is_sign_negative() && !value.is_zero() {
        errors.push(field, "must be greater than or equal to 0");
    }
}

pub(crate) const MIN_YEAR: i32 = 1000;
pub(crate) const MAX_YEAR: i32 = 2100;
