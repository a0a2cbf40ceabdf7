//! Record validation.
//!
//! Checks required fields and the mobile-number pattern before a record
//! is written, and again when a stored record is read back. Each rule has
//! its own error variant so callers can report the exact field.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

use super::record::{Lawyer, Transaction};

/// Amounts must stay below this many whole units.
///
/// Together with [`MAX_AMOUNT_SCALE`] this keeps every amount within 15
/// significant digits, which survive the JSON number form unchanged.
pub const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000;

/// Maximum decimal places in an amount.
pub const MAX_AMOUNT_SCALE: u32 = 2;

/// Mobile numbers: `05` followed by eight digits, or `5` followed by eight.
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(05|5)[0-9]{8}$").expect("phone pattern is a valid regex")
});

/// A record failed a field rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("lawyer name is required")]
    MissingName,
    #[error("professional id is required")]
    MissingProfessionalId,
    #[error("phone number is required")]
    MissingPhone,
    #[error("invalid phone number '{0}': must start with 05 and have 10 digits")]
    InvalidPhone(String),
    #[error("a lawyer must be selected")]
    MissingLawyer,
    #[error("document count must be greater than zero")]
    InvalidDocumentCount,
    #[error("amount must be greater than zero, got {0}")]
    InvalidAmount(Decimal),
    #[error("amount {0} has more than 2 decimal places")]
    AmountTooPrecise(Decimal),
    #[error("amount {0} must be below 1000000000000")]
    AmountTooLarge(Decimal),
}

/// Validate a lawyer's required fields and phone format.
///
/// Whitespace inside the phone number is ignored for the pattern check.
pub fn validate_lawyer(lawyer: &Lawyer) -> Result<(), ValidationError> {
    if lawyer.name.trim().is_empty() {
        return Err(ValidationError::MissingName);
    }
    if lawyer.professional_id.trim().is_empty() {
        return Err(ValidationError::MissingProfessionalId);
    }
    if lawyer.phone.trim().is_empty() {
        return Err(ValidationError::MissingPhone);
    }

    let compact: String = lawyer.phone.chars().filter(|c| !c.is_whitespace()).collect();
    if !PHONE_PATTERN.is_match(&compact) {
        return Err(ValidationError::InvalidPhone(lawyer.phone.clone()));
    }

    Ok(())
}

/// Validate a transaction's required fields.
///
/// Does not check that `lawyer_id` refers to an existing lawyer; that
/// needs the lawyer collection and is done by the caller.
pub fn validate_transaction(transaction: &Transaction) -> Result<(), ValidationError> {
    if transaction.lawyer_id.trim().is_empty() {
        return Err(ValidationError::MissingLawyer);
    }
    if transaction.document_count == 0 {
        return Err(ValidationError::InvalidDocumentCount);
    }
    if transaction.amount <= Decimal::ZERO {
        return Err(ValidationError::InvalidAmount(transaction.amount));
    }
    if transaction.amount.normalize().scale() > MAX_AMOUNT_SCALE {
        return Err(ValidationError::AmountTooPrecise(transaction.amount));
    }
    if transaction.amount >= Decimal::from(MAX_AMOUNT_UNITS) {
        return Err(ValidationError::AmountTooLarge(transaction.amount));
    }
    Ok(())
}
