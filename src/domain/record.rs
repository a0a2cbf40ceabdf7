//! Core record types.
//!
//! Defines the two persisted entities (lawyers and their billable
//! transactions) plus the small enums shared across the crate.
//! Field names serialize in camelCase so stored collections and backup
//! files keep the `ltms_*` JSON layout.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ────────────────────────────────────────────
// Identifiers
// ────────────────────────────────────────────

/// Lawyer identifier.
pub type LawyerId = String;

/// Transaction identifier.
pub type TransactionId = String;

/// Generate a fresh record identifier.
///
/// Existing stored ids (e.g. `"1"`) are kept verbatim; only new records
/// get a UUID.
pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

// ────────────────────────────────────────────
// Entities
// ────────────────────────────────────────────

/// A lawyer whose transactions are tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lawyer {
    /// Unique (trust-based) identifier.
    pub id: LawyerId,
    /// Full name.
    pub name: String,
    /// Professional licence number, e.g. `LAW-2024-001`.
    pub professional_id: String,
    /// Mobile number, `05XXXXXXXX` or `5XXXXXXXX`.
    pub phone: String,
}

impl Lawyer {
    /// Create a lawyer with a freshly generated id.
    pub fn new(
        name: impl Into<String>,
        professional_id: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            professional_id: professional_id.into(),
            phone: phone.into(),
        }
    }
}

/// A billable transaction owned by a lawyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique (trust-based) identifier.
    pub id: TransactionId,
    /// Owning lawyer.
    pub lawyer_id: LawyerId,
    /// Number of documents processed.
    pub document_count: u32,
    /// Day the transaction happened.
    pub date: NaiveDate,
    /// Billed amount. Written as a JSON number; read from a number or a
    /// numeric string.
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
    /// Whether the amount has been collected.
    pub is_paid: bool,
}

impl Transaction {
    /// Create a transaction with a freshly generated id.
    pub fn new(
        lawyer_id: impl Into<LawyerId>,
        document_count: u32,
        date: NaiveDate,
        amount: Decimal,
        is_paid: bool,
    ) -> Self {
        Self {
            id: new_id(),
            lawyer_id: lawyer_id.into(),
            document_count,
            date,
            amount,
            is_paid,
        }
    }
}

// ────────────────────────────────────────────
// Shared enums
// ────────────────────────────────────────────

/// Payment-status selector used by filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// No filtering on payment.
    #[default]
    All,
    /// Only collected transactions.
    Paid,
    /// Only outstanding transactions.
    Unpaid,
}

impl PaymentStatus {
    /// The `is_paid` value this status selects, `None` for [`Self::All`].
    pub const fn as_flag(self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Paid => Some(true),
            Self::Unpaid => Some(false),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Paid => write!(f, "paid"),
            Self::Unpaid => write!(f, "unpaid"),
        }
    }
}

/// UI theme preference, persisted alongside the collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_ids_are_unique() {
        let a = Lawyer::new("A", "LAW-1", "0501234567");
        let b = Lawyer::new("A", "LAW-1", "0501234567");
        assert_ne!(a.id, b.id);
        assert_eq!(a.id.len(), 32);
    }

    #[test]
    fn test_lawyer_json_layout() {
        let lawyer = Lawyer {
            id: "1".to_string(),
            name: "Test".to_string(),
            professional_id: "LAW-2024-001".to_string(),
            phone: "0501234567".to_string(),
        };
        let json = serde_json::to_value(&lawyer).unwrap();
        assert_eq!(json["professionalId"], "LAW-2024-001");
        assert!(json.get("professional_id").is_none());
    }

    #[test]
    fn test_transaction_amount_written_as_number() {
        let tx = Transaction {
            id: "1".to_string(),
            lawyer_id: "1".to_string(),
            document_count: 5,
            date: date(2025, 1, 5),
            amount: dec!(2500),
            is_paid: true,
        };
        let json = serde_json::to_value(&tx).unwrap();
        assert!(json["amount"].is_number());
        assert_eq!(json["date"], "2025-01-05");
        assert_eq!(json["lawyerId"], "1");
        assert_eq!(json["isPaid"], true);
    }

    #[test]
    fn test_transaction_amount_accepts_string() {
        let raw = r#"{"id":"9","lawyerId":"1","documentCount":2,
            "date":"2025-02-01","amount":"1250.50","isPaid":false}"#;
        let tx: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(tx.amount, dec!(1250.50));
        assert!(!tx.is_paid);
    }

    #[test]
    fn test_payment_status_flag() {
        assert_eq!(PaymentStatus::All.as_flag(), None);
        assert_eq!(PaymentStatus::Paid.as_flag(), Some(true));
        assert_eq!(PaymentStatus::Unpaid.as_flag(), Some(false));
    }

    #[test]
    fn test_theme_serde() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        let theme: Theme = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(theme, Theme::Light);
    }
}
