//! Enumeration types for the MangoPay API.
//!
//! Values are sent in MangoPay's upper-case form. Every enum that the API
//! may extend carries an `Unknown` catch-all so new values do not break
//! deserialization.

use serde::{Deserialize, Serialize};

/// Natural person or legal entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PersonType {
    /// An individual
    Natural,
    /// A company or organization
    Legal,
    /// Unknown person type
    #[serde(other)]
    Unknown,
}

/// Kind of legal user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegalPersonType {
    /// Registered company
    Business,
    /// Non-profit organization
    Organization,
    /// Sole trader
    Soletrader,
    /// Unknown legal person type
    #[serde(other)]
    Unknown,
}

/// KYC verification level of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KycLevel {
    /// Identity not verified
    Light,
    /// Identity verified
    Regular,
    /// Unknown level
    #[serde(other)]
    Unknown,
}

/// Outcome of a money movement (pay-in, transfer, pay-out, refund).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    /// Created, not processed yet
    Created,
    /// Processed successfully
    Succeeded,
    /// Processing failed
    Failed,
    /// Unknown status
    #[serde(other)]
    Unknown,
}

impl TransactionStatus {
    /// Returns `true` if the transaction is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransactionStatus::Succeeded | TransactionStatus::Failed)
    }
}

/// Kind of money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Money entering a wallet
    #[serde(rename = "PAYIN")]
    PayIn,
    /// Wallet to wallet
    Transfer,
    /// Money leaving to a bank account
    #[serde(rename = "PAYOUT")]
    PayOut,
    /// Unknown type
    #[serde(other)]
    Unknown,
}

/// Why a transaction exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionNature {
    /// Ordinary transaction
    Regular,
    /// Reversal of a previous one
    Refund,
    /// Chargeback
    Repudiation,
    /// Settlement
    Settlement,
    /// Unknown nature
    #[serde(other)]
    Unknown,
}

/// State of a card registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardRegistrationStatus {
    /// Awaiting the tokenization data
    Created,
    /// Card registered
    Validated,
    /// Registration failed
    Error,
    /// Unknown status
    #[serde(other)]
    Unknown,
}

/// Whether a hook is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HookStatus {
    /// Notifications are sent
    Enabled,
    /// Notifications are suspended
    Disabled,
    /// Unknown status
    #[serde(other)]
    Unknown,
}

/// Whether MangoPay could reach a hook's URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HookValidity {
    /// URL responds
    Valid,
    /// URL failed
    Invalid,
    /// Unknown validity
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&TransactionType::PayIn).unwrap(),
            "\"PAYIN\""
        );
        assert_eq!(
            serde_json::to_string(&LegalPersonType::Soletrader).unwrap(),
            "\"SOLETRADER\""
        );
        assert_eq!(
            serde_json::from_str::<TransactionStatus>("\"SUCCEEDED\"").unwrap(),
            TransactionStatus::Succeeded
        );
    }

    #[test]
    fn test_unknown_values() {
        assert_eq!(
            serde_json::from_str::<HookStatus>("\"ARCHIVED\"").unwrap(),
            HookStatus::Unknown
        );
    }

    #[test]
    fn test_terminal_status() {
        assert!(TransactionStatus::Failed.is_terminal());
        assert!(!TransactionStatus::Created.is_terminal());
    }
}
