//! Wallet and money models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::primitives::{UserId, WalletId};

/// An amount in minor units (cents) of a currency.
///
/// # Example
///
/// ```
/// use mangopay::models::Money;
///
/// let ten_euros = Money::new("EUR", 1000);
/// assert_eq!(ten_euros.amount, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Money {
    /// ISO 4217 currency code
    pub currency: String,
    /// Amount in minor units
    pub amount: i64,
}

impl Money {
    /// Create an amount.
    pub fn new(currency: impl Into<String>, amount: i64) -> Self {
        Self {
            currency: currency.into(),
            amount,
        }
    }

    /// Zero in the given currency.
    pub fn zero(currency: impl Into<String>) -> Self {
        Self::new(currency, 0)
    }
}

/// A wallet holding e-money for one or more owners.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Wallet {
    /// Wallet id
    pub id: WalletId,
    /// Owning users
    pub owners: Vec<UserId>,
    /// Description
    pub description: String,
    /// ISO 4217 currency code
    pub currency: String,
    /// Current balance
    pub balance: Money,
    /// `DEFAULT`, `FEES` or `CREDIT`
    #[serde(default)]
    pub funds_type: Option<String>,
    /// Free-form tag
    #[serde(default)]
    pub tag: Option<String>,
    /// When the wallet was created
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub creation_date: Option<DateTime<Utc>>,
}

/// Payload for creating a wallet.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewWallet {
    /// Owning users (exactly one for now)
    pub owners: Vec<UserId>,
    /// Description
    pub description: String,
    /// ISO 4217 currency code
    pub currency: String,
    /// Free-form tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl NewWallet {
    /// A wallet for `owner` in `currency`.
    pub fn new(owner: UserId, currency: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            owners: vec![owner],
            description: description.into(),
            currency: currency.into(),
            tag: None,
        }
    }

    /// Set the tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_deserialize() {
        let wallet: Wallet = serde_json::from_value(serde_json::json!({
            "Id": "8494559",
            "Owners": ["8494514"],
            "Description": "My big project",
            "Currency": "EUR",
            "Balance": { "Currency": "EUR", "Amount": 1250 },
            "FundsType": "DEFAULT",
            "Tag": "custom meta",
            "CreationDate": 1383321421
        }))
        .unwrap();

        assert_eq!(wallet.balance, Money::new("EUR", 1250));
        assert_eq!(wallet.owners, vec![UserId::new("8494514")]);
    }

    #[test]
    fn test_new_wallet_payload() {
        let json =
            serde_json::to_value(NewWallet::new(UserId::new("1"), "EUR", "main")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "Owners": ["1"], "Description": "main", "Currency": "EUR" })
        );
    }
}
