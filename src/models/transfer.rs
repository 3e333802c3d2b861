//! Transfer and transaction models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{TransactionNature, TransactionStatus, TransactionType};
use super::primitives::{TransferId, UserId, WalletId};
use super::wallet::Money;

/// Payload for a wallet-to-wallet transfer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewTransfer {
    /// User initiating the transfer
    pub author_id: UserId,
    /// Owner of the credited wallet, if different from the author
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credited_user_id: Option<UserId>,
    /// Amount taken from the debited wallet, fees included
    pub debited_funds: Money,
    /// Part of `debited_funds` kept as fees
    pub fees: Money,
    /// Source wallet
    pub debited_wallet_id: WalletId,
    /// Destination wallet
    pub credited_wallet_id: WalletId,
    /// Free-form tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// A money movement of any type, as listed for a wallet or user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Transaction {
    /// Transaction id
    pub id: String,
    /// Pay-in, transfer or pay-out
    #[serde(rename = "Type")]
    pub transaction_type: TransactionType,
    /// Regular, refund...
    pub nature: TransactionNature,
    /// Processing status
    pub status: TransactionStatus,
    /// Initiating user
    pub author_id: UserId,
    /// Credited user, if any
    #[serde(default)]
    pub credited_user_id: Option<UserId>,
    /// Debited amount
    pub debited_funds: Money,
    /// Credited amount
    pub credited_funds: Money,
    /// Fees
    pub fees: Money,
    /// Debited wallet
    #[serde(default)]
    pub debited_wallet_id: Option<WalletId>,
    /// Credited wallet
    #[serde(default)]
    pub credited_wallet_id: Option<WalletId>,
    /// Processor result code, `000000` on success
    #[serde(default)]
    pub result_code: Option<String>,
    /// Processor result message
    #[serde(default)]
    pub result_message: Option<String>,
    /// When the transaction was executed
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub execution_date: Option<DateTime<Utc>>,
    /// When the transaction was created
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub creation_date: Option<DateTime<Utc>>,
    /// Free-form tag
    #[serde(default)]
    pub tag: Option<String>,
}

/// A wallet-to-wallet transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Transfer {
    /// Transfer id
    pub id: TransferId,
    /// Processing status
    pub status: TransactionStatus,
    /// Initiating user
    pub author_id: UserId,
    /// Credited user
    #[serde(default)]
    pub credited_user_id: Option<UserId>,
    /// Debited amount
    pub debited_funds: Money,
    /// Credited amount
    pub credited_funds: Money,
    /// Fees
    pub fees: Money,
    /// Source wallet
    pub debited_wallet_id: WalletId,
    /// Destination wallet
    pub credited_wallet_id: WalletId,
    /// Processor result code
    #[serde(default)]
    pub result_code: Option<String>,
    /// Processor result message
    #[serde(default)]
    pub result_message: Option<String>,
    /// When the transfer was executed
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub execution_date: Option<DateTime<Utc>>,
    /// When the transfer was created
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub creation_date: Option<DateTime<Utc>>,
    /// Free-form tag
    #[serde(default)]
    pub tag: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_type_field() {
        let txn: Transaction = serde_json::from_value(serde_json::json!({
            "Id": "1169430",
            "Type": "PAYIN",
            "Nature": "REGULAR",
            "Status": "SUCCEEDED",
            "AuthorId": "1167495",
            "CreditedUserId": "1167495",
            "DebitedFunds": { "Currency": "EUR", "Amount": 1000 },
            "CreditedFunds": { "Currency": "EUR", "Amount": 900 },
            "Fees": { "Currency": "EUR", "Amount": 100 },
            "DebitedWalletId": null,
            "CreditedWalletId": "1167496",
            "ResultCode": "000000",
            "ResultMessage": "Success",
            "ExecutionDate": 1383321421,
            "CreationDate": 1383321421,
            "Tag": null
        }))
        .unwrap();

        assert_eq!(txn.transaction_type, TransactionType::PayIn);
        assert_eq!(txn.credited_funds.amount, 900);
        assert!(txn.debited_wallet_id.is_none());
    }
}
