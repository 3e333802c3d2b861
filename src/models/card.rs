//! Card registration models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::CardRegistrationStatus;
use super::primitives::{CardRegistrationId, UserId};

/// Tokenization session for a card.
///
/// Created with a user and currency; the browser then posts card data to
/// `card_registration_url` and the returned `registration_data` is sent
/// back with an update to obtain a `card_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CardRegistration {
    /// Registration id
    pub id: CardRegistrationId,
    /// Card owner
    pub user_id: UserId,
    /// ISO 4217 currency code
    pub currency: String,
    /// `CB_VISA_MASTERCARD`, `MAESTRO`...
    #[serde(default)]
    pub card_type: Option<String>,
    /// Key for the tokenization server
    #[serde(default)]
    pub access_key: Option<String>,
    /// Data for the tokenization server
    #[serde(default)]
    pub preregistration_data: Option<String>,
    /// Tokenization endpoint
    #[serde(default, rename = "CardRegistrationURL")]
    pub card_registration_url: Option<String>,
    /// Data returned by the tokenization server
    #[serde(default)]
    pub registration_data: Option<String>,
    /// Registered card, once validated
    #[serde(default)]
    pub card_id: Option<String>,
    /// Registration state
    pub status: CardRegistrationStatus,
    /// Result code
    #[serde(default)]
    pub result_code: Option<String>,
    /// Result message
    #[serde(default)]
    pub result_message: Option<String>,
    /// Free-form tag
    #[serde(default)]
    pub tag: Option<String>,
    /// When the registration was created
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub creation_date: Option<DateTime<Utc>>,
}

/// Payload for creating a card registration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewCardRegistration {
    /// Card owner
    pub user_id: UserId,
    /// ISO 4217 currency code
    pub currency: String,
    /// Card type, defaults server-side to `CB_VISA_MASTERCARD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
    /// Free-form tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_url_field_name() {
        let reg: CardRegistration = serde_json::from_value(serde_json::json!({
            "Id": "123",
            "UserId": "7",
            "Currency": "EUR",
            "AccessKey": "1X0m87dmM2LiwFgxPLBJ",
            "PreregistrationData": "YkgVxL1yNY1f",
            "CardRegistrationURL": "https://homologation-webpayment.payline.com/webpayment/getToken",
            "Status": "CREATED"
        }))
        .unwrap();

        assert_eq!(reg.status, CardRegistrationStatus::Created);
        assert!(reg.card_registration_url.unwrap().contains("getToken"));
    }
}
