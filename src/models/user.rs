//! User models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{KycLevel, LegalPersonType, PersonType};
use super::primitives::UserId;

/// Postal address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    /// First address line
    #[serde(default)]
    pub address_line1: Option<String>,
    /// Second address line
    #[serde(default)]
    pub address_line2: Option<String>,
    /// City
    #[serde(default)]
    pub city: Option<String>,
    /// Region or state
    #[serde(default)]
    pub region: Option<String>,
    /// Postal code
    #[serde(default)]
    pub postal_code: Option<String>,
    /// ISO 3166-1 alpha-2 country code
    #[serde(default)]
    pub country: Option<String>,
}

/// Fields shared by natural and legal users, as returned by listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    /// User id
    pub id: UserId,
    /// Natural or legal
    pub person_type: PersonType,
    /// Contact email
    #[serde(default)]
    pub email: Option<String>,
    /// KYC level
    #[serde(default, rename = "KYCLevel")]
    pub kyc_level: Option<KycLevel>,
    /// Free-form tag
    #[serde(default)]
    pub tag: Option<String>,
    /// When the user was created
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub creation_date: Option<DateTime<Utc>>,
}

/// An individual.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NaturalUser {
    /// User id, assigned by MangoPay
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Contact email
    pub email: String,
    /// Unix timestamp of birth (may be negative)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<i64>,
    /// ISO 3166-1 alpha-2 nationality
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    /// ISO 3166-1 alpha-2 country of residence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_of_residence: Option<String>,
    /// Postal address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// Occupation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    /// Income range, 1 to 6
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_range: Option<u8>,
    /// KYC level
    #[serde(default, rename = "KYCLevel", skip_serializing)]
    pub kyc_level: Option<KycLevel>,
    /// Free-form tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// When the user was created
    #[serde(default, skip_serializing, with = "chrono::serde::ts_seconds_option")]
    pub creation_date: Option<DateTime<Utc>>,
}

/// A company, organization or sole trader.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LegalUser {
    /// User id, assigned by MangoPay
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    /// Legal name
    pub name: String,
    /// Kind of legal entity
    pub legal_person_type: LegalPersonType,
    /// Contact email
    pub email: String,
    /// Legal representative's first name
    pub legal_representative_first_name: String,
    /// Legal representative's last name
    pub legal_representative_last_name: String,
    /// Legal representative's email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_representative_email: Option<String>,
    /// Legal representative's birthday, unix timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_representative_birthday: Option<i64>,
    /// Legal representative's nationality
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_representative_nationality: Option<String>,
    /// Legal representative's country of residence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_representative_country_of_residence: Option<String>,
    /// Registered office address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headquarters_address: Option<Address>,
    /// Company registration number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_number: Option<String>,
    /// KYC level
    #[serde(default, rename = "KYCLevel", skip_serializing)]
    pub kyc_level: Option<KycLevel>,
    /// Free-form tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// When the user was created
    #[serde(default, skip_serializing, with = "chrono::serde::ts_seconds_option")]
    pub creation_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_user_payload_omits_server_fields() {
        let user = NaturalUser {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            ..Default::default()
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["FirstName"], "Ada");
        assert!(json.get("Id").is_none());
        assert!(json.get("CreationDate").is_none());
        assert!(json.get("KYCLevel").is_none());
    }

    #[test]
    fn test_user_listing_entry() {
        let user: User = serde_json::from_value(serde_json::json!({
            "Id": "8494514",
            "PersonType": "LEGAL",
            "Email": "info@example.com",
            "KYCLevel": "LIGHT",
            "Tag": null,
            "CreationDate": 1383321421
        }))
        .unwrap();

        assert_eq!(user.id.as_str(), "8494514");
        assert_eq!(user.person_type, PersonType::Legal);
        assert_eq!(user.kyc_level, Some(KycLevel::Light));
        assert_eq!(user.creation_date.unwrap().timestamp(), 1383321421);
    }
}
