//! Contact details page.

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::collection::{Collection, SingletonDocument, CONTACT_INFO_ID};

/// Phone, email, postal address and map position of the site.
///
/// `facebook` is optional on the page and is stored as an empty string
/// when unset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactInfo {
    pub id: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub facebook: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl ContactInfo {
    /// Create the contact document under its reserved id with no Facebook page.
    pub fn new(
        phone: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            id: CONTACT_INFO_ID.to_string(),
            phone: phone.into(),
            email: email.into(),
            address: address.into(),
            latitude,
            longitude,
            facebook: String::new(),
            updated_at: Utc::now(),
        }
    }

    /// Set the Facebook page link.
    pub fn with_facebook(mut self, facebook: impl Into<String>) -> Self {
        self.facebook = facebook.into();
        self
    }
}

impl SingletonDocument for ContactInfo {
    const COLLECTION: Collection = Collection::ContactInfo;
    const ID: &'static str = CONTACT_INFO_ID;
    const LABEL: &'static str = "Contact info";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facebook_defaults_to_empty() {
        let info = ContactInfo::new("0123", "a@b.c", "Somewhere", 1.0, 2.0);
        assert_eq!(info.facebook, "");
    }

    #[test]
    fn test_missing_facebook_deserializes_as_empty() {
        let doc = bson::doc! {
            "id": "contact_info",
            "phone": "0123",
            "email": "a@b.c",
            "address": "Somewhere",
            "latitude": 53.1,
            "longitude": 0.3,
            "updated_at": bson::DateTime::now(),
        };

        let info: ContactInfo = bson::from_document(doc).unwrap();
        assert_eq!(info.facebook, "");
        assert_eq!(info.latitude, 53.1);
    }

    #[test]
    fn test_coordinates_stored_as_doubles() {
        let info = ContactInfo::new("0123", "a@b.c", "Somewhere", 53.16737, 0.31966)
            .with_facebook("https://example.com/page");
        let doc = bson::to_document(&info).unwrap();

        assert_eq!(doc.get_f64("latitude").unwrap(), 53.16737);
        assert_eq!(doc.get_f64("longitude").unwrap(), 0.31966);
        assert_eq!(doc.get_str("facebook").unwrap(), "https://example.com/page");
    }
}
