//! Fishing information page.

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::collection::{Collection, SingletonDocument, FISHING_INFO_ID};

/// Lake description, stocked species and angling rules.
///
/// Stored as the single document with id `"fishing_info"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FishingInfo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub species: Vec<String>,
    #[serde(rename = "dayTicketPrice")]
    pub day_ticket_price: String,
    pub rules: Vec<String>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl FishingInfo {
    /// Create the fishing document under its reserved id, stamped with the current time.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        species: Vec<String>,
        day_ticket_price: impl Into<String>,
        rules: Vec<String>,
    ) -> Self {
        Self {
            id: FISHING_INFO_ID.to_string(),
            title: title.into(),
            description: description.into(),
            species,
            day_ticket_price: day_ticket_price.into(),
            rules,
            updated_at: Utc::now(),
        }
    }
}

impl SingletonDocument for FishingInfo {
    const COLLECTION: Collection = Collection::FishingInfo;
    const ID: &'static str = FISHING_INFO_ID;
    const LABEL: &'static str = "Fishing info";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bson_field_names() {
        let info = FishingInfo::new(
            "Fishing",
            "A lake",
            vec!["Carp".to_string()],
            "Ask at reception",
            vec!["Barbless hooks".to_string()],
        );
        let doc = bson::to_document(&info).unwrap();

        assert_eq!(doc.get_str("id").unwrap(), "fishing_info");
        assert_eq!(doc.get_str("dayTicketPrice").unwrap(), "Ask at reception");
        assert_eq!(doc.get_array("species").unwrap().len(), 1);
    }
}
