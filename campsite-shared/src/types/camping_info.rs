//! Camping information page.

use std::collections::BTreeMap;

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::collection::{Collection, SingletonDocument, CAMPING_INFO_ID};

/// Camping facilities, pitch types and pricing shown on the camping page.
///
/// Stored as the single document with id `"camping_info"`. `pricing` maps a
/// pitch kind (`tent`, `tourer`, ...) to free text, since rates are quoted on
/// request rather than published.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CampingInfo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub facilities: Vec<String>,
    #[serde(rename = "pitchTypes")]
    pub pitch_types: Vec<String>,
    pub pricing: BTreeMap<String, String>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl CampingInfo {
    /// Create the camping document under its reserved id, stamped with the current time.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        facilities: Vec<String>,
        pitch_types: Vec<String>,
        pricing: BTreeMap<String, String>,
    ) -> Self {
        Self {
            id: CAMPING_INFO_ID.to_string(),
            title: title.into(),
            description: description.into(),
            facilities,
            pitch_types,
            pricing,
            updated_at: Utc::now(),
        }
    }
}

impl SingletonDocument for CampingInfo {
    const COLLECTION: Collection = Collection::CampingInfo;
    const ID: &'static str = CAMPING_INFO_ID;
    const LABEL: &'static str = "Camping info";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CampingInfo {
        let mut pricing = BTreeMap::new();
        pricing.insert("tent".to_string(), "Contact for rates".to_string());
        CampingInfo::new(
            "Camping",
            "A campsite",
            vec!["Showers".to_string()],
            vec!["Tent pitches".to_string()],
            pricing,
        )
    }

    #[test]
    fn test_new_uses_reserved_id() {
        let info = sample();
        assert_eq!(info.id, "camping_info");
        assert_eq!(info.id, CampingInfo::ID);
    }

    #[test]
    fn test_bson_field_names() {
        let doc = bson::to_document(&sample()).unwrap();

        assert!(doc.contains_key("pitchTypes"));
        assert!(!doc.contains_key("pitch_types"));
        assert!(doc.get_datetime("updated_at").is_ok());
        assert_eq!(
            doc.get_document("pricing").unwrap().get_str("tent").unwrap(),
            "Contact for rates"
        );
    }

    #[test]
    fn test_bson_roundtrip_keeps_millisecond_precision() {
        let info = sample();
        let doc = bson::to_document(&info).unwrap();
        let restored: CampingInfo = bson::from_document(doc).unwrap();

        assert_eq!(restored.title, info.title);
        assert_eq!(restored.pitch_types, info.pitch_types);
        assert_eq!(
            restored.updated_at.timestamp_millis(),
            info.updated_at.timestamp_millis()
        );
    }
}
