//! Gallery images.

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Gallery section an image belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GalleryCategory {
    Camping,
    Fishing,
    Facilities,
}

impl GalleryCategory {
    /// Returns the category as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            GalleryCategory::Camping => "camping",
            GalleryCategory::Fishing => "fishing",
            GalleryCategory::Facilities => "facilities",
        }
    }

    /// Parse a stored category name. Matching is exact, as it is for the
    /// gallery filter.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "camping" => Some(GalleryCategory::Camping),
            "fishing" => Some(GalleryCategory::Fishing),
            "facilities" => Some(GalleryCategory::Facilities),
            _ => None,
        }
    }
}

impl std::fmt::Display for GalleryCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An image shown in the gallery.
///
/// The image itself is carried inline as base64 in `imageData`. Images are
/// listed newest `created_at` first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryImage {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "imageData")]
    pub image_data: String,
    pub category: GalleryCategory,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl GalleryImage {
    /// Create an image with an empty description, stamped with the current time.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        image_data: impl Into<String>,
        category: GalleryCategory,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            image_data: image_data.into(),
            category,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_exact() {
        assert_eq!(GalleryCategory::parse("fishing"), Some(GalleryCategory::Fishing));
        assert_eq!(GalleryCategory::parse("facilities"), Some(GalleryCategory::Facilities));
        assert_eq!(GalleryCategory::parse("Fishing"), None);
        assert_eq!(GalleryCategory::parse("parking"), None);
    }

    #[test]
    fn test_bson_field_names() {
        let image = GalleryImage::new("img_1", "Sunset", "aGVsbG8=", GalleryCategory::Fishing)
            .with_description("Over the lake");
        let doc = bson::to_document(&image).unwrap();

        assert_eq!(doc.get_str("imageData").unwrap(), "aGVsbG8=");
        assert_eq!(doc.get_str("category").unwrap(), "fishing");
        assert_eq!(doc.get_str("description").unwrap(), "Over the lake");
        assert!(doc.get_datetime("created_at").is_ok());
    }
}
