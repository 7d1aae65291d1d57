//! Collection names and singleton identifiers.

/// Reserved id of the camping information document.
pub const CAMPING_INFO_ID: &str = "camping_info";

/// Reserved id of the fishing information document.
pub const FISHING_INFO_ID: &str = "fishing_info";

/// Reserved id of the contact details document.
pub const CONTACT_INFO_ID: &str = "contact_info";

/// Collections held by the content store.
///
/// Use `collection.as_str()` to get the name the store addresses it by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    CampingInfo,
    FishingInfo,
    ContactInfo,
    Rules,
    Gallery,
}

impl Collection {
    /// Returns the collection name as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::CampingInfo => "camping_info",
            Collection::FishingInfo => "fishing_info",
            Collection::ContactInfo => "contact_info",
            Collection::Rules => "rules",
            Collection::Gallery => "gallery",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A document that lives alone in its collection under a fixed id.
///
/// Implemented by the three informational pages. The seeder and the reader
/// both address these documents through this trait rather than by string.
pub trait SingletonDocument {
    /// Collection holding the document.
    const COLLECTION: Collection;
    /// Reserved value of the document's `id` field.
    const ID: &'static str;
    /// Human readable name used in "not found" messages.
    const LABEL: &'static str;
}
