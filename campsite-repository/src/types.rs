//! Query types for document store operations.

use bson::{Bson, Document};

/// Field holding a document's application-level identifier.
pub const ID_FIELD: &str = "id";

/// Field holding the store-assigned identifier. Never exposed to readers.
pub const INTERNAL_ID_FIELD: &str = "_id";

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Sort direction as the store expects it in a sort specification.
    pub fn direction(&self) -> i32 {
        match self {
            SortOrder::Ascending => 1,
            SortOrder::Descending => -1,
        }
    }
}

/// Sort on a single field.
#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec {
    pub field: String,
    pub order: SortOrder,
}

/// Parameters for a multi-document read.
///
/// `filter` holds top-level equality conditions only. An empty filter
/// matches every document in the collection.
///
/// ```
/// use campsite_repository::{FindQuery, SortOrder};
///
/// let query = FindQuery::all()
///     .filter_eq("category", "fishing")
///     .sort_by("created_at", SortOrder::Descending)
///     .limit(100);
///
/// assert_eq!(query.limit, Some(100));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindQuery {
    pub filter: Document,
    pub sort: Option<SortSpec>,
    pub limit: Option<i64>,
}

impl FindQuery {
    /// Match every document.
    pub fn all() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value`.
    pub fn filter_eq(mut self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.filter.insert(field.into(), value.into());
        self
    }

    /// Sort results on `field`.
    pub fn sort_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some(SortSpec {
            field: field.into(),
            order,
        });
        self
    }

    /// Return at most `limit` documents.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sort specification in the store's document form.
    pub fn sort_document(&self) -> Option<Document> {
        self.sort.as_ref().map(|sort| {
            let mut spec = Document::new();
            spec.insert(sort.field.clone(), sort.order.direction());
            spec
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_has_no_constraints() {
        let query = FindQuery::all();
        assert!(query.filter.is_empty());
        assert!(query.sort.is_none());
        assert!(query.limit.is_none());
        assert!(query.sort_document().is_none());
    }

    #[test]
    fn test_builder() {
        let query = FindQuery::all()
            .filter_eq("category", "fishing")
            .sort_by("order", SortOrder::Ascending)
            .limit(100);

        assert_eq!(query.filter.get_str("category").unwrap(), "fishing");
        assert_eq!(query.sort_document().unwrap(), bson::doc! { "order": 1 });
        assert_eq!(query.limit, Some(100));
    }

    #[test]
    fn test_descending_direction() {
        let query = FindQuery::all().sort_by("created_at", SortOrder::Descending);
        assert_eq!(query.sort_document().unwrap(), bson::doc! { "created_at": -1 });
    }
}
