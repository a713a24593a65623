//! Shared types and document helpers used by the store adapter.

use mongodb::bson::{Bson, DateTime, Document};
use thiserror::Error;

/// Errors returned while writing to or querying the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Record could not be serialized into a BSON document.
    #[error("Record is not a valid document: {0}")]
    InvalidRecord(#[from] mongodb::bson::ser::Error),
    /// Connection or query failure reported by the MongoDB driver.
    #[error("MongoDB error: {0}")]
    Backend(String),
}

/// Collections this service reads or writes.
///
/// Store-side names follow the original schema convention: the lowercased
/// entity name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collection {
    /// Contact-form submissions.
    Lead,
    /// Geographic service areas used for SEO content.
    ServiceArea,
    /// Customer testimonials.
    Testimonial,
    /// Per-service landing page content.
    ServicePage,
}

impl Collection {
    /// Store-side collection name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lead => "lead",
            Self::ServiceArea => "servicearea",
            Self::Testimonial => "testimonial",
            Self::ServicePage => "servicepage",
        }
    }
}

/// Maximum number of records a list call returns when no limit is given.
pub const DEFAULT_LIST_LIMIT: u32 = 50;

/// Stamp `created_at` and `updated_at` with the current time.
pub(crate) fn stamp_timestamps(document: &mut Document) {
    let now = DateTime::now();
    document.insert("created_at", now);
    document.insert("updated_at", now);
}

/// Normalize a store-assigned `_id` to a BSON string in place.
pub(crate) fn normalize_id(document: &mut Document) {
    if let Some(id) = document.get("_id") {
        let id = id_to_string(id);
        document.insert("_id", Bson::String(id));
    }
}

/// Render a store identifier as a string regardless of its native encoding.
pub(crate) fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(value) => value.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};

    #[test]
    fn collection_names_follow_schema_convention() {
        assert_eq!(Collection::Lead.name(), "lead");
        assert_eq!(Collection::ServiceArea.name(), "servicearea");
        assert_eq!(Collection::Testimonial.name(), "testimonial");
        assert_eq!(Collection::ServicePage.name(), "servicepage");
    }

    #[test]
    fn stamping_adds_both_timestamps() {
        let mut document = doc! { "name": "Jane Doe" };
        stamp_timestamps(&mut document);

        assert!(document.get_datetime("created_at").is_ok());
        assert!(document.get_datetime("updated_at").is_ok());
        assert_eq!(
            document.get_datetime("created_at").unwrap(),
            document.get_datetime("updated_at").unwrap()
        );
    }

    #[test]
    fn object_ids_normalize_to_hex_strings() {
        let oid = ObjectId::new();
        let mut document = doc! { "_id": oid, "name": "Fontana" };
        normalize_id(&mut document);

        assert_eq!(document.get_str("_id").unwrap(), oid.to_hex());
        assert_eq!(document.get_str("name").unwrap(), "Fontana");
    }

    #[test]
    fn string_ids_pass_through_unchanged() {
        let mut document = doc! { "_id": "custom-id" };
        normalize_id(&mut document);

        assert_eq!(document.get_str("_id").unwrap(), "custom-id");
    }

    #[test]
    fn documents_without_ids_are_left_alone() {
        let mut document = doc! { "name": "Fontana" };
        normalize_id(&mut document);

        assert!(document.get("_id").is_none());
    }
}
