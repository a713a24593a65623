//! Entity shapes and the explicit validation applied to inbound payloads.
//!
//! Each persisted entity maps to the collection named after it (see
//! [`crate::store::Collection`]). Constraints are checked by plain functions
//! that report every violated field at once, so callers get field-level
//! detail in a single response.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single violated constraint on an inbound payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending field.
    pub field: &'static str,
    /// Description of the violated constraint.
    pub message: String,
}

/// Input failed one or more declared constraints.
///
/// Raised before any store access; never logged as a server fault.
#[derive(Debug, Clone, Error, Serialize)]
#[error("invalid payload")]
pub struct ValidationError {
    /// Every violated constraint, in field order.
    pub errors: Vec<FieldError>,
}

/// A contact-form submission accepted for persistence.
///
/// Created once per form submission; never mutated or deleted by this
/// system. Obtain one through [`LeadSubmission::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    /// Submitter's name.
    pub name: String,
    /// Callback phone number.
    pub phone: String,
    /// Optional reply-to email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Requested service, free text.
    pub service: String,
    /// Optional free-form message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Optional city the submitter lives in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Optional utm/source tag or originating page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Raw `POST /leads` body before constraint checks.
#[derive(Debug, Clone, Deserialize)]
pub struct LeadSubmission {
    /// Submitter's name, 2–100 characters.
    pub name: String,
    /// Callback phone number, 7–20 characters.
    pub phone: String,
    /// Optional reply-to email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Requested service, free text.
    pub service: String,
    /// Optional free-form message, at most 2000 characters.
    #[serde(default)]
    pub message: Option<String>,
    /// Optional city, at most 100 characters.
    #[serde(default)]
    pub city: Option<String>,
    /// Optional utm/source tag or originating page.
    #[serde(default)]
    pub source: Option<String>,
}

impl LeadSubmission {
    /// Check every constraint, returning a validated [`Lead`] or all violated
    /// fields.
    pub fn validate(self) -> Result<Lead, ValidationError> {
        let mut errors = Vec::new();

        check_length("name", &self.name, 2, 100, &mut errors);
        check_length("phone", &self.phone, 7, 20, &mut errors);
        if let Some(email) = self.email.as_deref() {
            if !is_structurally_valid_email(email) {
                errors.push(FieldError {
                    field: "email",
                    message: "must be a valid email address".to_string(),
                });
            }
        }
        if let Some(message) = self.message.as_deref() {
            check_max_length("message", message, 2000, &mut errors);
        }
        if let Some(city) = self.city.as_deref() {
            check_max_length("city", city, 100, &mut errors);
        }

        if errors.is_empty() {
            Ok(Lead {
                name: self.name,
                phone: self.phone,
                email: self.email,
                service: self.service,
                message: self.message,
                city: self.city,
                source: self.source,
            })
        } else {
            Err(ValidationError { errors })
        }
    }
}

/// Geographic region the business serves; read-only reference data from this
/// system's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceArea {
    /// Display name.
    pub name: String,
    /// URL-safe identifier, unique within the set.
    pub slug: String,
    /// County the area belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    /// Optional marketing copy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Customer testimonial displayed on the marketing site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    /// Customer's name.
    pub name: String,
    /// Optional city or area the customer is from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Star rating, 1–5 inclusive.
    pub rating: i32,
    /// Testimonial text.
    pub content: String,
}

impl Testimonial {
    /// Check the rating bound.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if (1..=5).contains(&self.rating) {
            Ok(())
        } else {
            Err(ValidationError {
                errors: vec![FieldError {
                    field: "rating",
                    message: "must be between 1 and 5".to_string(),
                }],
            })
        }
    }
}

/// Landing-page content for a single service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicePage {
    /// URL-safe identifier.
    pub slug: String,
    /// Page title.
    pub title: String,
    /// Hero headline.
    pub headline: String,
    /// Introductory copy.
    pub intro: String,
    /// Ordered FAQ entries; each is an unconstrained key-value mapping.
    #[serde(default)]
    pub faqs: Vec<serde_json::Map<String, serde_json::Value>>,
}

fn check_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
    errors: &mut Vec<FieldError>,
) {
    let count = value.chars().count();
    if count < min || count > max {
        errors.push(FieldError {
            field,
            message: format!("must be between {min} and {max} characters"),
        });
    }
}

fn check_max_length(field: &'static str, value: &str, max: usize, errors: &mut Vec<FieldError>) {
    if value.chars().count() > max {
        errors.push(FieldError {
            field,
            message: format!("must be at most {max} characters"),
        });
    }
}

/// Structural email check: exactly one `@`, a non-empty local part, and a
/// domain with at least two non-empty dot-separated labels. Makes no claim
/// about deliverability.
fn is_structurally_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    !local.is_empty() && domain.split('.').count() >= 2 && domain.split('.').all(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> LeadSubmission {
        LeadSubmission {
            name: "Jane Doe".to_string(),
            phone: "5551234567".to_string(),
            email: None,
            service: "drain cleaning".to_string(),
            message: None,
            city: None,
            source: None,
        }
    }

    #[test]
    fn valid_submission_passes_through_unchanged() {
        let lead = submission().validate().expect("valid lead");

        assert_eq!(lead.name, "Jane Doe");
        assert_eq!(lead.phone, "5551234567");
        assert_eq!(lead.service, "drain cleaning");
        assert!(lead.email.is_none());
    }

    #[test]
    fn optional_fields_are_preserved() {
        let mut input = submission();
        input.email = Some("jane@example.com".to_string());
        input.city = Some("Fontana".to_string());
        input.source = Some("homepage".to_string());

        let lead = input.validate().expect("valid lead");
        assert_eq!(lead.email.as_deref(), Some("jane@example.com"));
        assert_eq!(lead.city.as_deref(), Some("Fontana"));
        assert_eq!(lead.source.as_deref(), Some("homepage"));
    }

    #[test]
    fn short_name_is_rejected_with_field_detail() {
        let mut input = submission();
        input.name = "J".to_string();

        let err = input.validate().expect_err("short name");
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].field, "name");
    }

    #[test]
    fn phone_length_bounds_are_enforced() {
        let mut input = submission();
        input.phone = "555123".to_string();
        assert_eq!(input.validate().expect_err("short phone").errors[0].field, "phone");

        let mut input = submission();
        input.phone = "5".repeat(21);
        assert_eq!(input.validate().expect_err("long phone").errors[0].field, "phone");
    }

    #[test]
    fn all_violations_are_reported_together() {
        let mut input = submission();
        input.name = "J".to_string();
        input.phone = "555".to_string();
        input.email = Some("not-an-email".to_string());

        let err = input.validate().expect_err("three violations");
        let fields: Vec<&str> = err.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "phone", "email"]);
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in ["plainaddress", "a@b", "two@@example.com", "@example.com", "a b@example.com", "a@.com"] {
            let mut input = submission();
            input.email = Some(email.to_string());
            let err = input.validate().expect_err(email);
            assert_eq!(err.errors[0].field, "email", "expected rejection for {email}");
        }
    }

    #[test]
    fn plausible_emails_are_accepted() {
        for email in ["jane@example.com", "j.doe+leads@mail.co.uk", "x@y.z"] {
            let mut input = submission();
            input.email = Some(email.to_string());
            assert!(input.validate().is_ok(), "expected acceptance for {email}");
        }
    }

    #[test]
    fn oversized_message_is_rejected() {
        let mut input = submission();
        input.message = Some("m".repeat(2001));
        assert_eq!(input.validate().expect_err("long message").errors[0].field, "message");

        let mut input = submission();
        input.message = Some("m".repeat(2000));
        assert!(input.validate().is_ok());
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        let mut input = submission();
        input.name = "Åš".to_string();
        assert!(input.validate().is_ok(), "two multi-byte characters meet the minimum");
    }

    #[test]
    fn service_page_faqs_keep_their_order() {
        let page: ServicePage = serde_json::from_value(serde_json::json!({
            "slug": "drain-cleaning",
            "title": "Drain Cleaning",
            "headline": "Clogged drain? Same-day service.",
            "intro": "We clear kitchen, bathroom, and main-line clogs.",
            "faqs": [
                { "q": "How fast can you come out?", "a": "Usually same day." },
                { "q": "Do you use cameras?", "a": "Yes, on main lines." }
            ]
        }))
        .expect("page deserializes");

        assert_eq!(page.slug, "drain-cleaning");
        assert_eq!(page.faqs.len(), 2);
        assert_eq!(page.faqs[0]["q"], "How fast can you come out?");
        assert_eq!(page.faqs[1]["a"], "Yes, on main lines.");
    }

    #[test]
    fn service_page_faqs_default_to_empty() {
        let page: ServicePage = serde_json::from_value(serde_json::json!({
            "slug": "water-heaters",
            "title": "Water Heaters",
            "headline": "Repair and replacement",
            "intro": "Tank and tankless."
        }))
        .expect("page deserializes without faqs");

        assert!(page.faqs.is_empty());
    }

    #[test]
    fn testimonial_rating_bounds() {
        let mut testimonial = Testimonial {
            name: "Sam".to_string(),
            location: None,
            rating: 5,
            content: "Fast and friendly.".to_string(),
        };
        assert!(testimonial.validate().is_ok());

        testimonial.rating = 0;
        assert_eq!(
            testimonial.validate().expect_err("rating too low").errors[0].field,
            "rating"
        );

        testimonial.rating = 6;
        assert!(testimonial.validate().is_err());
    }
}
