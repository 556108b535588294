//! Visitor product submissions awaiting review.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{optional, required, required_text};
use super::{
    Category, Email, ImageUrl, Price, ProductDraft, ProductInput, SubmissionId, SubmissionStatus,
    ValidationError,
};

/// A visitor-proposed product waiting for admin approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: SubmissionId,
    #[serde(deserialize_with = "required_text")]
    pub name: String,
    #[serde(deserialize_with = "required_text")]
    pub description: String,
    pub price: Price,
    pub category: Category,
    pub image: ImageUrl,
    #[serde(deserialize_with = "required_text")]
    pub creator: String,
    pub email: Email,
    #[serde(default, with = "blank_as_none")]
    pub phone: Option<String>,
    #[serde(default, with = "blank_as_none")]
    pub website: Option<String>,
    pub date_submitted: DateTime<Utc>,
    #[serde(default)]
    pub status: SubmissionStatus,
}

impl Submission {
    /// The product fields carried by this submission.
    ///
    /// Contact details stay behind; they are not part of the catalog.
    #[must_use]
    pub fn product_draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            category: self.category,
            image: self.image.clone(),
            creator: self.creator.clone(),
        }
    }
}

/// Raw submission fields as captured by the public form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionInput {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub image: String,
    pub creator: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// Validated submission fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionDraft {
    pub product: ProductDraft,
    pub email: Email,
    pub phone: Option<String>,
    pub website: Option<String>,
}

impl SubmissionDraft {
    /// Validate raw submission input.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for the first product field that is
    /// invalid, then for the email. Blank phone and website are treated as
    /// not provided.
    pub fn parse(input: &SubmissionInput) -> Result<Self, ValidationError> {
        let product = ProductDraft::parse(&ProductInput {
            name: input.name.clone(),
            description: input.description.clone(),
            price: input.price.clone(),
            category: input.category.clone(),
            image: input.image.clone(),
            creator: input.creator.clone(),
        })?;
        required("email", &input.email)?;

        Ok(Self {
            product,
            email: Email::parse(&input.email)?,
            phone: optional(input.phone.as_deref()),
            website: optional(input.website.as_deref()),
        })
    }

    /// Build the pending submission with its identity and submission time.
    #[must_use]
    pub fn into_submission(self, id: SubmissionId, date_submitted: DateTime<Utc>) -> Submission {
        let product = self.product;
        Submission {
            id,
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            image: product.image,
            creator: product.creator,
            email: self.email,
            phone: self.phone,
            website: self.website,
            date_submitted,
            status: SubmissionStatus::Pending,
        }
    }
}

/// Optional contact fields are stored as `""` when absent.
mod blank_as_none {
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.filter(|value| !value.trim().is_empty()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn input() -> SubmissionInput {
        SubmissionInput {
            name: "AeroGlide Chair".to_owned(),
            description: "Magnetic levitation seating".to_owned(),
            price: "2499.99".to_owned(),
            category: "design".to_owned(),
            image: "https://images.example.com/chair.jpg".to_owned(),
            creator: "FutureFurniture Co.".to_owned(),
            email: "hello@futurefurniture.co".to_owned(),
            phone: Some("   ".to_owned()),
            website: Some("https://futurefurniture.co".to_owned()),
        }
    }

    #[test]
    fn test_parse_blank_optional_fields_are_none() {
        let draft = SubmissionDraft::parse(&input()).unwrap();
        assert_eq!(draft.phone, None);
        assert_eq!(draft.website.as_deref(), Some("https://futurefurniture.co"));
    }

    #[test]
    fn test_parse_requires_email() {
        let mut bad = input();
        bad.email = " ".to_owned();
        assert_eq!(
            SubmissionDraft::parse(&bad),
            Err(ValidationError::Required { field: "email" })
        );

        bad.email = "not-an-email".to_owned();
        assert!(matches!(
            SubmissionDraft::parse(&bad),
            Err(ValidationError::Email(_))
        ));
    }

    #[test]
    fn test_new_submission_is_pending() {
        let submission = SubmissionDraft::parse(&input())
            .unwrap()
            .into_submission(SubmissionId::new("9"), Utc::now());
        assert_eq!(submission.status, SubmissionStatus::Pending);
        assert_eq!(submission.product_draft().name, "AeroGlide Chair");
    }

    #[test]
    fn test_absent_contact_fields_stored_blank() {
        let submission = SubmissionDraft::parse(&input())
            .unwrap()
            .into_submission(SubmissionId::new("9"), Utc::now());
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["phone"], "");
        assert_eq!(json["status"], "pending");

        let back: Submission = serde_json::from_value(json).unwrap();
        assert_eq!(back, submission);
    }

    #[test]
    fn test_reads_records_without_optional_fields() {
        let json = serde_json::json!({
            "id": "1",
            "name": "Lamp",
            "description": "Bright",
            "price": 10,
            "category": "design",
            "image": "https://example.com/lamp.png",
            "creator": "Lumen",
            "email": "l@example.com",
            "dateSubmitted": "2024-05-01T10:00:00Z"
        });
        let submission: Submission = serde_json::from_value(json).unwrap();
        assert_eq!(submission.phone, None);
        assert_eq!(submission.website, None);
        assert_eq!(submission.status, SubmissionStatus::Pending);
    }
}
