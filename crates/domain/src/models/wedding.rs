//! Wedding domain model. A wedding is the tenant boundary: every guest
//! belongs to exactly one wedding, and every owner-facing operation checks
//! `owner_user_id` against the authenticated caller.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use shared::validation::validate_slug;

/// Wedding domain model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Wedding {
    pub id: Uuid,
    pub owner_user_id: Uuid,
    pub slug: String,
    pub bride_name: String,
    pub groom_name: String,
    pub wedding_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a wedding.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateWeddingRequest {
    #[validate(custom(function = "validate_slug"))]
    pub slug: String,

    #[validate(length(min = 1, max = 120, message = "bride_name is required"))]
    pub bride_name: String,

    #[validate(length(min = 1, max = 120, message = "groom_name is required"))]
    pub groom_name: String,

    pub wedding_date: NaiveDate,

    #[validate(length(max = 200, message = "venue must be at most 200 characters"))]
    pub venue: Option<String>,

    #[validate(length(max = 100, message = "city must be at most 100 characters"))]
    pub city: Option<String>,

    #[validate(length(max = 100, message = "country must be at most 100 characters"))]
    pub country: Option<String>,

    #[serde(default)]
    pub is_private: bool,
}

/// Response for listing the caller's weddings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListWeddingsResponse {
    pub data: Vec<Wedding>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> CreateWeddingRequest {
        CreateWeddingRequest {
            slug: "anna-and-ben".to_string(),
            bride_name: "Anna".to_string(),
            groom_name: "Ben".to_string(),
            wedding_date: NaiveDate::from_ymd_opt(2026, 6, 20).unwrap(),
            venue: Some("Rosewood Hall".to_string()),
            city: Some("Vienna".to_string()),
            country: Some("Austria".to_string()),
            is_private: false,
        }
    }

    #[test]
    fn test_create_request_valid() {
        assert!(create_request().validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_bad_slug() {
        let mut request = create_request();
        request.slug = "Not A Slug".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_requires_names() {
        let mut request = create_request();
        request.bride_name = String::new();
        assert!(request.validate().is_err());

        let mut request = create_request();
        request.groom_name = String::new();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_is_private_defaults_false() {
        let json = r#"{
            "slug": "anna-and-ben",
            "bride_name": "Anna",
            "groom_name": "Ben",
            "wedding_date": "2026-06-20"
        }"#;
        let request: CreateWeddingRequest = serde_json::from_str(json).unwrap();
        assert!(!request.is_private);
    }
}
