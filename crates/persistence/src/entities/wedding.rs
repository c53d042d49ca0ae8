//! Wedding entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::Wedding;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the `weddings` table.
#[derive(Debug, Clone, FromRow)]
pub struct WeddingEntity {
    pub id: Uuid,
    pub owner_user_id: Uuid,
    pub slug: String,
    pub bride_name: String,
    pub groom_name: String,
    pub wedding_date: NaiveDate,
    pub venue: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WeddingEntity> for Wedding {
    fn from(entity: WeddingEntity) -> Self {
        Wedding {
            id: entity.id,
            owner_user_id: entity.owner_user_id,
            slug: entity.slug,
            bride_name: entity.bride_name,
            groom_name: entity.groom_name,
            wedding_date: entity.wedding_date,
            venue: entity.venue,
            city: entity.city,
            country: entity.country,
            is_private: entity.is_private,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
