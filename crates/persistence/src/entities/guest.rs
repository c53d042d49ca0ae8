//! Guest entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{Guest, RsvpStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database representation of the `rsvp_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "rsvp_status", rename_all = "snake_case")]
pub enum RsvpStatusDb {
    Pending,
    Attending,
    NotAttending,
}

impl From<RsvpStatus> for RsvpStatusDb {
    fn from(status: RsvpStatus) -> Self {
        match status {
            RsvpStatus::Pending => RsvpStatusDb::Pending,
            RsvpStatus::Attending => RsvpStatusDb::Attending,
            RsvpStatus::NotAttending => RsvpStatusDb::NotAttending,
        }
    }
}

impl From<RsvpStatusDb> for RsvpStatus {
    fn from(status: RsvpStatusDb) -> Self {
        match status {
            RsvpStatusDb::Pending => RsvpStatus::Pending,
            RsvpStatusDb::Attending => RsvpStatus::Attending,
            RsvpStatusDb::NotAttending => RsvpStatus::NotAttending,
        }
    }
}

/// Database row mapping for the `guests` table.
#[derive(Debug, Clone, FromRow)]
pub struct GuestEntity {
    pub id: Uuid,
    pub wedding_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub group_name: String,
    pub status: RsvpStatusDb,
    pub number_of_guests: i32,
    pub message: Option<String>,
    pub qr_code: Option<String>,
    pub checked_in: bool,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GuestEntity> for Guest {
    fn from(entity: GuestEntity) -> Self {
        Guest {
            id: entity.id,
            wedding_id: entity.wedding_id,
            name: entity.name,
            email: entity.email,
            phone: entity.phone,
            group: entity.group_name,
            status: entity.status.into(),
            number_of_guests: entity.number_of_guests,
            message: entity.message,
            qr_code: entity.qr_code,
            checked_in: entity.checked_in,
            checked_in_at: entity.checked_in_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Guest row plus the `inserted` flag from the RSVP upsert.
///
/// `inserted` comes from `(xmax = 0)` on the RETURNING clause: true when the
/// statement inserted a new row, false when it updated an existing one.
#[derive(Debug, Clone, FromRow)]
pub struct UpsertedGuestEntity {
    #[sqlx(flatten)]
    pub guest: GuestEntity,
    pub inserted: bool,
}
