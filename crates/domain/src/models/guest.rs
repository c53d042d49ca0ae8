//! Guest domain model and the RSVP / check-in lifecycle types.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use shared::pagination::PageInfo;
use shared::validation::{validate_party_size, MAX_PARTY_SIZE};

/// QR token prefix. The rest of the token is opaque to callers.
pub const QR_TOKEN_PREFIX: &str = "guest-";

/// Length of random bytes in a QR token.
const QR_TOKEN_RANDOM_BYTES: usize = 24;

/// Default group tag assigned when the caller omits one.
pub const DEFAULT_GROUP: &str = "Friends";

/// RSVP state of a guest.
///
/// Wire format is kebab-case (`pending`, `attending`, `not-attending`) to
/// match the public RSVP contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RsvpStatus {
    Pending,
    Attending,
    NotAttending,
}

impl RsvpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RsvpStatus::Pending => "pending",
            RsvpStatus::Attending => "attending",
            RsvpStatus::NotAttending => "not-attending",
        }
    }
}

/// Guest domain model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Guest {
    pub id: Uuid,
    pub wedding_id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub group: String,
    pub status: RsvpStatus,
    pub number_of_guests: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
    pub checked_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_in_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Guest {
    /// Whether an invitation QR token has been issued for this guest.
    pub fn has_invitation(&self) -> bool {
        self.qr_code.is_some()
    }
}

/// Public RSVP submission.
///
/// Unauthenticated by design: guests are not platform users. The wedding is
/// resolved by id or slug (exactly one required) and the guest identity is
/// the `(wedding, email)` pair.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct RsvpRequest {
    pub wedding_id: Option<Uuid>,
    pub wedding_slug: Option<String>,

    #[validate(length(min = 1, max = 120, message = "name is required"))]
    pub name: String,

    #[validate(email(message = "A valid email is required"))]
    pub email: String,

    #[validate(length(max = 32, message = "phone must be at most 32 characters"))]
    pub phone: Option<String>,

    pub status: RsvpStatus,

    pub number_of_guests: Option<i32>,

    #[validate(length(max = 1000, message = "message must be at most 1000 characters"))]
    pub message: Option<String>,
}

impl RsvpRequest {
    /// Party size with the public-path coercion applied: absent or invalid
    /// (< 1) values become 1, oversized values are capped.
    pub fn party_size(&self) -> i32 {
        self.number_of_guests
            .filter(|n| *n >= 1)
            .unwrap_or(1)
            .min(MAX_PARTY_SIZE)
    }

    /// True when exactly one of `wedding_id` / `wedding_slug` is present.
    pub fn has_single_wedding_ref(&self) -> bool {
        self.wedding_id.is_some() != self.wedding_slug.is_some()
    }
}

/// Response to a public RSVP submission.
///
/// `created` distinguishes a fresh guest record from an in-place update of
/// an earlier submission with the same email.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RsvpResponse {
    pub success: bool,
    pub created: bool,
    pub message: String,
    pub guest: Guest,
}

/// Paginated guest listing for the owner dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListGuestsResponse {
    pub data: Vec<Guest>,
    pub page_info: PageInfo,
}

/// Owner-facing request to add a guest manually.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateGuestRequest {
    #[validate(length(min = 1, max = 120, message = "name is required"))]
    pub name: String,

    #[validate(email(message = "A valid email is required"))]
    pub email: String,

    #[validate(length(max = 32, message = "phone must be at most 32 characters"))]
    pub phone: Option<String>,

    #[validate(length(max = 64, message = "group must be at most 64 characters"))]
    pub group: Option<String>,

    /// Defaults to `pending` when omitted.
    pub status: Option<RsvpStatus>,

    #[validate(custom(function = "validate_opt_party_size"))]
    pub number_of_guests: Option<i32>,

    #[validate(length(max = 1000, message = "message must be at most 1000 characters"))]
    pub message: Option<String>,
}

/// Owner-facing request to edit a guest. All fields optional; omitted
/// fields are left untouched. Check-in state is not editable here.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateGuestRequest {
    #[validate(length(min = 1, max = 120, message = "name must be 1-120 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 32, message = "phone must be at most 32 characters"))]
    pub phone: Option<String>,

    #[validate(length(max = 64, message = "group must be at most 64 characters"))]
    pub group: Option<String>,

    pub status: Option<RsvpStatus>,

    #[validate(custom(function = "validate_opt_party_size"))]
    pub number_of_guests: Option<i32>,

    #[validate(length(max = 1000, message = "message must be at most 1000 characters"))]
    pub message: Option<String>,
}

fn validate_opt_party_size(size: i32) -> Result<(), validator::ValidationError> {
    validate_party_size(size)
}

/// Check-in submission: the scanned QR token.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CheckInRequest {
    #[validate(length(min = 1, message = "qr_code is required"))]
    pub qr_code: String,
}

/// Outcome of a check-in attempt.
///
/// A replayed scan is `success: false` with an explanatory message; it is an
/// expected case, not a server fault.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CheckInResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_in_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest: Option<Guest>,
}

impl CheckInResponse {
    pub fn checked_in(guest: Guest) -> Self {
        let message = format!("{} has successfully checked in", guest.name);
        Self {
            success: true,
            message,
            guest_name: Some(guest.name.clone()),
            checked_in_at: guest.checked_in_at,
            guest: Some(guest),
        }
    }

    /// Unknown code, or a code from another wedding. Same body shape as the
    /// other outcomes so scanner stations render one thing.
    pub fn not_found() -> Self {
        Self {
            success: false,
            message: "Guest not found".to_string(),
            guest_name: None,
            checked_in_at: None,
            guest: None,
        }
    }

    pub fn already_checked_in(name: &str, at: Option<DateTime<Utc>>) -> Self {
        Self {
            success: false,
            message: already_checked_in_message(name, at),
            guest_name: Some(name.to_string()),
            checked_in_at: at,
            guest: None,
        }
    }
}

/// Wording for the double-scan case.
pub fn already_checked_in_message(name: &str, at: Option<DateTime<Utc>>) -> String {
    match at {
        Some(at) => format!(
            "{} has already checked in at {}",
            name,
            at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ),
        None => format!("{} has already checked in", name),
    }
}

/// Mints a fresh QR token for a guest of the given wedding.
///
/// The token is opaque; the wedding id prefix only aids debugging. Global
/// uniqueness is enforced by the database constraint, not by this function.
pub fn mint_qr_token(wedding_id: Uuid) -> String {
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..QR_TOKEN_RANDOM_BYTES).map(|_| rng.gen()).collect();
    format!(
        "{}{}-{}",
        QR_TOKEN_PREFIX,
        wedding_id,
        URL_SAFE_NO_PAD.encode(&random_bytes)
    )
}
