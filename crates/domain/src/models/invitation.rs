//! Invitation issuance types: per-guest outcomes and link derivation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Upper bound on a single batch issuance request.
pub const MAX_BATCH_SIZE: usize = 200;

/// Request to issue invitations for a list of guests of one wedding.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct IssueInvitationsRequest {
    #[validate(length(min = 1, max = 200, message = "guest_ids must contain 1-200 entries"))]
    pub guest_ids: Vec<Uuid>,
}

/// Outcome of issuing one guest's invitation.
///
/// Batch processing is failure-isolated: one guest's failure never aborts
/// the others, so every entry carries its own `success` flag.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InvitationOutcome {
    pub guest_id: Uuid,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invitation_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl InvitationOutcome {
    pub fn failed(guest_id: Uuid, message: impl Into<String>) -> Self {
        Self {
            guest_id,
            success: false,
            name: None,
            email: None,
            invitation_link: None,
            qr_code_image: None,
            message: Some(message.into()),
        }
    }
}

/// Response for batch issuance.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct IssueInvitationsResponse {
    pub success: bool,
    pub results: Vec<InvitationOutcome>,
}

/// The link a scanner station resolves a QR code against.
pub fn check_in_link(base_url: &str, qr_code: &str) -> String {
    format!("{}/check-in?code={}", base_url.trim_end_matches('/'), qr_code)
}

/// The guest-facing invitation URL for a wedding page.
pub fn invitation_link(base_url: &str, wedding_slug: &str, guest_id: Uuid) -> String {
    format!(
        "{}/wedding/{}?guest={}",
        base_url.trim_end_matches('/'),
        wedding_slug,
        guest_id
    )
}
