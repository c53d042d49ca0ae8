//! Invitation issuance endpoint handlers (owner-facing).
//!
//! Issuance is idempotent: a guest's QR token is assigned at most once, and
//! re-issuing returns the same token with freshly derived links.

use axum::{
    extract::{Path, State},
    Json,
};
use persistence::entities::{GuestEntity, WeddingEntity};
use persistence::repositories::{GuestRepository, WeddingRepository};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::middleware::metrics::record_invitations_issued;
use crate::routes::guests::load_owned_guest;
use crate::services::qr;
use domain::models::guest::mint_qr_token;
use domain::models::invitation::{
    check_in_link, invitation_link, InvitationOutcome, IssueInvitationsRequest,
    IssueInvitationsResponse,
};

/// Resolves the guest's QR token, assigning one if none exists yet.
///
/// The assignment is conditional on `qr_code IS NULL`; when two callers
/// race, both end up observing the single token that won.
async fn ensure_qr_code(
    pool: &PgPool,
    guest: &GuestEntity,
) -> Result<String, ApiError> {
    if let Some(ref qr_code) = guest.qr_code {
        return Ok(qr_code.clone());
    }

    let guest_repo = GuestRepository::new(pool.clone());
    let token = mint_qr_token(guest.wedding_id);
    guest_repo.assign_qr_code(guest.id, &token).await?;

    // Re-read rather than trusting our own token: a concurrent issuance
    // may have won the conditional update.
    let refreshed = guest_repo
        .find_by_id(guest.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Guest not found".to_string()))?;

    refreshed
        .qr_code
        .ok_or_else(|| ApiError::Internal("QR code assignment did not persist".to_string()))
}

/// Builds the successful per-guest outcome with links and QR image.
fn build_outcome(
    base_url: &str,
    wedding: &WeddingEntity,
    guest: &GuestEntity,
    qr_code: &str,
) -> Result<InvitationOutcome, ApiError> {
    let scan_link = check_in_link(base_url, qr_code);
    let qr_code_image = qr::svg_data_url(&scan_link)
        .map_err(|e| ApiError::Internal(format!("Failed to render QR code: {}", e)))?;

    Ok(InvitationOutcome {
        guest_id: guest.id,
        success: true,
        name: Some(guest.name.clone()),
        email: Some(guest.email.clone()),
        invitation_link: Some(invitation_link(base_url, &wedding.slug, guest.id)),
        qr_code_image: Some(qr_code_image),
        message: None,
    })
}

/// Issue (or re-issue) a single guest's invitation.
///
/// POST /api/v1/guests/:guest_id/invitation
pub async fn issue_invitation(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(guest_id): Path<Uuid>,
) -> Result<Json<InvitationOutcome>, ApiError> {
    let (guest, wedding) = load_owned_guest(&state.pool, guest_id, auth.user_id).await?;

    let qr_code = ensure_qr_code(&state.pool, &guest).await?;
    let outcome = build_outcome(
        &state.config.server.public_base_url,
        &wedding,
        &guest,
        &qr_code,
    )?;

    info!(
        guest_id = %guest.id,
        wedding_id = %wedding.id,
        "Invitation issued"
    );
    record_invitations_issued(1);

    Ok(Json(outcome))
}

/// Issue invitations for a list of guests of one wedding.
///
/// Failure-isolated: a missing or foreign guest id yields a failed entry
/// for that guest, never an aborted batch.
///
/// POST /api/v1/weddings/:wedding_id/invitations
pub async fn issue_invitations_batch(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(wedding_id): Path<Uuid>,
    Json(request): Json<IssueInvitationsRequest>,
) -> Result<Json<IssueInvitationsResponse>, ApiError> {
    request.validate()?;

    let wedding_repo = WeddingRepository::new(state.pool.clone());
    let wedding = wedding_repo
        .find_owned(wedding_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Wedding not found".to_string()))?;

    let guest_repo = GuestRepository::new(state.pool.clone());
    let base_url = state.config.server.public_base_url.clone();

    let mut results = Vec::with_capacity(request.guest_ids.len());
    let mut issued = 0usize;

    for guest_id in request.guest_ids {
        let outcome = issue_one(&state.pool, &guest_repo, &base_url, &wedding, guest_id).await;
        if outcome.success {
            issued += 1;
        }
        results.push(outcome);
    }

    info!(
        wedding_id = %wedding_id,
        requested = results.len(),
        issued = issued,
        "Batch invitation issuance completed"
    );
    record_invitations_issued(issued);

    let success = results.iter().all(|r| r.success);
    Ok(Json(IssueInvitationsResponse { success, results }))
}

async fn issue_one(
    pool: &PgPool,
    guest_repo: &GuestRepository,
    base_url: &str,
    wedding: &WeddingEntity,
    guest_id: Uuid,
) -> InvitationOutcome {
    let guest = match guest_repo.find_by_id(guest_id).await {
        Ok(Some(guest)) => guest,
        Ok(None) => return InvitationOutcome::failed(guest_id, "Guest not found"),
        Err(e) => {
            tracing::error!(guest_id = %guest_id, "Failed to load guest: {}", e);
            return InvitationOutcome::failed(guest_id, "Failed to load guest");
        }
    };

    if guest.wedding_id != wedding.id {
        return InvitationOutcome::failed(guest_id, "Guest does not belong to this wedding");
    }

    let qr_code = match ensure_qr_code(pool, &guest).await {
        Ok(qr_code) => qr_code,
        Err(e) => {
            tracing::error!(guest_id = %guest_id, "Failed to assign QR code: {}", e);
            return InvitationOutcome::failed(guest_id, "Failed to assign QR code");
        }
    };

    match build_outcome(base_url, wedding, &guest, &qr_code) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(guest_id = %guest_id, "Failed to render invitation: {}", e);
            InvitationOutcome::failed(guest_id, "Failed to render invitation")
        }
    }
}
