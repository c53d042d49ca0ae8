//! Public RSVP endpoint handler.

use axum::{extract::State, http::StatusCode, Json};
use persistence::repositories::{GuestRepository, WeddingRepository};
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_rsvp_submitted;
use domain::models::guest::{mint_qr_token, Guest, RsvpRequest, RsvpResponse};
use shared::validation::normalize_email;

/// Submit or update an RSVP. Unauthenticated; the guest's identity is the
/// `(wedding, email)` pair, and resubmitting updates the earlier record
/// in place rather than creating a duplicate.
///
/// POST /api/public/v1/rsvp
pub async fn submit_rsvp(
    State(state): State<AppState>,
    Json(request): Json<RsvpRequest>,
) -> Result<(StatusCode, Json<RsvpResponse>), ApiError> {
    request.validate()?;

    if !request.has_single_wedding_ref() {
        return Err(ApiError::Validation(
            "Provide exactly one of wedding_id or wedding_slug".to_string(),
        ));
    }

    let wedding_repo = WeddingRepository::new(state.pool.clone());
    let wedding = if let Some(id) = request.wedding_id {
        wedding_repo.find_by_id(id).await?
    } else if let Some(slug) = request.wedding_slug.as_deref() {
        wedding_repo.find_by_slug(slug).await?
    } else {
        None
    }
    .ok_or_else(|| ApiError::NotFound("Wedding not found".to_string()))?;

    let email = normalize_email(&request.email);
    // Only used when the statement inserts; the update path keeps the
    // guest's existing token.
    let qr_code = mint_qr_token(wedding.id);

    let guest_repo = GuestRepository::new(state.pool.clone());
    let upserted = guest_repo
        .upsert_rsvp(
            wedding.id,
            &request.name,
            &email,
            request.phone.as_deref(),
            request.status.into(),
            request.party_size(),
            request.message.as_deref(),
            &qr_code,
        )
        .await?;

    let created = upserted.inserted;
    let guest: Guest = upserted.guest.into();

    info!(
        guest_id = %guest.id,
        wedding_id = %wedding.id,
        status = guest.status.as_str(),
        created = created,
        "RSVP recorded"
    );
    record_rsvp_submitted(created);

    let message = if created {
        "Thank you! Your RSVP has been recorded.".to_string()
    } else {
        "Thank you! Your RSVP has been updated.".to_string()
    };

    let status_code = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status_code,
        Json(RsvpResponse {
            success: true,
            created,
            message,
            guest,
        }),
    ))
}
