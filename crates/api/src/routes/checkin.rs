//! Public check-in endpoint handler.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::{GuestRepository, WeddingRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_check_in;
use domain::models::guest::{CheckInRequest, CheckInResponse, Guest};

/// Check a guest in by scanned QR code, scoped to one wedding.
///
/// The transition is a single conditional update, so of N concurrent scans
/// of the same code exactly one succeeds. A replayed scan is an expected
/// outcome: HTTP 200 with `success: false` and the original check-in time,
/// never a server fault and never a second transition.
///
/// POST /api/public/v1/weddings/:wedding_id/check-in
pub async fn check_in_guest(
    State(state): State<AppState>,
    Path(wedding_id): Path<Uuid>,
    Json(request): Json<CheckInRequest>,
) -> Result<(StatusCode, Json<CheckInResponse>), ApiError> {
    request.validate()?;

    let wedding_repo = WeddingRepository::new(state.pool.clone());
    if wedding_repo.find_by_id(wedding_id).await?.is_none() {
        return Err(ApiError::NotFound("Wedding not found".to_string()));
    }

    let guest_repo = GuestRepository::new(state.pool.clone());

    if let Some(entity) = guest_repo.check_in(wedding_id, &request.qr_code).await? {
        let guest: Guest = entity.into();
        info!(
            guest_id = %guest.id,
            wedding_id = %wedding_id,
            "Guest checked in"
        );
        record_check_in("success");
        return Ok((StatusCode::OK, Json(CheckInResponse::checked_in(guest))));
    }

    // The conditional update matched nothing: either the code is unknown in
    // this wedding, or the guest is already checked in.
    match guest_repo
        .find_by_qr_code(wedding_id, &request.qr_code)
        .await?
    {
        Some(entity) => {
            info!(
                guest_id = %entity.id,
                wedding_id = %wedding_id,
                "Repeated check-in attempt"
            );
            record_check_in("replay");
            Ok((
                StatusCode::OK,
                Json(CheckInResponse::already_checked_in(
                    &entity.name,
                    entity.checked_in_at,
                )),
            ))
        }
        None => {
            record_check_in("not_found");
            Ok((StatusCode::NOT_FOUND, Json(CheckInResponse::not_found())))
        }
    }
}
