//! Guest endpoint handlers (owner-facing).

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
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
use domain::models::guest::{
    mint_qr_token, CreateGuestRequest, Guest, ListGuestsResponse, RsvpStatus, UpdateGuestRequest,
    DEFAULT_GROUP,
};
use shared::pagination::{PageInfo, PageQuery};
use shared::validation::normalize_email;

/// Loads a guest and verifies the caller owns its wedding.
///
/// Distinguishes missing (404) from foreign-owned (403); the check-in and
/// RSVP paths never call this since they are unauthenticated.
pub(crate) async fn load_owned_guest(
    pool: &PgPool,
    guest_id: Uuid,
    owner_user_id: Uuid,
) -> Result<(GuestEntity, WeddingEntity), ApiError> {
    let guest_repo = GuestRepository::new(pool.clone());
    let guest = guest_repo
        .find_by_id(guest_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Guest not found".to_string()))?;

    let wedding_repo = WeddingRepository::new(pool.clone());
    let wedding = wedding_repo
        .find_by_id(guest.wedding_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Wedding not found".to_string()))?;

    if wedding.owner_user_id != owner_user_id {
        return Err(ApiError::Forbidden(
            "You do not own this wedding".to_string(),
        ));
    }

    Ok((guest, wedding))
}

/// List guests of one of the caller's weddings.
///
/// GET /api/v1/weddings/:wedding_id/guests
pub async fn list_guests(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(wedding_id): Path<Uuid>,
    Query(page): Query<PageQuery>,
) -> Result<Json<ListGuestsResponse>, ApiError> {
    let wedding_repo = WeddingRepository::new(state.pool.clone());
    wedding_repo
        .find_owned(wedding_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Wedding not found".to_string()))?;

    let guest_repo = GuestRepository::new(state.pool.clone());
    let entities = guest_repo
        .list_for_wedding(wedding_id, page.limit(), page.offset())
        .await?;
    let total = guest_repo.count_for_wedding(wedding_id).await?;

    let data: Vec<Guest> = entities.into_iter().map(Into::into).collect();

    Ok(Json(ListGuestsResponse {
        data,
        page_info: PageInfo::new(&page, total),
    }))
}

/// Add a guest to one of the caller's weddings.
///
/// POST /api/v1/weddings/:wedding_id/guests
pub async fn create_guest(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(wedding_id): Path<Uuid>,
    Json(request): Json<CreateGuestRequest>,
) -> Result<(StatusCode, Json<Guest>), ApiError> {
    request.validate()?;

    let wedding_repo = WeddingRepository::new(state.pool.clone());
    wedding_repo
        .find_owned(wedding_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Wedding not found".to_string()))?;

    let email = normalize_email(&request.email);
    let status = request.status.unwrap_or(RsvpStatus::Pending);
    let qr_code = mint_qr_token(wedding_id);

    let guest_repo = GuestRepository::new(state.pool.clone());
    let entity = guest_repo
        .create(
            wedding_id,
            &request.name,
            &email,
            request.phone.as_deref(),
            request.group.as_deref().unwrap_or(DEFAULT_GROUP),
            status.into(),
            request.number_of_guests.unwrap_or(1),
            request.message.as_deref(),
            &qr_code,
        )
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.code().as_deref() == Some("23505") => {
                ApiError::Conflict("A guest with this email already exists".to_string())
            }
            other => other.into(),
        })?;

    let guest: Guest = entity.into();

    info!(
        guest_id = %guest.id,
        wedding_id = %wedding_id,
        "Guest created"
    );

    Ok((StatusCode::CREATED, Json(guest)))
}

/// Edit a guest. Check-in state is never editable here.
///
/// PATCH /api/v1/guests/:guest_id
pub async fn update_guest(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(guest_id): Path<Uuid>,
    Json(request): Json<UpdateGuestRequest>,
) -> Result<Json<Guest>, ApiError> {
    request.validate()?;

    load_owned_guest(&state.pool, guest_id, auth.user_id).await?;

    let guest_repo = GuestRepository::new(state.pool.clone());
    let entity = guest_repo
        .update(
            guest_id,
            request.name.as_deref(),
            request.phone.as_deref(),
            request.group.as_deref(),
            request.status.map(Into::into),
            request.number_of_guests,
            request.message.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Guest not found".to_string()))?;

    let guest: Guest = entity.into();

    info!(guest_id = %guest.id, "Guest updated");

    Ok(Json(guest))
}

/// Remove a guest.
///
/// DELETE /api/v1/guests/:guest_id
pub async fn delete_guest(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(guest_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let (guest, _) = load_owned_guest(&state.pool, guest_id, auth.user_id).await?;

    let guest_repo = GuestRepository::new(state.pool.clone());
    guest_repo.delete(guest.id).await?;

    info!(guest_id = %guest_id, "Guest deleted");

    Ok(StatusCode::NO_CONTENT)
}
