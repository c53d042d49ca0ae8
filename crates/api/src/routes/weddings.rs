//! Wedding endpoint handlers (owner-facing).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::WeddingRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use domain::models::wedding::{CreateWeddingRequest, ListWeddingsResponse, Wedding};

/// Create a new wedding owned by the caller.
///
/// POST /api/v1/weddings
pub async fn create_wedding(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<CreateWeddingRequest>,
) -> Result<(StatusCode, Json<Wedding>), ApiError> {
    request.validate()?;

    let repo = WeddingRepository::new(state.pool.clone());

    if repo.slug_exists(&request.slug).await? {
        return Err(ApiError::Conflict(format!(
            "Slug '{}' is already taken",
            request.slug
        )));
    }

    let entity = repo
        .create(
            auth.user_id,
            &request.slug,
            &request.bride_name,
            &request.groom_name,
            request.wedding_date,
            request.venue.as_deref(),
            request.city.as_deref(),
            request.country.as_deref(),
            request.is_private,
        )
        .await?;

    let wedding: Wedding = entity.into();

    info!(
        wedding_id = %wedding.id,
        slug = %wedding.slug,
        owner_user_id = %auth.user_id,
        "Wedding created"
    );

    Ok((StatusCode::CREATED, Json(wedding)))
}

/// List the caller's weddings, newest first.
///
/// GET /api/v1/weddings
pub async fn list_weddings(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<ListWeddingsResponse>, ApiError> {
    let repo = WeddingRepository::new(state.pool.clone());
    let entities = repo.list_for_owner(auth.user_id).await?;

    let data: Vec<Wedding> = entities.into_iter().map(Into::into).collect();
    Ok(Json(ListWeddingsResponse { data }))
}

/// Get one of the caller's weddings.
///
/// GET /api/v1/weddings/:wedding_id
pub async fn get_wedding(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(wedding_id): Path<Uuid>,
) -> Result<Json<Wedding>, ApiError> {
    let repo = WeddingRepository::new(state.pool.clone());
    let entity = repo
        .find_owned(wedding_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Wedding not found".to_string()))?;

    Ok(Json(entity.into()))
}

/// Delete one of the caller's weddings. Guests cascade.
///
/// DELETE /api/v1/weddings/:wedding_id
pub async fn delete_wedding(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(wedding_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = WeddingRepository::new(state.pool.clone());
    let deleted = repo.delete_owned(wedding_id, auth.user_id).await?;

    if deleted == 0 {
        return Err(ApiError::NotFound("Wedding not found".to_string()));
    }

    info!(wedding_id = %wedding_id, owner_user_id = %auth.user_id, "Wedding deleted");

    Ok(StatusCode::NO_CONTENT)
}
