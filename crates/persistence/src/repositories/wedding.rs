//! Wedding repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::WeddingEntity;
use crate::metrics::QueryTimer;

/// Repository for wedding-related database operations.
#[derive(Clone)]
pub struct WeddingRepository {
    pool: PgPool,
}

impl WeddingRepository {
    /// Creates a new WeddingRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new wedding owned by `owner_user_id`.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        owner_user_id: Uuid,
        slug: &str,
        bride_name: &str,
        groom_name: &str,
        wedding_date: chrono::NaiveDate,
        venue: Option<&str>,
        city: Option<&str>,
        country: Option<&str>,
        is_private: bool,
    ) -> Result<WeddingEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_wedding");
        let result = sqlx::query_as::<_, WeddingEntity>(
            r#"
            INSERT INTO weddings (owner_user_id, slug, bride_name, groom_name, wedding_date, venue, city, country, is_private)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, owner_user_id, slug, bride_name, groom_name, wedding_date, venue, city, country, is_private, created_at, updated_at
            "#,
        )
        .bind(owner_user_id)
        .bind(slug)
        .bind(bride_name)
        .bind(groom_name)
        .bind(wedding_date)
        .bind(venue)
        .bind(city)
        .bind(country)
        .bind(is_private)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a wedding by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<WeddingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_wedding_by_id");
        let result = sqlx::query_as::<_, WeddingEntity>(
            r#"
            SELECT id, owner_user_id, slug, bride_name, groom_name, wedding_date, venue, city, country, is_private, created_at, updated_at
            FROM weddings
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a wedding by its public slug.
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<WeddingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_wedding_by_slug");
        let result = sqlx::query_as::<_, WeddingEntity>(
            r#"
            SELECT id, owner_user_id, slug, bride_name, groom_name, wedding_date, venue, city, country, is_private, created_at, updated_at
            FROM weddings
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a wedding by ID, scoped to its owner.
    ///
    /// Owner-facing routes use this so that a foreign wedding id behaves
    /// exactly like a missing one.
    pub async fn find_owned(
        &self,
        id: Uuid,
        owner_user_id: Uuid,
    ) -> Result<Option<WeddingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_wedding_owned");
        let result = sqlx::query_as::<_, WeddingEntity>(
            r#"
            SELECT id, owner_user_id, slug, bride_name, groom_name, wedding_date, venue, city, country, is_private, created_at, updated_at
            FROM weddings
            WHERE id = $1 AND owner_user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List weddings owned by a user, newest first.
    pub async fn list_for_owner(
        &self,
        owner_user_id: Uuid,
    ) -> Result<Vec<WeddingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_weddings_for_owner");
        let result = sqlx::query_as::<_, WeddingEntity>(
            r#"
            SELECT id, owner_user_id, slug, bride_name, groom_name, wedding_date, venue, city, country, is_private, created_at, updated_at
            FROM weddings
            WHERE owner_user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_user_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a wedding owned by the user. Guests cascade.
    pub async fn delete_owned(
        &self,
        id: Uuid,
        owner_user_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_wedding_owned");
        let result = sqlx::query(
            r#"
            DELETE FROM weddings
            WHERE id = $1 AND owner_user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_user_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Check whether a slug is already taken.
    pub async fn slug_exists(&self, slug: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_wedding_slug_exists");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM weddings WHERE slug = $1)
            "#,
        )
        .bind(slug)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
