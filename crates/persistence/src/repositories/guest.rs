//! Guest repository for database operations.
//!
//! The guest lifecycle's two race-sensitive writes live here as single
//! conditional statements: the RSVP upsert (`ON CONFLICT DO UPDATE`) and
//! the check-in transition (`WHERE checked_in = false`). Neither is ever a
//! separate read followed by a write.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{GuestEntity, RsvpStatusDb, UpsertedGuestEntity};
use crate::metrics::QueryTimer;

/// Repository for guest-related database operations.
#[derive(Clone)]
pub struct GuestRepository {
    pool: PgPool,
}

impl GuestRepository {
    /// Creates a new GuestRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create a new guest (owner path). The QR token is minted at creation.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        wedding_id: Uuid,
        name: &str,
        email: &str,
        phone: Option<&str>,
        group_name: &str,
        status: RsvpStatusDb,
        number_of_guests: i32,
        message: Option<&str>,
        qr_code: &str,
    ) -> Result<GuestEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_guest");
        let result = sqlx::query_as::<_, GuestEntity>(
            r#"
            INSERT INTO guests (wedding_id, name, email, phone, group_name, status, number_of_guests, message, qr_code)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, wedding_id, name, email, phone, group_name, status, number_of_guests, message,
                      qr_code, checked_in, checked_in_at, created_at, updated_at
            "#,
        )
        .bind(wedding_id)
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(group_name)
        .bind(status)
        .bind(number_of_guests)
        .bind(message)
        .bind(qr_code)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a guest by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<GuestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_guest_by_id");
        let result = sqlx::query_as::<_, GuestEntity>(
            r#"
            SELECT id, wedding_id, name, email, phone, group_name, status, number_of_guests, message,
                   qr_code, checked_in, checked_in_at, created_at, updated_at
            FROM guests
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List guests of a wedding, oldest first.
    pub async fn list_for_wedding(
        &self,
        wedding_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<GuestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_guests_for_wedding");
        let result = sqlx::query_as::<_, GuestEntity>(
            r#"
            SELECT id, wedding_id, name, email, phone, group_name, status, number_of_guests, message,
                   qr_code, checked_in, checked_in_at, created_at, updated_at
            FROM guests
            WHERE wedding_id = $1
            ORDER BY created_at ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(wedding_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Count guests of a wedding.
    pub async fn count_for_wedding(&self, wedding_id: Uuid) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_guests_for_wedding");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM guests WHERE wedding_id = $1
            "#,
        )
        .bind(wedding_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Atomic RSVP upsert keyed on `(wedding_id, email)`.
    ///
    /// Inserts a fresh guest with the supplied QR token, or updates the
    /// mutable RSVP fields of the existing row. The update path never
    /// touches `qr_code`, `checked_in` or `checked_in_at`. The returned
    /// `inserted` flag distinguishes the two outcomes.
    #[allow(clippy::too_many_arguments)]
    pub async fn upsert_rsvp(
        &self,
        wedding_id: Uuid,
        name: &str,
        email: &str,
        phone: Option<&str>,
        status: RsvpStatusDb,
        number_of_guests: i32,
        message: Option<&str>,
        qr_code: &str,
    ) -> Result<UpsertedGuestEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_rsvp_guest");
        let result = sqlx::query_as::<_, UpsertedGuestEntity>(
            r#"
            INSERT INTO guests (wedding_id, name, email, phone, status, number_of_guests, message, qr_code)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (wedding_id, email) DO UPDATE SET
                name = EXCLUDED.name,
                phone = EXCLUDED.phone,
                status = EXCLUDED.status,
                number_of_guests = EXCLUDED.number_of_guests,
                message = EXCLUDED.message,
                updated_at = NOW()
            RETURNING id, wedding_id, name, email, phone, group_name, status, number_of_guests, message,
                      qr_code, checked_in, checked_in_at, created_at, updated_at,
                      (xmax = 0) AS inserted
            "#,
        )
        .bind(wedding_id)
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(status)
        .bind(number_of_guests)
        .bind(message)
        .bind(qr_code)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update mutable guest fields (owner path). Omitted fields keep their
    /// current value.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        phone: Option<&str>,
        group_name: Option<&str>,
        status: Option<RsvpStatusDb>,
        number_of_guests: Option<i32>,
        message: Option<&str>,
    ) -> Result<Option<GuestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_guest");
        let result = sqlx::query_as::<_, GuestEntity>(
            r#"
            UPDATE guests SET
                name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                group_name = COALESCE($4, group_name),
                status = COALESCE($5, status),
                number_of_guests = COALESCE($6, number_of_guests),
                message = COALESCE($7, message),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, wedding_id, name, email, phone, group_name, status, number_of_guests, message,
                      qr_code, checked_in, checked_in_at, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(phone)
        .bind(group_name)
        .bind(status)
        .bind(number_of_guests)
        .bind(message)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a guest.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_guest");
        let result = sqlx::query(
            r#"
            DELETE FROM guests WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Assign a QR token to a guest that does not have one yet.
    ///
    /// The `qr_code IS NULL` guard makes issuance idempotent under
    /// concurrency: of two racing writers exactly one row update wins, and
    /// both callers then observe the same persisted token on re-read.
    pub async fn assign_qr_code(&self, id: Uuid, qr_code: &str) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("assign_guest_qr_code");
        let result = sqlx::query(
            r#"
            UPDATE guests
            SET qr_code = $2, updated_at = NOW()
            WHERE id = $1 AND qr_code IS NULL
            "#,
        )
        .bind(id)
        .bind(qr_code)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// One-way check-in transition, scoped to a wedding.
    ///
    /// Returns the updated row when this call performed the transition, or
    /// `None` when the code is unknown in this wedding or the guest was
    /// already checked in. Of N concurrent scans of the same code exactly
    /// one receives the row.
    pub async fn check_in(
        &self,
        wedding_id: Uuid,
        qr_code: &str,
    ) -> Result<Option<GuestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("check_in_guest");
        let result = sqlx::query_as::<_, GuestEntity>(
            r#"
            UPDATE guests
            SET checked_in = true, checked_in_at = NOW(), updated_at = NOW()
            WHERE wedding_id = $1 AND qr_code = $2 AND checked_in = false
            RETURNING id, wedding_id, name, email, phone, group_name, status, number_of_guests, message,
                      qr_code, checked_in, checked_in_at, created_at, updated_at
            "#,
        )
        .bind(wedding_id)
        .bind(qr_code)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a guest by QR token, scoped to a wedding. Used to distinguish
    /// a replayed scan from an unknown code after `check_in` returns `None`.
    pub async fn find_by_qr_code(
        &self,
        wedding_id: Uuid,
        qr_code: &str,
    ) -> Result<Option<GuestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_guest_by_qr_code");
        let result = sqlx::query_as::<_, GuestEntity>(
            r#"
            SELECT id, wedding_id, name, email, phone, group_name, status, number_of_guests, message,
                   qr_code, checked_in, checked_in_at, created_at, updated_at
            FROM guests
            WHERE wedding_id = $1 AND qr_code = $2
            "#,
        )
        .bind(wedding_id)
        .bind(qr_code)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
