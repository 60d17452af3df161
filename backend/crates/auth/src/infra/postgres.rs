//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use kernel::id::AdminId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::admin_account::AdminAccount;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::{
    admin_password::AdminPassword, admin_role::AdminRole, email::Email,
};
use crate::error::{AuthError, AuthResult};

const SELECT_ADMIN: &str = r#"
    SELECT
        admin_id,
        email,
        password_hash,
        admin_role,
        department,
        last_login_at,
        created_at,
        updated_at
    FROM admin_accounts
"#;

/// PostgreSQL-backed admin repository
#[derive(Clone)]
pub struct PgAdminRepository {
    pool: PgPool,
}

impl PgAdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_insert_error(err: sqlx::Error) -> AuthError {
    if is_unique_violation(&err) {
        AuthError::DuplicateEmail
    } else {
        AuthError::Database(err)
    }
}

impl AdminRepository for PgAdminRepository {
    async fn create(&self, admin: &AdminAccount) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO admin_accounts (
                admin_id,
                email,
                password_hash,
                admin_role,
                department,
                last_login_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(admin.admin_id.as_uuid())
        .bind(admin.email.as_str())
        .bind(admin.password.as_phc_string())
        .bind(admin.role.id())
        .bind(admin.department.as_deref())
        .bind(admin.last_login_at)
        .bind(admin.created_at)
        .bind(admin.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(())
    }

    async fn create_if_none_exist(&self, admin: &AdminAccount) -> AuthResult<bool> {
        let mut tx = self.pool.begin().await?;

        // Serializes concurrent bootstraps; plain reads are not blocked
        sqlx::query("LOCK TABLE admin_accounts IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO admin_accounts (
                admin_id,
                email,
                password_hash,
                admin_role,
                department,
                last_login_at,
                created_at,
                updated_at
            )
            SELECT $1, $2, $3, $4, $5, $6, $7, $8
            WHERE NOT EXISTS (SELECT 1 FROM admin_accounts)
            "#,
        )
        .bind(admin.admin_id.as_uuid())
        .bind(admin.email.as_str())
        .bind(admin.password.as_phc_string())
        .bind(admin.role.id())
        .bind(admin.department.as_deref())
        .bind(admin.last_login_at)
        .bind(admin.created_at)
        .bind(admin.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_insert_error)?
        .rows_affected();

        tx.commit().await?;

        Ok(inserted == 1)
    }

    async fn has_any(&self) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM admin_accounts)")
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn find_by_id(&self, admin_id: &AdminId) -> AuthResult<Option<AdminAccount>> {
        let row = sqlx::query_as::<_, AdminRow>(&format!("{SELECT_ADMIN} WHERE admin_id = $1"))
            .bind(admin_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_admin()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<AdminAccount>> {
        let row = sqlx::query_as::<_, AdminRow>(&format!("{SELECT_ADMIN} WHERE email = $1"))
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_admin()).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM admin_accounts WHERE email = $1)",
        )
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn record_login(&self, admin_id: &AdminId, at: DateTime<Utc>) -> AuthResult<()> {
        sqlx::query(
            "UPDATE admin_accounts SET last_login_at = $2, updated_at = $2 WHERE admin_id = $1",
        )
        .bind(admin_id.as_uuid())
        .bind(at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_password(
        &self,
        admin_id: &AdminId,
        password: &AdminPassword,
        at: DateTime<Utc>,
    ) -> AuthResult<()> {
        let updated = sqlx::query(
            "UPDATE admin_accounts SET password_hash = $2, updated_at = $3 WHERE admin_id = $1",
        )
        .bind(admin_id.as_uuid())
        .bind(password.as_phc_string())
        .bind(at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(AuthError::AdminNotFound);
        }

        Ok(())
    }

    async fn upgrade_password(
        &self,
        admin_id: &AdminId,
        current: &AdminPassword,
        upgraded: &AdminPassword,
        at: DateTime<Utc>,
    ) -> AuthResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE admin_accounts SET
                password_hash = $3,
                updated_at = $4
            WHERE admin_id = $1 AND password_hash = $2
            "#,
        )
        .bind(admin_id.as_uuid())
        .bind(current.as_phc_string())
        .bind(upgraded.as_phc_string())
        .bind(at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated == 1)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AdminRow {
    admin_id: Uuid,
    email: String,
    password_hash: String,
    admin_role: i16,
    department: Option<String>,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AdminRow {
    fn into_admin(self) -> AuthResult<AdminAccount> {
        let role = AdminRole::from_id(self.admin_role).ok_or_else(|| {
            AuthError::Internal(format!("Unknown admin_role id: {}", self.admin_role))
        })?;

        Ok(AdminAccount {
            admin_id: AdminId::from_uuid(self.admin_id),
            email: Email::from_db(self.email),
            password: AdminPassword::from_phc_string(self.password_hash)?,
            role,
            department: self.department,
            last_login_at: self.last_login_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
