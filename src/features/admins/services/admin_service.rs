use sqlx::PgPool;

use crate::core::config::SuperAdminSeed;
use crate::core::error::{AppError, Result};
use crate::features::admins::dtos::{AdminResponseDto, CreateAdminDto, UpdateAdminDto};
use crate::features::admins::models::{Admin, ADMIN_COLUMNS};
use crate::features::auth::dtos::ChangePasswordRequestDto;
use crate::features::auth::password::{hash_password, verify_password};
use crate::shared::types::PaginationQuery;

/// Service for administrator accounts
pub struct AdminService {
    pool: PgPool,
}

impl AdminService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find(&self, id: i64) -> Result<Admin> {
        sqlx::query_as::<_, Admin>(&format!(
            "SELECT {} FROM admins WHERE id = $1 AND deleted_at IS NULL",
            ADMIN_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "get admin"))?
        .ok_or_else(|| AppError::NotFound(format!("Admin {} not found", id)))
    }

    pub async fn get(&self, id: i64) -> Result<AdminResponseDto> {
        self.find(id).await.map(Into::into)
    }

    pub async fn list(&self, pagination: &PaginationQuery) -> Result<(Vec<AdminResponseDto>, i64)> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM admins WHERE deleted_at IS NULL")
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::from_db(e, "count admins"))?;

        let admins = sqlx::query_as::<_, Admin>(&format!(
            r#"
            SELECT {} FROM admins
            WHERE deleted_at IS NULL
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
            ADMIN_COLUMNS
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "list admins"))?;

        Ok((admins.into_iter().map(Into::into).collect(), total))
    }

    pub async fn create(&self, dto: CreateAdminDto) -> Result<AdminResponseDto> {
        let admin = sqlx::query_as::<_, Admin>(&format!(
            r#"
            INSERT INTO admins (name, username, email, password, telephone_number, is_super_admin)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            ADMIN_COLUMNS
        ))
        .bind(dto.name.trim())
        .bind(&dto.username)
        .bind(&dto.email)
        .bind(hash_password(&dto.password)?)
        .bind(&dto.telephone_number)
        .bind(dto.is_super_admin)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "create admin"))?;

        tracing::info!("Created admin {} ({})", admin.id, admin.username);
        Ok(admin.into())
    }

    pub async fn update(&self, id: i64, dto: UpdateAdminDto) -> Result<AdminResponseDto> {
        let password = dto.password.as_deref().map(hash_password).transpose()?;

        let admin = sqlx::query_as::<_, Admin>(&format!(
            r#"
            UPDATE admins
            SET name = COALESCE($2, name),
                username = COALESCE($3, username),
                email = COALESCE($4, email),
                password = COALESCE($5, password),
                telephone_number = COALESCE($6, telephone_number),
                is_super_admin = COALESCE($7, is_super_admin),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {}
            "#,
            ADMIN_COLUMNS
        ))
        .bind(id)
        .bind(dto.name.as_deref().map(str::trim))
        .bind(dto.username)
        .bind(dto.email)
        .bind(password)
        .bind(dto.telephone_number)
        .bind(dto.is_super_admin)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "update admin"))?
        .ok_or_else(|| AppError::NotFound(format!("Admin {} not found", id)))?;

        Ok(admin.into())
    }

    /// Soft delete; a super admin cannot delete their own account
    pub async fn delete(&self, id: i64, requested_by: i64) -> Result<()> {
        if id == requested_by {
            return Err(AppError::BadRequest(
                "You cannot delete your own account".to_string(),
            ));
        }

        let result = sqlx::query(
            "UPDATE admins SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "delete admin"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Admin {} not found", id)));
        }

        tracing::info!("Admin {} deleted by {}", id, requested_by);
        Ok(())
    }

    pub async fn change_password(&self, id: i64, dto: ChangePasswordRequestDto) -> Result<()> {
        let admin = self.find(id).await?;

        if !verify_password(&dto.old_password, &admin.password)? {
            return Err(AppError::BadRequest("Old password is incorrect".to_string()));
        }

        sqlx::query("UPDATE admins SET password = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(hash_password(&dto.new_password)?)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "change admin password"))?;

        Ok(())
    }

    /// Create the configured super admin unless one already exists
    pub async fn ensure_super_admin(&self, seed: &SuperAdminSeed) -> Result<()> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM admins WHERE is_super_admin AND deleted_at IS NULL)",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "check super admin"))?;

        if exists {
            tracing::debug!("Super admin already present, skipping bootstrap");
            return Ok(());
        }

        let admin = self
            .create(CreateAdminDto {
                name: seed.name.clone(),
                username: seed.username.clone(),
                email: seed.email.clone(),
                password: seed.password.clone(),
                telephone_number: seed.telephone_number.clone(),
                is_super_admin: true,
            })
            .await?;

        tracing::info!("Bootstrapped super admin '{}'", admin.username);
        Ok(())
    }
}
