use std::sync::Arc;

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::ChangePasswordRequestDto;
use crate::features::auth::password::{hash_password, verify_password};
use crate::features::users::dtos::{UpdateProfileDto, UserListQuery, UserResponseDto};
use crate::features::users::models::{User, USER_COLUMNS};
use crate::modules::storage::{self, FileStorage, UploadedFile, IMAGE_MIME_TYPES};
use crate::shared::types::PaginationQuery;

/// Service for citizen accounts
pub struct UserService {
    pool: PgPool,
    storage: Arc<dyn FileStorage>,
}

fn push_search(builder: &mut QueryBuilder<'_, Postgres>, query: &UserListQuery) {
    if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        builder
            .push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR username ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR email ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

impl UserService {
    pub fn new(pool: PgPool, storage: Arc<dyn FileStorage>) -> Self {
        Self { pool, storage }
    }

    async fn find(&self, id: i64) -> Result<User> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1 AND deleted_at IS NULL",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "get user"))?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    pub async fn get(&self, id: i64) -> Result<UserResponseDto> {
        self.find(id).await.map(Into::into)
    }

    pub async fn list(
        &self,
        query: &UserListQuery,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<UserResponseDto>, i64)> {
        let mut count =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM users WHERE deleted_at IS NULL");
        push_search(&mut count, query);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "count users"))?;

        let mut select = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM users WHERE deleted_at IS NULL",
            USER_COLUMNS
        ));
        push_search(&mut select, query);
        select
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let users = select
            .build_query_as::<User>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "list users"))?;

        Ok((users.into_iter().map(Into::into).collect(), total))
    }

    pub async fn update_profile(&self, id: i64, dto: UpdateProfileDto) -> Result<UserResponseDto> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                username = COALESCE($3, username),
                telephone_number = COALESCE($4, telephone_number),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(id)
        .bind(dto.name.as_deref().map(str::trim))
        .bind(dto.username)
        .bind(dto.telephone_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "update user profile"))?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

        Ok(user.into())
    }

    pub async fn change_password(&self, id: i64, dto: ChangePasswordRequestDto) -> Result<()> {
        let user = self.find(id).await?;

        if !verify_password(&dto.old_password, &user.password)? {
            return Err(AppError::BadRequest("Old password is incorrect".to_string()));
        }

        sqlx::query("UPDATE users SET password = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(hash_password(&dto.new_password)?)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "change user password"))?;

        Ok(())
    }

    /// Replace the profile photo; the previous file is removed afterwards
    pub async fn update_photo(&self, id: i64, file: UploadedFile) -> Result<UserResponseDto> {
        let previous = self.find(id).await?.profile_photo;

        let paths =
            storage::store_files(self.storage.as_ref(), "profiles", vec![file], IMAGE_MIME_TYPES)
                .await?;

        let result = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET profile_photo = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        ))
        .bind(id)
        .bind(&paths[0])
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => {
                if let Some(old) = previous {
                    storage::remove_files(self.storage.as_ref(), &[old]).await;
                }
                Ok(user.into())
            }
            Err(e) => {
                storage::remove_files(self.storage.as_ref(), &paths).await;
                Err(AppError::from_db(e, "update profile photo"))
            }
        }
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "delete user"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }

        tracing::info!("Soft deleted user {}", id);
        Ok(())
    }
}
