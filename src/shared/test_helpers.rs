#[cfg(test)]
use crate::core::error::Result;
#[cfg(test)]
use crate::features::auth::model::{AuthenticatedUser, Role};
#[cfg(test)]
use crate::modules::storage::FileStorage;

#[cfg(test)]
use async_trait::async_trait;
#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};
#[cfg(test)]
use sqlx::PgPool;

#[cfg(test)]
pub fn create_test_user(role: Role) -> AuthenticatedUser {
    AuthenticatedUser {
        id: 1,
        username: format!("test_{}", role),
        role,
    }
}

#[cfg(test)]
pub fn with_auth(router: Router, user: AuthenticatedUser) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let user = user.clone();
            async move {
                request.extensions_mut().insert(user);
                let response: Response = next.run(request).await;
                response
            }
        },
    ))
}

/// Storage that keeps nothing and hands back a local-style path
#[cfg(test)]
pub struct NoopStorage;

#[cfg(test)]
#[async_trait]
impl FileStorage for NoopStorage {
    async fn upload(&self, key: &str, _data: Vec<u8>, _content_type: &str) -> Result<String> {
        Ok(format!("/uploads/{}", key))
    }

    async fn delete(&self, _path: &str) -> Result<()> {
        Ok(())
    }
}

/// Insert a verified citizen account and return its id
#[cfg(test)]
pub async fn insert_test_user(pool: &PgPool, username: &str) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO users (name, username, email, password, telephone_number, email_verified)
        VALUES ($1, $2, $3, 'hashed', '081234567890', TRUE)
        RETURNING id
        "#,
    )
    .bind(format!("Warga {}", username))
    .bind(username)
    .bind(format!("{}@example.com", username))
    .fetch_one(pool)
    .await
    .unwrap()
}

#[cfg(test)]
pub async fn insert_test_admin(pool: &PgPool, username: &str) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO admins (name, username, email, password, telephone_number)
        VALUES ($1, $2, $3, 'hashed', '081234567890')
        RETURNING id
        "#,
    )
    .bind(format!("Petugas {}", username))
    .bind(username)
    .bind(format!("{}@example.com", username))
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Id of a category seeded by the reference-data migration
#[cfg(test)]
pub async fn seeded_category_id(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT id FROM categories WHERE name = 'Infrastruktur'")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[cfg(test)]
pub fn caller(id: i64, role: Role) -> AuthenticatedUser {
    AuthenticatedUser {
        id,
        username: format!("caller_{}", id),
        role,
    }
}
