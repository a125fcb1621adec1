//! Lookup and visibility rules shared by every complaint sub-resource.

use sqlx::PgExecutor;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::complaints::models::{Complaint, COMPLAINT_COLUMNS};

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Complaint {} not found", id))
}

pub async fn find_complaint<'e, E>(executor: E, id: &str) -> Result<Complaint>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Complaint>(&format!(
        "SELECT {} FROM complaints WHERE id = $1 AND deleted_at IS NULL",
        COMPLAINT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(executor)
    .await
    .map_err(|e| AppError::from_db(e, "get complaint"))?
    .ok_or_else(|| not_found(id))
}

/// Same as [`find_complaint`] but holds a row lock until the transaction ends
pub async fn lock_complaint<'e, E>(executor: E, id: &str) -> Result<Complaint>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Complaint>(&format!(
        "SELECT {} FROM complaints WHERE id = $1 AND deleted_at IS NULL FOR UPDATE",
        COMPLAINT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(executor)
    .await
    .map_err(|e| AppError::from_db(e, "lock complaint"))?
    .ok_or_else(|| not_found(id))
}

pub fn is_owner(complaint: &Complaint, caller: &AuthenticatedUser) -> bool {
    caller.is_user() && complaint.user_id == caller.id
}

/// Private complaints are readable by their owner and by admins only
pub fn ensure_visible(complaint: &Complaint, caller: &AuthenticatedUser) -> Result<()> {
    if complaint.is_public() || caller.is_admin() || is_owner(complaint, caller) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "You do not have access to this complaint".to_string(),
        ))
    }
}

pub async fn find_visible<'e, E>(
    executor: E,
    id: &str,
    caller: &AuthenticatedUser,
) -> Result<Complaint>
where
    E: PgExecutor<'e>,
{
    let complaint = find_complaint(executor, id).await?;
    ensure_visible(&complaint, caller)?;
    Ok(complaint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::Role;
    use crate::features::complaints::models::{ComplaintStatus, ComplaintType};
    use chrono::{NaiveDate, Utc};

    fn complaint(complaint_type: ComplaintType) -> Complaint {
        Complaint {
            id: "C-ABCD1234".to_string(),
            user_id: 7,
            category_id: 1,
            regency_id: "1901".to_string(),
            address: "Jl. Merdeka".to_string(),
            description: "Lampu jalan mati".to_string(),
            status: ComplaintStatus::Pending,
            complaint_type,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            total_likes: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn caller(id: i64, role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            id,
            username: "caller".to_string(),
            role,
        }
    }

    #[test]
    fn test_public_complaint_is_visible_to_everyone() {
        let public = complaint(ComplaintType::Public);
        assert!(ensure_visible(&public, &caller(99, Role::User)).is_ok());
        assert!(ensure_visible(&public, &caller(99, Role::Admin)).is_ok());
    }

    #[test]
    fn test_private_complaint_visibility() {
        let private = complaint(ComplaintType::Private);
        assert!(ensure_visible(&private, &caller(7, Role::User)).is_ok());
        assert!(ensure_visible(&private, &caller(1, Role::Admin)).is_ok());
        assert!(matches!(
            ensure_visible(&private, &caller(8, Role::User)),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_admin_with_same_id_is_not_owner() {
        let private = complaint(ComplaintType::Private);
        assert!(!is_owner(&private, &caller(7, Role::Admin)));
    }
}
