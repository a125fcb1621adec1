use std::collections::HashMap;
use std::sync::Arc;

use rand::Rng;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::complaints::dtos::{
    ActivityQuery, ComplaintActivityDto, ComplaintFilter, ComplaintResponseDto, NewComplaint,
    UpdateComplaintDto,
};
use crate::features::complaints::models::{
    ActivityType, Complaint, ComplaintActivity, ComplaintStatus, COMPLAINT_COLUMNS,
};
use crate::features::complaints::services::access::{
    ensure_visible, find_complaint, find_visible, is_owner, lock_complaint,
};
use crate::modules::storage::{self, FileStorage, UploadedFile, ALLOWED_MIME_TYPES};
use crate::shared::types::{LikeStatus, LikeToggleResponseDto, PaginationQuery};

const COMPLAINT_ID_PREFIX: &str = "C-";
const COMPLAINT_ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const COMPLAINT_ID_LENGTH: usize = 8;
const MAX_ID_ATTEMPTS: usize = 5;

/// `C-` followed by 8 uppercase alphanumerics
pub fn generate_complaint_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..COMPLAINT_ID_LENGTH)
        .map(|_| COMPLAINT_ID_CHARSET[rng.gen_range(0..COMPLAINT_ID_CHARSET.len())] as char)
        .collect();
    format!("{}{}", COMPLAINT_ID_PREFIX, suffix)
}

/// Which complaints a listing may return
#[derive(Debug, Clone, Copy)]
enum Scope {
    All,
    /// Public complaints plus the user's own
    VisibleTo(i64),
    OwnedBy(i64),
}

impl Scope {
    fn for_caller(caller: &AuthenticatedUser) -> Self {
        if caller.is_admin() {
            Scope::All
        } else {
            Scope::VisibleTo(caller.id)
        }
    }
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &ComplaintFilter, scope: Scope) {
    match scope {
        Scope::All => {}
        Scope::VisibleTo(user_id) => {
            builder
                .push(" AND (type = 'public' OR user_id = ")
                .push_bind(user_id)
                .push(")");
        }
        Scope::OwnedBy(user_id) => {
            builder.push(" AND user_id = ").push_bind(user_id);
        }
    }

    if let Some(status) = filter.status {
        builder.push(" AND status = ").push_bind(status);
    }
    if let Some(complaint_type) = filter.complaint_type {
        builder.push(" AND type = ").push_bind(complaint_type);
    }
    if let Some(category_id) = filter.category_id {
        builder.push(" AND category_id = ").push_bind(category_id);
    }
    if let Some(regency_id) = filter.regency_id.as_deref().filter(|r| !r.is_empty()) {
        builder.push(" AND regency_id = ").push_bind(regency_id.to_string());
    }
    if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        builder
            .push(" AND (description ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR address ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

fn push_activity_filter(builder: &mut QueryBuilder<'_, Postgres>, query: &ActivityQuery) {
    match query.activity_type {
        Some(ActivityType::Like) => {
            builder.push(" AND a.like_id IS NOT NULL");
        }
        Some(ActivityType::Discussion) => {
            builder.push(" AND a.discussion_id IS NOT NULL");
        }
        None => {}
    }
}

const ACTIVITY_FROM: &str = r#"
    FROM complaint_activities a
    JOIN complaints c ON c.id = a.complaint_id AND c.deleted_at IS NULL
    LEFT JOIN complaint_likes l ON l.id = a.like_id
    LEFT JOIN users lu ON lu.id = l.user_id
    LEFT JOIN discussions d ON d.id = a.discussion_id
    LEFT JOIN users du ON du.id = d.user_id
    LEFT JOIN admins da ON da.id = d.admin_id
    WHERE (d.id IS NULL OR d.deleted_at IS NULL) AND c.user_id = "#;

/// Service for complaints, their files, likes and activity feed
pub struct ComplaintService {
    pool: PgPool,
    storage: Arc<dyn FileStorage>,
}

impl ComplaintService {
    pub fn new(pool: PgPool, storage: Arc<dyn FileStorage>) -> Self {
        Self { pool, storage }
    }

    async fn file_paths(&self, ids: &[String]) -> Result<HashMap<String, Vec<String>>> {
        let rows = sqlx::query_as::<_, (String, String)>(
            "SELECT complaint_id, path FROM complaint_files WHERE complaint_id = ANY($1) ORDER BY id",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "list complaint files"))?;

        let mut paths: HashMap<String, Vec<String>> = HashMap::new();
        for (complaint_id, path) in rows {
            paths.entry(complaint_id).or_default().push(path);
        }
        Ok(paths)
    }

    async fn with_files(&self, complaints: Vec<Complaint>) -> Result<Vec<ComplaintResponseDto>> {
        let ids: Vec<String> = complaints.iter().map(|c| c.id.clone()).collect();
        let mut paths = self.file_paths(&ids).await?;

        Ok(complaints
            .into_iter()
            .map(|c| {
                let files = paths.remove(&c.id).unwrap_or_default();
                ComplaintResponseDto::new(c, files)
            })
            .collect())
    }

    async fn to_dto(&self, complaint: Complaint) -> Result<ComplaintResponseDto> {
        let mut dtos = self.with_files(vec![complaint]).await?;
        dtos.pop()
            .ok_or_else(|| AppError::Internal("complaint vanished while loading files".to_string()))
    }

    /// File a new complaint. Files are validated and stored before the row is
    /// written and removed again if the insert fails.
    pub async fn create(
        &self,
        user_id: i64,
        complaint: NewComplaint,
        files: Vec<UploadedFile>,
    ) -> Result<ComplaintResponseDto> {
        let paths =
            storage::store_files(self.storage.as_ref(), "complaints", files, ALLOWED_MIME_TYPES)
                .await?;

        match self.insert(user_id, &complaint, &paths).await {
            Ok(created) => {
                tracing::info!("Complaint {} filed by user {}", created.id, user_id);
                Ok(ComplaintResponseDto::new(created, paths))
            }
            Err(e) => {
                storage::remove_files(self.storage.as_ref(), &paths).await;
                Err(e)
            }
        }
    }

    async fn insert(
        &self,
        user_id: i64,
        complaint: &NewComplaint,
        paths: &[String],
    ) -> Result<Complaint> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::from_db(e, "begin complaint transaction"))?;

        let created = insert_with_fresh_id(&mut tx, user_id, complaint).await?;

        for path in paths {
            sqlx::query("INSERT INTO complaint_files (complaint_id, path) VALUES ($1, $2)")
                .bind(&created.id)
                .bind(path)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::from_db(e, "attach complaint file"))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::from_db(e, "commit complaint"))?;

        Ok(created)
    }

    pub async fn list(
        &self,
        caller: &AuthenticatedUser,
        filter: &ComplaintFilter,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<ComplaintResponseDto>, i64)> {
        self.list_scoped(Scope::for_caller(caller), filter, pagination)
            .await
    }

    /// Complaints filed by `user_id`, private ones included
    pub async fn list_own(
        &self,
        user_id: i64,
        filter: &ComplaintFilter,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<ComplaintResponseDto>, i64)> {
        self.list_scoped(Scope::OwnedBy(user_id), filter, pagination)
            .await
    }

    async fn list_scoped(
        &self,
        scope: Scope,
        filter: &ComplaintFilter,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<ComplaintResponseDto>, i64)> {
        let mut count = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM complaints WHERE deleted_at IS NULL",
        );
        push_filters(&mut count, filter, scope);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "count complaints"))?;

        let mut select = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM complaints WHERE deleted_at IS NULL",
            COMPLAINT_COLUMNS
        ));
        push_filters(&mut select, filter, scope);
        select
            .push(format!(
                " ORDER BY {} {}, id ASC LIMIT ",
                filter.sort_by.column(),
                filter.sort.as_sql()
            ))
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let complaints = select
            .build_query_as::<Complaint>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "list complaints"))?;

        Ok((self.with_files(complaints).await?, total))
    }

    pub async fn get(&self, id: &str, caller: &AuthenticatedUser) -> Result<ComplaintResponseDto> {
        let complaint = find_visible(&self.pool, id, caller).await?;
        self.to_dto(complaint).await
    }

    pub async fn update(
        &self,
        id: &str,
        user_id: i64,
        dto: UpdateComplaintDto,
    ) -> Result<ComplaintResponseDto> {
        let complaint = find_complaint(&self.pool, id).await?;
        if complaint.user_id != user_id {
            return Err(AppError::Forbidden(
                "Only the owner can edit this complaint".to_string(),
            ));
        }
        ensure_pending(&complaint)?;

        let updated = sqlx::query_as::<_, Complaint>(&format!(
            r#"
            UPDATE complaints
            SET category_id = COALESCE($2, category_id),
                regency_id = COALESCE($3, regency_id),
                address = COALESCE($4, address),
                description = COALESCE($5, description),
                type = COALESCE($6, type),
                date = COALESCE($7, date),
                updated_at = NOW()
            WHERE id = $1 AND status = 'Pending' AND deleted_at IS NULL
            RETURNING {}
            "#,
            COMPLAINT_COLUMNS
        ))
        .bind(id)
        .bind(dto.category_id)
        .bind(dto.regency_id.as_deref().map(str::trim))
        .bind(dto.address.as_deref().map(str::trim))
        .bind(dto.description.as_deref().map(str::trim))
        .bind(dto.complaint_type)
        .bind(dto.date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "update complaint"))?
        .ok_or_else(|| {
            AppError::BadRequest("Complaint can only be changed while Pending".to_string())
        })?;

        self.to_dto(updated).await
    }

    /// Owners may delete while `Pending`; admins may delete at any time
    pub async fn delete(&self, id: &str, caller: &AuthenticatedUser) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::from_db(e, "begin complaint delete"))?;

        let complaint = lock_complaint(&mut *tx, id).await?;
        if !caller.is_admin() {
            if !is_owner(&complaint, caller) {
                return Err(AppError::Forbidden(
                    "Only the owner or an admin can delete this complaint".to_string(),
                ));
            }
            ensure_pending(&complaint)?;
        }

        let paths: Vec<String> = sqlx::query_scalar(
            "DELETE FROM complaint_files WHERE complaint_id = $1 RETURNING path",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| AppError::from_db(e, "detach complaint files"))?;

        sqlx::query("UPDATE complaints SET deleted_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::from_db(e, "delete complaint"))?;

        tx.commit()
            .await
            .map_err(|e| AppError::from_db(e, "commit complaint delete"))?;

        storage::remove_files(self.storage.as_ref(), &paths).await;
        tracing::info!("Complaint {} deleted by {} {}", id, caller.role, caller.id);
        Ok(())
    }

    /// Like the complaint, or remove the caller's existing like
    pub async fn toggle_like(
        &self,
        id: &str,
        caller: &AuthenticatedUser,
    ) -> Result<LikeToggleResponseDto> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::from_db(e, "begin like toggle"))?;

        let complaint = lock_complaint(&mut *tx, id).await?;
        ensure_visible(&complaint, caller)?;

        let removed: Option<i64> = sqlx::query_scalar(
            "DELETE FROM complaint_likes WHERE complaint_id = $1 AND user_id = $2 RETURNING id",
        )
        .bind(id)
        .bind(caller.id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::from_db(e, "remove complaint like"))?;

        let (status, delta) = match removed {
            Some(_) => (LikeStatus::Unliked, -1),
            None => {
                let like_id: i64 = sqlx::query_scalar(
                    "INSERT INTO complaint_likes (complaint_id, user_id) VALUES ($1, $2) RETURNING id",
                )
                .bind(id)
                .bind(caller.id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| AppError::from_db(e, "like complaint"))?;

                sqlx::query("INSERT INTO complaint_activities (complaint_id, like_id) VALUES ($1, $2)")
                    .bind(id)
                    .bind(like_id)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| AppError::from_db(e, "record like activity"))?;

                (LikeStatus::Liked, 1)
            }
        };

        let total_likes: i32 = sqlx::query_scalar(
            "UPDATE complaints SET total_likes = GREATEST(total_likes + $2, 0) WHERE id = $1 RETURNING total_likes",
        )
        .bind(id)
        .bind(delta)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::from_db(e, "update complaint likes"))?;

        tx.commit()
            .await
            .map_err(|e| AppError::from_db(e, "commit like toggle"))?;

        Ok(LikeToggleResponseDto {
            status,
            total_likes,
        })
    }

    /// Likes and discussions on complaints owned by `user_id`, newest first
    pub async fn list_activities(
        &self,
        user_id: i64,
        query: &ActivityQuery,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<ComplaintActivityDto>, i64)> {
        let mut count = QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) {}", ACTIVITY_FROM));
        count.push_bind(user_id);
        push_activity_filter(&mut count, query);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "count complaint activities"))?;

        let mut select = QueryBuilder::<Postgres>::new(format!(
            r#"
            SELECT a.id, a.complaint_id, a.like_id, a.discussion_id,
                   COALESCE(lu.name, du.name, da.name) AS actor_name,
                   d.comment, a.created_at
            {}"#,
            ACTIVITY_FROM
        ));
        select.push_bind(user_id);
        push_activity_filter(&mut select, query);
        select
            .push(" ORDER BY a.created_at DESC, a.id DESC LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let activities = select
            .build_query_as::<ComplaintActivity>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "list complaint activities"))?;

        Ok((activities.into_iter().map(Into::into).collect(), total))
    }
}

fn ensure_pending(complaint: &Complaint) -> Result<()> {
    if complaint.status == ComplaintStatus::Pending {
        Ok(())
    } else {
        Err(AppError::BadRequest(
            "Complaint can only be changed while Pending".to_string(),
        ))
    }
}

/// Insert with a random id, drawing a new one when it collides
async fn insert_with_fresh_id(
    conn: &mut PgConnection,
    user_id: i64,
    complaint: &NewComplaint,
) -> Result<Complaint> {
    for _ in 0..MAX_ID_ATTEMPTS {
        let id = generate_complaint_id();
        let inserted = sqlx::query_as::<_, Complaint>(&format!(
            r#"
            INSERT INTO complaints (id, user_id, category_id, regency_id, address, description, type, date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO NOTHING
            RETURNING {}
            "#,
            COMPLAINT_COLUMNS
        ))
        .bind(&id)
        .bind(user_id)
        .bind(complaint.category_id)
        .bind(&complaint.regency_id)
        .bind(&complaint.address)
        .bind(&complaint.description)
        .bind(complaint.complaint_type)
        .bind(complaint.date)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::from_db(e, "create complaint"))?;

        if let Some(created) = inserted {
            return Ok(created);
        }
        tracing::warn!("Complaint id {} already taken, retrying", id);
    }

    Err(AppError::Internal(
        "Could not allocate a unique complaint id".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::Role;
    use crate::features::complaints::models::ComplaintType;
    use crate::shared::test_helpers::{
        caller, insert_test_user, seeded_category_id, NoopStorage,
    };
    use chrono::NaiveDate;

    #[test]
    fn test_generated_id_format() {
        for _ in 0..50 {
            let id = generate_complaint_id();
            assert!(id.starts_with("C-"));
            assert_eq!(id.len(), 10);
            assert!(id[2..]
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_scope_for_caller() {
        let admin = crate::shared::test_helpers::create_test_user(
            crate::features::auth::model::Role::Admin,
        );
        let user = crate::shared::test_helpers::create_test_user(
            crate::features::auth::model::Role::User,
        );
        assert!(matches!(Scope::for_caller(&admin), Scope::All));
        assert!(matches!(Scope::for_caller(&user), Scope::VisibleTo(1)));
    }

    #[test]
    fn test_filters_bind_values() {
        let filter = ComplaintFilter {
            status: Some(ComplaintStatus::Verifikasi),
            search: Some("jalan".to_string()),
            ..Default::default()
        };
        let mut builder = QueryBuilder::<Postgres>::new("SELECT 1 FROM complaints WHERE TRUE");
        push_filters(&mut builder, &filter, Scope::VisibleTo(3));
        let sql = builder.sql();

        assert!(sql.contains("(type = 'public' OR user_id = $1)"));
        assert!(sql.contains("status = $2"));
        assert!(sql.contains("description ILIKE $3 OR address ILIKE $4"));
    }

    fn new_complaint(category_id: i64) -> NewComplaint {
        NewComplaint {
            category_id,
            regency_id: "1901".to_string(),
            address: "Jl. Merdeka No. 5, Sungailiat".to_string(),
            description: "Lampu jalan padam sejak seminggu".to_string(),
            complaint_type: ComplaintType::Public,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        }
    }

    fn service(pool: PgPool) -> ComplaintService {
        ComplaintService::new(pool, Arc::new(NoopStorage))
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_created_complaint_starts_pending(pool: PgPool) {
        let user_id = insert_test_user(&pool, "warga_baru").await;
        let category_id = seeded_category_id(&pool).await;
        let service = service(pool);

        let created = service
            .create(user_id, new_complaint(category_id), vec![])
            .await
            .unwrap();

        assert!(created.id.starts_with("C-"));
        assert_eq!(created.status, ComplaintStatus::Pending);
        assert_eq!(created.total_likes, 0);

        let stored = service
            .get(&created.id, &caller(user_id, Role::User))
            .await
            .unwrap();
        assert_eq!(stored.status, ComplaintStatus::Pending);
        assert_eq!(stored.total_likes, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_unknown_regency_is_not_found(pool: PgPool) {
        let user_id = insert_test_user(&pool, "warga_salah").await;
        let category_id = seeded_category_id(&pool).await;
        let mut complaint = new_complaint(category_id);
        complaint.regency_id = "9999".to_string();

        let result = service(pool).create(user_id, complaint, vec![]).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_like_toggle_alternates(pool: PgPool) {
        let owner_id = insert_test_user(&pool, "pelapor").await;
        let liker_id = insert_test_user(&pool, "pendukung").await;
        let category_id = seeded_category_id(&pool).await;
        let service = service(pool.clone());
        let complaint = service
            .create(owner_id, new_complaint(category_id), vec![])
            .await
            .unwrap();
        let liker = caller(liker_id, Role::User);

        let first = service.toggle_like(&complaint.id, &liker).await.unwrap();
        assert_eq!(first.status, LikeStatus::Liked);
        assert_eq!(first.total_likes, 1);

        let activities: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM complaint_activities WHERE complaint_id = $1")
                .bind(&complaint.id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(activities, 1);

        let second = service.toggle_like(&complaint.id, &liker).await.unwrap();
        assert_eq!(second.status, LikeStatus::Unliked);
        assert_eq!(second.total_likes, 0);

        let activities: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM complaint_activities WHERE complaint_id = $1")
                .bind(&complaint.id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(activities, 0);
    }
}
