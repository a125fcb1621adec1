use std::collections::HashMap;
use std::sync::Arc;

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::features::news::dtos::{NewNews, NewsChanges, NewsFilter, NewsResponseDto};
use crate::features::news::models::{News, NEWS_COLUMNS};
use crate::modules::storage::{self, FileStorage, UploadedFile, ALLOWED_MIME_TYPES};
use crate::shared::types::{LikeStatus, LikeToggleResponseDto, PaginationQuery};

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &NewsFilter) {
    if let Some(category_id) = filter.category_id {
        builder.push(" AND category_id = ").push_bind(category_id);
    }
    if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        builder
            .push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR content ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("News {} not found", id))
}

/// Service for news articles, their files and likes
pub struct NewsService {
    pool: PgPool,
    storage: Arc<dyn FileStorage>,
}

impl NewsService {
    pub fn new(pool: PgPool, storage: Arc<dyn FileStorage>) -> Self {
        Self { pool, storage }
    }

    async fn find(&self, id: i64) -> Result<News> {
        sqlx::query_as::<_, News>(&format!(
            "SELECT {} FROM news WHERE id = $1 AND deleted_at IS NULL",
            NEWS_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "get news"))?
        .ok_or_else(|| not_found(id))
    }

    async fn with_files(&self, articles: Vec<News>) -> Result<Vec<NewsResponseDto>> {
        let ids: Vec<i64> = articles.iter().map(|n| n.id).collect();
        let rows = sqlx::query_as::<_, (i64, String)>(
            "SELECT news_id, path FROM news_files WHERE news_id = ANY($1) ORDER BY id",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "list news files"))?;

        let mut paths: HashMap<i64, Vec<String>> = HashMap::new();
        for (news_id, path) in rows {
            paths.entry(news_id).or_default().push(path);
        }

        Ok(articles
            .into_iter()
            .map(|n| {
                let files = paths.remove(&n.id).unwrap_or_default();
                NewsResponseDto::new(n, files)
            })
            .collect())
    }

    async fn to_dto(&self, news: News) -> Result<NewsResponseDto> {
        self.with_files(vec![news])
            .await?
            .pop()
            .ok_or_else(|| AppError::Internal("news vanished while loading files".to_string()))
    }

    pub async fn list(
        &self,
        filter: &NewsFilter,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<NewsResponseDto>, i64)> {
        let mut count =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM news WHERE deleted_at IS NULL");
        push_filters(&mut count, filter);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "count news"))?;

        let mut select = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM news WHERE deleted_at IS NULL",
            NEWS_COLUMNS
        ));
        push_filters(&mut select, filter);
        select
            .push(" ORDER BY date DESC, created_at DESC LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let articles = select
            .build_query_as::<News>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "list news"))?;

        Ok((self.with_files(articles).await?, total))
    }

    pub async fn get(&self, id: i64) -> Result<NewsResponseDto> {
        let news = self.find(id).await?;
        self.to_dto(news).await
    }

    pub async fn create(
        &self,
        admin_id: i64,
        news: NewNews,
        files: Vec<UploadedFile>,
    ) -> Result<NewsResponseDto> {
        let paths =
            storage::store_files(self.storage.as_ref(), "news", files, ALLOWED_MIME_TYPES).await?;

        match self.insert(admin_id, &news, &paths).await {
            Ok(created) => Ok(NewsResponseDto::new(created, paths)),
            Err(e) => {
                storage::remove_files(self.storage.as_ref(), &paths).await;
                Err(e)
            }
        }
    }

    async fn insert(&self, admin_id: i64, news: &NewNews, paths: &[String]) -> Result<News> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::from_db(e, "begin news transaction"))?;

        let created = sqlx::query_as::<_, News>(&format!(
            r#"
            INSERT INTO news (admin_id, category_id, title, content, date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            NEWS_COLUMNS
        ))
        .bind(admin_id)
        .bind(news.category_id)
        .bind(&news.title)
        .bind(&news.content)
        .bind(news.date)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::from_db(e, "create news"))?;

        for path in paths {
            sqlx::query("INSERT INTO news_files (news_id, path) VALUES ($1, $2)")
                .bind(created.id)
                .bind(path)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::from_db(e, "attach news file"))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::from_db(e, "commit news"))?;

        Ok(created)
    }

    /// Apply `changes`; when `files` is non-empty it replaces the current attachments
    pub async fn update(
        &self,
        id: i64,
        changes: NewsChanges,
        files: Vec<UploadedFile>,
    ) -> Result<NewsResponseDto> {
        self.find(id).await?;

        let new_paths =
            storage::store_files(self.storage.as_ref(), "news", files, ALLOWED_MIME_TYPES).await?;

        match self.apply_update(id, &changes, &new_paths).await {
            Ok((news, replaced)) => {
                storage::remove_files(self.storage.as_ref(), &replaced).await;
                self.to_dto(news).await
            }
            Err(e) => {
                storage::remove_files(self.storage.as_ref(), &new_paths).await;
                Err(e)
            }
        }
    }

    /// Returns the updated row and the paths of attachments that were replaced
    async fn apply_update(
        &self,
        id: i64,
        changes: &NewsChanges,
        new_paths: &[String],
    ) -> Result<(News, Vec<String>)> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::from_db(e, "begin news update"))?;

        let news = sqlx::query_as::<_, News>(&format!(
            r#"
            UPDATE news
            SET category_id = COALESCE($2, category_id),
                title = COALESCE($3, title),
                content = COALESCE($4, content),
                date = COALESCE($5, date),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {}
            "#,
            NEWS_COLUMNS
        ))
        .bind(id)
        .bind(changes.category_id)
        .bind(changes.title.as_deref())
        .bind(changes.content.as_deref())
        .bind(changes.date)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::from_db(e, "update news"))?
        .ok_or_else(|| not_found(id))?;

        let mut replaced = Vec::new();
        if !new_paths.is_empty() {
            replaced = sqlx::query_scalar("DELETE FROM news_files WHERE news_id = $1 RETURNING path")
                .bind(id)
                .fetch_all(&mut *tx)
                .await
                .map_err(|e| AppError::from_db(e, "detach news files"))?;

            for path in new_paths {
                sqlx::query("INSERT INTO news_files (news_id, path) VALUES ($1, $2)")
                    .bind(id)
                    .bind(path)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| AppError::from_db(e, "attach news file"))?;
            }
        }

        tx.commit()
            .await
            .map_err(|e| AppError::from_db(e, "commit news update"))?;

        Ok((news, replaced))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::from_db(e, "begin news delete"))?;

        let result =
            sqlx::query("UPDATE news SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::from_db(e, "delete news"))?;
        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        let paths: Vec<String> =
            sqlx::query_scalar("DELETE FROM news_files WHERE news_id = $1 RETURNING path")
                .bind(id)
                .fetch_all(&mut *tx)
                .await
                .map_err(|e| AppError::from_db(e, "detach news files"))?;

        tx.commit()
            .await
            .map_err(|e| AppError::from_db(e, "commit news delete"))?;

        storage::remove_files(self.storage.as_ref(), &paths).await;
        Ok(())
    }

    /// Like the article, or remove the caller's existing like
    pub async fn toggle_like(&self, id: i64, user_id: i64) -> Result<LikeToggleResponseDto> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::from_db(e, "begin news like toggle"))?;

        let exists: Option<i64> =
            sqlx::query_scalar("SELECT id FROM news WHERE id = $1 AND deleted_at IS NULL FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| AppError::from_db(e, "lock news"))?;
        if exists.is_none() {
            return Err(not_found(id));
        }

        let removed = sqlx::query("DELETE FROM news_likes WHERE news_id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::from_db(e, "remove news like"))?
            .rows_affected();

        let (status, delta) = if removed > 0 {
            (LikeStatus::Unliked, -1)
        } else {
            sqlx::query("INSERT INTO news_likes (news_id, user_id) VALUES ($1, $2)")
                .bind(id)
                .bind(user_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::from_db(e, "like news"))?;
            (LikeStatus::Liked, 1)
        };

        let total_likes: i32 = sqlx::query_scalar(
            "UPDATE news SET total_likes = GREATEST(total_likes + $2, 0) WHERE id = $1 RETURNING total_likes",
        )
        .bind(id)
        .bind(delta)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::from_db(e, "update news likes"))?;

        tx.commit()
            .await
            .map_err(|e| AppError::from_db(e, "commit news like toggle"))?;

        Ok(LikeToggleResponseDto {
            status,
            total_likes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{
        insert_test_admin, insert_test_user, seeded_category_id, NoopStorage,
    };
    use chrono::NaiveDate;

    #[test]
    fn test_news_filters() {
        let filter = NewsFilter {
            search: Some("banjir".to_string()),
            category_id: Some(2),
        };
        let mut builder = QueryBuilder::<Postgres>::new("SELECT 1 FROM news WHERE TRUE");
        push_filters(&mut builder, &filter);

        assert!(builder.sql().contains("category_id = $1"));
        assert!(builder.sql().contains("title ILIKE $2 OR content ILIKE $3"));
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let filter = NewsFilter {
            search: Some("   ".to_string()),
            category_id: None,
        };
        let mut builder = QueryBuilder::<Postgres>::new("SELECT 1 FROM news WHERE TRUE");
        push_filters(&mut builder, &filter);

        assert_eq!(builder.sql(), "SELECT 1 FROM news WHERE TRUE");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_news_like_toggle_alternates(pool: PgPool) {
        let admin_id = insert_test_admin(&pool, "redaksi").await;
        let reader_id = insert_test_user(&pool, "pembaca").await;
        let category_id = seeded_category_id(&pool).await;
        let service = NewsService::new(pool, Arc::new(NoopStorage));

        let news = service
            .create(
                admin_id,
                NewNews {
                    category_id,
                    title: "Perbaikan jalan Koba".to_string(),
                    content: "Jalan di Koba sudah diaspal ulang.".to_string(),
                    date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                },
                vec![],
            )
            .await
            .unwrap();
        assert_eq!(news.total_likes, 0);

        let first = service.toggle_like(news.id, reader_id).await.unwrap();
        assert_eq!(first.status, LikeStatus::Liked);
        assert_eq!(first.total_likes, 1);

        let second = service.toggle_like(news.id, reader_id).await.unwrap();
        assert_eq!(second.status, LikeStatus::Unliked);
        assert_eq!(second.total_likes, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_like_on_missing_news_is_not_found(pool: PgPool) {
        let reader_id = insert_test_user(&pool, "pembaca_hilang").await;
        let service = NewsService::new(pool, Arc::new(NoopStorage));

        let result = service.toggle_like(4242, reader_id).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
