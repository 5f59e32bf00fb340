use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::resume::{NewResume, ResumePatch, ResumeRow};
use crate::store::{Mutation, ResumeStore, StoreError};

/// `ResumeStore` backed by Postgres. Update and delete are qualified by both
/// id and owner in the statement itself, so ownership cannot race with the
/// write. The follow-up existence probe after a zero-row mutation is
/// read-only and only classifies the failure.
pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: Uuid) -> Result<bool, StoreError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM resumes WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn create(&self, record: NewResume) -> Result<ResumeRow, StoreError> {
        let row = sqlx::query_as::<_, ResumeRow>(
            "INSERT INTO resumes \
             (user_id, name, email, summary, education, experience, skills, custom_sections, template_ref) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING *",
        )
        .bind(record.user_id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.summary)
        .bind(Json(&record.education))
        .bind(Json(&record.experience))
        .bind(Json(&record.skills))
        .bind(Json(&record.custom_sections))
        .bind(&record.template_ref)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn get(&self, id: Uuid) -> Result<Option<ResumeRow>, StoreError> {
        let row = sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<ResumeRow>, StoreError> {
        let rows = sqlx::query_as::<_, ResumeRow>(
            "SELECT * FROM resumes WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update(
        &self,
        id: Uuid,
        owner: Uuid,
        patch: ResumePatch,
    ) -> Result<Mutation<ResumeRow>, StoreError> {
        let row = sqlx::query_as::<_, ResumeRow>(
            "UPDATE resumes SET \
               name = COALESCE($3, name), \
               email = COALESCE($4, email), \
               summary = COALESCE($5, summary), \
               education = COALESCE($6, education), \
               experience = COALESCE($7, experience), \
               skills = COALESCE($8, skills), \
               custom_sections = COALESCE($9, custom_sections), \
               template_ref = COALESCE($10, template_ref) \
             WHERE id = $1 AND user_id = $2 \
             RETURNING *",
        )
        .bind(id)
        .bind(owner)
        .bind(patch.name)
        .bind(patch.email)
        .bind(patch.summary)
        .bind(patch.education.map(Json))
        .bind(patch.experience.map(Json))
        .bind(patch.skills.map(Json))
        .bind(patch.custom_sections.map(Json))
        .bind(patch.template_ref)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            return Ok(Mutation::Applied(row));
        }
        if self.exists(id).await? {
            Ok(Mutation::NotOwner)
        } else {
            Ok(Mutation::NotFound)
        }
    }

    async fn delete(&self, id: Uuid, owner: Uuid) -> Result<Mutation<()>, StoreError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            return Ok(Mutation::Applied(()));
        }
        if self.exists(id).await? {
            Ok(Mutation::NotOwner)
        } else {
            Ok(Mutation::NotFound)
        }
    }
}
