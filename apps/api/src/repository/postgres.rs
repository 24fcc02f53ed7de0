use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::resume::{ResumeInput, ResumeRecord, ResumeRow};
use crate::repository::ResumeRepository;

/// PostgreSQL-backed store over the `resumes` table (see `db::ensure_schema`).
#[derive(Clone)]
pub struct PgResumeRepository {
    pool: PgPool,
}

impl PgResumeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeRepository for PgResumeRepository {
    async fn get(&self, id: &str) -> Result<Option<ResumeRecord>, AppError> {
        let row = sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(ResumeRecord::from))
    }

    async fn put(&self, record: ResumeRecord) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO resumes (
                id, full_name, email, phone, linkedin, address, summary,
                education, experience, projects, skills, template_type,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ON CONFLICT (id) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                email = EXCLUDED.email,
                phone = EXCLUDED.phone,
                linkedin = EXCLUDED.linkedin,
                address = EXCLUDED.address,
                summary = EXCLUDED.summary,
                education = EXCLUDED.education,
                experience = EXCLUDED.experience,
                projects = EXCLUDED.projects,
                skills = EXCLUDED.skills,
                template_type = EXCLUDED.template_type,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&record.id)
        .bind(&record.full_name)
        .bind(&record.email)
        .bind(&record.phone)
        .bind(&record.linkedin)
        .bind(&record.address)
        .bind(&record.summary)
        .bind(&record.education)
        .bind(&record.experience)
        .bind(&record.projects)
        .bind(&record.skills)
        .bind(record.template_type.as_str())
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(
        &self,
        id: &str,
        input: ResumeInput,
    ) -> Result<Option<ResumeRecord>, AppError> {
        // Single statement, so concurrent patches to different columns both land.
        let row = sqlx::query_as::<_, ResumeRow>(
            r#"
            UPDATE resumes SET
                full_name = COALESCE($2, full_name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                linkedin = COALESCE($5, linkedin),
                address = COALESCE($6, address),
                summary = COALESCE($7, summary),
                education = COALESCE($8, education),
                experience = COALESCE($9, experience),
                projects = COALESCE($10, projects),
                skills = COALESCE($11, skills),
                template_type = COALESCE($12, template_type),
                updated_at = $13
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.full_name)
        .bind(input.email)
        .bind(input.phone)
        .bind(input.linkedin)
        .bind(input.address)
        .bind(input.summary)
        .bind(input.education)
        .bind(input.experience)
        .bind(input.projects)
        .bind(input.skills)
        .bind(input.template_type.map(|t| t.as_str()))
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(ResumeRecord::from))
    }

    async fn list(&self) -> Result<Vec<ResumeRecord>, AppError> {
        let rows = sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(ResumeRecord::from).collect())
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
