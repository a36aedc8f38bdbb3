//! Team repository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::TeamRepository;
use crate::error::AppResult;
use crate::models::{Auditor, Team};

/// PostgreSQL-backed team repository
#[derive(Debug, Clone)]
pub struct PgTeamRepository {
    pool: PgPool,
    auditor: Auditor,
}

impl PgTeamRepository {
    pub fn new(pool: PgPool, auditor: Auditor) -> Self {
        Self { pool, auditor }
    }
}

#[async_trait]
impl TeamRepository for PgTeamRepository {
    async fn save(&self, team: Team) -> AppResult<Team> {
        let saved = sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO teams (
                id, name, created_date, last_modified_date, created_by, last_modified_by
            )
            VALUES ($1, $2, NOW(), NOW(), $3, $3)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                last_modified_date = NOW(),
                last_modified_by = EXCLUDED.last_modified_by
            RETURNING *
            "#,
        )
        .bind(team.id)
        .bind(&team.name)
        .bind(self.auditor.current())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(team_id = %saved.id, "Saved team");
        Ok(saved)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Team>> {
        let team = sqlx::query_as::<_, Team>(r#"SELECT * FROM teams WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(team)
    }

    async fn find_all(&self) -> AppResult<Vec<Team>> {
        let teams = sqlx::query_as::<_, Team>(r#"SELECT * FROM teams ORDER BY created_date, id"#)
            .fetch_all(&self.pool)
            .await?;

        Ok(teams)
    }

    async fn count(&self) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM teams"#)
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(total).unwrap_or_default())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        // members.team_id is ON DELETE SET NULL
        let result = sqlx::query(r#"DELETE FROM teams WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
