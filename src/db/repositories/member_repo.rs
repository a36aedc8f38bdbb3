//! Member repository

use async_trait::async_trait;
use roster_spec::{Clause, Specification};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::MemberRepository;
use crate::db::filter::{push_clause, push_order_by, push_page};
use crate::error::AppResult;
use crate::models::{Auditor, Member, MemberDto, Page, PageRequest, MEMBER_SCHEMA};

/// PostgreSQL-backed member repository
#[derive(Debug, Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
    auditor: Auditor,
}

impl PgMemberRepository {
    pub fn new(pool: PgPool, auditor: Auditor) -> Self {
        Self { pool, auditor }
    }

    /// Compile `spec` and reject unknown sort properties up front
    fn prepare(spec: &Specification, page: &PageRequest) -> AppResult<Clause> {
        let clause = spec.compile(&MEMBER_SCHEMA)?;
        page.sort.validate(&MEMBER_SCHEMA)?;
        Ok(clause)
    }

    async fn count_matching(&self, clause: &Clause) -> AppResult<u64> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM members m WHERE ");
        push_clause(&mut qb, clause, "m");

        let total: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(u64::try_from(total).unwrap_or_default())
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    async fn save(&self, member: Member) -> AppResult<Member> {
        let auditor = self.auditor.current();
        let saved = sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (
                id, username, age, team_id,
                created_date, last_modified_date, created_by, last_modified_by
            )
            VALUES ($1, $2, $3, $4, NOW(), NOW(), $5, $5)
            ON CONFLICT (id) DO UPDATE SET
                username = EXCLUDED.username,
                age = EXCLUDED.age,
                team_id = EXCLUDED.team_id,
                last_modified_date = NOW(),
                last_modified_by = EXCLUDED.last_modified_by
            RETURNING *
            "#,
        )
        .bind(member.id)
        .bind(&member.username)
        .bind(member.age)
        .bind(member.team_id)
        .bind(auditor)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(member_id = %saved.id, "Saved member");
        Ok(saved)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Member>> {
        let member = sqlx::query_as::<_, Member>(r#"SELECT * FROM members WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(member)
    }

    async fn find_all(&self) -> AppResult<Vec<Member>> {
        let members =
            sqlx::query_as::<_, Member>(r#"SELECT * FROM members ORDER BY created_date, id"#)
                .fetch_all(&self.pool)
                .await?;

        Ok(members)
    }

    async fn find_all_matching(&self, spec: &Specification) -> AppResult<Vec<Member>> {
        let clause = spec.compile(&MEMBER_SCHEMA)?;

        let mut qb = QueryBuilder::<Postgres>::new("SELECT m.* FROM members m WHERE ");
        push_clause(&mut qb, &clause, "m");
        qb.push(" ORDER BY m.created_date, m.id");

        let members = qb.build_query_as::<Member>().fetch_all(&self.pool).await?;
        Ok(members)
    }

    async fn find_page(&self, spec: &Specification, page: &PageRequest) -> AppResult<Page<Member>> {
        let clause = Self::prepare(spec, page)?;

        let mut qb = QueryBuilder::<Postgres>::new("SELECT m.* FROM members m WHERE ");
        push_clause(&mut qb, &clause, "m");
        push_order_by(&mut qb, &page.sort, &MEMBER_SCHEMA, "m")?;
        push_page(&mut qb, page.offset(), page.limit());

        let members = qb.build_query_as::<Member>().fetch_all(&self.pool).await?;
        let total = self.count_matching(&clause).await?;

        Ok(Page::new(members, page, total))
    }

    async fn find_dto_page(
        &self,
        spec: &Specification,
        page: &PageRequest,
    ) -> AppResult<Page<MemberDto>> {
        let clause = Self::prepare(spec, page)?;

        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT m.id, m.username, t.name AS team_name
            FROM members m
            LEFT JOIN teams t ON t.id = m.team_id
            WHERE "#,
        );
        push_clause(&mut qb, &clause, "m");
        push_order_by(&mut qb, &page.sort, &MEMBER_SCHEMA, "m")?;
        push_page(&mut qb, page.offset(), page.limit());

        let content = qb.build_query_as::<MemberDto>().fetch_all(&self.pool).await?;
        let total = self.count_matching(&clause).await?;

        Ok(Page::new(content, page, total))
    }

    async fn count(&self) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM members"#)
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(total).unwrap_or_default())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM members WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn bulk_age_plus(&self, age: i32) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE members
            SET age = age + 1, last_modified_date = NOW(), last_modified_by = $2
            WHERE age >= $1
            "#,
        )
        .bind(age)
        .bind(self.auditor.current())
        .execute(&self.pool)
        .await?;

        tracing::info!(age, updated = result.rows_affected(), "Bulk age increment");
        Ok(result.rows_affected())
    }
}
