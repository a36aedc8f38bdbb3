//! Database repositories
//!
//! Repositories handle all persistence. Each aggregate has a trait with a
//! PostgreSQL implementation and an in-memory one sharing the same
//! specification semantics.

pub mod member_repo;
pub mod memory;
pub mod team_repo;

use async_trait::async_trait;
use roster_spec::Specification;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Member, MemberDto, Page, PageRequest, Team};

pub use member_repo::PgMemberRepository;
pub use memory::MemoryStore;
pub use team_repo::PgTeamRepository;

/// Persistence operations for members
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Insert or update by id, stamping the audit fields
    async fn save(&self, member: Member) -> AppResult<Member>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Member>>;

    /// All members in repository order
    async fn find_all(&self) -> AppResult<Vec<Member>>;

    /// Members satisfying `spec`
    async fn find_all_matching(&self, spec: &Specification) -> AppResult<Vec<Member>>;

    /// One page of members satisfying `spec`
    async fn find_page(&self, spec: &Specification, page: &PageRequest) -> AppResult<Page<Member>>;

    /// One page of member projections, each with its team name
    async fn find_dto_page(
        &self,
        spec: &Specification,
        page: &PageRequest,
    ) -> AppResult<Page<MemberDto>>;

    async fn count(&self) -> AppResult<u64>;

    /// Returns whether a member was removed
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Add one year to every member aged `age` or older; returns rows changed
    async fn bulk_age_plus(&self, age: i32) -> AppResult<u64>;
}

/// Persistence operations for teams
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Insert or update by id, stamping the audit fields
    async fn save(&self, team: Team) -> AppResult<Team>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Team>>;

    async fn find_all(&self) -> AppResult<Vec<Team>>;

    async fn count(&self) -> AppResult<u64>;

    /// Remove a team; its members are kept without a team
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}
