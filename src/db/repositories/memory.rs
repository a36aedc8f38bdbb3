//! In-memory repository
//!
//! Backs both repository traits with two vectors kept in insertion order.
//! Specifications are evaluated directly against the stored entities, with
//! the team list acting as the join context.
//!
//! Locks are always taken members first, then teams.

use async_trait::async_trait;
use chrono::Utc;
use roster_spec::{SliceContext, Specification};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{MemberRepository, TeamRepository};
use crate::error::{AppError, AppResult};
use crate::models::{Auditor, Member, MemberDto, Page, PageRequest, Team, MEMBER_SCHEMA};

/// Member and team storage held in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    members: RwLock<Vec<Member>>,
    teams: RwLock<Vec<Team>>,
    auditor: Auditor,
}

impl MemoryStore {
    pub fn new(auditor: Auditor) -> Self {
        Self {
            members: RwLock::new(Vec::new()),
            teams: RwLock::new(Vec::new()),
            auditor,
        }
    }
}

/// Members matching `spec`, sorted and cut to the requested page, plus the
/// total number of matches
fn select_page<'a>(
    members: &'a [Member],
    teams: &[Team],
    spec: &Specification,
    page: &PageRequest,
) -> AppResult<(Vec<&'a Member>, u64)> {
    page.sort.validate(&MEMBER_SCHEMA)?;

    let mut matched = spec.filter(&MEMBER_SCHEMA, members, &SliceContext::new(teams))?;
    if !page.sort.is_unsorted() {
        matched.sort_by(|a, b| page.sort.compare(*a, *b).then_with(|| a.id.cmp(&b.id)));
    }

    let total = matched.len() as u64;
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
    let content = matched.into_iter().skip(offset).take(limit).collect();

    Ok((content, total))
}

fn team_of<'a>(member: &Member, teams: &'a [Team]) -> Option<&'a Team> {
    let team_id = member.team_id?;
    teams.iter().find(|team| team.id == team_id)
}

#[async_trait]
impl MemberRepository for MemoryStore {
    async fn save(&self, member: Member) -> AppResult<Member> {
        let mut members = self.members.write().await;

        if let Some(team_id) = member.team_id {
            let teams = self.teams.read().await;
            if !teams.iter().any(|team| team.id == team_id) {
                return Err(AppError::InvalidInput(
                    "Referenced resource does not exist".to_string(),
                ));
            }
        }

        let now = Utc::now();
        let mut saved = member;
        match members.iter().position(|existing| existing.id == saved.id) {
            Some(index) => {
                saved.audit = members[index].audit.clone();
                saved.audit.on_update(&self.auditor, now);
                members[index] = saved.clone();
            }
            None => {
                saved.audit.on_create(&self.auditor, now);
                members.push(saved.clone());
            }
        }

        tracing::debug!(member_id = %saved.id, "Saved member");
        Ok(saved)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Member>> {
        let members = self.members.read().await;
        Ok(members.iter().find(|member| member.id == id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Member>> {
        Ok(self.members.read().await.clone())
    }

    async fn find_all_matching(&self, spec: &Specification) -> AppResult<Vec<Member>> {
        let members = self.members.read().await;
        let teams = self.teams.read().await;

        let matched = spec.filter(&MEMBER_SCHEMA, members.iter(), &SliceContext::new(&teams))?;
        Ok(matched.into_iter().cloned().collect())
    }

    async fn find_page(&self, spec: &Specification, page: &PageRequest) -> AppResult<Page<Member>> {
        let members = self.members.read().await;
        let teams = self.teams.read().await;

        let (content, total) = select_page(&members, &teams, spec, page)?;
        Ok(Page::new(content, page, total).map(Member::clone))
    }

    async fn find_dto_page(
        &self,
        spec: &Specification,
        page: &PageRequest,
    ) -> AppResult<Page<MemberDto>> {
        let members = self.members.read().await;
        let teams = self.teams.read().await;

        let (content, total) = select_page(&members, &teams, spec, page)?;
        Ok(Page::new(content, page, total)
            .map(|member| MemberDto::new(member, team_of(member, &teams))))
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.members.read().await.len() as u64)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut members = self.members.write().await;
        let before = members.len();
        members.retain(|member| member.id != id);
        Ok(members.len() < before)
    }

    async fn bulk_age_plus(&self, age: i32) -> AppResult<u64> {
        let mut members = self.members.write().await;

        // Nothing changes if any increment would overflow
        if members
            .iter()
            .any(|member| member.age >= age && member.age.checked_add(1).is_none())
        {
            return Err(AppError::InvalidInput(format!(
                "Age of a member aged {} or older is out of range",
                age
            )));
        }

        let now = Utc::now();
        let mut updated = 0;
        for member in members.iter_mut().filter(|member| member.age >= age) {
            member.age += 1;
            member.audit.on_update(&self.auditor, now);
            updated += 1;
        }

        tracing::info!(age, updated, "Bulk age increment");
        Ok(updated)
    }
}

#[async_trait]
impl TeamRepository for MemoryStore {
    async fn save(&self, team: Team) -> AppResult<Team> {
        let mut teams = self.teams.write().await;

        let now = Utc::now();
        let mut saved = team;
        match teams.iter().position(|existing| existing.id == saved.id) {
            Some(index) => {
                saved.audit = teams[index].audit.clone();
                saved.audit.on_update(&self.auditor, now);
                teams[index] = saved.clone();
            }
            None => {
                saved.audit.on_create(&self.auditor, now);
                teams.push(saved.clone());
            }
        }

        tracing::debug!(team_id = %saved.id, "Saved team");
        Ok(saved)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Team>> {
        let teams = self.teams.read().await;
        Ok(teams.iter().find(|team| team.id == id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Team>> {
        Ok(self.teams.read().await.clone())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.teams.read().await.len() as u64)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut members = self.members.write().await;
        let mut teams = self.teams.write().await;

        let before = teams.len();
        teams.retain(|team| team.id != id);
        if teams.len() == before {
            return Ok(false);
        }

        for member in members.iter_mut().filter(|member| member.team_id == Some(id)) {
            member.team_id = None;
        }
        Ok(true)
    }
}
