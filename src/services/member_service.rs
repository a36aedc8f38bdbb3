//! Member service

use roster_spec::Specification;
use uuid::Uuid;

use crate::{
    db::repositories::{MemberRepository, TeamRepository},
    error::{AppError, AppResult},
    models::{Member, MemberDto, Page, PageRequest},
};

/// Optional criteria for listing members; absent or empty values match all
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberFilter {
    pub username: Option<String>,
    pub team_name: Option<String>,
}

impl MemberFilter {
    pub fn to_specification(&self) -> Specification {
        Specification::attribute_equals("username", self.username.as_deref())
            & Specification::joined_attribute_equals("team", "name", self.team_name.as_deref())
    }
}

/// Input for creating a member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub username: String,
    pub age: i32,
    pub team_id: Option<Uuid>,
}

/// Member service for business logic
pub struct MemberService;

impl MemberService {
    /// Username of the member with `id`
    pub async fn find_username(members: &dyn MemberRepository, id: Uuid) -> AppResult<String> {
        members
            .find_by_id(id)
            .await?
            .map(|member| member.username)
            .ok_or_else(|| AppError::NotFound("Member not found".to_string()))
    }

    /// List member projections matching `filter`
    pub async fn list_members(
        members: &dyn MemberRepository,
        filter: &MemberFilter,
        page: &PageRequest,
    ) -> AppResult<Page<MemberDto>> {
        members.find_dto_page(&filter.to_specification(), page).await
    }

    /// Page of members with exactly `age`
    pub async fn find_by_age(
        members: &dyn MemberRepository,
        age: i32,
        page: &PageRequest,
    ) -> AppResult<Page<Member>> {
        members
            .find_page(&Specification::attribute_equals("age", age), page)
            .await
    }

    /// Every member named `username`
    pub async fn find_by_username(
        members: &dyn MemberRepository,
        username: &str,
    ) -> AppResult<Vec<Member>> {
        members
            .find_all_matching(&Specification::attribute_equals("username", username))
            .await
    }

    /// Create a member, checking that the team exists first
    pub async fn create_member(
        members: &dyn MemberRepository,
        teams: &dyn TeamRepository,
        input: NewMember,
    ) -> AppResult<Member> {
        let mut member = Member::new(input.username).with_age(input.age);

        if let Some(team_id) = input.team_id {
            let team = teams
                .find_by_id(team_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Team not found".to_string()))?;
            member.change_team(&team);
        }

        let member = members.save(member).await?;
        tracing::info!(member_id = %member.id, username = %member.username, "Member created");
        Ok(member)
    }

    /// Add one year to every member aged `age` or older
    pub async fn bulk_age_plus(members: &dyn MemberRepository, age: i32) -> AppResult<u64> {
        members.bulk_age_plus(age).await
    }

    /// Insert `count` sample members named `user{i}` aged `i`
    pub async fn seed(members: &dyn MemberRepository, count: u32) -> AppResult<()> {
        for i in 0..count {
            let age = i32::try_from(i).map_err(|e| AppError::Internal(e.into()))?;
            members
                .save(Member::new(format!("user{}", i)).with_age(age))
                .await?;
        }

        tracing::info!(count, "Seeded sample members");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{MockMemberRepository, MockTeamRepository};
    use crate::models::{Team, MEMBER_SCHEMA};

    #[test]
    fn test_filter_without_values_matches_everything() {
        let clause = MemberFilter::default()
            .to_specification()
            .compile(&MEMBER_SCHEMA)
            .unwrap();
        assert!(clause.is_always());

        let filter = MemberFilter {
            username: Some(String::new()),
            team_name: Some("teamA".to_string()),
        };
        assert_eq!(
            filter.to_specification().compile(&MEMBER_SCHEMA).unwrap(),
            Specification::joined_attribute_equals("team", "name", "teamA")
                .compile(&MEMBER_SCHEMA)
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_find_username() {
        let member = Member::new("m1");
        let id = member.id;

        let mut repo = MockMemberRepository::new();
        repo.expect_find_by_id()
            .withf(move |requested| *requested == id)
            .returning(move |_| Ok(Some(member.clone())));

        assert_eq!(MemberService::find_username(&repo, id).await.unwrap(), "m1");
    }

    #[tokio::test]
    async fn test_find_username_missing() {
        let mut repo = MockMemberRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let result = MemberService::find_username(&repo, Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_members_passes_composed_filter() {
        let filter = MemberFilter {
            username: Some("m1".to_string()),
            team_name: Some("teamA".to_string()),
        };
        let expected = filter.to_specification();

        let mut repo = MockMemberRepository::new();
        repo.expect_find_dto_page()
            .withf(move |spec, page| *spec == expected && page.size == 20)
            .times(1)
            .returning(|_, page| Ok(Page::new(Vec::new(), page, 0)));

        let page = MemberService::list_members(&repo, &filter, &PageRequest::of(0, 20))
            .await
            .unwrap();
        assert_eq!(page.total_pages, 0);
    }

    #[tokio::test]
    async fn test_find_by_age_and_username() {
        let mut repo = MockMemberRepository::new();
        repo.expect_find_page()
            .withf(|spec, _| *spec == Specification::attribute_equals("age", 10))
            .returning(|_, page| Ok(Page::new(vec![Member::new("m1").with_age(10)], page, 1)));
        repo.expect_find_all_matching()
            .withf(|spec| *spec == Specification::attribute_equals("username", "m1"))
            .returning(|_| Ok(vec![Member::new("m1")]));

        let page = MemberService::find_by_age(&repo, 10, &PageRequest::of(0, 3))
            .await
            .unwrap();
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.content[0].age, 10);

        let found = MemberService::find_by_username(&repo, "m1").await.unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_create_member_with_unknown_team() {
        let mut members = MockMemberRepository::new();
        members.expect_save().never();
        let mut teams = MockTeamRepository::new();
        teams.expect_find_by_id().returning(|_| Ok(None));

        let input = NewMember {
            username: "m1".to_string(),
            age: 10,
            team_id: Some(Uuid::new_v4()),
        };
        let result = MemberService::create_member(&members, &teams, input).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_member_joins_team() {
        let team = Team::new("teamA");
        let team_id = team.id;

        let mut teams = MockTeamRepository::new();
        teams
            .expect_find_by_id()
            .returning(move |_| Ok(Some(team.clone())));
        let mut members = MockMemberRepository::new();
        members
            .expect_save()
            .withf(move |member| member.team_id == Some(team_id) && member.age == 10)
            .returning(|member| Ok(member));

        let input = NewMember {
            username: "m1".to_string(),
            age: 10,
            team_id: Some(team_id),
        };
        let member = MemberService::create_member(&members, &teams, input)
            .await
            .unwrap();
        assert_eq!(member.username, "m1");
    }

    #[tokio::test]
    async fn test_seed_inserts_numbered_members() {
        let mut repo = MockMemberRepository::new();
        let mut seq = mockall::Sequence::new();
        for i in 0..3 {
            repo.expect_save()
                .times(1)
                .in_sequence(&mut seq)
                .withf(move |member| member.username == format!("user{}", i) && member.age == i)
                .returning(|member| Ok(member));
        }

        MemberService::seed(&repo, 3).await.unwrap();
    }
}
