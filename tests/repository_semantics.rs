//! Repository behaviour shared by both backends
//!
//! Every scenario runs against the in-memory store and, when a Docker daemon
//! is available, against PostgreSQL started with testcontainers.

use roster::{
    db::{
        self,
        repositories::{
            MemberRepository, MemoryStore, PgMemberRepository, PgTeamRepository, TeamRepository,
        },
    },
    error::AppError,
    models::{Auditor, Member, Order, PageRequest, Sort, Team},
};
use roster_spec::Specification;
use sqlx::PgPool;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres;

struct PgFixture {
    // Keeps the database alive for the duration of the test
    _container: ContainerAsync<Postgres>,
    members: PgMemberRepository,
    teams: PgTeamRepository,
}

async fn postgres() -> PgFixture {
    let container = Postgres::default()
        .start()
        .await
        .expect("Failed to start PostgreSQL container");
    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(5432).await.unwrap();
    let url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

    let pool = PgPool::connect(&url)
        .await
        .expect("Failed to connect to test database");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let auditor = Auditor::named("tester");
    PgFixture {
        _container: container,
        members: PgMemberRepository::new(pool.clone(), auditor.clone()),
        teams: PgTeamRepository::new(pool, auditor),
    }
}

fn memory() -> MemoryStore {
    MemoryStore::new(Auditor::named("tester"))
}

fn usernames(members: &[Member]) -> Vec<&str> {
    let mut names: Vec<_> = members.iter().map(|m| m.username.as_str()).collect();
    names.sort_unstable();
    names
}

async fn crud(members: &dyn MemberRepository) {
    let m1 = members.save(Member::new("member1").with_age(10)).await.unwrap();
    let m2 = members.save(Member::new("member2").with_age(20)).await.unwrap();

    let found = members.find_by_id(m1.id).await.unwrap().unwrap();
    assert_eq!(found.username, "member1");
    assert_eq!(found.age, 10);

    assert_eq!(members.find_all().await.unwrap().len(), 2);
    assert_eq!(members.count().await.unwrap(), 2);

    assert!(members.delete(m1.id).await.unwrap());
    assert!(members.delete(m2.id).await.unwrap());
    assert_eq!(members.count().await.unwrap(), 0);

    assert!(!members.delete(m1.id).await.unwrap());
    assert!(members.find_by_id(m1.id).await.unwrap().is_none());
}

async fn age_overflow(members: &dyn MemberRepository) {
    members.save(Member::new("young").with_age(30)).await.unwrap();
    members
        .save(Member::new("ancient").with_age(i32::MAX))
        .await
        .unwrap();

    let result = members.bulk_age_plus(20).await;
    assert!(matches!(result, Err(AppError::InvalidInput(_))));

    let mut ages: Vec<_> = members
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.age)
        .collect();
    ages.sort_unstable();
    assert_eq!(ages, vec![30, i32::MAX]);
}

async fn join_semantics(members: &dyn MemberRepository, teams: &dyn TeamRepository) {
    let team_a = teams.save(Team::new("teamA")).await.unwrap();
    let team_b = teams.save(Team::new("teamB")).await.unwrap();
    members.save(Member::new("m1").with_team(&team_a)).await.unwrap();
    members.save(Member::new("m2").with_team(&team_b)).await.unwrap();
    members.save(Member::new("loner")).await.unwrap();

    let in_team_a = Specification::joined_attribute_equals("team", "name", "teamA");

    let both = Specification::attribute_equals("username", "m1") & in_team_a.clone();
    assert_eq!(usernames(&members.find_all_matching(&both).await.unwrap()), vec!["m1"]);

    let either = Specification::attribute_equals("username", "loner") | in_team_a.clone();
    assert_eq!(
        usernames(&members.find_all_matching(&either).await.unwrap()),
        vec!["loner", "m1"]
    );

    // A member without a team is not "in teamA", so the negation keeps it
    let outside = !in_team_a;
    assert_eq!(
        usernames(&members.find_all_matching(&outside).await.unwrap()),
        vec!["loner", "m2"]
    );

    let without_team_a = !Specification::attribute_equals("team_id", team_a.id);
    assert_eq!(
        usernames(&members.find_all_matching(&without_team_a).await.unwrap()),
        vec!["loner", "m2"]
    );
}

async fn paging(members: &dyn MemberRepository) {
    for i in 1..=5 {
        members
            .save(Member::new(format!("member{}", i)).with_age(10))
            .await
            .unwrap();
    }
    members.save(Member::new("older").with_age(30)).await.unwrap();

    let request = PageRequest::of(0, 3).with_sort(Sort::by(Order::desc("username")));
    let page = members
        .find_page(&Specification::attribute_equals("age", 10), &request)
        .await
        .unwrap();

    let names: Vec<_> = page.content.iter().map(|m| m.username.as_str()).collect();
    assert_eq!(names, vec!["member5", "member4", "member3"]);
    assert_eq!(page.total_elements, 5);
    assert_eq!(page.total_pages, 2);
    assert!(page.has_next);

    let dtos = members
        .find_dto_page(&Specification::Always, &PageRequest::of(1, 4))
        .await
        .unwrap();
    assert_eq!(dtos.total_elements, 6);
    assert_eq!(dtos.number_of_elements, 2);
    assert!(dtos.last);
}

async fn bulk_update(members: &dyn MemberRepository) {
    for (i, age) in [10, 19, 20, 21, 40].into_iter().enumerate() {
        members
            .save(Member::new(format!("member{}", i + 1)).with_age(age))
            .await
            .unwrap();
    }

    assert_eq!(members.bulk_age_plus(20).await.unwrap(), 3);

    let mut ages: Vec<_> = members
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.age)
        .collect();
    ages.sort_unstable();
    assert_eq!(ages, vec![10, 19, 21, 22, 41]);
}

async fn team_removal(members: &dyn MemberRepository, teams: &dyn TeamRepository) {
    let team = teams.save(Team::new("teamA")).await.unwrap();
    let member = members.save(Member::new("m1").with_team(&team)).await.unwrap();
    assert_eq!(member.audit.created_by.as_deref(), Some("tester"));

    assert!(teams.delete(team.id).await.unwrap());

    let reloaded = members.find_by_id(member.id).await.unwrap().unwrap();
    assert_eq!(reloaded.team_id, None);
    assert_eq!(teams.count().await.unwrap(), 0);
    assert_eq!(members.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_memory_crud() {
    crud(&memory()).await;
}

#[tokio::test]
async fn test_memory_age_overflow() {
    age_overflow(&memory()).await;
}

#[tokio::test]
async fn test_memory_join_semantics() {
    let store = memory();
    join_semantics(&store, &store).await;
}

#[tokio::test]
async fn test_memory_paging() {
    paging(&memory()).await;
}

#[tokio::test]
async fn test_memory_bulk_update() {
    bulk_update(&memory()).await;
}

#[tokio::test]
async fn test_memory_team_removal() {
    let store = memory();
    team_removal(&store, &store).await;
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn test_postgres_crud() {
    let pg = postgres().await;
    crud(&pg.members).await;
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn test_postgres_age_overflow() {
    let pg = postgres().await;
    age_overflow(&pg.members).await;
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn test_postgres_join_semantics() {
    let pg = postgres().await;
    join_semantics(&pg.members, &pg.teams).await;
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn test_postgres_paging() {
    let pg = postgres().await;
    paging(&pg.members).await;
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn test_postgres_bulk_update() {
    let pg = postgres().await;
    bulk_update(&pg.members).await;
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn test_postgres_team_removal() {
    let pg = postgres().await;
    team_removal(&pg.members, &pg.teams).await;
}
