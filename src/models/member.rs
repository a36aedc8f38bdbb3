//! Member model

use roster_spec::{Attribute, Entity, Relation, Schema, Value, ValueKind};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{Audit, Team, TEAM_SCHEMA};

/// Schema of the `members` table as seen by specifications
pub static MEMBER_SCHEMA: Schema = Schema {
    name: "Member",
    table: "members",
    key: "id",
    attributes: &[
        Attribute::new("id", ValueKind::Uuid),
        Attribute::new("username", ValueKind::Text),
        Attribute::new("age", ValueKind::Int),
        Attribute::nullable("team_id", ValueKind::Uuid),
    ],
    relations: &[Relation {
        name: "team",
        foreign_key: "team_id",
        target: &TEAM_SCHEMA,
    }],
};

/// Member database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub username: String,
    pub age: i32,
    pub team_id: Option<Uuid>,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: Audit,
}

impl Member {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            age: 0,
            team_id: None,
            audit: Audit::default(),
        }
    }

    pub fn with_age(mut self, age: i32) -> Self {
        self.age = age;
        self
    }

    pub fn with_team(mut self, team: &Team) -> Self {
        self.change_team(team);
        self
    }

    /// Move the member to another team
    pub fn change_team(&mut self, team: &Team) {
        self.team_id = Some(team.id);
    }
}

/// Members are equal when they share an id
impl PartialEq for Member {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Member {}

impl Entity for Member {
    fn schema(&self) -> &'static Schema {
        &MEMBER_SCHEMA
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(self.id.into()),
            "username" => Some(self.username.as_str().into()),
            "age" => Some(self.age.into()),
            "team_id" => Some(self.team_id.into()),
            _ => None,
        }
    }
}

/// Member projection exposed by the list endpoint
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct MemberDto {
    pub id: Uuid,
    pub username: String,
    pub team_name: Option<String>,
}

impl MemberDto {
    pub fn new(member: &Member, team: Option<&Team>) -> Self {
        Self {
            id: member.id,
            username: member.username.clone(),
            team_name: team.map(|t| t.name.clone()),
        }
    }
}
