//! Entities shared by the unit tests.

use std::cell::Cell;
use uuid::Uuid;

use crate::context::{JoinContext, SliceContext};
use crate::schema::{Attribute, Entity, Relation, Schema};
use crate::value::{Value, ValueKind};

pub static TEAM_SCHEMA: Schema = Schema {
    name: "TestTeam",
    table: "teams",
    key: "id",
    attributes: &[
        Attribute::new("id", ValueKind::Uuid),
        Attribute::new("name", ValueKind::Text),
    ],
    relations: &[],
};

pub static MEMBER_SCHEMA: Schema = Schema {
    name: "TestMember",
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

#[derive(Debug, Clone)]
pub struct TestTeam {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct TestMember {
    pub id: Uuid,
    pub username: String,
    pub age: i32,
    pub team_id: Option<Uuid>,
}

impl Entity for TestTeam {
    fn schema(&self) -> &'static Schema {
        &TEAM_SCHEMA
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(self.id.into()),
            "name" => Some(self.name.as_str().into()),
            _ => None,
        }
    }
}

impl Entity for TestMember {
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

pub fn team(name: &str) -> TestTeam {
    TestTeam {
        id: Uuid::new_v4(),
        name: name.to_string(),
    }
}

pub fn member(username: &str, age: i32, team: Option<&TestTeam>) -> TestMember {
    TestMember {
        id: Uuid::new_v4(),
        username: username.to_string(),
        age,
        team_id: team.map(|t| t.id),
    }
}

/// Teams available to joins.
pub struct Teams(pub Vec<TestTeam>);

impl JoinContext for Teams {
    fn resolve(&self, relation: &Relation, key: &Value) -> Option<&dyn Entity> {
        SliceContext::new(&self.0)
            .find(relation, key)
            .map(|team| team as &dyn Entity)
    }
}

/// Counts how often a join is resolved.
pub struct CountingTeams {
    teams: Teams,
    lookups: Cell<usize>,
}

impl CountingTeams {
    pub fn new(teams: Teams) -> Self {
        Self {
            teams,
            lookups: Cell::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.get()
    }
}

impl JoinContext for CountingTeams {
    fn resolve(&self, relation: &Relation, key: &Value) -> Option<&dyn Entity> {
        self.lookups.set(self.lookups.get() + 1);
        self.teams.resolve(relation, key)
    }
}
