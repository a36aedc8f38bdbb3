//! Team model

use roster_spec::{Attribute, Entity, Schema, Value, ValueKind};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::Audit;

/// Schema of the `teams` table as seen by specifications
pub static TEAM_SCHEMA: Schema = Schema {
    name: "Team",
    table: "teams",
    key: "id",
    attributes: &[
        Attribute::new("id", ValueKind::Uuid),
        Attribute::new("name", ValueKind::Text),
    ],
    relations: &[],
};

/// Team database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: Audit,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            audit: Audit::default(),
        }
    }
}

/// Teams are equal when they share an id
impl PartialEq for Team {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Team {}

impl Entity for Team {
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
