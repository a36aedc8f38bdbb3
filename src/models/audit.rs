//! Auditing fields shared by persisted entities

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Creation and modification stamps
///
/// Repositories stamp these on save; callers never set them directly.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Audit {
    pub created_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
    pub created_by: Option<String>,
    pub last_modified_by: Option<String>,
}

impl Default for Audit {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            created_date: now,
            last_modified_date: now,
            created_by: None,
            last_modified_by: None,
        }
    }
}

impl Audit {
    /// Stamp a first insert
    pub fn on_create(&mut self, auditor: &Auditor, now: DateTime<Utc>) {
        self.created_date = now;
        self.created_by = auditor.current().map(str::to_string);
        self.on_update(auditor, now);
    }

    /// Stamp an update, keeping the creation fields
    pub fn on_update(&mut self, auditor: &Auditor, now: DateTime<Utc>) {
        self.last_modified_date = now;
        self.last_modified_by = auditor.current().map(str::to_string);
    }
}

/// Identity recorded in `created_by` / `last_modified_by`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Auditor {
    name: Option<Arc<str>>,
}

impl Auditor {
    pub fn named(name: impl Into<String>) -> Self {
        let name: String = name.into();
        Self {
            name: (!name.is_empty()).then(|| Arc::from(name)),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_update_keeps_creation_stamp() {
        let auditor = Auditor::named("admin");
        let created = Utc::now();
        let mut audit = Audit::default();
        audit.on_create(&auditor, created);

        let later = created + Duration::milliseconds(100);
        audit.on_update(&Auditor::named("editor"), later);

        assert_eq!(audit.created_date, created);
        assert_eq!(audit.created_by.as_deref(), Some("admin"));
        assert_eq!(audit.last_modified_date, later);
        assert_eq!(audit.last_modified_by.as_deref(), Some("editor"));
    }

    #[test]
    fn test_empty_auditor_name_is_anonymous() {
        assert_eq!(Auditor::named(""), Auditor::anonymous());
        assert_eq!(Auditor::anonymous().current(), None);
    }
}
