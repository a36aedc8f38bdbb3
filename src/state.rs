//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::db::repositories::{
    MemberRepository, MemoryStore, PgMemberRepository, PgTeamRepository, TeamRepository,
};
use crate::models::Auditor;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    members: Arc<dyn MemberRepository>,
    teams: Arc<dyn TeamRepository>,
    config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(
        members: Arc<dyn MemberRepository>,
        teams: Arc<dyn TeamRepository>,
        config: Config,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                members,
                teams,
                config,
            }),
        }
    }

    /// State backed by a fresh in-memory store
    pub fn in_memory(config: Config) -> Self {
        let store = Arc::new(MemoryStore::new(Auditor::named(config.audit.auditor.clone())));
        Self::new(store.clone(), store, config)
    }

    /// State backed by PostgreSQL
    pub fn postgres(pool: PgPool, config: Config) -> Self {
        let auditor = Auditor::named(config.audit.auditor.clone());
        Self::new(
            Arc::new(PgMemberRepository::new(pool.clone(), auditor.clone())),
            Arc::new(PgTeamRepository::new(pool, auditor)),
            config,
        )
    }

    /// Get the member repository
    pub fn members(&self) -> &dyn MemberRepository {
        self.inner.members.as_ref()
    }

    /// Get the team repository
    pub fn teams(&self) -> &dyn TeamRepository {
        self.inner.teams.as_ref()
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
