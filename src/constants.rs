//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// PAGINATION DEFAULTS
// =============================================================================

/// Page size used when the request does not name one
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size a client may request
pub const MAX_PAGE_SIZE: u32 = 100;

// =============================================================================
// AUDITING
// =============================================================================

/// Auditor recorded when none is configured
pub const DEFAULT_AUDITOR: &str = "system";

// =============================================================================
// VALIDATION
// =============================================================================

/// Username maximum length
pub const MAX_USERNAME_LENGTH: u64 = 50;

/// Team name maximum length
pub const MAX_TEAM_NAME_LENGTH: u64 = 50;

/// Upper bound accepted for a member's age
pub const MAX_AGE: i32 = 200;

// =============================================================================
// STORAGE BACKENDS
// =============================================================================

/// Storage backend identifiers
pub mod backends {
    pub const MEMORY: &str = "memory";
    pub const POSTGRES: &str = "postgres";
}
