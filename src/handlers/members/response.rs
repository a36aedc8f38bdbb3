//! Member response DTOs

use serde::Serialize;

/// Bulk age increment response
#[derive(Debug, Serialize)]
pub struct BulkAgePlusResponse {
    pub updated: u64,
}
