//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod audit;
pub mod member;
pub mod page;
pub mod team;

pub use audit::*;
pub use member::*;
pub use page::*;
pub use team::*;
