//! Business logic services

pub mod member_service;
pub mod team_service;

pub use member_service::{MemberFilter, MemberService, NewMember};
pub use team_service::TeamService;
