//! Member request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{DEFAULT_PAGE_SIZE, MAX_AGE, MAX_PAGE_SIZE, MAX_USERNAME_LENGTH},
    error::AppResult,
    models::{PageRequest, Sort},
    services::{MemberFilter, NewMember},
};

/// Create member request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMemberRequest {
    #[validate(length(min = 1, max = MAX_USERNAME_LENGTH))]
    pub username: String,

    #[validate(range(min = 0, max = MAX_AGE))]
    #[serde(default)]
    pub age: i32,

    pub team_id: Option<Uuid>,
}

impl From<CreateMemberRequest> for NewMember {
    fn from(request: CreateMemberRequest) -> Self {
        Self {
            username: request.username,
            age: request.age,
            team_id: request.team_id,
        }
    }
}

/// Bulk age increment request
#[derive(Debug, Deserialize, Validate)]
pub struct BulkAgePlusRequest {
    #[validate(range(min = 0, max = MAX_AGE))]
    pub age: i32,
}

/// List members query parameters
///
/// `page` is zero-based; `sort` takes `property[,asc|desc]`.
#[derive(Debug, Default, Deserialize)]
pub struct ListMembersQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
    pub username: Option<String>,
    pub team_name: Option<String>,
}

impl ListMembersQuery {
    pub fn page_request(&self) -> AppResult<PageRequest> {
        let size = self.size.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
        let sort = match &self.sort {
            Some(raw) => Sort::parse(raw)?,
            None => Sort::unsorted(),
        };
        Ok(PageRequest::of(self.page.unwrap_or(0), size).with_sort(sort))
    }

    pub fn filter(&self) -> MemberFilter {
        MemberFilter {
            username: self.username.clone(),
            team_name: self.team_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Order;

    #[test]
    fn test_page_request_defaults() {
        let request = ListMembersQuery::default().page_request().unwrap();
        assert_eq!(request, PageRequest::of(0, 20));
    }

    #[test]
    fn test_page_size_is_capped() {
        let query = ListMembersQuery {
            page: Some(2),
            size: Some(5000),
            sort: Some("username,desc".to_string()),
            ..Default::default()
        };
        let request = query.page_request().unwrap();
        assert_eq!(request.page, 2);
        assert_eq!(request.size, MAX_PAGE_SIZE);
        assert_eq!(request.sort, Sort::by(Order::desc("username")));
    }

    #[test]
    fn test_create_request_validation() {
        let request = CreateMemberRequest {
            username: String::new(),
            age: 10,
            team_id: None,
        };
        assert!(request.validate().is_err());

        let request = CreateMemberRequest {
            username: "m1".to_string(),
            age: -1,
            team_id: None,
        };
        assert!(request.validate().is_err());
    }
}
