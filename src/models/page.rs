//! Paging and sorting types

use std::cmp::Ordering;

use roster_spec::{Entity, Schema};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// SQL keyword for this direction
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A single sort property and its direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub property: String,
    #[serde(default)]
    pub direction: Direction,
}

impl Order {
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Desc,
        }
    }
}

/// Ordered list of sort properties; empty means unsorted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub orders: Vec<Order>,
}

impl Sort {
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn by(order: Order) -> Self {
        Self {
            orders: vec![order],
        }
    }

    pub fn and(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }

    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }

    /// Parse `property[,asc|desc]`, several orders separated by `;`
    pub fn parse(raw: &str) -> AppResult<Self> {
        let mut sort = Sort::unsorted();
        for part in raw.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let (property, direction) = match part.split_once(',') {
                Some((property, direction)) => (property.trim(), direction.trim()),
                None => (part, "asc"),
            };
            if property.is_empty() {
                return Err(AppError::InvalidInput(format!("Invalid sort `{}`", part)));
            }
            let direction = match direction.to_ascii_lowercase().as_str() {
                "asc" => Direction::Asc,
                "desc" => Direction::Desc,
                other => {
                    return Err(AppError::InvalidInput(format!(
                        "Invalid sort direction `{}`",
                        other
                    )));
                }
            };
            sort.orders.push(Order {
                property: property.to_string(),
                direction,
            });
        }
        Ok(sort)
    }

    /// Reject properties the schema does not know
    pub fn validate(&self, schema: &Schema) -> AppResult<()> {
        for order in &self.orders {
            if schema.attribute(&order.property).is_none() {
                return Err(AppError::InvalidInput(format!(
                    "Cannot sort {} by unknown property `{}`",
                    schema.name, order.property
                )));
            }
        }
        Ok(())
    }

    /// Compare two entities for in-memory sorting
    pub fn compare<E: Entity>(&self, a: &E, b: &E) -> Ordering {
        for order in &self.orders {
            let left = a.attribute(&order.property).unwrap_or_default();
            let right = b.attribute(&order.property).unwrap_or_default();
            let ordering = match order.direction {
                Direction::Asc => left.sort_cmp(&right),
                Direction::Desc => right.sort_cmp(&left),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

/// Request for one page of results (zero-based page number)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    #[serde(default)]
    pub sort: Sort,
}

impl PageRequest {
    /// Page `page` of `size` items; size is at least 1
    pub fn of(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.max(1),
            sort: Sort::unsorted(),
        }
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    /// Number of rows to skip
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.size)
    }
}

/// One page of results with paging metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub number_of_elements: usize,
    pub total_elements: u64,
    pub total_pages: u64,
    pub first: bool,
    pub last: bool,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let size = request.size.max(1);
        let total_pages = total_elements.div_ceil(u64::from(size));
        let has_next = u64::from(request.page) + 1 < total_pages;
        Self {
            number_of_elements: content.len(),
            content,
            number: request.page,
            size,
            total_elements,
            total_pages,
            first: request.page == 0,
            last: !has_next,
            has_next,
            has_previous: request.page > 0,
        }
    }

    /// Convert the content, keeping the paging metadata
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            number_of_elements: self.number_of_elements,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            first: self.first,
            last: self.last,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Member, MEMBER_SCHEMA};

    #[test]
    fn test_first_page_metadata() {
        let request = PageRequest::of(0, 3);
        let page = Page::new(vec![1, 2, 3], &request, 5);

        assert_eq!(page.content.len(), 3);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.number, 0);
        assert_eq!(page.total_pages, 2);
        assert!(page.first);
        assert!(page.has_next);
        assert!(!page.last);
        assert!(!page.has_previous);
    }

    #[test]
    fn test_last_and_empty_pages() {
        let page = Page::new(vec![4, 5], &PageRequest::of(1, 3), 5);
        assert!(page.last);
        assert!(!page.has_next);
        assert!(page.has_previous);

        let empty: Page<i32> = Page::new(Vec::new(), &PageRequest::of(0, 20), 0);
        assert_eq!(empty.total_pages, 0);
        assert!(empty.first && empty.last);
        assert!(empty.content.is_empty());
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = Page::new(vec![1, 2], &PageRequest::of(2, 2), 10);
        let mapped = page.clone().map(|n| n.to_string());
        assert_eq!(mapped.content, vec!["1", "2"]);
        assert_eq!(mapped.number, page.number);
        assert_eq!(mapped.total_pages, 5);
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::of(0, 3).offset(), 0);
        assert_eq!(PageRequest::of(2, 3).offset(), 6);
        assert_eq!(PageRequest::of(1, 0).size, 1);
    }

    #[test]
    fn test_parse_sort() {
        let sort = Sort::parse("username,desc;age").unwrap();
        assert_eq!(sort, Sort::by(Order::desc("username")).and(Order::asc("age")));
        assert!(Sort::parse("").unwrap().is_unsorted());
        assert!(Sort::parse("username,sideways").is_err());
        assert!(Sort::parse(",desc").is_err());
    }

    #[test]
    fn test_validate_sort_against_schema() {
        assert!(Sort::by(Order::asc("username")).validate(&MEMBER_SCHEMA).is_ok());
        assert!(matches!(
            Sort::by(Order::asc("password")).validate(&MEMBER_SCHEMA),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_compare_members() {
        let a = Member::new("member1").with_age(10);
        let b = Member::new("member2").with_age(10);
        let sort = Sort::by(Order::desc("age")).and(Order::desc("username"));
        assert_eq!(sort.compare(&a, &b), Ordering::Greater);
        assert_eq!(Sort::unsorted().compare(&a, &b), Ordering::Equal);
    }
}
