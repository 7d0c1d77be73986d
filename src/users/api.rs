use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::pagination::paginate;
use crate::users::User;

const MOCK_PHONE: &str = "18888888888";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page_number: usize,
    pub page_size: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFilter {
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsersPage {
    pub data: Vec<User>,
    /// Number of users matching the filter, across all pages.
    pub total: usize,
}

/// In-memory stand-in for the user API.
#[derive(Debug, Clone, Default)]
pub struct MockUserSource {
    users: Vec<User>,
}

impl MockUserSource {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// `user1` through `user{size}`, all registered on 2025-01-01.
    pub fn generate(size: usize) -> Self {
        let register_time = NaiveDate::from_ymd_opt(2025, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default();

        let users = (1..=size)
            .map(|i| User {
                id: i as u64,
                name: format!("user{}", i),
                phone: MOCK_PHONE.to_string(),
                register_time,
            })
            .collect();

        Self { users }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Filter by name substring (an empty filter matches everyone), then page.
    pub fn get_users(&self, query: PageQuery, filter: &UserFilter) -> UsersPage {
        let filtered: Vec<User> = self
            .users
            .iter()
            .filter(|user| match filter.name.as_deref() {
                Some(name) if !name.is_empty() => user.name.contains(name),
                _ => true,
            })
            .cloned()
            .collect();

        let page = paginate(&filtered, query.page_number, query.page_size);

        UsersPage {
            data: page.page.to_vec(),
            total: page.total,
        }
    }
}
