use tracing::debug;

use crate::pagination::{Pagination, PaginationManager};
use crate::users::{MockUserSource, PageQuery, User, UserFilter};

/// Backing state for the user list page.
#[derive(Debug)]
pub struct UserList {
    source: MockUserSource,
    users: Vec<User>,
    pagination: PaginationManager,
}

impl UserList {
    pub fn new(source: MockUserSource) -> Self {
        Self::with_pagination(source, PaginationManager::default())
    }

    pub fn with_pagination(source: MockUserSource, pagination: PaginationManager) -> Self {
        Self {
            source,
            users: Vec::new(),
            pagination,
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination.pagination()
    }

    pub fn page_sizes(&self) -> Vec<usize> {
        self.pagination.page_sizes()
    }

    /// Reset paging and reload the first page without a name filter.
    pub fn load_users(&mut self) {
        self.pagination.reset_pagination();
        let pagination = self.pagination.pagination();
        self.search_users(
            PageQuery {
                page_number: pagination.page_number,
                page_size: pagination.page_size,
            },
            &UserFilter::default(),
        );
    }

    pub fn search_users(&mut self, query: PageQuery, filter: &UserFilter) {
        let page = self.source.get_users(query, filter);
        debug!(
            page_number = query.page_number,
            page_size = query.page_size,
            total = page.total,
            "Loaded users"
        );
        self.users = page.data;
        self.pagination.set_total(page.total);
    }

    /// Updates paging state only; call `search_users` to refetch.
    pub fn change_page_number(&mut self, page_number: usize) {
        self.pagination.change_page_number(page_number);
    }

    /// Updates paging state only; call `search_users` to refetch.
    pub fn change_page_size(&mut self, page_size: usize) {
        self.pagination.change_page_size(page_size);
    }
}
