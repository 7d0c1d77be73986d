use tracing::warn;

use crate::error::{ExportError, Result};
use crate::pagination::paginate;

pub const DEFAULT_PAGE_SIZES: [usize; 4] = [10, 20, 50, 100];
const DEFAULT_PAGE_NUMBER: usize = 1;
const DEFAULT_PAGE_SIZE: usize = 20;

/// Current paging position. `total` is reported by the data source and is
/// never used to clamp the other two fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page_number: usize,
    pub page_size: usize,
    pub total: usize,
}

#[derive(Debug, Clone)]
pub struct PaginationManager {
    pagination: Pagination,
    page_sizes: Vec<usize>,
    initial_page_number: usize,
    initial_page_size: usize,
}

impl Default for PaginationManager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_NUMBER, &DEFAULT_PAGE_SIZES, DEFAULT_PAGE_SIZE)
    }
}

impl PaginationManager {
    pub fn new(page_number: usize, page_sizes: &[usize], page_size: usize) -> Self {
        Self {
            pagination: Pagination {
                page_number,
                page_size,
                total: 0,
            },
            page_sizes: page_sizes.to_vec(),
            initial_page_number: page_number,
            initial_page_size: page_size,
        }
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn set_total(&mut self, total: usize) {
        self.pagination.total = total;
    }

    /// Restore the page number and size given at construction and zero the total.
    pub fn reset_pagination(&mut self) {
        self.pagination = Pagination {
            page_number: self.initial_page_number,
            page_size: self.initial_page_size,
            total: 0,
        };
    }

    pub fn change_page_number(&mut self, page_number: usize) {
        self.pagination.page_number = page_number;
    }

    /// Apply `page_size` even when it is not one of the allowed sizes; that
    /// case only logs a warning.
    pub fn change_page_size(&mut self, page_size: usize) {
        if let Err(err) = self.check_page_size(page_size) {
            warn!("{}", err);
        }
        self.pagination.page_size = page_size;
    }

    /// Check `page_size` against the allowed list without changing state.
    pub fn check_page_size(&self, page_size: usize) -> Result<()> {
        if self.page_sizes.contains(&page_size) {
            return Ok(());
        }

        let available = self
            .page_sizes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        Err(ExportError::InvalidPageSize {
            size: page_size,
            available,
        })
    }

    pub fn page_sizes(&self) -> Vec<usize> {
        self.page_sizes.clone()
    }

    pub fn set_page_sizes(&mut self, page_sizes: &[usize]) {
        self.page_sizes = page_sizes.to_vec();
    }

    /// Page through `data`, falling back to the current state for missing arguments.
    pub fn get_paginated_data<'a, T>(
        &self,
        data: &'a [T],
        page_number: Option<usize>,
        page_size: Option<usize>,
    ) -> &'a [T] {
        let page_number = page_number.unwrap_or(self.pagination.page_number);
        let page_size = page_size.unwrap_or(self.pagination.page_size);
        paginate(data, page_number, page_size).page
    }
}
