mod helpers;
mod state;

pub use helpers::{Paginated, paginate};
pub use state::{DEFAULT_PAGE_SIZES, Pagination, PaginationManager};
