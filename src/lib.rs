pub mod error;
pub mod export;
pub mod logging;
pub mod pagination;
pub mod table;
pub mod users;
pub mod utils;

pub use error::{ExportError, Result};
