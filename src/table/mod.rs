mod columns;
mod exporter;

pub use columns::CheckedColumn;
pub use exporter::{ExportOptions, TableExport};
