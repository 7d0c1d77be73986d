mod config;
mod converters;
mod exporters;
mod sheet;
mod types;
mod writer;

pub use config::{ExportConfig, build_export_config, configured_columns, load_column_config};
pub use converters::{date_string_to_excel_serial, transform_data, transform_value};
pub use exporters::ExcelExporter;
pub use sheet::{Sheet, create_sheet};
pub use types::{
    ColumnConfig, ColumnConfigMap, ColumnType, ColumnWidth, DEFAULT_COLUMN_WIDTH,
    DEFAULT_FILE_NAME, DEFAULT_SHEET_NAME, DateHandler, NumberHandler, Row, TypeOptions,
};
pub use writer::Workbook;
