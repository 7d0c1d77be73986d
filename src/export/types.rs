use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Width used for columns that do not declare one.
pub const DEFAULT_COLUMN_WIDTH: f64 = 10.0;
/// File stem used when the caller does not name the export.
pub const DEFAULT_FILE_NAME: &str = "导出数据";
/// Name of the single sheet in every exported workbook.
pub const DEFAULT_SHEET_NAME: &str = "sheet";

/// A record to export. A missing key means the field is absent.
pub type Row = IndexMap<String, Value>;

/// Column configurations keyed by field name. Key order is column order;
/// a `None` entry is skipped everywhere.
pub type ColumnConfigMap = IndexMap<String, Option<ColumnConfig>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Number,
    String,
    Date,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnConfig {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ColumnType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exportable: Option<bool>,
}

impl ColumnConfig {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = Some(date_format.into());
        self
    }

    pub fn kind(mut self, kind: ColumnType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn exportable(mut self, exportable: bool) -> Self {
        self.exportable = Some(exportable);
        self
    }

    /// Only an explicit `false` excludes a column.
    pub fn is_exportable(&self) -> bool {
        self.exportable != Some(false)
    }
}

/// Hook applied to numeric values of `number` columns.
pub type NumberHandler = Box<dyn Fn(&Value) -> Value>;
/// Hook applied to values of `date` columns, with the column's date format.
pub type DateHandler = Box<dyn Fn(&Value, Option<&str>) -> Value>;

/// Optional per-type coercion hooks.
#[derive(Default)]
pub struct TypeOptions {
    pub handle_number: Option<NumberHandler>,
    pub handle_date: Option<DateHandler>,
}

impl TypeOptions {
    pub fn with_number(mut self, handler: impl Fn(&Value) -> Value + 'static) -> Self {
        self.handle_number = Some(Box::new(handler));
        self
    }

    pub fn with_date(mut self, handler: impl Fn(&Value, Option<&str>) -> Value + 'static) -> Self {
        self.handle_date = Some(Box::new(handler));
        self
    }
}

impl fmt::Debug for TypeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeOptions")
            .field("handle_number", &self.handle_number.is_some())
            .field("handle_date", &self.handle_date.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnWidth {
    pub width: f64,
}
