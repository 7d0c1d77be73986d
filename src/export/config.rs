use std::fs;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::Result;
use crate::export::types::{ColumnConfig, ColumnConfigMap, ColumnWidth, DEFAULT_COLUMN_WIDTH};

/// Everything derived from a column configuration mapping. All fields follow
/// the order of `configured_keys`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExportConfig {
    pub configured_keys: Vec<String>,
    pub header_row: IndexMap<String, String>,
    pub column_widths: Vec<ColumnWidth>,
    pub date_format_map: IndexMap<String, String>,
}

impl ExportConfig {
    /// Zero-based column index of `key` in the sheet.
    pub fn column_index(&self, key: &str) -> Option<usize> {
        self.configured_keys.iter().position(|k| k == key)
    }
}

/// Present, exportable columns in mapping order.
pub fn configured_columns(
    columns: &ColumnConfigMap,
) -> impl Iterator<Item = (&str, &ColumnConfig)> {
    columns.iter().filter_map(|(key, config)| {
        config
            .as_ref()
            .filter(|config| config.is_exportable())
            .map(|config| (key.as_str(), config))
    })
}

pub fn build_export_config(columns: &ColumnConfigMap) -> ExportConfig {
    let mut export_config = ExportConfig::default();

    for (key, config) in configured_columns(columns) {
        export_config.configured_keys.push(key.to_string());
        export_config
            .header_row
            .insert(key.to_string(), config.label.clone());
        export_config.column_widths.push(ColumnWidth {
            width: config.width.unwrap_or(DEFAULT_COLUMN_WIDTH),
        });
        if let Some(date_format) = &config.date_format {
            export_config
                .date_format_map
                .insert(key.to_string(), date_format.clone());
        }
    }

    export_config
}

/// Read a JSON object of column configurations, keeping document order.
pub fn load_column_config(path: &Path) -> Result<ColumnConfigMap> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
