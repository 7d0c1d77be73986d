use std::path::PathBuf;

use tracing::debug;

use crate::error::Result;
use crate::export::{ColumnConfig, ColumnConfigMap, ExcelExporter, Row, TypeOptions};
use crate::table::CheckedColumn;

#[derive(Debug, Default)]
pub struct ExportOptions {
    pub type_options: TypeOptions,
    /// Replaces the table's own column configuration for one export.
    pub column_config: Option<ColumnConfigMap>,
}

/// Export helper bound to one table's column configuration.
#[derive(Debug)]
pub struct TableExport {
    column_config: ColumnConfigMap,
    checked_columns: Vec<CheckedColumn>,
    exporter: ExcelExporter,
}

impl TableExport {
    pub fn new(column_config: ColumnConfigMap, exporter: ExcelExporter) -> Self {
        Self {
            column_config,
            checked_columns: Vec::new(),
            exporter,
        }
    }

    pub fn column_config(&self) -> &ColumnConfigMap {
        &self.column_config
    }

    pub fn checked_columns(&self) -> &[CheckedColumn] {
        &self.checked_columns
    }

    /// One selection entry per configured column, checked unless the column
    /// is marked non-exportable.
    pub fn init_checked_columns(&mut self) {
        self.checked_columns = self
            .column_config
            .iter()
            .filter_map(|(field, config)| {
                config.as_ref().map(|config| CheckedColumn {
                    field: field.clone(),
                    label: config.label.clone(),
                    checked: config.exportable.unwrap_or(true),
                })
            })
            .collect();
    }

    /// Flip the selection of `field`. Returns the new state, or `None` if the
    /// field has no selection entry.
    pub fn toggle_column(&mut self, field: &str) -> Option<bool> {
        let column = self
            .checked_columns
            .iter_mut()
            .find(|column| column.field == field)?;
        column.toggle();
        Some(column.checked)
    }

    pub fn can_export(&self) -> bool {
        self.checked_columns.iter().any(|column| column.checked)
    }

    pub fn selected_fields(&self) -> Vec<String> {
        self.checked_columns
            .iter()
            .filter(|column| column.checked)
            .map(|column| column.field.clone())
            .collect()
    }

    pub fn exportable_fields(&self) -> Vec<String> {
        self.column_config
            .iter()
            .filter(|(_, config)| config.as_ref().is_some_and(ColumnConfig::is_exportable))
            .map(|(field, _)| field.clone())
            .collect()
    }

    /// Drop non-exportable columns from `custom` (or the table's own
    /// configuration). Absent entries are passed through for the sheet
    /// builder to skip.
    pub fn build_export_config(&self, custom: Option<&ColumnConfigMap>) -> ColumnConfigMap {
        custom
            .unwrap_or(&self.column_config)
            .iter()
            .filter(|(_, config)| config.as_ref().is_none_or(ColumnConfig::is_exportable))
            .map(|(field, config)| {
                let config = config.as_ref().map(|config| ColumnConfig {
                    exportable: None,
                    ..config.clone()
                });
                (field.clone(), config)
            })
            .collect()
    }

    pub fn export_table(
        &self,
        rows: &[Row],
        file_name: Option<&str>,
        options: &ExportOptions,
    ) -> Result<PathBuf> {
        let export_config = self.build_export_config(options.column_config.as_ref());
        self.exporter
            .array_to_excel(rows, &export_config, &options.type_options, file_name)
    }

    /// Export exactly `fields`, in that order. Fields without a column
    /// configuration are dropped from the sheet.
    pub fn export_table_with_fields<S: AsRef<str>>(
        &self,
        rows: &[Row],
        fields: &[S],
        file_name: Option<&str>,
        options: &ExportOptions,
    ) -> Result<PathBuf> {
        let filtered_rows: Vec<Row> = rows
            .iter()
            .map(|row| {
                fields
                    .iter()
                    .filter_map(|field| {
                        let field = field.as_ref();
                        row.get(field).map(|value| (field.to_string(), value.clone()))
                    })
                    .collect::<Row>()
            })
            .collect();

        let selected_config: ColumnConfigMap = fields
            .iter()
            .map(|field| {
                let field = field.as_ref();
                let config = self.column_config.get(field).cloned().flatten();
                (field.to_string(), config)
            })
            .collect();

        debug!(fields = fields.len(), rows = rows.len(), "Exporting selected fields");

        let export_config = self.build_export_config(Some(&selected_config));
        self.exporter.array_to_excel(
            &filtered_rows,
            &export_config,
            &options.type_options,
            file_name,
        )
    }

    pub fn export_all_exportable_columns(
        &self,
        rows: &[Row],
        file_name: Option<&str>,
        options: &ExportOptions,
    ) -> Result<PathBuf> {
        let fields = self.exportable_fields();
        self.export_table_with_fields(rows, &fields, file_name, options)
    }

    pub fn export_selected_columns(
        &self,
        rows: &[Row],
        file_name: Option<&str>,
        options: &ExportOptions,
    ) -> Result<PathBuf> {
        let fields = self.selected_fields();
        self.export_table_with_fields(rows, &fields, file_name, options)
    }
}
