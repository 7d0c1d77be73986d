use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use crate::export::config::build_export_config;
use crate::export::types::{ColumnConfigMap, ColumnWidth, Row};
use crate::utils::cell_reference;

/// In-memory sheet: header row followed by data rows, addressed by
/// zero-based `(row, col)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    columns: Vec<String>,
    rows: Vec<Row>,
    column_widths: Vec<ColumnWidth>,
    cell_formats: BTreeMap<(usize, usize), String>,
}

impl Sheet {
    /// Field names in column order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Header row first, then data rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn column_widths(&self) -> &[ColumnWidth] {
        &self.column_widths
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Value> {
        let key = self.columns.get(col)?;
        self.rows.get(row)?.get(key)
    }

    pub fn cell_format(&self, row: usize, col: usize) -> Option<&str> {
        self.cell_formats.get(&(row, col)).map(String::as_str)
    }

    pub fn cell_formats(&self) -> impl Iterator<Item = ((usize, usize), &str)> {
        self.cell_formats
            .iter()
            .map(|(coord, format)| (*coord, format.as_str()))
    }

    /// Attach a display format to an existing cell. Returns `false` and does
    /// nothing when the cell has no value; `null` is written as an empty cell
    /// and counts as none.
    pub fn set_cell_format(&mut self, row: usize, col: usize, format: &str) -> bool {
        if matches!(self.cell(row, col), None | Some(Value::Null)) {
            return false;
        }
        self.cell_formats.insert((row, col), format.to_string());
        true
    }
}

/// Assemble a sheet from the column configuration and already transformed rows.
pub fn create_sheet(columns: &ColumnConfigMap, transformed_rows: &[Row]) -> Sheet {
    let export_config = build_export_config(columns);

    let header: Row = export_config
        .header_row
        .iter()
        .map(|(key, label)| (key.clone(), Value::String(label.clone())))
        .collect();

    let mut rows = Vec::with_capacity(transformed_rows.len() + 1);
    rows.push(header);
    rows.extend(transformed_rows.iter().cloned());

    let mut sheet = Sheet {
        columns: export_config.configured_keys.clone(),
        rows,
        column_widths: Vec::new(),
        cell_formats: BTreeMap::new(),
    };

    if !export_config.column_widths.is_empty() {
        sheet.column_widths = export_config.column_widths.clone();
    }

    for (key, date_format) in &export_config.date_format_map {
        let Some(col) = export_config.column_index(key) else {
            continue;
        };
        let applied = (1..sheet.row_count())
            .filter(|&row| sheet.set_cell_format(row, col, date_format))
            .count();
        debug!(
            column = %key,
            first_cell = %cell_reference((1, col)),
            format = %date_format,
            applied,
            "Applied date format"
        );
    }

    sheet
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::types::{ColumnConfig, ColumnType};
    use serde_json::json;

    fn row(value: Value) -> Row {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn header_then_data_with_widths() {
        let mut columns = ColumnConfigMap::new();
        columns.insert("id".into(), Some(ColumnConfig::new("ID").width(10.0)));
        columns.insert("name".into(), Some(ColumnConfig::new("姓名").width(15.0)));
        let data = vec![
            row(json!({"id": 1, "name": "张三"})),
            row(json!({"id": 2, "name": "李四"})),
        ];

        let sheet = create_sheet(&columns, &data);

        assert_eq!(
            sheet.rows().to_vec(),
            vec![
                row(json!({"id": "ID", "name": "姓名"})),
                row(json!({"id": 1, "name": "张三"})),
                row(json!({"id": 2, "name": "李四"})),
            ]
        );
        assert_eq!(
            sheet.column_widths(),
            &[ColumnWidth { width: 10.0 }, ColumnWidth { width: 15.0 }]
        );
        assert_eq!(sheet.cell(0, 1), Some(&json!("姓名")));
    }

    #[test]
    fn absent_column_is_skipped() {
        let mut columns = ColumnConfigMap::new();
        columns.insert("id".into(), Some(ColumnConfig::new("ID")));
        columns.insert("name".into(), None);

        let sheet = create_sheet(&columns, &[]);

        assert_eq!(sheet.rows().to_vec(), vec![row(json!({"id": "ID"}))]);
        assert_eq!(sheet.columns(), &["id".to_string()]);
        assert_eq!(sheet.column_widths(), &[ColumnWidth { width: 10.0 }]);
    }

    #[test]
    fn empty_configuration_has_no_widths() {
        let sheet = create_sheet(&ColumnConfigMap::new(), &[]);
        assert!(sheet.column_widths().is_empty());
        assert_eq!(sheet.row_count(), 1);
    }

    #[test]
    fn date_format_applies_to_present_body_cells_only() {
        let mut columns = ColumnConfigMap::new();
        columns.insert("name".into(), Some(ColumnConfig::new("姓名")));
        columns.insert(
            "registerTime".into(),
            Some(
                ColumnConfig::new("注册时间")
                    .kind(ColumnType::Date)
                    .date_format("yyyy-mm-dd"),
            ),
        );
        let data = vec![
            row(json!({"name": "a", "registerTime": "2025-01-01"})),
            row(json!({"name": "b"})),
            row(json!({"name": "c", "registerTime": 45658})),
        ];

        let sheet = create_sheet(&columns, &data);

        assert_eq!(sheet.cell_format(0, 1), None);
        assert_eq!(sheet.cell_format(1, 1), Some("yyyy-mm-dd"));
        assert_eq!(sheet.cell_format(2, 1), None);
        assert_eq!(sheet.cell(2, 1), None);
        assert_eq!(sheet.cell_format(3, 1), Some("yyyy-mm-dd"));
        assert_eq!(sheet.cell_formats().count(), 2);
    }

    #[test]
    fn set_cell_format_does_not_create_cells() {
        let mut columns = ColumnConfigMap::new();
        columns.insert("id".into(), Some(ColumnConfig::new("ID")));
        let mut sheet = create_sheet(&columns, &[]);

        assert!(!sheet.set_cell_format(1, 0, "0.00"));
        assert!(!sheet.set_cell_format(0, 5, "0.00"));
        assert_eq!(sheet.row_count(), 1);
    }

    #[test]
    fn null_cells_get_no_date_format() {
        let mut columns = ColumnConfigMap::new();
        columns.insert(
            "d".into(),
            Some(ColumnConfig::new("日期").date_format("yyyy-mm-dd")),
        );
        let data = vec![row(json!({"d": null})), row(json!({"d": "2025-01-01"}))];

        let mut sheet = create_sheet(&columns, &data);

        assert_eq!(sheet.cell(1, 0), Some(&Value::Null));
        assert_eq!(sheet.cell_format(1, 0), None);
        assert_eq!(sheet.cell_format(2, 0), Some("yyyy-mm-dd"));
        assert_eq!(sheet.cell_formats().count(), 1);
        assert!(!sheet.set_cell_format(1, 0, "0.00"));
    }
}
