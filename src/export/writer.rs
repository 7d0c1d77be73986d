use std::path::Path;

use indexmap::IndexMap;
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook, Worksheet};
use serde_json::Value;

use crate::error::Result;
use crate::export::converters::date_string_to_excel_serial;
use crate::export::sheet::Sheet;

/// Named, ordered collection of sheets.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: IndexMap<String, Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `sheet` under `name`, replacing any sheet already using that name.
    pub fn append_sheet(&mut self, sheet: Sheet, name: &str) {
        self.sheets.insert(name.to_string(), sheet);
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.keys().map(String::as_str).collect()
    }

    pub fn get_sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.get(name)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let mut workbook = self.to_xlsx()?;
        workbook.save(path)?;
        Ok(())
    }

    pub fn save_to_buffer(&self) -> Result<Vec<u8>> {
        let mut workbook = self.to_xlsx()?;
        Ok(workbook.save_to_buffer()?)
    }

    fn to_xlsx(&self) -> Result<XlsxWorkbook> {
        let mut workbook = XlsxWorkbook::new();

        for (name, sheet) in &self.sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(name)?;
            write_sheet(worksheet, sheet)?;
        }

        Ok(workbook)
    }
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &Sheet) -> Result<()> {
    for (col, column_width) in sheet.column_widths().iter().enumerate() {
        worksheet.set_column_width(col as u16, column_width.width)?;
    }

    for (row_idx, row) in sheet.rows().iter().enumerate() {
        for (col_idx, key) in sheet.columns().iter().enumerate() {
            // Missing fields stay empty cells
            let Some(value) = row.get(key) else {
                continue;
            };

            let format = sheet
                .cell_format(row_idx, col_idx)
                .map(|num_format| Format::new().set_num_format(num_format));

            write_cell(
                worksheet,
                row_idx as u32,
                col_idx as u16,
                value,
                format.as_ref(),
            )?;
        }
    }

    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &Value,
    format: Option<&Format>,
) -> Result<()> {
    match (value, format) {
        (Value::Null, _) => {}
        (Value::Bool(b), Some(format)) => {
            worksheet.write_boolean_with_format(row, col, *b, format)?;
        }
        (Value::Bool(b), None) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        (Value::Number(n), Some(format)) => {
            worksheet.write_number_with_format(row, col, n.as_f64().unwrap_or_default(), format)?;
        }
        (Value::Number(n), None) => {
            worksheet.write_number(row, col, n.as_f64().unwrap_or_default())?;
        }
        (Value::String(s), Some(format)) => match date_string_to_excel_serial(s) {
            Some(serial) => {
                worksheet.write_number_with_format(row, col, serial, format)?;
            }
            None => {
                worksheet.write_string_with_format(row, col, s, format)?;
            }
        },
        (Value::String(s), None) => {
            worksheet.write_string(row, col, s)?;
        }
        (Value::Array(_) | Value::Object(_), _) => {
            worksheet.write_string(row, col, value.to_string())?;
        }
    }

    Ok(())
}
