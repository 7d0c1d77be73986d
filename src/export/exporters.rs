use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::export::converters::transform_data;
use crate::export::sheet::{Sheet, create_sheet};
use crate::export::types::{
    ColumnConfigMap, DEFAULT_FILE_NAME, DEFAULT_SHEET_NAME, Row, TypeOptions,
};
use crate::export::writer::Workbook;

/// Writes sheets as `<file_name>.xlsx` files into an output directory.
#[derive(Debug, Clone)]
pub struct ExcelExporter {
    output_dir: PathBuf,
}

impl Default for ExcelExporter {
    fn default() -> Self {
        Self::new(".")
    }
}

impl ExcelExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path the export named `file_name` is written to.
    pub fn file_path(&self, file_name: Option<&str>) -> PathBuf {
        let file_name = file_name.unwrap_or(DEFAULT_FILE_NAME);
        self.output_dir.join(format!("{}.xlsx", file_name))
    }

    /// Wrap `sheet` in a single-sheet workbook and write it out.
    pub fn export_to_file(&self, sheet: Sheet, file_name: Option<&str>) -> Result<PathBuf> {
        let path = self.file_path(file_name);

        let mut workbook = Workbook::new();
        workbook.append_sheet(sheet, DEFAULT_SHEET_NAME);
        workbook.save(&path)?;

        info!(path = %path.display(), "Exported workbook");
        Ok(path)
    }

    /// Transform `rows`, assemble the sheet, and write it.
    pub fn array_to_excel(
        &self,
        rows: &[Row],
        columns: &ColumnConfigMap,
        options: &TypeOptions,
        file_name: Option<&str>,
    ) -> Result<PathBuf> {
        let transformed = transform_data(rows, columns, options);
        let sheet = create_sheet(columns, &transformed);
        self.export_to_file(sheet, file_name)
    }
}
