use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::warn;

use table_export::export::{self, ExcelExporter};
use table_export::logging;
use table_export::table::{ExportOptions, TableExport};
use table_export::users::{self, MockUserSource, PageQuery, UserFilter, UserList};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of mock users to generate
    #[arg(long, short = 'n', default_value = "100")]
    users: usize,

    /// Only export users whose name contains this text
    #[arg(long)]
    name: Option<String>,

    /// Page number to export (1-based)
    #[arg(long, short = 'p', default_value = "1")]
    page: usize,

    /// Page size; values outside 10, 20, 50, 100 are accepted with a warning
    #[arg(long, short = 's', default_value = "20")]
    page_size: usize,

    /// Directory the xlsx file is written to
    #[arg(long, short = 'o', default_value = ".")]
    output_dir: PathBuf,

    /// File name without the .xlsx extension
    #[arg(long, short = 'f')]
    file_name: Option<String>,

    /// Comma-separated fields to export, in this order
    #[arg(long, value_delimiter = ',', conflicts_with = "exclude")]
    fields: Vec<String>,

    /// Comma-separated fields to uncheck before exporting the selection
    #[arg(long, value_delimiter = ',')]
    exclude: Vec<String>,

    /// JSON file with the column configuration
    #[arg(long, short = 'c')]
    columns: Option<PathBuf>,

    /// Log level (RUST_LOG overrides it)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging goes to stderr so stdout stays clean
    logging::init_logging(&cli.log_level)?;

    // Load the first page, then move to the requested one
    let mut list = UserList::new(MockUserSource::generate(cli.users));
    list.load_users();
    list.change_page_size(cli.page_size);
    list.change_page_number(cli.page);

    let pagination = list.pagination();
    list.search_users(
        PageQuery {
            page_number: pagination.page_number,
            page_size: pagination.page_size,
        },
        &UserFilter {
            name: cli.name.clone(),
        },
    );

    // Convert users to exportable rows
    let rows = users::users_to_rows(list.users()).context("Failed to convert users to rows")?;

    // Column config from file, or the built-in user columns
    let columns = match &cli.columns {
        Some(path) => export::load_column_config(path)
            .with_context(|| format!("Failed to load column config: {}", path.display()))?,
        None => users::user_columns(),
    };

    let mut table = TableExport::new(columns, ExcelExporter::new(cli.output_dir.clone()));
    let options = ExportOptions::default();
    let file_name = cli.file_name.as_deref();

    // Explicit fields win, then unchecked columns, then everything exportable
    let path = if !cli.fields.is_empty() {
        table.export_table_with_fields(&rows, cli.fields.as_slice(), file_name, &options)?
    } else if !cli.exclude.is_empty() {
        table.init_checked_columns();
        for field in &cli.exclude {
            let is_checked = table
                .checked_columns()
                .iter()
                .any(|column| column.field == *field && column.checked);
            if is_checked {
                table.toggle_column(field);
            } else {
                warn!(field = %field, "Column is not selected, nothing to exclude");
            }
        }
        if !table.can_export() {
            anyhow::bail!("No columns left to export");
        }
        table.export_selected_columns(&rows, file_name, &options)?
    } else {
        table.export_all_exportable_columns(&rows, file_name, &options)?
    };

    println!(
        "Exported {} of {} users to {}",
        rows.len(),
        list.pagination().total,
        path.display()
    );

    Ok(())
}
