//! `project` command.

use std::path::PathBuf;

use pricetrack_config::Config;
use pricetrack_store::ColumnProjector;

/// Rebuild the projected view sheet. A missing table is an error.
pub(crate) fn handle_project(
    config: Config,
    table: Option<PathBuf>,
    sheet: Option<String>,
    source_sheet: Option<String>,
    columns: Option<Vec<String>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let table = table.unwrap_or(config.output.table);
    let sheet = sheet.unwrap_or(config.projection.sheet_name);
    let columns = columns.unwrap_or(config.projection.columns);
    let source_sheet = source_sheet.or(config.projection.source_sheet);

    let projection = ColumnProjector::new(sheet)
        .with_source_sheet(source_sheet)
        .project(&table, &columns)?;

    println!(
        "Projected {} columns x {} rows into sheet '{}' of {}",
        projection.columns,
        projection.rows,
        projection.sheet,
        table.display()
    );
    Ok(())
}
