//! Append-only run history table.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::StoreError;
use crate::record::FlatRecord;
use crate::workbook;

/// Result of one append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendOutcome {
    /// 1-based sheet row the record was written to.
    pub row: u32,
    /// Header columns added by this append.
    pub new_columns: Vec<String>,
    /// Whether the table file was created.
    pub created: bool,
}

/// Appends flattened run records as rows of the workbook's first sheet.
///
/// The header row only ever grows: keys unseen so far are appended after
/// the existing columns, and earlier rows are never rewritten.
pub struct AppendStore {
    path: PathBuf,
}

impl AppendStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &FlatRecord) -> Result<AppendOutcome, StoreError> {
        let created = !self.path.exists();
        let mut book = if created {
            umya_spreadsheet::new_file()
        } else {
            workbook::open(&self.path)?
        };

        let sheet = book
            .get_sheet_mut(&0)
            .ok_or_else(|| StoreError::Sheet("workbook has no sheets".to_string()))?;

        let mut header = if created {
            Vec::new()
        } else {
            workbook::header(sheet)
        };

        let new_columns: Vec<String> = record
            .keys()
            .filter(|key| !header.iter().any(|h| h == key))
            .map(str::to_string)
            .collect();

        for key in &new_columns {
            header.push(key.clone());
            let col = header.len() as u32;
            sheet.get_cell_mut((col, 1)).set_value_string(key.as_str());
        }
        if !new_columns.is_empty() {
            debug!("Header extended with {} columns", new_columns.len());
        }

        let row = if created {
            2
        } else {
            workbook::last_row(sheet).max(1) + 1
        };
        let mut written = false;
        for (idx, key) in header.iter().enumerate() {
            if let Some(value) = record.get(key) {
                workbook::write_value(sheet, idx as u32 + 1, row, value);
                written = true;
            }
        }
        if !written {
            sheet.get_cell_mut((1, row)).set_value_string("");
        }

        workbook::save(&book, &self.path)?;

        if created {
            info!("Results written to new table {}", self.path.display());
        } else {
            info!("Results appended to {} (row {})", self.path.display(), row);
        }

        Ok(AppendOutcome {
            row,
            new_columns,
            created,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::TempDir;

    fn record(pairs: &[(&str, &str)]) -> FlatRecord {
        let mut record = FlatRecord::new();
        for (k, v) in pairs {
            record.insert(*k, *v);
        }
        record
    }

    fn read_rows(path: &Path) -> Vec<Vec<String>> {
        let book = umya_spreadsheet::reader::xlsx::read(path).unwrap();
        let sheet = book.get_sheet(&0).unwrap();
        (1..=sheet.get_highest_row())
            .map(|row| {
                (1..=sheet.get_highest_column())
                    .map(|col| workbook::cell_text(sheet, col, row))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_creates_table_with_record_key_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("outputs").join("results.xlsx");
        let store = AppendStore::new(&path);

        let outcome = store
            .append(&record(&[("run_timestamp", "t1"), ("amazon_1_price", "$42.99")]))
            .unwrap();
        assert!(outcome.created);
        assert_eq!(outcome.row, 2);

        let rows = read_rows(&path);
        assert_eq!(rows[0], vec!["run_timestamp", "amazon_1_price"]);
        assert_eq!(rows[1], vec!["t1", "$42.99"]);
    }

    #[test]
    fn test_header_grows_and_prior_rows_are_kept() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.xlsx");
        let store = AppendStore::new(&path);

        store.append(&record(&[("a", "1"), ("b", "2")])).unwrap();
        let outcome = store.append(&record(&[("c", "3"), ("a", "4")])).unwrap();
        assert!(!outcome.created);
        assert_eq!(outcome.row, 3);
        assert_eq!(outcome.new_columns, vec!["c".to_string()]);

        let rows = read_rows(&path);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["a", "b", "c"]);
        assert_eq!(rows[1], vec!["1", "2", ""]);
        assert_eq!(rows[2], vec!["4", "", "3"]);
    }

    #[test]
    fn test_row_count_increases_by_one_per_append() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.xlsx");
        let store = AppendStore::new(&path);

        for i in 0..4 {
            let outcome = store.append(&record(&[("run_timestamp", "t")])).unwrap();
            assert_eq!(outcome.row, i + 2);
        }
        assert_eq!(read_rows(&path).len(), 5);
    }

    #[test]
    fn test_null_values_leave_empty_cells() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.xlsx");
        let store = AppendStore::new(&path);

        let mut rec = FlatRecord::new();
        rec.insert("amazon_1_file", Value::Null);
        rec.insert("amazon_1_status", "error: timeout");
        store.append(&rec).unwrap();

        let rows = read_rows(&path);
        assert_eq!(rows[0], vec!["amazon_1_file", "amazon_1_status"]);
        assert_eq!(rows[1], vec!["", "error: timeout"]);
    }

    #[test]
    fn test_all_null_records_still_take_a_row() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.xlsx");
        let store = AppendStore::new(&path);
        store.append(&record(&[("k", "v")])).unwrap();

        let mut empty = FlatRecord::new();
        empty.insert("k", Value::Null);
        let first = store.append(&empty).unwrap();
        let second = store.append(&empty).unwrap();
        assert_eq!(first.row, 3);
        assert_eq!(second.row, 4);

        let third = store.append(&record(&[("k", "w")])).unwrap();
        assert_eq!(third.row, 5);
        assert_eq!(read_rows(&path)[4], vec!["w"]);
    }

    #[test]
    fn test_appends_to_first_sheet_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.xlsx");
        let store = AppendStore::new(&path);
        store.append(&record(&[("a", "1")])).unwrap();

        let mut book = umya_spreadsheet::reader::xlsx::read(&path).unwrap();
        book.new_sheet("converted").unwrap();
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();

        store.append(&record(&[("a", "2")])).unwrap();
        let book = umya_spreadsheet::reader::xlsx::read(&path).unwrap();
        assert_eq!(book.get_sheet(&0).unwrap().get_highest_row(), 3);
        assert_eq!(book.get_sheet_by_name("converted").unwrap().get_highest_row(), 0);
    }
}
