//! Workbook file access shared by the append store and the projector.

use std::path::Path;

use serde_json::Value;
use umya_spreadsheet::{CellValue, Spreadsheet, Worksheet};

use crate::error::StoreError;

pub(crate) fn open(path: &Path) -> Result<Spreadsheet, StoreError> {
    if !path.exists() {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }
    umya_spreadsheet::reader::xlsx::read(path).map_err(|e| StoreError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

pub(crate) fn save(book: &Spreadsheet, path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    umya_spreadsheet::writer::xlsx::write(book, path).map_err(|e| StoreError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Text of a cell, empty when the cell does not exist.
pub(crate) fn cell_text(sheet: &Worksheet, col: u32, row: u32) -> String {
    sheet
        .get_cell((col, row))
        .map(|cell| cell.get_value().to_string())
        .unwrap_or_default()
}

/// Typed value of a non-empty cell.
pub(crate) fn cell_value(sheet: &Worksheet, col: u32, row: u32) -> Option<CellValue> {
    sheet
        .get_cell((col, row))
        .filter(|cell| !cell.get_value().is_empty())
        .map(|cell| cell.get_cell_value().clone())
}

/// Last used row, counting rows that only hold empty cells.
pub(crate) fn last_row(sheet: &Worksheet) -> u32 {
    sheet
        .get_row_dimensions()
        .iter()
        .map(|row| row.get_row_num().to_owned())
        .fold(sheet.get_highest_row(), u32::max)
}

/// Header row of a sheet, one entry per column up to the last used one.
pub(crate) fn header(sheet: &Worksheet) -> Vec<String> {
    (1..=sheet.get_highest_column())
        .map(|col| cell_text(sheet, col, 1))
        .collect()
}

/// Write a record value; `null` writes an empty string so the row still exists.
pub(crate) fn write_value(sheet: &mut Worksheet, col: u32, row: u32, value: &Value) {
    match value {
        Value::Null => {
            sheet.get_cell_mut((col, row)).set_value_string("");
        }
        Value::Bool(b) => {
            sheet.get_cell_mut((col, row)).set_value_bool(*b);
        }
        Value::Number(n) => match n.as_f64() {
            Some(f) => {
                sheet.get_cell_mut((col, row)).set_value_number(f);
            }
            None => {
                sheet.get_cell_mut((col, row)).set_value_string(n.to_string());
            }
        },
        Value::String(s) => {
            sheet.get_cell_mut((col, row)).set_value_string(s.as_str());
        }
        other => {
            sheet.get_cell_mut((col, row)).set_value_string(other.to_string());
        }
    }
}
