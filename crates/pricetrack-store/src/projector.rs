//! Curated column views over the history table.

use std::path::Path;

use tracing::{info, warn};
use umya_spreadsheet::CellValue;

use crate::column::ColumnToken;
use crate::error::StoreError;
use crate::workbook;

/// Summary of a projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub sheet: String,
    /// Output columns laid out, blanks and invalid references included.
    pub columns: u32,
    /// Rows copied from the source sheet.
    pub rows: u32,
}

/// Builds a sheet from selected source columns in layout order.
///
/// The target sheet is dropped and recreated on every run, so projecting
/// twice over an unchanged source gives the same sheet.
#[derive(Debug, Clone)]
pub struct ColumnProjector {
    sheet_name: String,
    source_sheet: Option<String>,
}

impl ColumnProjector {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            source_sheet: None,
        }
    }

    /// Read from a named sheet instead of the first one.
    pub fn with_source_sheet(mut self, name: Option<String>) -> Self {
        self.source_sheet = name;
        self
    }

    pub fn project<S: AsRef<str>>(&self, path: &Path, layout: &[S]) -> Result<Projection, StoreError> {
        let mut book = workbook::open(path)?;

        let source = match &self.source_sheet {
            Some(name) => book
                .get_sheet_by_name(name)
                .ok_or_else(|| StoreError::SheetNotFound(name.clone()))?,
            None => book
                .get_sheet(&0)
                .ok_or_else(|| StoreError::Sheet("workbook has no sheets".to_string()))?,
        };
        if source.get_name() == self.sheet_name {
            return Err(StoreError::Sheet(format!(
                "source and target sheet are both '{}'",
                self.sheet_name
            )));
        }

        let max_row = source.get_highest_row();
        let tokens: Vec<ColumnToken> = layout
            .iter()
            .map(|token| {
                let parsed = ColumnToken::parse(token.as_ref());
                if parsed == ColumnToken::Invalid {
                    warn!("Invalid column reference '{}', leaving column empty", token.as_ref());
                }
                parsed
            })
            .collect();

        // Source values per output column, read before the target is created.
        let columns: Vec<Vec<(u32, CellValue)>> = tokens
            .iter()
            .map(|token| match token {
                ColumnToken::Source(col) => (1..=max_row)
                    .filter_map(|row| workbook::cell_value(source, *col, row).map(|v| (row, v)))
                    .collect(),
                ColumnToken::Blank | ColumnToken::Invalid => Vec::new(),
            })
            .collect();

        if book.get_sheet_by_name(&self.sheet_name).is_some() {
            book.remove_sheet_by_name(&self.sheet_name)
                .map_err(|e| StoreError::Sheet(e.to_string()))?;
        }
        let target = book
            .new_sheet(self.sheet_name.as_str())
            .map_err(|e| StoreError::Sheet(e.to_string()))?;

        for (idx, cells) in columns.iter().enumerate() {
            let col = idx as u32 + 1;
            for (row, value) in cells {
                target.get_cell_mut((col, *row)).set_cell_value(value.clone());
            }
        }

        workbook::save(&book, path)?;
        info!(
            "Projected {} columns x {} rows into sheet '{}'",
            tokens.len(),
            max_row,
            self.sheet_name
        );

        Ok(Projection {
            sheet: self.sheet_name.clone(),
            columns: tokens.len() as u32,
            rows: max_row,
        })
    }
}

#[cfg(test)]
#[path = "projector_tests.rs"]
mod tests;
