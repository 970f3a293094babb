//! Spreadsheet persistence for run records.
//!
//! - [`AppendStore`] appends one flattened run record per invocation,
//!   extending the header as new keys show up.
//! - [`ColumnProjector`] rebuilds a curated view sheet from a
//!   letter-addressed column layout.

mod append;
mod column;
mod error;
mod projector;
mod record;
mod workbook;

pub use append::{AppendOutcome, AppendStore};
pub use column::{column_index, ColumnToken, MAX_COLUMN};
pub use error::StoreError;
pub use projector::{ColumnProjector, Projection};
pub use record::FlatRecord;
