//! Report generation module - layout, spreadsheet output and export.
//!
//! This module handles:
//! - Turning the component grouping into sheet rows (layout)
//! - Writing the rows to an outlined `.xlsx` workbook
//! - Exporting the grouping as JSON
//!
//! # Module Organization
//!
//! - `types` - Sheet model (RowKind, ReportCell, ReportRow, SheetLayout)
//! - `layout` - Row layout algorithm and linked-issue resolution
//! - `xlsx` - Workbook writer
//! - `export` - JSON grouping export

mod export;
mod layout;
mod types;
mod xlsx;

// Re-export types
pub use types::RenderSummary;
#[cfg(test)]
pub use types::{RowKind, RowSpan};

pub use layout::{LayoutOptions, build_layout};

pub use xlsx::write_workbook;

pub use export::{export_grouping_json, grouping_snapshot};
