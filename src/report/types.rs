//! Report type definitions for the sheet model.
//!
//! The layout pass produces a `SheetLayout`: plain rows of text cells plus
//! the outline groups to collapse. The xlsx writer turns it into a
//! workbook without making any layout decisions of its own.

/// Fill of story rows
pub const STORY_FILL: u32 = 0x97DFC6;
/// Fill of subtask rows
pub const SUBTASK_FILL: u32 = 0xC0C0C0;
/// Fill of linked-issue rows
pub const LINKED_FILL: u32 = 0xADD8E6;
/// Fill of individual cells with missing or empty data
pub const EMPTY_FILL: u32 = 0xFFFFCC;

/// What a row represents, which decides its base style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Component name row
    Component,
    /// Story row
    Story,
    /// Subtask row, inside a collapsed group under its story
    Subtask,
    /// Linked issue row, inside a collapsed group under its story
    Linked,
}

impl RowKind {
    /// Base fill color of the row, if any.
    pub fn fill(&self) -> Option<u32> {
        match self {
            RowKind::Component => None,
            RowKind::Story => Some(STORY_FILL),
            RowKind::Subtask => Some(SUBTASK_FILL),
            RowKind::Linked => Some(LINKED_FILL),
        }
    }

    pub fn bold(&self) -> bool {
        matches!(self, RowKind::Component | RowKind::Story)
    }
}

/// One cell of a data row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportCell {
    pub text: String,
    /// Only ever set on the Key column
    pub hyperlink: Option<String>,
    /// Missing or empty data; overrides the row fill for this cell only
    pub highlight: bool,
}

impl ReportCell {
    pub fn text(text: impl Into<String>) -> Self {
        ReportCell { text: text.into(), ..Default::default() }
    }
}

/// A data row below the header.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub kind: RowKind,
    pub cells: Vec<ReportCell>,
}

/// Inclusive range of zero-based sheet rows forming one outline group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    pub first: u32,
    pub last: u32,
}

/// The complete sheet: header, data rows and collapsed groups.
///
/// `rows[i]` lives at zero-based sheet row `i + 1`; row 0 is the header.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetLayout {
    pub headers: Vec<&'static str>,
    pub rows: Vec<ReportRow>,
    pub outline_groups: Vec<RowSpan>,
    pub key_column_width: Option<f64>,
}

impl SheetLayout {
    /// Row at zero-based sheet row `sheet_row`, excluding the header.
    #[cfg(test)]
    pub fn row_at(&self, sheet_row: u32) -> Option<&ReportRow> {
        let index = usize::try_from(sheet_row).ok()?.checked_sub(1)?;
        self.rows.get(index)
    }

    pub fn count(&self, kind: RowKind) -> usize {
        self.rows.iter().filter(|r| r.kind == kind).count()
    }
}

/// Row counts of a rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderSummary {
    pub components: usize,
    pub stories: usize,
    pub subtasks: usize,
    pub linked: usize,
}

impl RenderSummary {
    pub fn of(layout: &SheetLayout) -> Self {
        RenderSummary {
            components: layout.count(RowKind::Component),
            stories: layout.count(RowKind::Story),
            subtasks: layout.count(RowKind::Subtask),
            linked: layout.count(RowKind::Linked),
        }
    }

    pub fn data_rows(&self) -> usize {
        self.components + self.stories + self.subtasks + self.linked
    }
}
