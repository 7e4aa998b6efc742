//! Row layout of the component report.
//!
//! Rows are written through a `RowWriter` cursor in this order: for each
//! component, a name row, then per story the story row, its subtasks and
//! its linked issues. Subtask and linked-issue runs become collapsed
//! outline groups.

use super::types::{ReportCell, ReportRow, RowKind, RowSpan, SheetLayout};
use crate::aggregate::{Aggregation, ComponentGroup};
use crate::api::IssueTracker;
use crate::fetch;
use crate::types::{Column, ColumnSet, FieldIds, Issue};
use log::debug;

/// Everything the layout needs besides the grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub columns: ColumnSet,
    pub field_ids: FieldIds,
    /// Tracker base URL used for Key hyperlinks
    pub base_url: String,
    pub key_column_width: Option<f64>,
}

/// Browse link for an issue key.
pub fn browse_url(base_url: &str, key: &str) -> String {
    format!("{}/browse/{}", base_url.trim_end_matches('/'), key)
}

/// Append-only row sink carrying the next free sheet row.
struct RowWriter {
    next_row: u32,
    rows: Vec<ReportRow>,
}

impl RowWriter {
    fn new() -> Self {
        // Row 0 holds the header
        RowWriter { next_row: 1, rows: Vec::new() }
    }

    fn next_row(&self) -> u32 {
        self.next_row
    }

    fn push(&mut self, row: ReportRow) {
        self.rows.push(row);
        self.next_row += 1;
    }

    /// Span of rows written since `start`, if any.
    fn span_since(&self, start: u32) -> Option<RowSpan> {
        (self.next_row > start).then(|| RowSpan { first: start, last: self.next_row - 1 })
    }
}

/// Lay out the whole report.
///
/// Linked issues are fetched here, one story at a time; a story whose links
/// cannot be resolved simply gets no linked rows.
pub fn build_layout(aggregation: &Aggregation, tracker: &dyn IssueTracker, options: &LayoutOptions) -> SheetLayout {
    let columns = options.columns.columns();
    let mut writer = RowWriter::new();
    let mut outline_groups = Vec::new();

    for group in &aggregation.groups {
        layout_component(group, tracker, options, &columns, &mut writer, &mut outline_groups);
    }

    debug!("laid out {} rows with {} outline groups", writer.rows.len(), outline_groups.len());

    SheetLayout {
        headers: columns.iter().map(|c| c.header()).collect(),
        rows: writer.rows,
        outline_groups,
        key_column_width: options.key_column_width,
    }
}

fn layout_component(
    group: &ComponentGroup,
    tracker: &dyn IssueTracker,
    options: &LayoutOptions,
    columns: &[Column],
    writer: &mut RowWriter,
    outline_groups: &mut Vec<RowSpan>,
) {
    writer.push(ReportRow { kind: RowKind::Component, cells: vec![ReportCell::text(&group.name)] });

    for story in &group.stories {
        writer.push(issue_row(story, RowKind::Story, String::new(), columns, options));

        let start = writer.next_row();
        for subtask in group.subtasks_of(&story.key) {
            writer.push(issue_row(subtask, RowKind::Subtask, String::new(), columns, options));
        }
        outline_groups.extend(writer.span_since(start));

        let start = writer.next_row();
        for linked in fetch::fetch_linked_issues(tracker, &story.key) {
            writer.push(issue_row(&linked.issue, RowKind::Linked, linked.label, columns, options));
        }
        outline_groups.extend(writer.span_since(start));
    }
}

/// A row of issue fields; the Component column carries `lead`.
fn issue_row(issue: &Issue, kind: RowKind, lead: String, columns: &[Column], options: &LayoutOptions) -> ReportRow {
    let cells = columns
        .iter()
        .map(|&column| match column {
            Column::Component => ReportCell::text(lead.clone()),
            Column::Key => ReportCell {
                text: issue.key.clone(),
                hyperlink: Some(browse_url(&options.base_url, &issue.key)),
                highlight: false,
            },
            _ => {
                let value = issue.resolve(column, &options.field_ids);
                ReportCell { text: value.display().to_string(), hyperlink: None, highlight: value.is_empty() }
            }
        })
        .collect();

    ReportRow { kind, cells }
}
