//! Spreadsheet output.
//!
//! Writes a `SheetLayout` to a single-sheet `.xlsx` workbook. The workbook
//! is built completely in memory and only touches disk in `save`, so a
//! failure part way through never leaves a partial file behind.

use super::types::{EMPTY_FILL, ReportCell, RowKind, SheetLayout};
use rust_xlsxwriter::{Color, Format, FormatUnderline, Url, Workbook, Worksheet, XlsxError};
use std::path::Path;

const SHEET_NAME: &str = "Components";
const KEY_COLUMN: u16 = 1;

/// Write `layout` to a new workbook at `path`.
pub fn write_workbook(layout: &SheetLayout, path: &Path) -> Result<(), String> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    populate_worksheet(worksheet, layout).map_err(|e| format!("Failed to render report: {}", e))?;

    workbook
        .save(path)
        .map_err(|e| format!("Failed to save report to {}: {}", path.display(), e))
}

/// Formats for one row kind: plain, highlighted, and their hyperlink variants.
struct RowFormats {
    plain: Format,
    highlight: Format,
    link: Format,
    link_highlight: Format,
}

impl RowFormats {
    fn for_kind(kind: RowKind) -> Self {
        let mut base = Format::new();
        if kind.bold() {
            base = base.set_bold();
        }
        if let Some(fill) = kind.fill() {
            base = base.set_background_color(Color::RGB(fill));
        }

        let highlight = base.clone().set_background_color(Color::RGB(EMPTY_FILL));
        let link = base.clone().set_font_color(Color::Blue).set_underline(FormatUnderline::Single);
        let link_highlight = highlight.clone().set_font_color(Color::Blue).set_underline(FormatUnderline::Single);

        RowFormats { plain: base, highlight, link, link_highlight }
    }

    fn pick(&self, cell: &ReportCell) -> &Format {
        match (cell.hyperlink.is_some(), cell.highlight) {
            (false, false) => &self.plain,
            (false, true) => &self.highlight,
            (true, false) => &self.link,
            (true, true) => &self.link_highlight,
        }
    }
}

fn populate_worksheet(worksheet: &mut Worksheet, layout: &SheetLayout) -> Result<(), XlsxError> {
    worksheet.set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold();
    for (col, header) in layout.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, column_index(col), *header, &header_format)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    if let Some(width) = layout.key_column_width {
        worksheet.set_column_width(KEY_COLUMN, width)?;
    }

    let formats = [RowKind::Component, RowKind::Story, RowKind::Subtask, RowKind::Linked]
        .map(|kind| (kind, RowFormats::for_kind(kind)));

    for (index, row) in layout.rows.iter().enumerate() {
        let sheet_row = u32::try_from(index + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
        let Some((_, row_formats)) = formats.iter().find(|(kind, _)| *kind == row.kind) else {
            continue;
        };

        for (col, cell) in row.cells.iter().enumerate() {
            let col = column_index(col);
            let format = row_formats.pick(cell);
            match &cell.hyperlink {
                Some(link) => {
                    worksheet.write_url_with_format(sheet_row, col, Url::new(link).set_text(&cell.text), format)?;
                }
                None if cell.text.is_empty() => {
                    worksheet.write_blank(sheet_row, col, format)?;
                }
                None => {
                    worksheet.write_string_with_format(sheet_row, col, &cell.text, format)?;
                }
            }
        }
    }

    for span in &layout.outline_groups {
        worksheet.group_rows_collapsed(span.first, span.last)?;
    }

    Ok(())
}

fn column_index(col: usize) -> u16 {
    u16::try_from(col).unwrap_or(u16::MAX)
}
