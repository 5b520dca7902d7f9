//! Plain-text table rendering for terminal output

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::knowledge::Document;

/// Render rows as left-aligned columns separated by two spaces.
///
/// Widths are measured in terminal cells, so wide characters line up.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(idx) {
                *width = (*width).max(cell.width());
            }
        }
    }

    let mut out = String::new();
    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    out.push_str(&format_row(&header_cells, &widths).bold().to_string());
    out.push('\n');
    for row in rows {
        out.push_str(&format_row(row, &widths));
        out.push('\n');
    }
    out
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let last = cells.len().saturating_sub(1);
    let mut line = String::new();
    for (idx, cell) in cells.iter().enumerate() {
        line.push_str(cell);
        if idx < last {
            let pad = widths.get(idx).copied().unwrap_or(0).saturating_sub(cell.width());
            line.push_str(&" ".repeat(pad + 2));
        }
    }
    line
}

/// Standard document columns: slug, title, category, tags, created date
pub fn document_row(doc: &Document) -> Vec<String> {
    vec![
        doc.slug.clone(),
        doc.title.clone(),
        doc.category.clone(),
        doc.tags_display(),
        doc.created_at.format("%Y-%m-%d").to_string(),
    ]
}

pub const DOCUMENT_HEADERS: [&str; 5] = ["SLUG", "TITLE", "CATEGORY", "TAGS", "CREATED"];
