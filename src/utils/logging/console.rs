//! Console output utilities
//!
//! This module provides utilities for formatted console output.

/// Render rows as a bordered, left-aligned text table
#[must_use]
pub fn render_table(title: &str, headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let border = widths.iter().fold(String::from("+"), |mut line, width| {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
        line
    });
    let mut lines = vec![title.to_string(), border.clone()];
    lines.push(format_row(&widths, headers.iter().copied()));
    lines.push(border.clone());
    lines.extend(
        rows.iter()
            .map(|row| format_row(&widths, row.iter().map(String::as_str))),
    );
    lines.push(border);

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn format_row<'a>(widths: &[usize], mut cells: impl Iterator<Item = &'a str>) -> String {
    widths.iter().fold(String::from("|"), |mut line, &width| {
        let cell = cells.next().unwrap_or_default();
        line.push_str(&format!(" {cell:<width$} |"));
        line
    })
}

/// Print a table to stdout
pub fn print_table(title: &str, headers: &[&str], rows: &[Vec<String>]) {
    print!("{}", render_table(title, headers, rows));
}
