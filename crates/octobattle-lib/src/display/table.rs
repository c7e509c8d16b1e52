//! Plain column-aligned tables

use super::styling::StyleManager;
use console::measure_text_width;

/// Table display builder
pub struct TableDisplay<'a> {
    styling: &'a StyleManager,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl<'a> TableDisplay<'a> {
    pub fn new(styling: &'a StyleManager) -> Self {
        Self {
            styling,
            headers: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Set table headers
    pub fn header(mut self, headers: &[&str]) -> Self {
        self.headers = headers.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Add a table row
    pub fn row<S: AsRef<str>>(mut self, cells: &[S]) -> Self {
        self.rows
            .push(cells.iter().map(|s| s.as_ref().to_string()).collect());
        self
    }

    /// Render the table, one line per row; empty when there is nothing to show
    pub fn render(&self) -> String {
        let num_cols = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0);
        if num_cols == 0 {
            return String::new();
        }

        let mut col_widths = vec![0; num_cols];
        for row in std::iter::once(&self.headers).chain(&self.rows) {
            for (i, cell) in row.iter().enumerate() {
                col_widths[i] = col_widths[i].max(measure_text_width(cell));
            }
        }

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        if !self.headers.is_empty() {
            lines.push(self.render_row(&self.headers, &col_widths, true));
            lines.push(
                col_widths
                    .iter()
                    .map(|width| "-".repeat(*width))
                    .collect::<Vec<_>>()
                    .join("-+-"),
            );
        }
        for row in &self.rows {
            lines.push(self.render_row(row, &col_widths, false));
        }

        lines.join("\n")
    }

    fn render_row(&self, cells: &[String], widths: &[usize], is_header: bool) -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| {
                let padding = " ".repeat(width.saturating_sub(measure_text_width(cell)));
                if is_header {
                    format!("{}{}", self.styling.style_emphasis(cell), padding)
                } else {
                    format!("{cell}{padding}")
                }
            })
            .collect();

        padded.join(" | ").trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    include!("table.test.rs");
}
