/// A simple text table for terminal output, with optional per-cell colour
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<(String, Option<u32>)>>,
    col_widths: Vec<usize>,
}

impl Table {
    /// Create a new table with the given headers
    pub fn new(headers: Vec<&str>) -> Self {
        let col_widths = headers.iter().map(|h| h.chars().count()).collect();
        let headers = headers.iter().map(|h| h.to_string()).collect();
        Table {
            headers,
            rows: Vec::new(),
            col_widths,
        }
    }

    /// Add a row where each cell may carry a `0xRRGGBB` colour
    pub fn add_colored_row(&mut self, row: Vec<(&str, Option<u32>)>) {
        let row_cells: Vec<(String, Option<u32>)> =
            row.into_iter().map(|(s, color)| (s.to_string(), color)).collect();

        // Widths count chars, the fr-FR separator is multi-byte
        for (i, (col, _)) in row_cells.iter().enumerate() {
            if i < self.col_widths.len() {
                self.col_widths[i] = self.col_widths[i].max(col.chars().count());
            }
        }

        self.rows.push(row_cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render as plain text
    pub fn render(&self) -> String {
        self.render_with(false)
    }

    /// Render with 24-bit ANSI colours for coloured cells
    pub fn render_ansi(&self) -> String {
        self.render_with(true)
    }

    fn render_with(&self, ansi: bool) -> String {
        let mut output = String::new();

        let header_cells: Vec<(String, Option<u32>)> =
            self.headers.iter().map(|h| (h.clone(), None)).collect();
        output.push_str(&self.render_row(&header_cells, ansi));
        output.push('\n');

        output.push_str(&self.render_separator());
        output.push('\n');

        for row in &self.rows {
            output.push_str(&self.render_row(row, ansi));
            output.push('\n');
        }

        output
    }

    /// Render a single row with proper spacing
    fn render_row(&self, row: &[(String, Option<u32>)], ansi: bool) -> String {
        let mut line = String::new();
        for (i, (col, color)) in row.iter().enumerate() {
            if i < self.col_widths.len() {
                let width = self.col_widths[i];
                let cell = format!("{:<width$}", col, width = width);
                match color {
                    Some(rgb) if ansi => line.push_str(&paint(&cell, *rgb)),
                    _ => line.push_str(&cell),
                }
                if i < row.len() - 1 {
                    line.push_str(" | ");
                }
            }
        }
        line
    }

    /// Render a separator line
    fn render_separator(&self) -> String {
        let mut line = String::new();
        for (i, &width) in self.col_widths.iter().enumerate() {
            line.push_str(&"-".repeat(width));
            if i < self.col_widths.len() - 1 {
                line.push_str("-+-");
            }
        }
        line
    }
}

/// Wrap text in a truecolor foreground escape
fn paint(text: &str, rgb: u32) -> String {
    format!(
        "\x1b[38;2;{};{};{}m{}\x1b[0m",
        (rgb >> 16) & 0xff,
        (rgb >> 8) & 0xff,
        rgb & 0xff,
        text
    )
}
