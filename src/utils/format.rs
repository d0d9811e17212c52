use unicode_width::UnicodeWidthStr;

const COLUMN_GAP: usize = 2;

/// "never" when a kata has no history, otherwise "N days ago"
pub fn format_days_ago(days: Option<i64>) -> String {
    match days {
        None => "never".to_string(),
        Some(d) => format!("{} days ago", d),
    }
}

/// Format a completion count as "Nx"
pub fn format_times(times: usize) -> String {
    format!("{}x", times)
}

/// Left-aligned text table, columns separated by two spaces.
#[derive(Debug, Clone, Default)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::default();
        table.push(header);
        table
    }

    pub fn push<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    /// Add a row of dashes as wide as each header cell; empty headers stay empty.
    pub fn push_rule(&mut self) {
        let rule: Vec<String> = self
            .rows
            .first()
            .map(|header| header.iter().map(|h| "-".repeat(h.width())).collect())
            .unwrap_or_default();
        self.rows.push(rule);
    }

    pub fn render(&self) -> String {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0usize; columns];
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.width());
            }
        }

        let mut out = String::new();
        for row in &self.rows {
            let mut line = String::new();
            for (i, cell) in row.iter().enumerate() {
                line.push_str(cell);
                if i + 1 < row.len() {
                    let pad = widths[i] - cell.width() + COLUMN_GAP;
                    line.push_str(&" ".repeat(pad));
                }
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_ago_wording() {
        assert_eq!(format_days_ago(None), "never");
        assert_eq!(format_days_ago(Some(0)), "0 days ago");
        assert_eq!(format_days_ago(Some(12)), "12 days ago");
        assert_eq!(format_times(7), "7x");
    }

    #[test]
    fn aligns_columns() {
        let mut table = Table::new(["Kata", "Done", "URL"]);
        table.push_rule();
        table.push(["bowling", "12x", "https://a"]);
        table.push(["tennis", "1x", ""]);

        let expected = "\
Kata     Done  URL
----     ----  ---
bowling  12x   https://a
tennis   1x
";
        assert_eq!(table.render(), expected);
    }

    #[test]
    fn wide_characters_count_by_display_width() {
        let mut table = Table::new(["Name", "Level"]);
        table.push(["漢字", "+"]);
        table.push(["ab", "++"]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[1], "漢字  +");
        assert_eq!(lines[2], "ab    ++");
    }

    #[test]
    fn empty_table_renders_nothing() {
        assert_eq!(Table::default().render(), "");
    }
}
