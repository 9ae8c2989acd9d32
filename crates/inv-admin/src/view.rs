//! Table view-models.
//!
//! Pages never print; they hand back a [`Table`] of typed [`Cell`]s. The
//! console renders it with [`Display`], a browser front end with
//! [`Table::to_html`].

use std::fmt::{self, Display, Write as _};

use inv_model::Id;
use rust_decimal::Decimal;

use crate::format::format_currency;

/// Text shown in place of a value the backend cannot provide
pub const UNSUPPORTED_TEXT: &str = "unsupported";

/// A single table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    /// De-emphasized text, used for absent optional fields
    Muted(String),
    Integer(i64),
    Money(Decimal),
    /// A count shown as a badge
    Badge(usize),
    Image { url: String, alt: String },
    /// A value the backend has no endpoint for
    Unsupported,
}

impl Cell {
    /// `Text` for a present value, `Muted(placeholder)` otherwise
    pub fn optional(value: Option<&str>, placeholder: &str) -> Self {
        match value.filter(|v| !v.trim().is_empty()) {
            Some(v) => Self::Text(v.to_string()),
            None => Self::Muted(placeholder.to_string()),
        }
    }

    fn to_html(&self) -> String {
        match self {
            Self::Text(text) => escape_html(text),
            Self::Muted(text) => format!("<span class=\"text-muted\">{}</span>", escape_html(text)),
            Self::Integer(n) => n.to_string(),
            Self::Money(amount) => escape_html(&format_currency(*amount)),
            Self::Badge(n) => format!("<span class=\"badge\">{n}</span>"),
            Self::Image { url, alt } => format!(
                "<img src=\"{}\" alt=\"{}\" class=\"thumbnail\">",
                escape_html(url),
                escape_html(alt)
            ),
            Self::Unsupported => format!("<span class=\"text-muted unsupported\">{UNSUPPORTED_TEXT}</span>"),
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) | Self::Muted(text) => f.pad(text),
            Self::Integer(n) => f.pad(&n.to_string()),
            Self::Money(amount) => f.pad(&format_currency(*amount)),
            Self::Badge(n) => f.pad(&n.to_string()),
            Self::Image { url, .. } => f.pad(url),
            Self::Unsupported => f.pad(UNSUPPORTED_TEXT),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    /// A data row; `id` is the record it was rendered from, if any
    Record { id: Option<Id>, cells: Vec<Cell> },
    /// A single cell spanning the whole table, e.g. "No products found"
    Placeholder { text: String, colspan: usize },
}

impl Row {
    pub fn record(id: Id, cells: Vec<Cell>) -> Self {
        Self::Record {
            id: Some(id),
            cells,
        }
    }

    pub fn anonymous(cells: Vec<Cell>) -> Self {
        Self::Record { id: None, cells }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<&'static str>,
    pub rows: Vec<Row>,
}

impl Table {
    /// A table with exactly one placeholder row spanning every column
    pub fn placeholder(columns: &[&'static str], text: impl Into<String>) -> Self {
        Self {
            columns: columns.to_vec(),
            rows: vec![Row::Placeholder {
                text: text.into(),
                colspan: columns.len(),
            }],
        }
    }

    /// Build one row per record, or a single placeholder row when there are none.
    pub fn from_records<T>(
        columns: &[&'static str],
        empty_text: &str,
        records: impl IntoIterator<Item = T>,
        row: impl FnMut(T) -> Row,
    ) -> Self {
        let rows: Vec<Row> = records.into_iter().map(row).collect();
        if rows.is_empty() {
            return Self::placeholder(columns, empty_text);
        }
        Self {
            columns: columns.to_vec(),
            rows,
        }
    }

    /// Number of data rows, placeholders excluded
    pub fn record_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(row, Row::Record { .. }))
            .count()
    }

    /// Ids of the records in display order
    pub fn record_ids(&self) -> Vec<Id> {
        self.rows
            .iter()
            .filter_map(|row| match row {
                Row::Record { id, .. } => *id,
                Row::Placeholder { .. } => None,
            })
            .collect()
    }

    /// The placeholder text, if this table is showing one
    pub fn placeholder_text(&self) -> Option<&str> {
        self.rows.iter().find_map(|row| match row {
            Row::Placeholder { text, .. } => Some(text.as_str()),
            Row::Record { .. } => None,
        })
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from("<table class=\"table\"><thead><tr>");
        for column in &self.columns {
            let _ = write!(html, "<th>{}</th>", escape_html(column));
        }
        html.push_str("</tr></thead><tbody>");
        for row in &self.rows {
            match row {
                Row::Record { cells, .. } => {
                    html.push_str("<tr>");
                    for cell in cells {
                        let _ = write!(html, "<td>{}</td>", cell.to_html());
                    }
                    html.push_str("</tr>");
                }
                Row::Placeholder { text, colspan } => {
                    let _ = write!(
                        html,
                        "<tr><td colspan=\"{colspan}\" class=\"text-center\">{}</td></tr>",
                        escape_html(text)
                    );
                }
            }
        }
        html.push_str("</tbody></table>");
        html
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<Vec<String>> = self
            .rows
            .iter()
            .filter_map(|row| match row {
                Row::Record { cells, .. } => Some(cells.iter().map(Cell::to_string).collect()),
                Row::Placeholder { .. } => None,
            })
            .collect();

        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for cells in &rendered {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }
        let inner = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);

        writeln!(f, "{}", text_line(&self.columns, &widths))?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(f, "{}", rule.join("-+-"))?;

        let mut records = rendered.iter();
        for row in &self.rows {
            match row {
                Row::Record { .. } => {
                    if let Some(cells) = records.next() {
                        writeln!(f, "{}", text_line(cells, &widths))?;
                    }
                }
                Row::Placeholder { text, .. } => {
                    writeln!(f, "{}", format!("{text:^inner$}").trim_end())?;
                }
            }
        }
        Ok(())
    }
}

fn text_line<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell.as_ref()))
        .collect();
    padded.join(" | ").trim_end().to_string()
}

/// An entry of a `<select>`-style picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: Id,
    pub label: String,
}

impl Display for SelectOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>4}  {}", self.value, self.label)
    }
}

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: [&str; 3] = ["ID", "Name", "Price"];

    fn sample() -> Table {
        Table::from_records(&COLUMNS, "Nothing here", [(1, "Tea"), (2, "Matcha")], |(id, name)| {
            Row::record(
                id,
                vec![
                    Cell::Integer(id),
                    Cell::Text(name.to_string()),
                    Cell::Money(Decimal::from(id * 50_000)),
                ],
            )
        })
    }

    #[test]
    fn test_empty_records_render_single_placeholder() {
        let table = Table::from_records(&COLUMNS, "Nothing here", Vec::<i64>::new(), |id| {
            Row::record(id, Vec::new())
        });
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.record_count(), 0);
        assert_eq!(table.placeholder_text(), Some("Nothing here"));
        match &table.rows[0] {
            Row::Placeholder { colspan, .. } => assert_eq!(*colspan, COLUMNS.len()),
            other => panic!("expected placeholder, got {other:?}"),
        }
    }

    #[test]
    fn test_record_ids_follow_row_order() {
        let table = sample();
        assert_eq!(table.record_ids(), vec![1, 2]);
        assert_eq!(table.placeholder_text(), None);
    }

    #[test]
    fn test_display_aligns_columns() {
        let rendered = sample().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "ID | Name   | Price");
        assert_eq!(lines[1], "---+--------+----------");
        assert_eq!(lines[2], "1  | Tea    | 50.000 ₫");
        assert_eq!(lines[3], "2  | Matcha | 100.000 ₫");
    }

    #[test]
    fn test_html_escapes_text_and_sets_colspan() {
        let table = Table {
            columns: COLUMNS.to_vec(),
            rows: vec![Row::record(
                1,
                vec![
                    Cell::Integer(1),
                    Cell::Text("<b>Tea & co</b>".to_string()),
                    Cell::Unsupported,
                ],
            )],
        };
        let html = table.to_html();
        assert!(html.contains("<td>&lt;b&gt;Tea &amp; co&lt;/b&gt;</td>"));
        assert!(html.contains("unsupported"));

        let empty = Table::placeholder(&COLUMNS, "No rows");
        assert!(empty.to_html().contains("<td colspan=\"3\" class=\"text-center\">No rows</td>"));
    }

    #[test]
    fn test_optional_cell() {
        assert_eq!(Cell::optional(Some("x"), "-"), Cell::Text("x".to_string()));
        assert_eq!(Cell::optional(Some("  "), "-"), Cell::Muted("-".to_string()));
        assert_eq!(Cell::optional(None, "No phone"), Cell::Muted("No phone".to_string()));
    }
}
