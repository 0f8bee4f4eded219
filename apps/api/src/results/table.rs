//! Presentation table: final-answer rows with each Link wrapped in an apply anchor.

use serde::Serialize;

use super::{JobRow, COLUMNS};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Company")]
    pub company: Option<String>,
    #[serde(rename = "Location")]
    pub location: Option<String>,
    /// Anchor markup, or `None` when the row had no link.
    #[serde(rename = "Link")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultsTable {
    pub rows: Vec<TableRow>,
}

impl ResultsTable {
    pub fn from_rows(rows: Vec<JobRow>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| TableRow {
                title: row.title,
                company: row.company,
                location: row.location,
                link: row.link.as_deref().map(apply_anchor),
            })
            .collect();
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// HTML table without an index column. Text cells are escaped; link cells
    /// already hold anchor markup.
    pub fn to_html(&self) -> String {
        let mut html = String::from("<table class=\"results\">\n  <thead>\n    <tr>");
        for column in COLUMNS {
            html.push_str(&format!("<th>{column}</th>"));
        }
        html.push_str("</tr>\n  </thead>\n  <tbody>\n");

        for row in &self.rows {
            html.push_str("    <tr>");
            for text in [&row.title, &row.company, &row.location] {
                html.push_str(&format!(
                    "<td>{}</td>",
                    escape_html(text.as_deref().unwrap_or_default())
                ));
            }
            html.push_str(&format!(
                "<td>{}</td>",
                row.link.as_deref().unwrap_or_default()
            ));
            html.push_str("</tr>\n");
        }

        html.push_str("  </tbody>\n</table>");
        html
    }
}

pub fn apply_anchor(url: &str) -> String {
    format!(
        r#"<a href="{}" target="_blank">Apply Here</a>"#,
        escape_html(url)
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
