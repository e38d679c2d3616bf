//! Markup-table export.
//! Same layout as a pandas `to_html(index=False)` table.

use crate::data::{SelectedTable, COUNTRY_COLUMN, IMPRESSIONS_COLUMN};
use std::fmt::Write;
use tracing::debug;

/// A two-column `<table>` with header and one body row per entry.
pub fn to_html_bytes(selected: &SelectedTable) -> Vec<u8> {
    let mut html = String::new();

    html.push_str("<table border=\"1\" class=\"dataframe\">\n");
    html.push_str("  <thead>\n");
    html.push_str("    <tr style=\"text-align: right;\">\n");
    let _ = writeln!(html, "      <th>{}</th>", escape(COUNTRY_COLUMN));
    let _ = writeln!(html, "      <th>{}</th>", escape(IMPRESSIONS_COLUMN));
    html.push_str("    </tr>\n");
    html.push_str("  </thead>\n");
    html.push_str("  <tbody>\n");

    for entry in selected.entries() {
        html.push_str("    <tr>\n");
        let _ = writeln!(html, "      <td>{}</td>", escape(&entry.country));
        let _ = writeln!(html, "      <td>{}</td>", entry.impressions);
        html.push_str("    </tr>\n");
    }

    html.push_str("  </tbody>\n");
    html.push_str("</table>");

    debug!(rows = selected.len(), bytes = html.len(), "exported HTML");
    html.into_bytes()
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}
