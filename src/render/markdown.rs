//! Markdown preview of an extracted table.

use crate::error::Result;
use crate::model::{CellContent, Table, WikiPage, BULLET_PREFIX};

/// Convert a table to a Markdown table.
pub fn to_markdown(table: &Table) -> Result<String> {
    let mut output = String::new();
    render_table(&mut output, table);
    Ok(output.trim_end().to_string())
}

/// Convert a page to Markdown: title heading followed by the table.
pub fn page_to_markdown(page: &WikiPage) -> Result<String> {
    let mut output = String::new();
    if let Some(ref title) = page.title {
        output.push_str(&format!("# {}\n\n", title));
    }
    render_table(&mut output, &page.table);
    Ok(output.trim_end().to_string())
}

fn render_table(output: &mut String, table: &Table) {
    let (code_title, description_title) = &table.column_titles;
    output.push_str(&format!(
        "| {} | {} |\n",
        escape_cell(code_title),
        escape_cell(description_title)
    ));
    output.push_str("| --- | --- |\n");

    for row in &table.rows {
        output.push_str(&format!(
            "| {} | {} |\n",
            escape_cell(&row.code),
            render_description(&row.description)
        ));
    }
}

/// Bullet lists stay on one line, items separated by `<br>`.
fn render_description(content: &CellContent) -> String {
    match content {
        CellContent::PlainText { text } => escape_cell(text),
        CellContent::BulletList { intro, items } => {
            let mut parts = Vec::with_capacity(items.len() + 1);
            if !intro.is_empty() {
                parts.push(escape_cell(intro));
            }
            parts.extend(
                items
                    .iter()
                    .map(|item| format!("{}{}", BULLET_PREFIX, escape_cell(item))),
            );
            parts.join("<br>")
        }
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
