//! Human-readable summaries of upstream responses
//!
//! Named templates render a response into a table or a text block. The
//! result is stored in the computed `output_text` attribute and never
//! affects identity or state; a render failure only logs a warning.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::provider::ProviderResult;
use crate::resource::ResourceData;

pub const OUTPUT_TEXT: &str = "output_text";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("No output template named '{0}'")]
    UnknownTemplate(String),

    #[error("Failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Template '{0}' produced no output")]
    Empty(String),
}

/// One table column: header and JSON pointer relative to the row
#[derive(Debug, Clone)]
pub struct Column {
    pub header: &'static str,
    pub pointer: &'static str,
    /// Render integer zero as "-"
    pub dash_zero: bool,
}

impl Column {
    pub fn new(header: &'static str, pointer: &'static str) -> Self {
        Self {
            header,
            pointer,
            dash_zero: false,
        }
    }

    pub fn dash(mut self) -> Self {
        self.dash_zero = true;
        self
    }
}

pub type TextRenderer = fn(&serde_json::Value) -> Option<String>;

#[derive(Debug, Clone)]
pub enum TemplateKind {
    /// Rows are the elements of the array at `rows` (or the single object
    /// found there)
    Tabular {
        rows: &'static str,
        columns: Vec<Column>,
    },
    Text(TextRenderer),
}

/// Registry of named output templates
#[derive(Debug, Clone, Default)]
pub struct OutputTemplates {
    templates: HashMap<&'static str, TemplateKind>,
}

impl OutputTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tabular(mut self, name: &'static str, rows: &'static str, columns: Vec<Column>) -> Self {
        self.templates
            .insert(name, TemplateKind::Tabular { rows, columns });
        self
    }

    pub fn text(mut self, name: &'static str, render: TextRenderer) -> Self {
        self.templates.insert(name, TemplateKind::Text(render));
        self
    }

    /// Render `response` with the template `name`
    pub fn render<T: Serialize + ?Sized>(&self, name: &str, response: &T) -> Result<String, RenderError> {
        let kind = self
            .templates
            .get(name)
            .ok_or_else(|| RenderError::UnknownTemplate(name.to_string()))?;
        let value = serde_json::to_value(response)?;
        match kind {
            TemplateKind::Tabular { rows, columns } => {
                let rows = extract_rows(&value, rows, columns);
                Ok(format!("\n{}", render_table(name, columns, &rows)))
            }
            TemplateKind::Text(render) => {
                render(&value).ok_or_else(|| RenderError::Empty(name.to_string()))
            }
        }
    }
}

/// Render into `output_text`, leaving it unset when rendering fails
pub fn set_output_text<T: Serialize + ?Sized>(
    data: &mut ResourceData,
    templates: &OutputTemplates,
    name: &str,
    response: &T,
) -> ProviderResult<()> {
    match templates.render(name, response) {
        Ok(text) => data.set(OUTPUT_TEXT, text),
        Err(e) => {
            log::warn!("{}: output_text not rendered: {}", data.resource_type, e);
            data.remove(OUTPUT_TEXT);
            Ok(())
        }
    }
}

fn extract_rows(value: &serde_json::Value, pointer: &str, columns: &[Column]) -> Vec<Vec<String>> {
    let rows: Vec<&serde_json::Value> = match value.pointer(pointer) {
        Some(serde_json::Value::Array(items)) => items.iter().collect(),
        Some(serde_json::Value::Null) | None => Vec::new(),
        Some(single) => vec![single],
    };
    rows.into_iter()
        .map(|row| columns.iter().map(|c| format_cell(row.pointer(c.pointer), c.dash_zero)).collect())
        .collect()
}

fn format_cell(value: Option<&serde_json::Value>, dash_zero: bool) -> String {
    match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) if dash_zero && n.as_i64() == Some(0) => "-".to_string(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::Bool(b)) => b.to_string(),
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .map(|item| format_cell(Some(item), dash_zero))
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => other.to_string(),
    }
}

/// Bordered ASCII table with the template name as title row
pub fn render_table(title: &str, columns: &[Column], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.header.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let inner: usize = widths.iter().map(|w| w + 3).sum::<usize>().saturating_sub(1);
    let title = title.to_uppercase();
    let title_len = title.chars().count() + 2;
    if title_len > inner
        && let Some(last) = widths.last_mut()
    {
        *last += title_len - inner;
    }
    let inner = inner.max(title_len);

    let border = |widths: &[usize]| {
        let segments: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
        format!("+{}+", segments.join("+"))
    };
    let line = |cells: Vec<String>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!(" {}{} ", cell, " ".repeat(w - cell.chars().count())))
            .collect();
        format!("|{}|", padded.join("|"))
    };

    let mut out = Vec::new();
    out.push(format!("+{}+", "-".repeat(inner)));
    out.push(format!(
        "| {}{} |",
        title,
        " ".repeat(inner - title.chars().count() - 2)
    ));
    out.push(border(&widths));
    out.push(line(columns.iter().map(|c| c.header.to_uppercase()).collect()));
    out.push(border(&widths));
    for row in rows {
        out.push(line(row.clone()));
    }
    if !rows.is_empty() {
        out.push(border(&widths));
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AttributeSchema, AttributeType, ResourceSchema};
    use serde_json::json;

    fn templates() -> OutputTemplates {
        OutputTemplates::new()
            .tabular(
                "securityPoliciesDS",
                "/policies",
                vec![Column::new("ID", "/policyId"), Column::new("Name", "/policyName")],
            )
            .tabular(
                "configuration",
                "",
                vec![
                    Column::new("Config_id", "/id"),
                    Column::new("Version_active_in_staging", "/stagingVersion").dash(),
                ],
            )
            .text("versionNotesDS", |value| {
                value.get("notes").and_then(|n| n.as_str()).map(str::to_string)
            })
    }

    #[test]
    fn tabular_template_renders_rows() {
        let response = json!({
            "policies": [
                {"policyId": "AAAA_81230", "policyName": "Example"},
                {"policyId": "BBBB_1", "policyName": "Second"}
            ]
        });
        let text = templates().render("securityPoliciesDS", &response).unwrap();
        let expected = [
            "",
            "+----------------------+",
            "| SECURITYPOLICIESDS   |",
            "+------------+---------+",
            "| ID         | NAME    |",
            "+------------+---------+",
            "| AAAA_81230 | Example |",
            "| BBBB_1     | Second  |",
            "+------------+---------+",
        ]
        .join("\n");
        assert_eq!(text, expected);
    }

    #[test]
    fn single_object_is_one_row_and_dash_renders_zero() {
        let response = json!({"id": 43253, "stagingVersion": 0});
        let text = templates().render("configuration", &response).unwrap();
        assert!(text.contains("| 43253     | -"));
    }

    #[test]
    fn text_template_and_unknown_name() {
        let response = json!({"notes": "initial version"});
        assert_eq!(
            templates().render("versionNotesDS", &response).unwrap(),
            "initial version"
        );
        assert!(matches!(
            templates().render("missing", &response),
            Err(RenderError::UnknownTemplate(_))
        ));
    }

    #[test]
    fn render_failure_leaves_output_text_unset() {
        let schema = ResourceSchema::new("appsec_version_notes")
            .attribute(AttributeSchema::new(OUTPUT_TEXT, AttributeType::String).computed());
        let mut data = ResourceData::new(&schema).with_attribute(OUTPUT_TEXT, "stale");

        set_output_text(&mut data, &templates(), "versionNotesDS", &json!({})).unwrap();
        assert!(data.get(OUTPUT_TEXT).is_none());

        set_output_text(&mut data, &templates(), "versionNotesDS", &json!({"notes": "n"})).unwrap();
        assert_eq!(data.get(OUTPUT_TEXT).and_then(|v| v.as_str()), Some("n"));
    }
}
