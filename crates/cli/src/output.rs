// Output formatting for the terminal

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Self {
        match s {
            "json" => OutputFormat::Json,
            "yaml" => OutputFormat::Yaml,
            _ => OutputFormat::Text,
        }
    }

    /// Serialize `value` for the machine-readable formats.
    /// Returns `None` for text, which each page renders itself.
    pub fn render_value<T: Serialize>(&self, value: &T) -> anyhow::Result<Option<String>> {
        match self {
            OutputFormat::Json => Ok(Some(serde_json::to_string_pretty(value)?)),
            OutputFormat::Yaml => Ok(Some(serde_yaml::to_string(value)?)),
            OutputFormat::Text => Ok(None),
        }
    }
}

/// A key-value line for detail views
pub fn field(label: &str, value: &str) -> String {
    format!("{:<14} {}", format!("{}:", label), value)
}

/// A table header line
pub fn table_header(columns: &[(&str, usize)]) -> String {
    columns
        .iter()
        .map(|(name, width)| format!("{:<width$}", name, width = width))
        .collect::<Vec<_>>()
        .join("  ")
}

/// A table row; values wider than their column are cut with "..."
pub fn table_row(values: &[(&str, usize)]) -> String {
    values
        .iter()
        .map(|(val, width)| {
            let s = if val.chars().count() > *width {
                let kept: String = val.chars().take(width.saturating_sub(3)).collect();
                format!("{}...", kept)
            } else {
                val.to_string()
            };
            format!("{:<width$}", s, width = width)
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_truncates_on_char_boundaries() {
        let row = table_row(&[("Émile Zola écrit", 8), ("x", 3)]);
        assert_eq!(row, "Émile...  x");
    }

    #[test]
    fn test_field_alignment() {
        assert_eq!(field("Name", "Ada"), "Name:          Ada");
    }

    #[test]
    fn test_text_has_no_serialized_value() {
        assert!(OutputFormat::Text.render_value(&1).unwrap().is_none());
        assert_eq!(
            OutputFormat::Json.render_value(&vec![1]).unwrap().unwrap(),
            "[\n  1\n]"
        );
    }
}
