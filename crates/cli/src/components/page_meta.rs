// Page title and description

pub const APP_NAME: &str = "Backoffice";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    pub title: String,
    pub description: Option<String>,
}

impl PageMeta {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// `"{title} | Backoffice"`
    pub fn document_title(&self) -> String {
        format!("{} | {}", self.title, APP_NAME)
    }

    pub fn render(&self) -> Vec<String> {
        let title = self.document_title();
        let mut lines = vec![title.clone(), "=".repeat(title.chars().count())];
        if let Some(description) = &self.description {
            lines.push(description.clone());
        }
        lines
    }
}
