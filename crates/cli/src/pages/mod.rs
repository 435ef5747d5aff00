// Pages
//
// A page fetches through the services, then lays its data out with the
// presentational components. Every page produces a Document; the app decides
// whether to show it as text or as serialized data.

pub mod dashboard;
pub mod resource;
pub mod sign_in;
pub mod views;

use serde_json::Value;

use crate::components::{PageMeta, PrintButton};

/// Rendered page
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub meta: PageMeta,
    pub lines: Vec<String>,
    /// Machine-readable payload for json/yaml output
    pub data: Value,
}

impl Document {
    pub fn new(meta: PageMeta, lines: Vec<String>, data: Value) -> Self {
        Self { meta, lines, data }
    }

    /// Title, header line, body and print button
    pub fn render_text(&self, header: &[String]) -> String {
        let mut out = self.meta.render();
        out.extend(header.iter().cloned());
        out.push(String::new());
        out.extend(self.lines.iter().cloned());
        out.push(String::new());
        out.push(PrintButton::default().render());
        out.join("\n")
    }
}

/// Run `$body` with `$r` bound to the Resource type for a ResourceKind
macro_rules! for_resource {
    ($kind:expr, $r:ident => $body:expr) => {
        match $kind {
            backoffice_core::ResourceKind::Blogs => {
                type $r = backoffice_core::Blogs;
                $body
            }
            backoffice_core::ResourceKind::BlogCategories => {
                type $r = backoffice_core::BlogCategories;
                $body
            }
            backoffice_core::ResourceKind::Tags => {
                type $r = backoffice_core::Tags;
                $body
            }
            backoffice_core::ResourceKind::Commentaries => {
                type $r = backoffice_core::Commentaries;
                $body
            }
            backoffice_core::ResourceKind::Bloggers => {
                type $r = backoffice_core::Bloggers;
                $body
            }
            backoffice_core::ResourceKind::JobApplications => {
                type $r = backoffice_core::JobApplications;
                $body
            }
            backoffice_core::ResourceKind::Users => {
                type $r = backoffice_core::Users;
                $body
            }
        }
    };
}

pub(crate) use for_resource;
