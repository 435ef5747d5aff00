// Print button
//
// Printing is a side effect owned by the environment; the button only hands
// the rendered document to whichever Printer it is given.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Destination for printed documents
pub trait Printer {
    fn print(&self, document: &str) -> io::Result<()>;
}

/// Writes the document to a file
#[derive(Debug, Clone)]
pub struct FilePrinter {
    path: PathBuf,
}

impl FilePrinter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Printer for FilePrinter {
    fn print(&self, document: &str) -> io::Result<()> {
        fs::write(&self.path, document)?;
        tracing::info!(path = %self.path.display(), "printed page");
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintButton {
    label: String,
}

impl Default for PrintButton {
    fn default() -> Self {
        Self {
            label: "Print".to_string(),
        }
    }
}

impl PrintButton {
    pub fn render(&self) -> String {
        format!("[ {} ]", self.label)
    }

    pub fn press(&self, printer: &dyn Printer, document: &str) -> io::Result<()> {
        printer.print(document)
    }
}
