// Toast host
//
// Pages and actions push notifications; the app flushes them once, after
// the page has been rendered.

use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    pub fn render(&self) -> String {
        let icon = match self.level {
            ToastLevel::Success => "✓",
            ToastLevel::Info => "ℹ",
            ToastLevel::Error => "✗",
        };
        format!("{} {}", icon, self.message)
    }
}

#[derive(Debug, Default)]
pub struct Toaster {
    toasts: Vec<Toast>,
}

impl Toaster {
    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toasts.push(Toast {
            level,
            message: message.into(),
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Info, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message);
    }

    pub fn has_errors(&self) -> bool {
        self.toasts.iter().any(|t| t.level == ToastLevel::Error)
    }

    #[cfg(test)]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Write and clear pending toasts. With `quiet`, only errors are shown.
    pub fn flush<W: Write>(&mut self, out: &mut W, quiet: bool) -> io::Result<()> {
        for toast in self.toasts.drain(..) {
            if quiet && toast.level != ToastLevel::Error {
                continue;
            }
            writeln!(out, "{}", toast.render())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flush_writes_in_order_and_clears() {
        let mut toaster = Toaster::default();
        toaster.success("Saved");
        toaster.error("Failed to fetch blogs");

        let mut out = Vec::new();
        toaster.flush(&mut out, false).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "✓ Saved\n✗ Failed to fetch blogs\n"
        );
        assert!(toaster.toasts().is_empty());
    }

    #[test]
    fn test_quiet_keeps_errors_only() {
        let mut toaster = Toaster::default();
        toaster.info("Loaded");
        toaster.error("boom");
        assert!(toaster.has_errors());

        let mut out = Vec::new();
        toaster.flush(&mut out, true).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "✗ boom\n");
    }
}
