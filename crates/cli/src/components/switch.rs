// On/off switch
//
// Local `checked` state seeded from the `initial_value` prop. When the prop
// changes, the local state follows it; user toggles in between stay local
// until the next prop change.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Switch {
    label: String,
    checked: bool,
    last_initial: bool,
}

impl Switch {
    pub fn new(label: impl Into<String>, initial_value: bool) -> Self {
        Self {
            label: label.into(),
            checked: initial_value,
            last_initial: initial_value,
        }
    }

    #[cfg(test)]
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// User click: flip the state and report the new value once
    pub fn toggle<F: FnOnce(bool)>(&mut self, on_change: F) {
        self.checked = !self.checked;
        on_change(self.checked);
    }

    /// Feed the current `initial_value` prop. Re-synchronises only when the
    /// prop differs from the last value seen. Returns whether it did.
    pub fn sync(&mut self, initial_value: bool) -> bool {
        if initial_value == self.last_initial {
            return false;
        }
        self.last_initial = initial_value;
        self.checked = initial_value;
        true
    }

    pub fn render(&self) -> String {
        let knob = if self.checked { "[ on|●]" } else { "[●|off ]" };
        format!("{} {}", knob, self.label)
    }
}
