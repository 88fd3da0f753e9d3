/// Keeps track of what the user typed, so abandoned searches can be reported.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputTracker {
    current_text: String,
    longest_text: String,
}

/// What changed after observing the field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextChange {
    /// Set when the field was blanked after holding text: the longest text
    /// typed since the last time it was empty.
    pub abandoned: Option<String>,
    /// Whether the field holds any text now.
    pub filled: bool,
}

impl InputTracker {
    pub fn current_text(&self) -> &str {
        &self.current_text
    }

    pub fn longest_text(&self) -> &str {
        &self.longest_text
    }

    pub fn observe(&mut self, value: &str) -> TextChange {
        self.current_text = value.to_string();
        let current_len = self.current_text.chars().count();
        let mut abandoned = None;
        if current_len > self.longest_text.chars().count() {
            self.longest_text = self.current_text.clone();
        } else if current_len == 0 && !self.longest_text.is_empty() {
            abandoned = Some(std::mem::take(&mut self.longest_text));
        }
        TextChange {
            abandoned,
            filled: current_len > 0,
        }
    }
}
