use crate::util::Debounce;

pub const COPIED_LABEL: &str = "Copied!";

/// Label state of a copy button. The resting label is captured once, so a
/// second click while "Copied!" is showing cannot make the confirmation stick.
#[derive(Debug)]
pub struct CopyFeedback {
    label: String,
    reset: Debounce,
}

impl CopyFeedback {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            reset: Debounce::default(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn copied(&mut self) -> (&'static str, u64) {
        (COPIED_LABEL, self.reset.schedule())
    }

    pub fn restore(&self, token: u64) -> Option<&str> {
        self.reset.fire(token).then_some(self.label.as_str())
    }
}
