use super::ChangeListener;
use crate::content::{codec, FieldIssue, ValidationReport};
use std::fmt;

/// Plain-text fallback for content without a visual editor. Only
/// well-formedness is checked.
pub struct RawTextEditor {
    text: String,
    listener: Option<ChangeListener>,
}

impl fmt::Debug for RawTextEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawTextEditor").field("text", &self.text).finish()
    }
}

impl RawTextEditor {
    pub fn new(text: impl Into<String>) -> Self {
        RawTextEditor {
            text: text.into(),
            listener: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        if let Some(listener) = self.listener.as_mut() {
            listener(&self.text);
        }
    }

    pub fn on_change(&mut self, listener: ChangeListener) {
        self.listener = Some(listener);
    }

    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        if self.text.trim().is_empty() {
            report.push(FieldIssue::new("", "Content is required"));
        } else if !codec::is_well_formed(&self.text) {
            report.push(FieldIssue::new("", "Content must be valid JSON"));
        }
        report
    }
}
