/// A modal message for the user: short title plus one line of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: &'static str,
    pub message: &'static str,
    /// Underlying cause, shown dimmed under the message
    pub detail: Option<String>,
}

impl Alert {
    pub fn new(title: &'static str, message: &'static str) -> Self {
        Alert {
            title,
            message,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
