/// Semantic node exposed to assistive technology, independent of the canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessibleNode {
    Heading { level: u8, text: String },
    /// Paragraph text.
    Text { text: String },
    /// A polite live region.
    LiveRegion { text: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewContent {
    Canvas,
    /// Inline message shown instead of the canvas.
    ErrorText(String),
    Empty,
}

/// What the host mounts for a widget this frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetView {
    pub accessible: Vec<AccessibleNode>,
    pub content: ViewContent,
    /// Small overlay caption, e.g. an interaction hint.
    pub hint: Option<String>,
}

impl WidgetView {
    pub fn canvas() -> Self {
        Self {
            accessible: Vec::new(),
            content: ViewContent::Canvas,
            hint: None,
        }
    }

    pub fn with_accessible(mut self, node: AccessibleNode) -> Self {
        self.accessible.push(node);
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn error_text(&self) -> Option<&str> {
        match &self.content {
            ViewContent::ErrorText(s) => Some(s),
            _ => None,
        }
    }
}
