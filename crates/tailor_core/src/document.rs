/// Editable document content. Opaque markup; never parsed or validated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentBuffer {
    content: String,
}

impl DocumentBuffer {
    pub fn as_str(&self) -> &str {
        &self.content
    }
}

/// Single editable surface fed by successful optimizations.
///
/// Last write wins: there is one editor, no merge and no undo.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditableDocumentStore {
    buffer: Option<DocumentBuffer>,
}

impl EditableDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any prior content outright.
    pub fn initialize(&mut self, html: String) {
        self.buffer = Some(DocumentBuffer { content: html });
    }

    pub fn current_content(&self) -> Option<&str> {
        self.buffer.as_ref().map(DocumentBuffer::as_str)
    }

    pub fn has_document(&self) -> bool {
        self.buffer.is_some()
    }

    /// Overwrites the buffer with the finalized edit. Returns whether the
    /// stored content changed; commits before initialization are dropped.
    pub fn commit(&mut self, new_html: String) -> bool {
        match self.buffer.as_mut() {
            Some(buffer) if buffer.content != new_html => {
                buffer.content = new_html;
                true
            }
            _ => false,
        }
    }
}
