//! Edit surface abstraction.
//!
//! The session controller drives a rich-text surface it does not own the
//! implementation of (a contenteditable element, a terminal widget, ...).
//! [`TextSurface`] is a plain in-memory implementation with simple inline
//! markup, used by tests and headless tools.

/// Character range inside the surface content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    pub fn caret(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// Formatting actions triggered from toolbars and pickers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatCommand {
    Bold,
    Italic,
    Underline,
    ForeColor(String),
    HiliteColor(String),
    InsertText(String),
}

/// Rich-text surface the session projects a node label into
pub trait EditSurface {
    /// Replace the whole content (caret goes to the end)
    fn set_content(&mut self, content: &str);

    fn content(&self) -> String;

    /// Current selection, `None` when the surface holds no selection
    fn selection(&self) -> Option<TextRange>;

    fn restore_selection(&mut self, range: TextRange);

    fn focus(&mut self);

    fn has_focus(&self) -> bool;

    /// Run a formatting command against the current selection
    fn exec(&mut self, command: &FormatCommand);
}

/// In-memory surface using HTML-like inline tags
#[derive(Debug, Clone, Default)]
pub struct TextSurface {
    content: String,
    selection: Option<TextRange>,
    focused: bool,
    loads: usize,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the user typing: replace content and keep the caret at the end
    pub fn type_text(&mut self, content: &str) {
        self.content = content.to_string();
        self.focused = true;
        self.selection = Some(TextRange::caret(self.char_len()));
    }

    /// Simulate the user selecting a range with the pointer
    pub fn select(&mut self, range: TextRange) {
        self.focused = true;
        self.selection = Some(self.clamp(range));
    }

    /// Simulate focus moving elsewhere (the selection is lost)
    pub fn blur(&mut self) {
        self.focused = false;
        self.selection = None;
    }

    /// How many times the content was replaced via `set_content`
    pub fn load_count(&self) -> usize {
        self.loads
    }

    fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    fn clamp(&self, range: TextRange) -> TextRange {
        let len = self.char_len();
        TextRange::new(range.start.min(len), range.end.min(len))
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.content
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    fn wrap(&mut self, range: TextRange, open: &str, close: &str) {
        let start = self.byte_offset(range.start);
        let end = self.byte_offset(range.end);
        let selected = &self.content[start..end];
        let wrapped = format!("{}{}{}", open, selected, close);
        let inner_len = selected.chars().count();
        self.content.replace_range(start..end, &wrapped);

        let open_len = open.chars().count();
        let start = range.start + open_len;
        self.selection = Some(TextRange::new(start, start + inner_len));
    }
}

impl EditSurface for TextSurface {
    fn set_content(&mut self, content: &str) {
        self.content = content.to_string();
        self.selection = Some(TextRange::caret(self.char_len()));
        self.loads += 1;
    }

    fn content(&self) -> String {
        self.content.clone()
    }

    fn selection(&self) -> Option<TextRange> {
        self.selection
    }

    fn restore_selection(&mut self, range: TextRange) {
        self.selection = Some(self.clamp(range));
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn has_focus(&self) -> bool {
        self.focused
    }

    fn exec(&mut self, command: &FormatCommand) {
        // Without a selection there is nowhere to apply the command
        let Some(range) = self.selection else {
            return;
        };
        let range = self.clamp(range);

        match command {
            FormatCommand::InsertText(text) => {
                let start = self.byte_offset(range.start);
                let end = self.byte_offset(range.end);
                self.content.replace_range(start..end, text);
                self.selection = Some(TextRange::caret(range.start + text.chars().count()));
            }
            _ if range.is_collapsed() => {}
            FormatCommand::Bold => self.wrap(range, "<b>", "</b>"),
            FormatCommand::Italic => self.wrap(range, "<i>", "</i>"),
            FormatCommand::Underline => self.wrap(range, "<u>", "</u>"),
            FormatCommand::ForeColor(color) => {
                self.wrap(range, &format!("<span style=\"color: {}\">", color), "</span>")
            }
            FormatCommand::HiliteColor(color) => self.wrap(
                range,
                &format!("<span style=\"background-color: {}\">", color),
                "</span>",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_wraps_selection() {
        let mut surface = TextSurface::new();
        surface.set_content("hello world");
        surface.select(TextRange::new(6, 11));

        surface.exec(&FormatCommand::Bold);
        assert_eq!(surface.content(), "hello <b>world</b>");
    }

    #[test]
    fn test_insert_text_at_caret() {
        let mut surface = TextSurface::new();
        surface.set_content("a→c");
        surface.select(TextRange::caret(2));

        surface.exec(&FormatCommand::InsertText("b".into()));
        assert_eq!(surface.content(), "a→bc");
        assert_eq!(surface.selection(), Some(TextRange::caret(3)));
    }

    #[test]
    fn test_exec_without_selection_is_ignored() {
        let mut surface = TextSurface::new();
        surface.set_content("text");
        surface.blur();

        surface.exec(&FormatCommand::InsertText("x".into()));
        assert_eq!(surface.content(), "text");
    }

    #[test]
    fn test_collapsed_selection_skips_wrapping() {
        let mut surface = TextSurface::new();
        surface.set_content("text");
        surface.exec(&FormatCommand::Italic);
        assert_eq!(surface.content(), "text");
    }
}
