use crate::tui::app::Control;

/// What a confirmed entry is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryTarget {
    Value(Control),
    ImagePath,
}

/// Single-line free-text entry. While one is open, keys are typed into it
/// instead of being treated as shortcuts.
#[derive(Debug)]
pub struct EntryState {
    pub target: Option<EntryTarget>,
    pub buffer: String,
    pub cursor_position: usize,
}

impl EntryState {
    pub fn new() -> Self {
        Self {
            target: None,
            buffer: String::new(),
            cursor_position: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn open(&mut self, target: EntryTarget, content: String) {
        self.buffer = content;
        self.cursor_position = self.buffer.len();
        self.target = Some(target);
    }

    /// Closes the entry and hands back what was typed.
    pub fn close(&mut self) -> Option<(EntryTarget, String)> {
        let target = self.target.take()?;
        self.cursor_position = 0;
        Some((target, std::mem::take(&mut self.buffer)))
    }

    pub fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(start) = self.previous_boundary() {
            self.buffer.remove(start);
            self.cursor_position = start;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor_position < self.buffer.len() {
            self.buffer.remove(self.cursor_position);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(start) = self.previous_boundary() {
            self.cursor_position = start;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(c) = self.buffer[self.cursor_position..].chars().next() {
            self.cursor_position += c.len_utf8();
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.buffer.len();
    }

    /// Removes the word or path segment before the cursor.
    pub fn delete_word_backward(&mut self) {
        let before = &self.buffer[..self.cursor_position];
        let trimmed = before.trim_end_matches(|c: char| c.is_whitespace() || c == '/');
        let word_start = trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace() || *c == '/')
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);

        self.buffer.replace_range(word_start..self.cursor_position, "");
        self.cursor_position = word_start;
    }

    fn previous_boundary(&self) -> Option<usize> {
        self.buffer[..self.cursor_position]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }
}
