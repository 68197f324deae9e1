use unicode_segmentation::UnicodeSegmentation;

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '/' | '?' | '&' | '=' | '.' | ':' | '#')
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputLine {
    text: String,
    cursor: usize,
}

impl InputLine {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[cfg(test)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn split(&self) -> (&str, &str) {
        self.text.split_at(self.cursor)
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .map(|(i, _)| i)
            .take_while(|i| *i < pos)
            .last()
            .unwrap_or(0)
    }

    fn next_boundary(&self, pos: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .map(|(i, g)| i + g.len())
            .find(|end| *end > pos)
            .unwrap_or(self.text.len())
    }

    pub fn insert(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = self.prev_boundary(self.cursor);
        self.text.drain(prev..self.cursor);
        self.cursor = prev;
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.text.len() {
            return;
        }
        let next = self.next_boundary(self.cursor);
        self.text.drain(self.cursor..next);
    }

    pub fn left(&mut self) {
        self.cursor = self.prev_boundary(self.cursor);
    }

    pub fn right(&mut self) {
        self.cursor = self.next_boundary(self.cursor);
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Ctrl+U
    pub fn clear_before(&mut self) {
        self.text.drain(..self.cursor);
        self.cursor = 0;
    }

    /// Ctrl+K
    pub fn clear_after(&mut self) {
        self.text.truncate(self.cursor);
    }

    pub fn delete_word(&mut self) {
        let mut start = self.cursor;
        while start > 0 {
            let prev = self.prev_boundary(start);
            if self.text[prev..start].chars().all(is_separator) {
                start = prev;
            } else {
                break;
            }
        }
        while start > 0 {
            let prev = self.prev_boundary(start);
            if self.text[prev..start].chars().any(is_separator) {
                break;
            }
            start = prev;
        }
        self.text.drain(start..self.cursor);
        self.cursor = start;
    }
}
