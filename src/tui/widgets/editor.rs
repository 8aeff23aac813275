use std::cmp;

/// Small multi-line text buffer with a cursor, used by the login and note
/// forms. Columns count chars, not bytes.
#[derive(Debug, Clone)]
pub struct Editor {
    pub lines: Vec<String>,
    pub cursor_line: usize,
    pub cursor_col: usize,
    pub multi_line: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor_line: 0,
            cursor_col: 0,
            multi_line: false,
        }
    }

    pub fn multi_line() -> Self {
        Self {
            multi_line: true,
            ..Self::new()
        }
    }

    /// Cursor ends up after the last character
    pub fn from_string(content: &str, multi_line: bool) -> Self {
        let lines: Vec<String> = if content.is_empty() {
            vec![String::new()]
        } else if multi_line {
            content.split('\n').map(|s| s.to_string()).collect()
        } else {
            vec![content.replace('\n', " ")]
        };
        let cursor_line = lines.len().saturating_sub(1);
        let cursor_col = lines.last().map(|l| l.chars().count()).unwrap_or(0);
        Self {
            lines,
            cursor_line,
            cursor_col,
            multi_line,
        }
    }

    fn ensure_cursor_valid(&mut self) {
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        if self.cursor_line >= self.lines.len() {
            self.cursor_line = self.lines.len() - 1;
        }
        let len = self.lines[self.cursor_line].chars().count();
        self.cursor_col = cmp::min(self.cursor_col, len);
    }

    fn byte_index(line: &str, col: usize) -> usize {
        line.char_indices().nth(col).map(|(i, _)| i).unwrap_or(line.len())
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' {
            self.insert_newline();
            return;
        }
        self.ensure_cursor_valid();
        let line = &mut self.lines[self.cursor_line];
        let idx = Self::byte_index(line, self.cursor_col);
        line.insert(idx, ch);
        self.cursor_col += 1;
    }

    /// Split the current line; ignored for single-line editors
    pub fn insert_newline(&mut self) {
        if !self.multi_line {
            return;
        }
        self.ensure_cursor_valid();
        let line = &mut self.lines[self.cursor_line];
        let idx = Self::byte_index(line, self.cursor_col);
        let rest = line.split_off(idx);
        self.lines.insert(self.cursor_line + 1, rest);
        self.cursor_line += 1;
        self.cursor_col = 0;
    }

    /// Backspace: remove the char before the cursor, joining lines at col 0
    pub fn delete_char(&mut self) {
        self.ensure_cursor_valid();
        if self.cursor_col > 0 {
            let line = &mut self.lines[self.cursor_line];
            let idx = Self::byte_index(line, self.cursor_col - 1);
            line.remove(idx);
            self.cursor_col -= 1;
        } else if self.cursor_line > 0 {
            let current = self.lines.remove(self.cursor_line);
            self.cursor_line -= 1;
            let prev = &mut self.lines[self.cursor_line];
            self.cursor_col = prev.chars().count();
            prev.push_str(&current);
        }
    }

    pub fn move_left(&mut self) {
        self.ensure_cursor_valid();
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else if self.cursor_line > 0 {
            self.cursor_line -= 1;
            self.cursor_col = self.lines[self.cursor_line].chars().count();
        }
    }

    pub fn move_right(&mut self) {
        self.ensure_cursor_valid();
        let len = self.lines[self.cursor_line].chars().count();
        if self.cursor_col < len {
            self.cursor_col += 1;
        } else if self.cursor_line + 1 < self.lines.len() {
            self.cursor_line += 1;
            self.cursor_col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor_line > 0 {
            self.cursor_line -= 1;
            self.ensure_cursor_valid();
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor_line + 1 < self.lines.len() {
            self.cursor_line += 1;
            self.ensure_cursor_valid();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor_col = 0;
    }

    pub fn move_end(&mut self) {
        self.ensure_cursor_valid();
        self.cursor_col = self.lines[self.cursor_line].chars().count();
    }

    pub fn clear(&mut self) {
        self.lines = vec![String::new()];
        self.cursor_line = 0;
        self.cursor_col = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.is_empty())
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_ignores_newlines() {
        let mut editor = Editor::new();
        for ch in "ab\ncd".chars() {
            editor.insert_char(ch);
        }
        assert_eq!(editor.text(), "abcd");
    }

    #[test]
    fn multi_line_split_and_join() {
        let mut editor = Editor::multi_line();
        for ch in "hola\nmundo".chars() {
            editor.insert_char(ch);
        }
        assert_eq!(editor.lines.len(), 2);
        editor.move_home();
        editor.delete_char();
        assert_eq!(editor.text(), "holamundo");
        assert_eq!(editor.cursor_col, 4);
    }

    #[test]
    fn handles_multibyte_chars() {
        let mut editor = Editor::from_string("añb", false);
        editor.move_left();
        editor.delete_char();
        assert_eq!(editor.text(), "ab");
    }
}
