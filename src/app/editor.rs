// src/app/editor.rs
//! Line buffer behind the in-place text editor.

use crate::fs::EntryId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
}

/// Text being edited. The cursor column counts chars, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    pub id: EntryId,
    pub name: String,
    lines: Vec<String>,
    row: usize,
    col: usize,
    saved: String,
}

impl EditBuffer {
    pub fn new(id: EntryId, name: impl Into<String>, text: &str) -> Self {
        let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self {
            id,
            name: name.into(),
            lines,
            row: 0,
            col: 0,
            saved: text.to_string(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// `(row, col)` of the cursor.
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_dirty(&self) -> bool {
        self.text() != self.saved
    }

    pub fn mark_saved(&mut self) {
        self.saved = self.text();
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, |l| l.chars().count())
    }

    fn byte_col(&self) -> usize {
        let line = &self.lines[self.row];
        line.char_indices().nth(self.col).map_or(line.len(), |(i, _)| i)
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_col();
        self.lines[self.row].insert(at, c);
        self.col += 1;
    }

    pub fn newline(&mut self) {
        let at = self.byte_col();
        let rest = self.lines[self.row].split_off(at);
        self.row += 1;
        self.lines.insert(self.row, rest);
        self.col = 0;
    }

    /// Delete the char before the cursor, joining lines at column 0.
    pub fn backspace(&mut self) {
        if self.col > 0 {
            self.col -= 1;
            let at = self.byte_col();
            self.lines[self.row].remove(at);
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.line_len(self.row);
            self.lines[self.row].push_str(&line);
        }
    }

    pub fn move_cursor(&mut self, direction: CursorMove) {
        match direction {
            CursorMove::Left if self.col > 0 => self.col -= 1,
            CursorMove::Left if self.row > 0 => {
                self.row -= 1;
                self.col = self.line_len(self.row);
            }
            CursorMove::Right if self.col < self.line_len(self.row) => self.col += 1,
            CursorMove::Right if self.row + 1 < self.lines.len() => {
                self.row += 1;
                self.col = 0;
            }
            CursorMove::Up if self.row > 0 => {
                self.row -= 1;
                self.col = self.col.min(self.line_len(self.row));
            }
            CursorMove::Down if self.row + 1 < self.lines.len() => {
                self.row += 1;
                self.col = self.col.min(self.line_len(self.row));
            }
            CursorMove::LineStart => self.col = 0,
            CursorMove::LineEnd => self.col = self.line_len(self.row),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{DirectoryHandle, EntryKind};

    fn buffer(text: &str) -> EditBuffer {
        let id = DirectoryHandle::new("/e").child("a.txt", EntryKind::File).id();
        EditBuffer::new(id, "a.txt", text)
    }

    #[test]
    fn typing_splitting_and_joining_lines() {
        let mut buf = buffer("héllo");
        assert!(!buf.is_dirty());
        buf.move_cursor(CursorMove::Right);
        buf.move_cursor(CursorMove::Right);
        buf.newline();
        assert_eq!(buf.lines(), ["hé", "llo"]);
        assert_eq!(buf.cursor(), (1, 0));

        buf.insert('X');
        assert_eq!(buf.text(), "hé\nXllo");
        buf.backspace();
        buf.backspace();
        assert_eq!(buf.text(), "héllo");
        assert_eq!(buf.cursor(), (0, 2));
        assert!(!buf.is_dirty());

        buf.insert('!');
        assert!(buf.is_dirty());
        buf.mark_saved();
        assert!(!buf.is_dirty());
    }

    #[test]
    fn vertical_moves_clamp_the_column() {
        let mut buf = buffer("long line\nab\n");
        buf.move_cursor(CursorMove::LineEnd);
        buf.move_cursor(CursorMove::Down);
        assert_eq!(buf.cursor(), (1, 2));
        buf.move_cursor(CursorMove::Down);
        assert_eq!(buf.cursor(), (2, 0));
        buf.move_cursor(CursorMove::Down);
        assert_eq!(buf.cursor(), (2, 0));
        buf.move_cursor(CursorMove::Left);
        assert_eq!(buf.cursor(), (1, 2));
        assert_eq!(buf.text(), "long line\nab\n");
    }
}
