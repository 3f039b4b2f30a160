use std::ops::Range;

use ropey::Rope;

/// Cursor position in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column (byte offset within the line).
    pub col: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: usize,
}

impl Cursor {
    pub const fn origin() -> Self {
        Self {
            line: 0,
            col: 0,
            col_memory: 0,
        }
    }

    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            col_memory: col,
        }
    }

    /// Update column and reset column memory to match.
    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.col_memory = col;
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::origin()
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A text buffer backed by a rope, with a cursor and an optional selection.
///
/// The selection is a byte range over the full text. Every edit and every
/// plain cursor motion clears it; find operations re-establish it.
pub struct TextBuffer {
    rope: Rope,
    cursor: Cursor,
    selection: Option<Range<usize>>,
}

impl TextBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::origin(),
            selection: None,
        }
    }

    pub fn empty() -> Self {
        Self::from_text("")
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total length of the buffer in bytes.
    pub fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    /// Content of a line without its trailing line break.
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(line_idx).to_string();
        Some(
            line.trim_end_matches('\n')
                .trim_end_matches('\r')
                .to_string(),
        )
    }

    /// Length of a line in bytes, without the trailing line break.
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.len())
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// The cursor position as a byte offset into the full text.
    pub fn byte_offset(&self) -> usize {
        self.rope.line_to_byte(self.cursor.line) + self.cursor.col
    }

    /// Byte offset of the start of a line within the full text.
    pub fn line_start_byte(&self, line_idx: usize) -> usize {
        if line_idx >= self.rope.len_lines() {
            return self.rope.len_bytes();
        }
        self.rope.line_to_byte(line_idx)
    }

    /// Move the cursor to a byte offset, clamped to the buffer and snapped
    /// to the containing char boundary. Clears the selection.
    pub fn set_byte_offset(&mut self, byte: usize) {
        self.selection = None;
        self.place_cursor_at_byte(byte);
    }

    /// Replace the entire text, keeping the cursor at its old byte offset
    /// clamped into the new content. Clears the selection.
    pub fn set_text(&mut self, text: &str) {
        let byte = self.byte_offset();
        self.rope = Rope::from_str(text);
        self.selection = None;
        self.place_cursor_at_byte(byte);
    }

    // --- Selection ---

    /// The active selection, if any.
    pub fn selection(&self) -> Option<Range<usize>> {
        self.selection.clone().filter(|r| !r.is_empty())
    }

    /// The text covered by the active selection.
    pub fn selected_text(&self) -> Option<String> {
        let range = self.selection()?;
        let start = self.rope.byte_to_char(range.start);
        let end = self.rope.byte_to_char(range.end);
        Some(self.rope.slice(start..end).to_string())
    }

    /// Select a byte range and place the cursor at its end.
    pub fn select(&mut self, range: Range<usize>) {
        let range = self.clamp_range(range);
        self.place_cursor_at_byte(range.end);
        self.selection = Some(range);
    }

    /// Select a byte range and place the cursor at its start (backward
    /// search keeps walking left from here).
    pub fn select_to_start(&mut self, range: Range<usize>) {
        let range = self.clamp_range(range);
        self.place_cursor_at_byte(range.start);
        self.selection = Some(range);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Replace the selected text, leaving the cursor at the end of the
    /// replacement. Returns false when there is no selection to replace.
    pub fn replace_selection(&mut self, replacement: &str) -> bool {
        let Some(range) = self.selection() else {
            return false;
        };
        let start = self.rope.byte_to_char(range.start);
        let end = self.rope.byte_to_char(range.end);
        self.rope.remove(start..end);
        self.rope.insert(start, replacement);
        self.selection = None;
        self.place_cursor_at_byte(range.start + replacement.len());
        true
    }

    // --- Editing ---

    /// Insert a character at the cursor position.
    pub fn insert_char(&mut self, ch: char) {
        self.selection = None;
        self.rope.insert_char(self.cursor_char_idx(), ch);
        if ch == '\n' {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        } else {
            self.cursor.set_col(self.cursor.col + ch.len_utf8());
        }
    }

    /// Insert a string at the cursor position.
    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.selection = None;
        self.rope.insert(self.cursor_char_idx(), s);
        let mut tail = s;
        if let Some((_, last)) = s.rsplit_once('\n') {
            self.cursor.line += s.matches('\n').count();
            self.cursor.set_col(0);
            tail = last;
        }
        self.cursor.set_col(self.cursor.col + tail.len());
    }

    /// Split the current line at the cursor (Enter key).
    pub fn split_line(&mut self) {
        self.insert_char('\n');
    }

    /// Delete the character before the cursor (Backspace).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_back(&mut self) -> bool {
        self.selection = None;
        if self.cursor.col == 0 && self.cursor.line == 0 {
            return false;
        }

        let char_idx = self.cursor_char_idx();
        if self.cursor.col == 0 {
            // Join with the previous line by removing its line break.
            let prev_len = self.line_len(self.cursor.line - 1);
            self.rope.remove(char_idx - 1..char_idx);
            self.cursor.line -= 1;
            self.cursor.set_col(prev_len);
        } else {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let prev_char_len = line[..self.cursor.col]
                .chars()
                .next_back()
                .map_or(1, char::len_utf8);
            self.rope.remove(char_idx - 1..char_idx);
            self.cursor.set_col(self.cursor.col - prev_char_len);
        }
        true
    }

    /// Delete the character at the cursor (Delete key).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_forward(&mut self) -> bool {
        self.selection = None;
        let at_line_end = self.cursor.col >= self.line_len(self.cursor.line);
        if at_line_end && self.cursor.line + 1 >= self.line_count() {
            return false;
        }
        let char_idx = self.cursor_char_idx();
        self.rope.remove(char_idx..char_idx + 1);
        true
    }

    // --- Cursor movement ---

    pub fn move_cursor(&mut self, direction: Direction) {
        self.selection = None;
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Up => self.move_up(),
            Direction::Down => self.move_down(),
        }
    }

    /// Move cursor to the beginning of the line (Home).
    pub const fn move_home(&mut self) {
        self.selection = None;
        self.cursor.set_col(0);
    }

    /// Move cursor to the end of the line (End).
    pub fn move_end(&mut self) {
        self.selection = None;
        let len = self.line_len(self.cursor.line);
        self.cursor.set_col(len);
    }

    /// Move cursor one word to the left (Ctrl+Left).
    pub fn move_word_left(&mut self) {
        self.selection = None;
        if self.cursor.col == 0 {
            if self.cursor.line > 0 {
                self.cursor.line -= 1;
                self.cursor.set_col(self.line_len(self.cursor.line));
            }
            return;
        }

        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let before = line[..self.cursor.col].trim_end();
        if before.is_empty() {
            self.cursor.set_col(0);
            return;
        }
        let pos = before
            .rfind(|c: char| !is_word_char(c))
            .map_or(0, |i| i + 1);
        self.cursor.set_col(pos);
    }

    /// Move cursor one word to the right (Ctrl+Right).
    pub fn move_word_right(&mut self) {
        self.selection = None;
        let line_len = self.line_len(self.cursor.line);
        if self.cursor.col >= line_len {
            if self.cursor.line + 1 < self.line_count() {
                self.cursor.line += 1;
                self.cursor.set_col(0);
            }
            return;
        }

        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let after = &line[self.cursor.col..];
        let word_end = after.find(|c: char| !is_word_char(c)).unwrap_or(after.len());
        let rest = &after[word_end..];
        let gap_end = rest.find(is_word_char).unwrap_or(rest.len());
        self.cursor.set_col(self.cursor.col + word_end + gap_end);
    }

    /// Move cursor to a specific line and column, clamping both.
    pub fn move_to(&mut self, line: usize, col: usize) {
        self.selection = None;
        let max_line = self.line_count().saturating_sub(1);
        self.cursor.line = line.min(max_line);
        let clamped = self.clamp_col_to_boundary(self.cursor.line, col);
        self.cursor.set_col(clamped);
    }

    /// Move cursor to the start of the buffer (Ctrl+Home).
    pub const fn move_to_start(&mut self) {
        self.selection = None;
        self.cursor.line = 0;
        self.cursor.set_col(0);
    }

    /// Move cursor to the end of the buffer (Ctrl+End).
    pub fn move_to_end(&mut self) {
        self.selection = None;
        let last = self.line_count().saturating_sub(1);
        self.cursor.line = last;
        self.cursor.set_col(self.line_len(last));
    }

    // --- Private helpers ---

    /// Char index of the cursor in the rope.
    fn cursor_char_idx(&self) -> usize {
        self.rope.byte_to_char(self.byte_offset())
    }

    /// Position the cursor at a byte offset without touching the selection.
    fn place_cursor_at_byte(&mut self, byte: usize) {
        let byte = byte.min(self.rope.len_bytes());
        // Snap to the containing char boundary.
        let char_idx = self.rope.byte_to_char(byte);
        let byte = self.rope.char_to_byte(char_idx);
        let line = self.rope.char_to_line(char_idx);
        let col = byte - self.rope.line_to_byte(line);
        self.cursor.line = line;
        self.cursor.set_col(col.min(self.line_len(line)));
    }

    fn clamp_range(&self, range: Range<usize>) -> Range<usize> {
        let len = self.rope.len_bytes();
        let start = range.start.min(len);
        let end = range.end.clamp(start, len);
        start..end
    }

    fn clamp_col_to_boundary(&self, line: usize, col: usize) -> usize {
        let text = self.line_at(line).unwrap_or_default();
        let mut col = col.min(text.len());
        while col > 0 && !text.is_char_boundary(col) {
            col -= 1;
        }
        col
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let prev_char_len = line[..self.cursor.col]
                .chars()
                .next_back()
                .map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col - prev_char_len);
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.set_col(self.line_len(self.cursor.line));
        }
    }

    fn move_right(&mut self) {
        let line_len = self.line_len(self.cursor.line);
        if self.cursor.col < line_len {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let next_char_len = line[self.cursor.col..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col + next_char_len);
        } else if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        }
    }

    fn move_up(&mut self) {
        if self.cursor.line > 0 {
            self.cursor.line -= 1;
            let target = self.clamp_col_to_boundary(self.cursor.line, self.cursor.col_memory);
            self.cursor.col = target;
        }
    }

    fn move_down(&mut self) {
        if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            let target = self.clamp_col_to_boundary(self.cursor.line, self.cursor.col_memory);
            self.cursor.col = target;
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl std::fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("cursor", &self.cursor)
            .field("selection", &self.selection)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Construction and queries ---

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buf = TextBuffer::empty();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_at(0), Some(String::new()));
        assert_eq!(buf.len_bytes(), 0);
    }

    #[test]
    fn test_lines_strip_trailing_break() {
        let buf = TextBuffer::from_text("alpha\r\nbeta\n");
        assert_eq!(buf.line_at(0), Some("alpha".to_string()));
        assert_eq!(buf.line_at(1), Some("beta".to_string()));
        assert_eq!(buf.line_at(2), Some(String::new()));
        assert_eq!(buf.line_at(3), None);
    }

    #[test]
    fn test_text_roundtrip() {
        let content = "one\ntwo\nthree";
        assert_eq!(TextBuffer::from_text(content).text(), content);
    }

    // --- Byte offsets ---

    #[test]
    fn test_byte_offset_at_origin_is_zero() {
        let buf = TextBuffer::from_text("hello\nworld");
        assert_eq!(buf.byte_offset(), 0);
    }

    #[test]
    fn test_byte_offset_counts_line_breaks() {
        let mut buf = TextBuffer::from_text("hello\nworld");
        buf.move_to(1, 2);
        assert_eq!(buf.byte_offset(), 8);
    }

    #[test]
    fn test_set_byte_offset_lands_on_line_and_col() {
        let mut buf = TextBuffer::from_text("hello\nworld");
        buf.set_byte_offset(8);
        assert_eq!(buf.cursor(), Cursor::at(1, 2));
    }

    #[test]
    fn test_set_byte_offset_clamps_past_end() {
        let mut buf = TextBuffer::from_text("hi");
        buf.set_byte_offset(999);
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_set_byte_offset_snaps_to_char_boundary() {
        // 'é' occupies bytes 1..3; offset 2 is mid-char.
        let mut buf = TextBuffer::from_text("aéb");
        buf.set_byte_offset(2);
        assert_eq!(buf.cursor().col, 1);
    }

    // --- set_text ---

    #[test]
    fn test_set_text_replaces_content_and_clamps_cursor() {
        let mut buf = TextBuffer::from_text("a long first line\nsecond");
        buf.move_to(1, 6);
        buf.set_text("tiny");
        assert_eq!(buf.text(), "tiny");
        assert_eq!(buf.cursor(), Cursor::at(0, 4));
    }

    #[test]
    fn test_set_text_keeps_cursor_offset_when_possible() {
        let mut buf = TextBuffer::from_text("abcdef");
        buf.move_to(0, 3);
        buf.set_text("abCDef");
        assert_eq!(buf.byte_offset(), 3);
    }

    // --- Selection ---

    #[test]
    fn test_select_places_cursor_at_end() {
        let mut buf = TextBuffer::from_text("find me here");
        buf.select(5..7);
        assert_eq!(buf.selection(), Some(5..7));
        assert_eq!(buf.byte_offset(), 7);
        assert_eq!(buf.selected_text(), Some("me".to_string()));
    }

    #[test]
    fn test_select_to_start_places_cursor_at_start() {
        let mut buf = TextBuffer::from_text("find me here");
        buf.select_to_start(5..7);
        assert_eq!(buf.selection(), Some(5..7));
        assert_eq!(buf.byte_offset(), 5);
    }

    #[test]
    fn test_empty_selection_reports_none() {
        let mut buf = TextBuffer::from_text("abc");
        buf.select(1..1);
        assert_eq!(buf.selection(), None);
    }

    #[test]
    fn test_selection_clamped_to_buffer() {
        let mut buf = TextBuffer::from_text("abc");
        buf.select(1..99);
        assert_eq!(buf.selection(), Some(1..3));
    }

    #[test]
    fn test_cursor_motion_clears_selection() {
        let mut buf = TextBuffer::from_text("abc def");
        buf.select(0..3);
        buf.move_cursor(Direction::Right);
        assert_eq!(buf.selection(), None);
    }

    #[test]
    fn test_insert_clears_selection() {
        let mut buf = TextBuffer::from_text("abc");
        buf.select(0..2);
        buf.insert_char('x');
        assert_eq!(buf.selection(), None);
    }

    #[test]
    fn test_replace_selection_swaps_text() {
        let mut buf = TextBuffer::from_text("say hello twice");
        buf.select(4..9);
        assert!(buf.replace_selection("goodbye"));
        assert_eq!(buf.text(), "say goodbye twice");
        assert_eq!(buf.byte_offset(), 11);
        assert_eq!(buf.selection(), None);
    }

    #[test]
    fn test_replace_selection_with_empty_string_deletes() {
        let mut buf = TextBuffer::from_text("abXcd");
        buf.select(2..3);
        assert!(buf.replace_selection(""));
        assert_eq!(buf.text(), "abcd");
        assert_eq!(buf.byte_offset(), 2);
    }

    #[test]
    fn test_replace_without_selection_is_noop() {
        let mut buf = TextBuffer::from_text("abc");
        assert!(!buf.replace_selection("zzz"));
        assert_eq!(buf.text(), "abc");
    }

    // --- Editing ---

    #[test]
    fn test_insert_char_advances_cursor() {
        let mut buf = TextBuffer::from_text("hllo");
        buf.move_to(0, 1);
        buf.insert_char('e');
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_insert_newline_char_moves_to_next_line() {
        let mut buf = TextBuffer::from_text("ab");
        buf.move_to(0, 1);
        buf.insert_char('\n');
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_insert_str_single_line() {
        let mut buf = TextBuffer::from_text("ad");
        buf.move_to(0, 1);
        buf.insert_str("bc");
        assert_eq!(buf.text(), "abcd");
        assert_eq!(buf.cursor(), Cursor::at(0, 3));
    }

    #[test]
    fn test_insert_str_multi_line_lands_after_last_segment() {
        let mut buf = TextBuffer::from_text("xy");
        buf.move_to(0, 1);
        buf.insert_str("1\n23");
        assert_eq!(buf.text(), "x1\n23y");
        assert_eq!(buf.cursor(), Cursor::at(1, 2));
    }

    #[test]
    fn test_insert_empty_str_is_noop() {
        let mut buf = TextBuffer::from_text("abc");
        buf.select(0..1);
        buf.insert_str("");
        // Even the selection survives a no-op insert.
        assert_eq!(buf.selection(), Some(0..1));
    }

    #[test]
    fn test_split_line_in_middle() {
        let mut buf = TextBuffer::from_text("hello world");
        buf.move_to(0, 5);
        buf.split_line();
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.line_at(1), Some(" world".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_delete_back_at_origin_is_noop() {
        let mut buf = TextBuffer::from_text("hello");
        assert!(!buf.delete_back());
        assert_eq!(buf.text(), "hello");
    }

    #[test]
    fn test_delete_back_removes_char() {
        let mut buf = TextBuffer::from_text("hello");
        buf.move_end();
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "hell");
        assert_eq!(buf.cursor(), Cursor::at(0, 4));
    }

    #[test]
    fn test_delete_back_joins_lines() {
        let mut buf = TextBuffer::from_text("ab\ncd");
        buf.move_to(1, 0);
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "abcd");
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_delete_back_multibyte() {
        let mut buf = TextBuffer::from_text("café");
        buf.move_end();
        buf.delete_back();
        assert_eq!(buf.text(), "caf");
    }

    #[test]
    fn test_delete_forward_at_buffer_end_is_noop() {
        let mut buf = TextBuffer::from_text("hi");
        buf.move_end();
        assert!(!buf.delete_forward());
    }

    #[test]
    fn test_delete_forward_joins_lines() {
        let mut buf = TextBuffer::from_text("ab\ncd");
        buf.move_to(0, 2);
        assert!(buf.delete_forward());
        assert_eq!(buf.text(), "abcd");
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    // --- Cursor movement ---

    #[test]
    fn test_move_left_wraps_to_previous_line() {
        let mut buf = TextBuffer::from_text("ab\ncd");
        buf.move_to(1, 0);
        buf.move_cursor(Direction::Left);
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_move_right_wraps_to_next_line() {
        let mut buf = TextBuffer::from_text("ab\ncd");
        buf.move_to(0, 2);
        buf.move_cursor(Direction::Right);
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_move_right_over_multibyte_char() {
        let mut buf = TextBuffer::from_text("éx");
        buf.move_cursor(Direction::Right);
        assert_eq!(buf.cursor().col, 2);
    }

    #[test]
    fn test_sticky_column_restores_across_short_line() {
        let mut buf = TextBuffer::from_text("wide line\nhi\nwider line");
        buf.move_to(0, 7);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 2);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 7);
    }

    #[test]
    fn test_sticky_column_snaps_to_char_boundary() {
        let mut buf = TextBuffer::from_text("abcdef\naé");
        buf.move_to(0, 2);
        buf.move_cursor(Direction::Down);
        // Byte 2 of "aé" is mid-char; must snap back to 1.
        assert_eq!(buf.cursor().col, 1);
    }

    #[test]
    fn test_move_home_and_end() {
        let mut buf = TextBuffer::from_text("hello");
        buf.move_end();
        assert_eq!(buf.cursor().col, 5);
        buf.move_home();
        assert_eq!(buf.cursor().col, 0);
    }

    #[test]
    fn test_move_word_right_then_left_returns() {
        let mut buf = TextBuffer::from_text("alpha beta");
        buf.move_word_right();
        assert_eq!(buf.cursor().col, 6);
        buf.move_word_left();
        assert_eq!(buf.cursor().col, 0);
    }

    #[test]
    fn test_move_word_left_across_line_break() {
        let mut buf = TextBuffer::from_text("one\ntwo");
        buf.move_to(1, 0);
        buf.move_word_left();
        assert_eq!(buf.cursor(), Cursor::at(0, 3));
    }

    #[test]
    fn test_move_word_right_across_line_break() {
        let mut buf = TextBuffer::from_text("one\ntwo");
        buf.move_to(0, 3);
        buf.move_word_right();
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_move_to_clamps_line_and_col() {
        let mut buf = TextBuffer::from_text("short");
        buf.move_to(42, 42);
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_move_to_start_and_end_of_buffer() {
        let mut buf = TextBuffer::from_text("ab\ncde");
        buf.move_to_end();
        assert_eq!(buf.cursor(), Cursor::at(1, 3));
        buf.move_to_start();
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
    }

    // --- Editing sequences ---

    #[test]
    fn test_type_backspace_type() {
        let mut buf = TextBuffer::empty();
        for ch in "hel".chars() {
            buf.insert_char(ch);
        }
        buf.delete_back();
        buf.insert_char('l');
        buf.insert_char('p');
        assert_eq!(buf.text(), "help");
    }

    #[test]
    fn test_split_and_rejoin() {
        let mut buf = TextBuffer::from_text("helloworld");
        buf.move_to(0, 5);
        buf.split_line();
        assert_eq!(buf.line_count(), 2);
        buf.delete_back();
        assert_eq!(buf.text(), "helloworld");
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn set_byte_offset_roundtrips_through_cursor(
                text in "[ -~\n]{0,200}",
                offset in 0..300usize,
            ) {
                let mut buf = TextBuffer::from_text(&text);
                buf.set_byte_offset(offset);
                prop_assert!(buf.byte_offset() <= buf.len_bytes());
                prop_assert!(buf.byte_offset() <= offset.min(buf.len_bytes()));
            }

            #[test]
            fn arbitrary_edits_keep_cursor_in_bounds(
                text in "[a-zé\n]{0,60}",
                edits in proptest::collection::vec(0u8..5, 0..40),
            ) {
                let mut buf = TextBuffer::from_text(&text);
                for edit in edits {
                    match edit {
                        0 => buf.insert_char('x'),
                        1 => { buf.delete_back(); }
                        2 => { buf.delete_forward(); }
                        3 => buf.move_cursor(Direction::Right),
                        _ => buf.move_cursor(Direction::Down),
                    }
                    let c = buf.cursor();
                    prop_assert!(c.line < buf.line_count());
                    prop_assert!(c.col <= buf.line_len(c.line));
                }
            }
        }
    }
}
