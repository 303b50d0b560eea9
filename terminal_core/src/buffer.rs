//! Text buffer with line-based storage

use crate::error::TerminalError;

/// Text buffer with line-based storage
///
/// Always holds at least one line. Lines are only ever added or rewritten,
/// never removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }

    /// Builds a buffer from existing lines (an empty list yields one empty line)
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self { lines }
    }

    /// Renders every line joined by `\n`
    pub fn as_string(&self) -> String {
        self.lines.join("\n")
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// The line at `row`, or `InvalidRow` if there is none
    pub fn current_line(&self, row: usize) -> Result<&str, TerminalError> {
        self.line(row).ok_or(TerminalError::InvalidRow {
            row,
            line_count: self.lines.len(),
        })
    }

    pub fn line_length(&self, row: usize) -> usize {
        self.lines.get(row).map(|s| s.len()).unwrap_or(0)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Insert a new line directly below `row`, shifting later lines down
    pub fn insert_line_after(
        &mut self,
        row: usize,
        content: impl Into<String>,
    ) -> Result<(), TerminalError> {
        self.check_row(row)?;
        self.lines.insert(row + 1, content.into());
        Ok(())
    }

    /// Overwrite the content of the line at `row`
    pub fn replace_line(
        &mut self,
        row: usize,
        content: impl Into<String>,
    ) -> Result<(), TerminalError> {
        self.check_row(row)?;
        self.lines[row] = content.into();
        Ok(())
    }

    /// Splice a character into the line at `row` before byte offset `col`
    pub fn insert_char(&mut self, row: usize, col: usize, ch: char) -> Result<(), TerminalError> {
        let current = self.current_line(row)?;
        let col = col.min(current.len());

        let mut updated = String::with_capacity(current.len() + ch.len_utf8());
        updated.push_str(&current[..col]);
        updated.push(ch);
        updated.push_str(&current[col..]);
        self.replace_line(row, updated)
    }

    /// Split the line at `row` at byte offset `col`
    ///
    /// The prefix stays on `row`; the suffix (possibly empty) becomes a new
    /// line at `row + 1`.
    pub fn split_line(&mut self, row: usize, col: usize) -> Result<(), TerminalError> {
        let current = self.current_line(row)?;
        let col = col.min(current.len());

        let (prefix, suffix) = current.split_at(col);
        let (prefix, suffix) = (prefix.to_string(), suffix.to_string());
        self.replace_line(row, prefix)?;
        self.insert_line_after(row, suffix)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    fn check_row(&self, row: usize) -> Result<(), TerminalError> {
        if row < self.lines.len() {
            Ok(())
        } else {
            Err(TerminalError::InvalidRow {
                row,
                line_count: self.lines.len(),
            })
        }
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_buffer_new() {
        let buffer = TextBuffer::new();
        assert_eq!(buffer.line_count(), 1);
        assert_eq!(buffer.line(0), Some(""));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_text_buffer_from_lines() {
        let buffer = TextBuffer::from_lines(["hello", "world"]);
        assert_eq!(buffer.line_count(), 2);
        assert_eq!(buffer.line(0), Some("hello"));
        assert_eq!(buffer.line(1), Some("world"));

        let empty = TextBuffer::from_lines(Vec::<String>::new());
        assert_eq!(empty.line_count(), 1);
    }

    #[test]
    fn test_text_buffer_to_string() {
        let buffer = TextBuffer::from_lines(["hello", "", "world"]);
        assert_eq!(buffer.as_string(), "hello\n\nworld");
    }

    #[test]
    fn test_current_line_out_of_range() {
        let buffer = TextBuffer::new();
        assert_eq!(buffer.current_line(0), Ok(""));
        assert_eq!(
            buffer.current_line(1),
            Err(TerminalError::InvalidRow {
                row: 1,
                line_count: 1
            })
        );
    }

    #[test]
    fn test_line_length() {
        let buffer = TextBuffer::from_lines(["abc", ""]);
        assert_eq!(buffer.line_length(0), 3);
        assert_eq!(buffer.line_length(1), 0);
        assert_eq!(buffer.line_length(9), 0);
    }

    #[test]
    fn test_insert_line_after_shifts_down() {
        let mut buffer = TextBuffer::from_lines(["one", "three"]);
        buffer.insert_line_after(0, "two").unwrap();
        assert_eq!(buffer.lines(), ["one", "two", "three"]);

        buffer.insert_line_after(2, "four").unwrap();
        assert_eq!(buffer.line(3), Some("four"));
        assert!(buffer.insert_line_after(7, "x").is_err());
    }

    #[test]
    fn test_replace_line() {
        let mut buffer = TextBuffer::from_lines(["old"]);
        buffer.replace_line(0, "new").unwrap();
        assert_eq!(buffer.line(0), Some("new"));
        assert!(buffer.replace_line(1, "x").is_err());
    }

    #[test]
    fn test_insert_char() {
        let mut buffer = TextBuffer::from_lines(["ac"]);
        buffer.insert_char(0, 1, 'b').unwrap();
        assert_eq!(buffer.line(0), Some("abc"));

        buffer.insert_char(0, 3, '!').unwrap();
        assert_eq!(buffer.line(0), Some("abc!"));
    }

    #[test]
    fn test_split_line() {
        let mut buffer = TextBuffer::from_lines(["abcdef"]);
        buffer.split_line(0, 3).unwrap();
        assert_eq!(buffer.lines(), ["abc", "def"]);
    }

    #[test]
    fn test_split_line_at_end_adds_empty_line() {
        let mut buffer = TextBuffer::from_lines(["abc", "tail"]);
        buffer.split_line(0, 3).unwrap();
        assert_eq!(buffer.lines(), ["abc", "", "tail"]);
    }
}
