//! Cursor position

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Cursor position in the buffer
///
/// `col` may equal the line length, meaning "at end of line".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

impl Cursor {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub const fn zero() -> Self {
        Self { row: 0, col: 0 }
    }

    /// Pull `col` back to `line_len` if it overflows; returns whether it moved
    pub fn clamp_col(&mut self, line_len: usize) -> bool {
        if self.col > line_len {
            self.col = line_len;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor() {
        let cursor = Cursor::new(5, 10);
        assert_eq!(cursor.row, 5);
        assert_eq!(cursor.col, 10);
        assert_eq!(Cursor::zero(), Cursor::default());
    }

    #[test]
    fn test_clamp_col() {
        let mut cursor = Cursor::new(0, 7);
        assert!(cursor.clamp_col(3));
        assert_eq!(cursor.col, 3);

        assert!(!cursor.clamp_col(3));
        assert!(!cursor.clamp_col(10));
        assert_eq!(cursor.col, 3);
    }
}
