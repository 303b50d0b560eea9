//! Terminal snapshot for deterministic comparison and diagnostics

use crate::cursor::Cursor;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Marker glyph used by the annotated preview unless a host overrides it
pub const DEFAULT_CURSOR_MARKER: char = '_';

/// Complete interpreter state
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct TerminalSnapshot {
    pub cursor: Cursor,
    pub buffer_lines: Vec<String>,
}

impl TerminalSnapshot {
    /// Lines joined by `\n`, no cursor marker
    pub fn render(&self) -> String {
        self.buffer_lines.join("\n")
    }

    /// Every line followed by `\n`, with `marker` spliced in at the cursor
    pub fn preview(&self, marker: char) -> String {
        let mut out = String::new();
        for (row, line) in self.buffer_lines.iter().enumerate() {
            if row == self.cursor.row {
                let col = self.cursor.col.min(line.len());
                out.push_str(&line[..col]);
                out.push(marker);
                out.push_str(&line[col..]);
            } else {
                out.push_str(line);
            }
            out.push('\n');
        }
        out
    }

    /// Compute a deterministic hash of the snapshot state
    #[cfg(test)]
    pub fn hash(&self) -> u64 {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();

        hasher.update(self.cursor.row.to_le_bytes());
        hasher.update(self.cursor.col.to_le_bytes());

        for line in &self.buffer_lines {
            hasher.update(line.as_bytes());
            hasher.update(b"\n");
        }

        let result = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&result[..8]);
        u64::from_le_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(row: usize, col: usize, lines: &[&str]) -> TerminalSnapshot {
        TerminalSnapshot {
            cursor: Cursor::new(row, col),
            buffer_lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }

    #[test]
    fn test_render_has_no_marker() {
        let snap = snapshot(1, 0, &["ab", "c"]);
        assert_eq!(snap.render(), "ab\nc");
    }

    #[test]
    fn test_preview_marks_cursor() {
        let snap = snapshot(0, 1, &["abc", "de"]);
        assert_eq!(snap.preview(DEFAULT_CURSOR_MARKER), "a_bc\nde\n");

        let snap = snapshot(1, 2, &["abc", "de"]);
        assert_eq!(snap.preview('|'), "abc\nde|\n");
    }

    #[test]
    fn test_preview_of_empty_buffer() {
        let snap = snapshot(0, 0, &[""]);
        assert_eq!(snap.preview(DEFAULT_CURSOR_MARKER), "_\n");
    }

    #[test]
    fn test_snapshot_hash_deterministic() {
        let snap = snapshot(0, 0, &["hello", "world"]);
        assert_eq!(snap.hash(), snap.clone().hash(), "Hash should be deterministic");
    }

    #[test]
    fn test_snapshot_hash_different_for_different_state() {
        let a = snapshot(0, 0, &["hello"]);
        let b = snapshot(0, 1, &["hello"]);
        let c = snapshot(0, 0, &["hell", "o"]);
        assert_ne!(a.hash(), b.hash());
        assert_ne!(a.hash(), c.hash());
    }
}
