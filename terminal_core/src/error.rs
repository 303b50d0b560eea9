//! Interpreter error types

use thiserror::Error;

/// Errors raised while interpreting a command stream
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TerminalError {
    /// Neither a command code nor literal content
    #[error("incorrect terminal input: {0:?}")]
    InvalidInputSymbol(char),

    /// Cursor row outside the buffer; indicates a bug in command handling
    #[error("cursor row {row} out of range ({line_count} lines)")]
    InvalidRow { row: usize, line_count: usize },
}
