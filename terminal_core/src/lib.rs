//! # Terminal Core
//!
//! Command-driven line editor: a multi-line text buffer, a 2-D cursor and
//! the interpreter that applies single-character commands to them.
//!
//! ## Philosophy
//!
//! - **Deterministic**: Same command stream => same buffer and cursor
//! - **Single pass**: Symbols apply in stream order, the first rejected
//!   symbol stops the stream, nothing is rolled back
//! - **Growth only**: Lines are split and extended, never removed
//! - **No ambient output**: Tracing goes through an injected `LogSink`
//!
//! ## Design
//!
//! The core provides:
//! - TextBuffer: Line storage that always holds at least one line
//! - Cursor: Row/column position, clamped against the buffer after every step
//! - TerminalCore: The interpreter for `L R U D B E N` and literal content
//! - TerminalSnapshot: State capture for comparison and annotated previews

pub mod buffer;
pub mod command;
pub mod cursor;
pub mod error;
pub mod interpreter;
pub mod snapshot;
pub mod symbol;

pub use buffer::TextBuffer;
pub use command::Command;
pub use cursor::Cursor;
pub use error::TerminalError;
pub use interpreter::{CoreOutcome, TerminalCore};
pub use snapshot::{TerminalSnapshot, DEFAULT_CURSOR_MARKER};
pub use symbol::{is_literal, InputSymbol};
