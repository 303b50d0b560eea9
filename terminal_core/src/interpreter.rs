//! TerminalCore interpreter
//!
//! A Mealy-style interpreter: there is no mode, every symbol either runs a
//! command against the cursor or inserts literal content at it.

use terminal_logger::{DatasetId, LogEntry, LogLevel, LogSink, NullLog};

use crate::{
    buffer::TextBuffer,
    command::Command,
    cursor::Cursor,
    error::TerminalError,
    snapshot::{TerminalSnapshot, DEFAULT_CURSOR_MARKER},
    symbol::InputSymbol,
};

/// Outcome from applying one symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreOutcome {
    /// Nothing moved (a clamped no-op such as `L` at column 0)
    Continue,
    /// Cursor or buffer changed
    Changed,
}

impl CoreOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoreOutcome::Continue => "continue",
            CoreOutcome::Changed => "changed",
        }
    }
}

/// Command interpreter owning one buffer and its cursor
#[derive(Debug, Clone)]
pub struct TerminalCore {
    buffer: TextBuffer,
    cursor: Cursor,
    marker: char,
    steps: usize,
}

impl TerminalCore {
    /// Create an interpreter over an empty buffer
    pub fn new() -> Self {
        Self {
            buffer: TextBuffer::new(),
            cursor: Cursor::zero(),
            marker: DEFAULT_CURSOR_MARKER,
            steps: 0,
        }
    }

    /// Use a different glyph for the annotated preview
    pub fn with_marker(mut self, marker: char) -> Self {
        self.marker = marker;
        self
    }

    /// Classify and apply one character
    pub fn apply_char(&mut self, ch: char) -> Result<CoreOutcome, TerminalError> {
        let symbol = InputSymbol::classify(ch)?;
        self.apply_symbol(symbol)
    }

    /// Apply an already classified symbol
    pub fn apply_symbol(&mut self, symbol: InputSymbol) -> Result<CoreOutcome, TerminalError> {
        let outcome = match symbol {
            InputSymbol::Command(command) => self.execute(command)?,
            InputSymbol::Literal(ch) => self.insert_literal(ch)?,
        };
        self.steps += 1;
        Ok(outcome)
    }

    /// Apply every character of `input`, stopping at the first rejected one
    pub fn feed(&mut self, input: &str) -> Result<(), TerminalError> {
        self.feed_logged(input, &mut NullLog, None)
    }

    /// Like [`feed`](Self::feed), tracing each step into `log`
    ///
    /// At debug level every applied symbol is logged together with the
    /// annotated preview of the resulting state.
    pub fn feed_logged(
        &mut self,
        input: &str,
        log: &mut dyn LogSink,
        source: Option<DatasetId>,
    ) -> Result<(), TerminalError> {
        for (offset, ch) in input.char_indices() {
            match self.apply_char(ch) {
                Ok(outcome) => {
                    if log.enabled(LogLevel::Debug) {
                        let entry = LogEntry::debug("applied symbol")
                            .with_field("symbol", ch)
                            .with_field("offset", offset)
                            .with_field("outcome", outcome.as_str())
                            .with_field("preview", self.preview());
                        log.log(attach_source(entry, source));
                    }
                }
                Err(err) => {
                    if log.enabled(LogLevel::Debug) {
                        let entry = LogEntry::debug("rejected symbol")
                            .with_field("symbol", ch)
                            .with_field("offset", offset)
                            .with_field("error", err);
                        log.log(attach_source(entry, source));
                    }
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    /// Run a command against the cursor (and, for `Enter`, the buffer)
    pub fn execute(&mut self, command: Command) -> Result<CoreOutcome, TerminalError> {
        match command {
            Command::Left => Ok(self.move_cursor_left()),
            Command::Right => self.move_cursor_right(),
            Command::Up => self.move_cursor_up(),
            Command::Down => self.move_cursor_down(),
            Command::Home => Ok(self.move_to_line_start()),
            Command::End => self.move_to_line_end(),
            Command::Enter => self.split_line(),
        }
    }

    /// Final output: lines joined by `\n`
    pub fn render(&self) -> String {
        self.buffer.as_string()
    }

    /// Diagnostic view with the marker glyph at the cursor
    pub fn preview(&self) -> String {
        self.snapshot().preview(self.marker)
    }

    pub fn snapshot(&self) -> TerminalSnapshot {
        TerminalSnapshot {
            cursor: self.cursor,
            buffer_lines: self.buffer.lines().to_vec(),
        }
    }

    // Public accessors for rendering/testing
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Number of symbols applied so far
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// `row < line_count` and `col <= line_length(row)`
    pub fn cursor_in_bounds(&self) -> bool {
        self.cursor.row < self.buffer.line_count()
            && self.cursor.col <= self.buffer.line_length(self.cursor.row)
    }

    // Command handlers

    fn current_line_length(&self) -> Result<usize, TerminalError> {
        self.buffer.current_line(self.cursor.row).map(str::len)
    }

    fn move_cursor_left(&mut self) -> CoreOutcome {
        if self.cursor.col == 0 {
            return CoreOutcome::Continue;
        }
        self.cursor.col -= 1;
        CoreOutcome::Changed
    }

    fn move_cursor_right(&mut self) -> Result<CoreOutcome, TerminalError> {
        let line_len = self.current_line_length()?;
        if self.cursor.col >= line_len {
            self.cursor.col = line_len;
            return Ok(CoreOutcome::Continue);
        }
        self.cursor.col += 1;
        Ok(CoreOutcome::Changed)
    }

    fn move_cursor_up(&mut self) -> Result<CoreOutcome, TerminalError> {
        if self.cursor.row == 0 {
            return Ok(CoreOutcome::Continue);
        }
        self.cursor.row -= 1;
        self.clamp_cursor()?;
        Ok(CoreOutcome::Changed)
    }

    fn move_cursor_down(&mut self) -> Result<CoreOutcome, TerminalError> {
        if self.cursor.row + 1 >= self.buffer.line_count() {
            return Ok(CoreOutcome::Continue);
        }
        self.cursor.row += 1;
        self.clamp_cursor()?;
        Ok(CoreOutcome::Changed)
    }

    fn move_to_line_start(&mut self) -> CoreOutcome {
        if self.cursor.col == 0 {
            return CoreOutcome::Continue;
        }
        self.cursor.col = 0;
        CoreOutcome::Changed
    }

    fn move_to_line_end(&mut self) -> Result<CoreOutcome, TerminalError> {
        let line_len = self.current_line_length()?;
        if self.cursor.col == line_len {
            return Ok(CoreOutcome::Continue);
        }
        self.cursor.col = line_len;
        Ok(CoreOutcome::Changed)
    }

    fn split_line(&mut self) -> Result<CoreOutcome, TerminalError> {
        self.buffer.split_line(self.cursor.row, self.cursor.col)?;
        self.cursor.row += 1;
        self.cursor.col = 0;
        Ok(CoreOutcome::Changed)
    }

    fn insert_literal(&mut self, ch: char) -> Result<CoreOutcome, TerminalError> {
        self.buffer
            .insert_char(self.cursor.row, self.cursor.col, ch)?;
        self.cursor.col += 1;
        Ok(CoreOutcome::Changed)
    }

    fn clamp_cursor(&mut self) -> Result<(), TerminalError> {
        let line_len = self.current_line_length()?;
        self.cursor.clamp_col(line_len);
        Ok(())
    }
}

impl Default for TerminalCore {
    fn default() -> Self {
        Self::new()
    }
}

fn attach_source(entry: LogEntry, source: Option<DatasetId>) -> LogEntry {
    match source {
        Some(id) => entry.with_source(id),
        None => entry,
    }
}
