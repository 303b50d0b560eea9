//! Input symbol classification

use crate::command::Command;
use crate::error::TerminalError;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// One classified character of a command stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum InputSymbol {
    Command(Command),
    /// Literal content to insert at the cursor
    Literal(char),
}

impl InputSymbol {
    /// Classify a character, rejecting anything outside the alphabet
    pub fn classify(ch: char) -> Result<Self, TerminalError> {
        if let Some(command) = Command::from_code(ch) {
            return Ok(InputSymbol::Command(command));
        }
        if is_literal(ch) {
            return Ok(InputSymbol::Literal(ch));
        }
        Err(TerminalError::InvalidInputSymbol(ch))
    }

    /// The character this symbol was classified from
    pub fn as_char(&self) -> char {
        match self {
            InputSymbol::Command(command) => command.code(),
            InputSymbol::Literal(ch) => *ch,
        }
    }
}

/// Literal content: `a-z`, `0-9` and `,`
pub fn is_literal(ch: char) -> bool {
    matches!(ch, 'a'..='z' | '0'..='9' | ',')
}
