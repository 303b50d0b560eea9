//! Command codes

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// A navigation or structural command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum Command {
    /// `L`: one column left
    Left,
    /// `R`: one column right
    Right,
    /// `U`: one line up
    Up,
    /// `D`: one line down
    Down,
    /// `B`: start of line
    Home,
    /// `E`: end of line
    End,
    /// `N`: split the line at the cursor
    Enter,
}

impl Command {
    /// Every command, in code order `L R U D B E N`
    pub const ALL: [Command; 7] = [
        Command::Left,
        Command::Right,
        Command::Up,
        Command::Down,
        Command::Home,
        Command::End,
        Command::Enter,
    ];

    /// Look up a command by its (case-sensitive) code
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'L' => Some(Command::Left),
            'R' => Some(Command::Right),
            'U' => Some(Command::Up),
            'D' => Some(Command::Down),
            'B' => Some(Command::Home),
            'E' => Some(Command::End),
            'N' => Some(Command::Enter),
            _ => None,
        }
    }

    pub fn code(&self) -> char {
        match self {
            Command::Left => 'L',
            Command::Right => 'R',
            Command::Up => 'U',
            Command::Down => 'D',
            Command::Home => 'B',
            Command::End => 'E',
            Command::Enter => 'N',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Left => "left",
            Command::Right => "right",
            Command::Up => "up",
            Command::Down => "down",
            Command::Home => "home",
            Command::End => "end",
            Command::Enter => "enter",
        }
    }

    /// Whether the command can change the buffer's shape
    pub fn is_structural(&self) -> bool {
        matches!(self, Command::Enter)
    }
}
