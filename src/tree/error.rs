use std::error::Error;
use std::fmt;

/// Errors for the fallible scoreboard operations.
///
/// Both kinds are recoverable and leave the board unmodified; service hosts
/// typically map them to client-visible rejections.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum ScoreError {
    /// `add` was called for a user that already holds a score.
    DuplicateUser,

    /// `update` was called for a user with no score on the board.
    UnknownUser,
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::DuplicateUser => write!(f, "user already has a score"),
            ScoreError::UnknownUser => write!(f, "user cannot be found"),
        }
    }
}

impl Error for ScoreError {}
