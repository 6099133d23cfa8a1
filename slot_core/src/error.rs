use crate::session::SessionStatus;
use thiserror::Error;

/// Coarse classification, for callers that map failures onto their own signalling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidState,
    InsufficientCredits,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("session {session_id} not found")]
    NotFound { session_id: String },

    #[error("session {session_id} is {status}")]
    InvalidState {
        session_id: String,
        status: SessionStatus,
    },

    #[error("balance {credits} is below the roll cost {roll_cost}")]
    InsufficientCredits { credits: u64, roll_cost: u64 },
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::NotFound { .. } => ErrorKind::NotFound,
            GameError::InvalidState { .. } => ErrorKind::InvalidState,
            GameError::InsufficientCredits { .. } => ErrorKind::InsufficientCredits,
        }
    }
}

pub type GameResult<T> = Result<T, GameError>;
