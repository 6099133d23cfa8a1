use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use slot_core::{Session, SessionStatus, Symbol};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: String,
    pub credits: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionDetails {
    pub session_id: String,
    pub credits: u64,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Session> for SessionDetails {
    fn from(s: Session) -> Self {
        Self {
            session_id: s.id,
            credits: s.credits,
            status: s.status,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RollRequest {
    pub session_id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RollResponse {
    pub symbols: Vec<Symbol>,
    pub win_amount: u64,
    pub credits: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CashoutRequest {
    pub session_id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CashoutResponse {
    pub final_credits: u64,
    pub status: SessionStatus,
}

/// Body sent with every non-2xx response.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub message: String,
    pub error: String,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::NotFound(_) => 404,
            ApiError::BadRequest(_) => 400,
            ApiError::Internal => 500,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "Not Found",
            ApiError::BadRequest(_) => "Bad Request",
            ApiError::Internal => "Internal Server Error",
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            status_code: self.status_code(),
            message: self.to_string(),
            error: self.reason().to_string(),
        }
    }
}

impl From<slot_core::GameError> for ApiError {
    fn from(err: slot_core::GameError) -> Self {
        use slot_core::ErrorKind;
        match err.kind() {
            ErrorKind::NotFound => ApiError::NotFound("Session not found".into()),
            ErrorKind::InvalidState => ApiError::BadRequest("Session is closed".into()),
            ErrorKind::InsufficientCredits => ApiError::BadRequest("Insufficient credits".into()),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
