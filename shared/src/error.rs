//! Error type shared by every client operation.

use thiserror::Error;

use crate::forms::FormError;

#[derive(Debug, Error)]
pub enum ClientError {
    /// An authenticated call was attempted without a stored token
    #[error("Not logged in")]
    MissingToken,

    /// The request never produced a response
    #[error("Request failed: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status
    #[error("HTTP error: {status}{}", detail_suffix(.detail))]
    Status { status: u16, detail: Option<String> },

    /// A 2xx body did not match the expected shape
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// The session store could not be written
    #[error("Storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Form(#[from] FormError),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(" ({})", d))
        .unwrap_or_default()
}

impl ClientError {
    pub fn network(err: impl std::fmt::Display) -> Self {
        ClientError::Network(err.to_string())
    }

    pub fn storage(err: impl std::fmt::Display) -> Self {
        ClientError::Storage(err.to_string())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the caller should be treated as logged out.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            ClientError::MissingToken | ClientError::Status { status: 401 | 403, .. }
        )
    }

    /// Text suitable for a message line on the page.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::MissingToken => "トークンが見つかりません。".to_string(),
            ClientError::Status {
                detail: Some(detail),
                ..
            } => format!("エラー: {}", detail),
            other => format!("エラー: {}", other),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_statuses() {
        assert!(ClientError::MissingToken.is_unauthorized());
        assert!(ClientError::Status { status: 401, detail: None }.is_unauthorized());
        assert!(ClientError::Status { status: 403, detail: None }.is_unauthorized());
        assert!(!ClientError::Status { status: 404, detail: None }.is_unauthorized());
        assert!(!ClientError::Network("offline".into()).is_unauthorized());
    }

    #[test]
    fn test_display_includes_detail() {
        let err = ClientError::Status {
            status: 406,
            detail: Some("Outdated".to_string()),
        };
        assert_eq!(err.to_string(), "HTTP error: 406 (Outdated)");
        assert_eq!(err.user_message(), "エラー: Outdated");

        let err = ClientError::Status { status: 500, detail: None };
        assert_eq!(err.to_string(), "HTTP error: 500");
    }
}
