// src/error.rs
use thiserror::Error;

/// Every failure a view can show: server errors, transport errors and form
/// validation all collapse into a list of human-readable messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", .messages.join("; "))]
pub struct ApiError {
    pub messages: Vec<String>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }

    pub fn from_messages(messages: Vec<String>) -> Self {
        if messages.is_empty() {
            return Self::new("Unknown error");
        }
        Self { messages }
    }

    pub fn first(&self) -> &str {
        self.messages.first().map(String::as_str).unwrap_or_default()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::new(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_messages() {
        let err = ApiError::from_messages(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "a; b");
        assert_eq!(err.first(), "a");
    }

    #[test]
    fn test_empty_messages_get_placeholder() {
        let err = ApiError::from_messages(Vec::new());
        assert_eq!(err.messages, vec!["Unknown error".to_string()]);
    }
}
