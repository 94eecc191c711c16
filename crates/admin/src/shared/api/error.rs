use thiserror::Error;

/// Ошибки обращения к REST API админки
#[derive(Debug, Error)]
pub enum ApiError {
    /// Сетевая ошибка: соединение, таймаут, TLS
    #[error("Network error: {0}")]
    Transport(String),

    #[error("HTTP {status} for {method} {url}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
    },

    /// Сервер отклонил запрос как конфликтующий (например, имя категории занято)
    #[error("Conflict for {method} {url}")]
    Conflict { method: &'static str, url: String },

    #[error("Failed to parse response from {url}: {message}")]
    Decode { url: String, message: String },

    /// Проверка на стороне клиента, запрос не отправлялся
    #[error("Invalid request: {0}")]
    Validation(String),
}

/// Укрупнённая классификация ошибок: клиент не ветвится по кодам статуса
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Validation,
    Conflict,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Transport(_) | ApiError::Status { .. } | ApiError::Decode { .. } => {
                ErrorKind::Network
            }
            ApiError::Conflict { .. } => ErrorKind::Conflict,
            ApiError::Validation(_) => ErrorKind::Validation,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Conflict { .. } => Some(409),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_collapse_server_failures_into_network() {
        let err = ApiError::Status {
            method: "GET",
            url: "http://x/categories".to_string(),
            status: 500,
        };
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.status(), Some(500));
        assert_eq!(
            ApiError::Validation("empty".into()).kind(),
            ErrorKind::Validation
        );
    }
}
