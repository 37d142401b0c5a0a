use thiserror::Error;

/// Errors surfaced by any call to the ATM backend.
///
/// Every screen handles these the same way: stop loading, keep a message
/// string, render it inline or as a toast. Nothing is retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Token missing before the request, or rejected by the server (401/403).
    #[error("Sesi tidak valid, silakan login kembali")]
    Unauthorized,

    /// The request never produced a response.
    #[error("Tidak ada respons dari server: {0}")]
    Network(String),

    /// Non-2xx status. `message` comes from the body when the server sent one.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Body was not the JSON shape we expected.
    #[error("Format respons tidak dikenali: {0}")]
    Decode(String),

    /// `data` was missing or null.
    #[error("Data tidak ditemukan")]
    Empty,
}

impl ApiError {
    pub fn http(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status {}", status));
        ApiError::Http { status, message }
    }

    /// Text shown to the user. Transport details stay in the log.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Tidak ada respons dari server".to_string(),
            ApiError::Decode(_) | ApiError::Empty => "Data tidak ditemukan".to_string(),
            other => other.to_string(),
        }
    }

    /// Empty or unexpectedly shaped payloads render as an empty state.
    pub fn is_empty(&self) -> bool {
        matches!(self, ApiError::Empty | ApiError::Decode(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_message_fallback() {
        assert_eq!(
            ApiError::http(500, None).user_message(),
            "Request failed with status 500"
        );
        assert_eq!(
            ApiError::http(422, Some("   ".to_string())).user_message(),
            "Request failed with status 422"
        );
        assert_eq!(
            ApiError::http(400, Some("Kode ATM sudah dipakai".to_string())).user_message(),
            "Kode ATM sudah dipakai"
        );
    }

    #[test]
    fn test_network_message_is_generic() {
        let err = ApiError::Network("TypeError: Failed to fetch".to_string());
        assert_eq!(err.user_message(), "Tidak ada respons dari server");
        assert!(err.to_string().contains("Failed to fetch"));
    }

    #[test]
    fn test_empty_classification() {
        assert!(ApiError::Empty.is_empty());
        assert!(ApiError::Decode("x".into()).is_empty());
        assert!(!ApiError::Unauthorized.is_empty());
        assert!(ApiError::Unauthorized.is_unauthorized());
    }
}
