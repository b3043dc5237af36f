use thiserror::Error;

/// Why an inventory request failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Transport failure: the request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(String),
    /// Non-2xx status.
    #[error("HTTP error: {0}")]
    Http(u16),
    /// Body was not the expected JSON.
    #[error("Failed to parse response: {0}")]
    Payload(String),
    /// Well-formed body with `success: false`.
    #[error("{0}")]
    Unsuccessful(String),
}

impl FetchError {
    /// The one message shown in the error banner, whatever the failure kind.
    pub fn user_message(&self) -> String {
        format!("Error loading data: {}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        assert_eq!(
            FetchError::Http(502).user_message(),
            "Error loading data: HTTP error: 502"
        );
        assert_eq!(
            FetchError::Unsuccessful("DB down".to_string()).user_message(),
            "Error loading data: DB down"
        );
    }
}
