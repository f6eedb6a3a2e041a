use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The fetch was aborted before a response arrived.
    #[error("request cancelled")]
    Cancelled,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server responded with {status}: {message}")]
    Status { status: u16, message: String },

    #[error("item not found")]
    NotFound,

    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Cancellation is expected whenever a newer fetch supersedes an older
    /// one and should not be reported as a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_cancelled_is_cancelled() {
        assert!(FetchError::Cancelled.is_cancelled());
        assert!(!FetchError::NotFound.is_cancelled());
        assert!(
            !FetchError::Status {
                status: 500,
                message: "boom".to_string()
            }
            .is_cancelled()
        );
    }
}
