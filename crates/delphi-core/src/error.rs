/// Errors that can occur across the Delphi crates.
///
/// Each variant wraps a specific failure domain. Collaborator failures
/// (`Retrieval`, `Completion`) are never caught or retried inside the
/// engine; they propagate unchanged to the caller.
///
/// # Examples
///
/// ```
/// use delphi_core::DelphiError;
///
/// let err = DelphiError::Completion("rate limited".into());
/// assert!(err.to_string().contains("rate limited"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DelphiError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Retriever collaborator failure.
    #[error("retrieval error: {0}")]
    Retrieval(String),

    /// Completion service failure: auth, quota, network, or
    /// context-length exceeded.
    #[error("completion error: {0}")]
    Completion(String),

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: DelphiError = io_err.into();
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn retrieval_error_displays_message() {
        let err = DelphiError::Retrieval("index unavailable".into());
        assert_eq!(err.to_string(), "retrieval error: index unavailable");
    }

    #[test]
    fn completion_error_displays_message() {
        let err = DelphiError::Completion("401 Unauthorized".into());
        assert_eq!(err.to_string(), "completion error: 401 Unauthorized");
    }
}
