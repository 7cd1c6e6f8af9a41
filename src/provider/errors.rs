use thiserror::Error;

/// Upstream bodies are cut to this many characters in error messages.
const MAX_BODY_CHARS: usize = 512;

/// Provider errors. Every variant is terminal for the request.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider API key not configured")]
    MissingCredential,

    #[error("invalid provider endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("provider request timed out")]
    Timeout,

    #[error("provider request failed: {0}")]
    Network(String),

    #[error("provider rejected credentials (status {status}): {body}")]
    Unauthorized { status: u16, body: String },

    #[error("provider returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

impl ProviderError {
    /// Classify a transport-level `reqwest` failure.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err.to_string())
        }
    }

    /// Classify a non-success HTTP status from the provider.
    pub fn from_status(status: u16, body: &str) -> Self {
        let body = truncate(body.trim());
        match status {
            401 | 403 => Self::Unauthorized { status, body },
            _ => Self::Upstream { status, body },
        }
    }
}

fn truncate(body: &str) -> String {
    if body.chars().count() <= MAX_BODY_CHARS {
        body.to_string()
    } else {
        let mut cut: String = body.chars().take(MAX_BODY_CHARS).collect();
        cut.push_str("...");
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_statuses_map_to_unauthorized() {
        assert!(matches!(
            ProviderError::from_status(401, "bad key"),
            ProviderError::Unauthorized { status: 401, .. }
        ));
        assert!(matches!(
            ProviderError::from_status(403, ""),
            ProviderError::Unauthorized { status: 403, .. }
        ));
    }

    #[test]
    fn test_other_statuses_map_to_upstream() {
        let err = ProviderError::from_status(503, "  overloaded \n");
        assert_eq!(err.to_string(), "provider returned status 503: overloaded");
    }

    #[test]
    fn test_long_bodies_are_truncated() {
        let body = "x".repeat(MAX_BODY_CHARS * 2);
        match ProviderError::from_status(500, &body) {
            ProviderError::Upstream { body, .. } => {
                assert_eq!(body.len(), MAX_BODY_CHARS + 3);
                assert!(body.ends_with("..."));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
