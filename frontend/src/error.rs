//! Errors raised while talking to the finance API.

/// Shown in inline banners whenever a mutation fails.
pub const REQUEST_FAILED: &str = "Request failed. Please try again.";

/// The errors that may occur when calling the remote API.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (offline, CORS, aborted).
    #[error("network request failed: {0}")]
    Network(String),

    /// The API answered with a non-2xx status code.
    #[error("server responded with status {0}")]
    Status(u16),

    /// The response body was not valid JSON.
    #[error("could not decode response: {0}")]
    Decode(String),

    /// The request body or query string could not be encoded.
    #[error("could not encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// True when the API rejected the caller's credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status(401) | ApiError::Status(403))
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(error: gloo_net::Error) -> Self {
        match error {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

impl From<serde_urlencoded::ser::Error> for ApiError {
    fn from(error: serde_urlencoded::ser::Error) -> Self {
        ApiError::Encode(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;

    #[test]
    fn status_errors_mention_the_code() {
        assert_eq!(
            ApiError::Status(500).to_string(),
            "server responded with status 500"
        );
    }

    #[test]
    fn only_auth_statuses_are_unauthorized() {
        assert!(ApiError::Status(401).is_unauthorized());
        assert!(ApiError::Status(403).is_unauthorized());
        assert!(!ApiError::Status(404).is_unauthorized());
        assert!(!ApiError::Network("offline".into()).is_unauthorized());
    }
}
