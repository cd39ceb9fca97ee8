//! Errors raised by guarded backend calls.

use thiserror::Error;

use super::AuthError;

/// Backend call failures.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    /// No usable session; the call was not sent.
    #[error("not authenticated")]
    Unauthenticated,

    /// The backend answered 401 or 403.
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// Transport failure before a response arrived.
    #[error("network error: {message}")]
    Network { message: String },

    /// Non-success status other than 401 and 403.
    #[error("server returned {code}: {message}")]
    Status { code: u16, message: String },

    /// Response body did not match the expected shape.
    #[error("failed to decode response: {message}")]
    Decode { message: String },

    /// Token refresh failed while preparing the call.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ApiError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates unauthorized error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Creates status error.
    #[must_use]
    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self::Status {
            code,
            message: message.into(),
        }
    }

    /// True when the user has to log in again.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(
            self,
            Self::Unauthenticated
                | Self::Unauthorized { .. }
                | Self::Auth(AuthError::CredentialsRejected { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_login() {
        assert!(ApiError::Unauthenticated.requires_login());
        assert!(ApiError::unauthorized("expired").requires_login());
        assert!(ApiError::Auth(AuthError::rejected("bad refresh")).requires_login());
        assert!(!ApiError::status(500, "boom").requires_login());
        assert!(!ApiError::network("offline").requires_login());
    }
}
