//! Failures of the session backends (keyring entry or session file).

use thiserror::Error;

/// Session backend error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum SecretError {
    #[error("{backend} backend unavailable: {reason}")]
    BackendUnavailable {
        backend: &'static str,
        reason: String,
    },

    #[error("could not read session from {backend}: {reason}")]
    Read {
        backend: &'static str,
        reason: String,
    },

    #[error("could not write session to {backend}: {reason}")]
    Write {
        backend: &'static str,
        reason: String,
    },

    #[error("could not remove session from {backend}: {reason}")]
    Remove {
        backend: &'static str,
        reason: String,
    },
}

impl SecretError {
    /// Name of the backend that failed.
    #[must_use]
    pub const fn backend(&self) -> &'static str {
        match self {
            Self::BackendUnavailable { backend, .. }
            | Self::Read { backend, .. }
            | Self::Write { backend, .. }
            | Self::Remove { backend, .. } => backend,
        }
    }
}
