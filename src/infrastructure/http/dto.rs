//! Wire types private to the HTTP adapter.

use serde::{Deserialize, Serialize};

/// Body of `POST auth/token/`.
#[derive(Serialize)]
#[allow(missing_docs)]
pub struct TokenRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `POST auth/token/refresh/`.
#[derive(Serialize)]
#[allow(missing_docs)]
pub struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

/// Token endpoint response. `refresh` is absent when the backend does not rotate it.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    /// Short lived bearer token.
    pub access: String,
    /// Rotated refresh token.
    #[serde(default)]
    pub refresh: Option<String>,
}

/// DRF style error body.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    /// Message of DRF style errors.
    #[serde(default)]
    pub detail: Option<String>,
    /// Message of custom backend errors.
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorResponse {
    /// First message present, `detail` preferred.
    pub fn into_message(self) -> Option<String> {
        self.detail.or(self.message)
    }
}
