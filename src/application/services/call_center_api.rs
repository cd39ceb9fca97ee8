//! Guarded facade over the call-center port.

use std::sync::Arc;

use tracing::{debug, error};
use uuid::Uuid;

use super::session_guard::SessionGuard;
use crate::domain::entities::{
    AuthToken, ClientRecord, ClientSummary, ClientUpdate, ContactedPage, FaqEntry, FollowSwitch,
    PracticeCatalog,
};
use crate::domain::errors::ApiError;
use crate::domain::ports::{CallCenterPort, ClientSearch, ContactedQuery};

/// Runs the session guard before each call and attaches the access token.
/// A cleared session aborts with [`ApiError::Unauthenticated`] without
/// touching the network.
#[derive(Clone)]
pub struct CallCenterApi {
    guard: SessionGuard,
    port: Arc<dyn CallCenterPort>,
}

impl CallCenterApi {
    /// Creates a facade calling `port` with tokens from `guard`.
    #[must_use]
    pub fn new(guard: SessionGuard, port: Arc<dyn CallCenterPort>) -> Self {
        Self { guard, port }
    }

    async fn access_token(&self) -> Result<AuthToken, ApiError> {
        let session = self
            .guard
            .check()
            .await
            .inspect_err(|e| error!(error = %e, "Session check failed"))?
            .into_session()
            .ok_or(ApiError::Unauthenticated)?;
        Ok(session.access_token().clone())
    }

    fn log_failure<T>(operation: &'static str, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if let Err(e) = &result {
            error!(operation, error = %e, "Call-center request failed");
        }
        result
    }

    /// # Errors
    /// Returns error if unauthenticated or the request fails.
    pub async fn search_clients(&self, search: &ClientSearch) -> Result<Vec<ClientSummary>, ApiError> {
        let token = self.access_token().await?;
        debug!(param = search.query_pair().0, "Searching clients");
        Self::log_failure("search_clients", self.port.search_clients(&token, search).await)
    }

    /// # Errors
    /// Returns error if unauthenticated or the request fails.
    pub async fn fetch_client(&self, client_id: &str) -> Result<ClientRecord, ApiError> {
        let token = self.access_token().await?;
        debug!(client_id, "Fetching client");
        Self::log_failure("fetch_client", self.port.fetch_client(&token, client_id).await)
    }

    /// # Errors
    /// Returns error if unauthenticated or the request fails.
    pub async fn update_client(&self, client_id: &str, update: &ClientUpdate) -> Result<(), ApiError> {
        let token = self.access_token().await?;
        debug!(
            client_id,
            patients = update.patients.len(),
            "Updating client"
        );
        Self::log_failure(
            "update_client",
            self.port.update_client(&token, client_id, update).await,
        )
    }

    /// # Errors
    /// Returns error if unauthenticated or the request fails.
    pub async fn fetch_outcomes(&self) -> Result<Vec<String>, ApiError> {
        let token = self.access_token().await?;
        Self::log_failure("fetch_outcomes", self.port.fetch_outcomes(&token).await)
    }

    /// # Errors
    /// Returns error if unauthenticated or the request fails.
    pub async fn fetch_faq(&self, practice_id: &str) -> Result<Vec<FaqEntry>, ApiError> {
        let token = self.access_token().await?;
        Self::log_failure("fetch_faq", self.port.fetch_faq(&token, practice_id).await)
    }

    /// # Errors
    /// Returns error if unauthenticated or the request fails.
    pub async fn fetch_contacted(&self, query: &ContactedQuery) -> Result<ContactedPage, ApiError> {
        let token = self.access_token().await?;
        debug!(limit = query.limit, offset = query.offset, "Fetching contacted page");
        Self::log_failure("fetch_contacted", self.port.fetch_contacted(&token, query).await)
    }

    /// # Errors
    /// Returns error if unauthenticated or the request fails.
    pub async fn switch_follow(&self, sms_id: Uuid) -> Result<FollowSwitch, ApiError> {
        let token = self.access_token().await?;
        debug!(%sms_id, "Toggling follow-up");
        Self::log_failure("switch_follow", self.port.switch_follow(&token, sms_id).await)
    }

    /// # Errors
    /// Returns error if unauthenticated or the request fails.
    pub async fn fetch_practices(&self) -> Result<PracticeCatalog, ApiError> {
        let token = self.access_token().await?;
        Self::log_failure("fetch_practices", self.port.fetch_practices(&token).await)
    }
}
