//! reqwest client implementing the auth and call-center ports.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, header};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use uuid::Uuid;

use super::dto::{ErrorResponse, RefreshRequest, TokenRequest, TokenResponse};
use crate::domain::entities::{
    AuthToken, ClientRecord, ClientSummary, ClientUpdate, ContactedPage, FaqEntry, FollowSwitch,
    PracticeCatalog, TokenPair,
};
use crate::domain::errors::{ApiError, AuthError};
use crate::domain::ports::{AuthPort, CallCenterPort, ClientSearch, ContactedQuery};

const API_PREFIX: &str = "api/v1/";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP client for `{api_url}/api/v1/`.
#[derive(Clone)]
pub struct CallCenterClient {
    client: Client,
    api_base: String,
}

impl CallCenterClient {
    /// Creates client for the given backend root URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(api_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::network(format!("failed to create HTTP client: {e}")))?;

        let root = api_url.trim_end_matches('/');
        Ok(Self {
            client,
            api_base: format!("{root}/{API_PREFIX}"),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    fn authorized(&self, method: Method, path: &str, token: &AuthToken) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .header(header::AUTHORIZATION, token.bearer())
    }

    fn transport_message(e: &reqwest::Error) -> String {
        if e.is_timeout() {
            "request timed out".to_string()
        } else if e.is_connect() {
            "failed to connect to the server".to_string()
        } else {
            e.to_string()
        }
    }

    async fn error_message(status: StatusCode, response: Response) -> String {
        let body = response.text().await.unwrap_or_default();
        serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(ErrorResponse::into_message)
            .unwrap_or_else(|| format!("HTTP {status}"))
    }

    async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Request failed");
            ApiError::network(Self::transport_message(&e))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = Self::error_message(status, response).await;
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::unauthorized(message)),
            _ => Err(ApiError::status(status.as_u16(), message)),
        }
    }

    async fn fetch_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let response = Self::send(request).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::network(Self::transport_message(&e)))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            warn!(error = %e, "Failed to parse response body");
            ApiError::decode(e.to_string())
        })
    }

    async fn token_call<B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<TokenResponse, AuthError> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to reach token endpoint");
                AuthError::network(Self::transport_message(&e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = Self::error_message(status, response).await;
            return Err(match status {
                StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    AuthError::rejected(message)
                }
                s if s.is_server_error() => AuthError::network(message),
                _ => AuthError::unexpected(format!("unexpected response: {status} - {message}")),
            });
        }

        response.json::<TokenResponse>().await.map_err(|e| {
            warn!(error = %e, "Failed to parse token response");
            AuthError::unexpected(format!("failed to parse response: {e}"))
        })
    }

    fn to_token(raw: String, field: &str) -> Result<AuthToken, AuthError> {
        AuthToken::new(raw)
            .ok_or_else(|| AuthError::unexpected(format!("backend returned an empty {field} token")))
    }
}

#[async_trait]
impl AuthPort for CallCenterClient {
    async fn obtain_token(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        debug!(%email, "Requesting token pair");
        let response = self
            .token_call("auth/token/", &TokenRequest { email, password })
            .await?;
        let refresh = response
            .refresh
            .ok_or_else(|| AuthError::unexpected("token response without refresh token"))?;
        Ok(TokenPair::new(
            Self::to_token(response.access, "access")?,
            Self::to_token(refresh, "refresh")?,
        ))
    }

    async fn refresh_token(&self, refresh: &AuthToken) -> Result<TokenPair, AuthError> {
        debug!(token = %refresh, "Refreshing token pair");
        let response = self
            .token_call(
                "auth/token/refresh/",
                &RefreshRequest {
                    refresh: refresh.as_str(),
                },
            )
            .await?;
        let access = Self::to_token(response.access, "access")?;
        let refresh = match response.refresh {
            Some(rotated) => Self::to_token(rotated, "refresh")?,
            None => refresh.clone(),
        };
        Ok(TokenPair::new(access, refresh))
    }
}

#[async_trait]
impl CallCenterPort for CallCenterClient {
    async fn search_clients(
        &self,
        token: &AuthToken,
        search: &ClientSearch,
    ) -> Result<Vec<ClientSummary>, ApiError> {
        let request = self
            .authorized(Method::GET, "call-center/clients/", token)
            .query(&[search.query_pair()]);
        Self::fetch_json(request).await
    }

    async fn fetch_client(
        &self,
        token: &AuthToken,
        client_id: &str,
    ) -> Result<ClientRecord, ApiError> {
        let request = self.authorized(Method::GET, &format!("call-center/clients/{client_id}"), token);
        Self::fetch_json(request).await
    }

    async fn update_client(
        &self,
        token: &AuthToken,
        client_id: &str,
        update: &ClientUpdate,
    ) -> Result<(), ApiError> {
        let request = self
            .authorized(Method::PATCH, &format!("call-center/clients/{client_id}"), token)
            .json(update);
        Self::send(request).await.map(drop)
    }

    async fn fetch_outcomes(&self, token: &AuthToken) -> Result<Vec<String>, ApiError> {
        Self::fetch_json(self.authorized(Method::GET, "call-center/outcomes/", token)).await
    }

    async fn fetch_faq(
        &self,
        token: &AuthToken,
        practice_id: &str,
    ) -> Result<Vec<FaqEntry>, ApiError> {
        let request = self.authorized(Method::GET, &format!("call-center/faq/{practice_id}"), token);
        Self::fetch_json(request).await
    }

    async fn fetch_contacted(
        &self,
        token: &AuthToken,
        query: &ContactedQuery,
    ) -> Result<ContactedPage, ApiError> {
        let request = self
            .authorized(Method::GET, "call-center/clients/contacted/", token)
            .query(&query.to_query_pairs());
        Self::fetch_json(request).await
    }

    async fn switch_follow(
        &self,
        token: &AuthToken,
        sms_id: Uuid,
    ) -> Result<FollowSwitch, ApiError> {
        let request = self
            .authorized(Method::PATCH, &format!("call-center/sms/{sms_id}/switch/"), token)
            .json(&serde_json::json!({}));
        Self::fetch_json(request).await
    }

    async fn fetch_practices(&self, token: &AuthToken) -> Result<PracticeCatalog, ApiError> {
        Self::fetch_json(self.authorized(Method::GET, "call-center/practices/", token)).await
    }
}
