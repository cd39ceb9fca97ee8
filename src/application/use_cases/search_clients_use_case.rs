//! Client search with input validation and result classification.

use tracing::{debug, info};

use crate::application::services::CallCenterApi;
use crate::domain::entities::{ClientRecord, ClientSummary};
use crate::domain::errors::{ApiError, ValidationError};
use crate::domain::phone;
use crate::domain::ports::ClientSearch;

/// Minimum length of a text search.
pub const MIN_TEXT_SEARCH_LENGTH: usize = 3;

/// How the operator searches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// Client id, full name or email.
    #[default]
    Text,
    /// Ten digit phone number.
    Phone,
}

impl SearchMode {
    /// Placeholder of the search field.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Text => "Search by client ID, full name, or email",
            Self::Phone => "Search by phone number",
        }
    }

    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Text => Self::Phone,
            Self::Phone => Self::Text,
        }
    }
}

/// Classified search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Nothing matched.
    NoResults,
    /// The only match, already loaded.
    Single(Box<ClientRecord>),
    /// Several matches to choose from.
    Multiple(Vec<ClientSummary>),
}

/// Search failure.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum SearchError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Validates the input for `mode` and builds the request.
///
/// # Errors
/// Returns the validation message when the input is too short.
pub fn build_search(mode: SearchMode, input: &str) -> Result<ClientSearch, ValidationError> {
    match mode {
        SearchMode::Phone => {
            if !phone::is_search_number(input) {
                return Err(ValidationError::PhoneDigits);
            }
            Ok(ClientSearch::Phone(phone::strip(input)))
        }
        SearchMode::Text => {
            if input.chars().count() < MIN_TEXT_SEARCH_LENGTH {
                return Err(ValidationError::SearchTooShort);
            }
            Ok(ClientSearch::Text(input.to_string()))
        }
    }
}

/// Runs a search and loads the client when there is exactly one match.
#[derive(Clone)]
pub struct SearchClientsUseCase {
    api: CallCenterApi,
}

impl SearchClientsUseCase {
    /// Creates new search use case.
    #[must_use]
    pub const fn new(api: CallCenterApi) -> Self {
        Self { api }
    }

    /// # Errors
    /// Returns a validation error without calling the backend, or the API error.
    pub async fn execute(&self, mode: SearchMode, input: &str) -> Result<SearchOutcome, SearchError> {
        let search = build_search(mode, input)?;
        let mut results = self.api.search_clients(&search).await?;
        debug!(count = results.len(), "Search returned");

        match results.len() {
            0 => Ok(SearchOutcome::NoResults),
            1 => {
                let only = results.remove(0);
                let record = self.api.fetch_client(&only.odu_id).await?;
                info!(client_id = %record.odu_id, "Single match loaded");
                Ok(SearchOutcome::Single(Box::new(record)))
            }
            _ => Ok(SearchOutcome::Multiple(results)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::SessionGuard;
    use crate::domain::entities::{AuthToken, Session};
    use crate::domain::ports::mocks::{MockCallCenter, MockSessionStorage, StubAuthPort};
    use chrono::{TimeDelta, Utc};
    use std::sync::Arc;
    use test_case::test_case;

    fn summary(id: &str) -> ClientSummary {
        ClientSummary {
            odu_id: id.into(),
            first_name: "Ann".into(),
            last_name: "Smith".into(),
            full_name: "Ann Smith".into(),
            email_address: None,
            phone_number: None,
        }
    }

    fn use_case() -> (SearchClientsUseCase, Arc<MockCallCenter>) {
        let now = Utc::now();
        let session = Session::new(
            AuthToken::new_unchecked("a"),
            AuthToken::new_unchecked("r"),
            now + TimeDelta::hours(1),
            now + TimeDelta::hours(2),
        );
        let guard = SessionGuard::new(
            Arc::new(StubAuthPort::new(true)),
            Arc::new(MockSessionStorage::with_session(session)),
        );
        let port = Arc::new(MockCallCenter::new());
        let api = CallCenterApi::new(guard, port.clone());
        (SearchClientsUseCase::new(api), port)
    }

    #[test_case(SearchMode::Phone, "555123456", ValidationError::PhoneDigits ; "nine digits")]
    #[test_case(SearchMode::Phone, "55512345678", ValidationError::PhoneDigits ; "eleven digits")]
    #[test_case(SearchMode::Text, "Sm", ValidationError::SearchTooShort ; "two characters")]
    fn test_invalid_input(mode: SearchMode, input: &str, expected: ValidationError) {
        assert_eq!(build_search(mode, input), Err(expected));
    }

    #[test]
    fn test_phone_search_is_stripped() {
        assert_eq!(
            build_search(SearchMode::Phone, "(555) 123-4567"),
            Ok(ClientSearch::Phone("5551234567".into()))
        );
    }

    #[tokio::test]
    async fn test_invalid_search_makes_no_call() {
        let (use_case, port) = use_case();

        let result = use_case.execute(SearchMode::Text, "ab").await;

        assert!(matches!(result, Err(SearchError::Invalid(_))));
        assert_eq!(port.call_count(), 0);
    }

    #[tokio::test]
    async fn test_no_results() {
        let (use_case, _) = use_case();

        let outcome = use_case.execute(SearchMode::Text, "Smith").await.unwrap();

        assert_eq!(outcome, SearchOutcome::NoResults);
    }

    #[tokio::test]
    async fn test_single_result_is_loaded() {
        let (use_case, port) = use_case();
        port.summaries.lock().push(summary("C1"));
        *port.record.lock() = Some(ClientRecord {
            odu_id: "C1".into(),
            first_name: "Ann".into(),
            last_name: "Smith".into(),
            full_name: None,
            emails: vec![],
            phones: vec![],
            practices: vec![],
            patients: vec![],
        });

        let outcome = use_case.execute(SearchMode::Text, "Smith").await.unwrap();

        assert!(matches!(outcome, SearchOutcome::Single(record) if record.odu_id == "C1"));
        let endpoints: Vec<&str> = port.calls.lock().iter().map(|c| c.endpoint).collect();
        assert_eq!(endpoints, vec!["search_clients", "fetch_client"]);
    }

    #[tokio::test]
    async fn test_multiple_results_are_listed() {
        let (use_case, port) = use_case();
        port.summaries.lock().extend([summary("C1"), summary("C2")]);

        let outcome = use_case.execute(SearchMode::Phone, "5551234567").await.unwrap();

        assert!(matches!(outcome, SearchOutcome::Multiple(list) if list.len() == 2));
        assert_eq!(
            port.searches.lock()[0],
            ClientSearch::Phone("5551234567".into())
        );
    }
}
