//! Call-center data port and its request types.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::entities::{
    AuthToken, ClientRecord, ClientSummary, ClientUpdate, ContactedPage, FaqEntry, FollowSwitch,
    PracticeCatalog,
};
use crate::domain::errors::ApiError;

/// Client search request. Exactly one query parameter is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientSearch {
    /// Free text: client id, full name or email.
    Text(String),
    /// Ten bare digits.
    Phone(String),
}

impl ClientSearch {
    /// The `(name, value)` query parameter.
    #[must_use]
    pub fn query_pair(&self) -> (&'static str, &str) {
        match self {
            Self::Text(text) => ("search", text.as_str()),
            Self::Phone(digits) => ("phone_number", digits.as_str()),
        }
    }
}

/// Query of the contacted log. Absent fields are not sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactedQuery {
    /// Page size.
    pub limit: u32,
    /// Index of the first entry.
    pub offset: u32,
    /// Client name filter.
    pub name: Option<String>,
    /// Follow-up filter.
    pub followed: Option<bool>,
    /// Earliest SMS date, inclusive.
    pub sent_after: Option<NaiveDate>,
    /// Latest SMS date, inclusive.
    pub sent_before: Option<NaiveDate>,
    /// Practice ids, sent comma separated.
    pub practice: Vec<String>,
}

impl ContactedQuery {
    /// Creates a query for one page with no filters.
    #[must_use]
    pub const fn page(limit: u32, offset: u32) -> Self {
        Self {
            limit,
            offset,
            name: None,
            followed: None,
            sent_after: None,
            sent_before: None,
            practice: Vec::new(),
        }
    }

    /// Query string pairs in a stable order.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
        ];
        if let Some(name) = &self.name {
            pairs.push(("name", name.clone()));
        }
        if let Some(followed) = self.followed {
            pairs.push(("followed", followed.to_string()));
        }
        if let Some(after) = self.sent_after {
            pairs.push(("sent_after", after.format("%Y-%m-%d").to_string()));
        }
        if let Some(before) = self.sent_before {
            pairs.push(("sent_before", before.format("%Y-%m-%d").to_string()));
        }
        if !self.practice.is_empty() {
            pairs.push(("practice", self.practice.join(",")));
        }
        pairs
    }
}

/// Port for the call-center REST surface. Callers supply a valid access token.
#[async_trait]
pub trait CallCenterPort: Send + Sync {
    /// Finds clients by text or phone number.
    async fn search_clients(
        &self,
        token: &AuthToken,
        search: &ClientSearch,
    ) -> Result<Vec<ClientSummary>, ApiError>;

    /// Loads the full client record.
    async fn fetch_client(&self, token: &AuthToken, client_id: &str)
    -> Result<ClientRecord, ApiError>;

    /// Sends a partial update of the client.
    async fn update_client(
        &self,
        token: &AuthToken,
        client_id: &str,
        update: &ClientUpdate,
    ) -> Result<(), ApiError>;

    /// Lists the outcome choices.
    async fn fetch_outcomes(&self, token: &AuthToken) -> Result<Vec<String>, ApiError>;

    /// Lists the FAQ of a practice.
    async fn fetch_faq(&self, token: &AuthToken, practice_id: &str)
    -> Result<Vec<FaqEntry>, ApiError>;

    /// Loads one page of the contacted log.
    async fn fetch_contacted(
        &self,
        token: &AuthToken,
        query: &ContactedQuery,
    ) -> Result<ContactedPage, ApiError>;

    /// Toggles the follow-up flag of an SMS contact.
    async fn switch_follow(&self, token: &AuthToken, sms_id: Uuid)
    -> Result<FollowSwitch, ApiError>;

    /// Loads the practice catalog and its groups.
    async fn fetch_practices(&self, token: &AuthToken) -> Result<PracticeCatalog, ApiError>;
}

/// Test doubles for [`CallCenterPort`].
#[cfg(test)]
pub mod mock {
    use super::*;
    use parking_lot::Mutex;

    /// Recorded call, with the bearer token it carried.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RecordedCall {
        /// Port method name.
        pub endpoint: &'static str,
        /// Bearer token passed in.
        pub token: String,
    }

    /// Canned call-center backend that records every call.
    /// Canned responses per endpoint plus a log of what was sent.
    #[derive(Default)]
    #[allow(missing_docs)]
    pub struct MockCallCenter {
        pub summaries: Mutex<Vec<ClientSummary>>,
        pub record: Mutex<Option<ClientRecord>>,
        pub outcomes: Mutex<Vec<String>>,
        pub faq: Mutex<Vec<FaqEntry>>,
        pub page: Mutex<ContactedPage>,
        pub catalog: Mutex<PracticeCatalog>,
        pub follow_result: Mutex<Option<bool>>,
        pub fail_with_status: Mutex<Option<u16>>,
        pub calls: Mutex<Vec<RecordedCall>>,
        pub updates: Mutex<Vec<ClientUpdate>>,
        pub contacted_queries: Mutex<Vec<ContactedQuery>>,
        pub searches: Mutex<Vec<ClientSearch>>,
    }

    impl MockCallCenter {
        /// Creates a mock with empty responses.
        pub fn new() -> Self {
            Self::default()
        }

        /// Number of calls received.
        pub fn call_count(&self) -> usize {
            self.calls.lock().len()
        }

        fn record_call(&self, endpoint: &'static str, token: &AuthToken) -> Result<(), ApiError> {
            self.calls.lock().push(RecordedCall {
                endpoint,
                token: token.as_str().to_string(),
            });
            match *self.fail_with_status.lock() {
                Some(code) => Err(ApiError::status(code, "mock failure")),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl CallCenterPort for MockCallCenter {
        async fn search_clients(
            &self,
            token: &AuthToken,
            search: &ClientSearch,
        ) -> Result<Vec<ClientSummary>, ApiError> {
            self.record_call("search_clients", token)?;
            self.searches.lock().push(search.clone());
            Ok(self.summaries.lock().clone())
        }

        async fn fetch_client(
            &self,
            token: &AuthToken,
            _client_id: &str,
        ) -> Result<ClientRecord, ApiError> {
            self.record_call("fetch_client", token)?;
            self.record
                .lock()
                .clone()
                .ok_or_else(|| ApiError::status(404, "Not found."))
        }

        async fn update_client(
            &self,
            token: &AuthToken,
            _client_id: &str,
            update: &ClientUpdate,
        ) -> Result<(), ApiError> {
            self.record_call("update_client", token)?;
            self.updates.lock().push(update.clone());
            Ok(())
        }

        async fn fetch_outcomes(&self, token: &AuthToken) -> Result<Vec<String>, ApiError> {
            self.record_call("fetch_outcomes", token)?;
            Ok(self.outcomes.lock().clone())
        }

        async fn fetch_faq(
            &self,
            token: &AuthToken,
            _practice_id: &str,
        ) -> Result<Vec<FaqEntry>, ApiError> {
            self.record_call("fetch_faq", token)?;
            Ok(self.faq.lock().clone())
        }

        async fn fetch_contacted(
            &self,
            token: &AuthToken,
            query: &ContactedQuery,
        ) -> Result<ContactedPage, ApiError> {
            self.record_call("fetch_contacted", token)?;
            self.contacted_queries.lock().push(query.clone());
            Ok(self.page.lock().clone())
        }

        async fn switch_follow(
            &self,
            token: &AuthToken,
            sms_id: Uuid,
        ) -> Result<FollowSwitch, ApiError> {
            self.record_call("switch_follow", token)?;
            let is_followed = self.follow_result.lock().unwrap_or(true);
            Ok(FollowSwitch {
                is_followed,
                uuid: sms_id,
            })
        }

        async fn fetch_practices(&self, token: &AuthToken) -> Result<PracticeCatalog, ApiError> {
            self.record_call("fetch_practices", token)?;
            Ok(self.catalog.lock().clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_pair() {
        assert_eq!(
            ClientSearch::Text("Smith".into()).query_pair(),
            ("search", "Smith")
        );
        assert_eq!(
            ClientSearch::Phone("5551234567".into()).query_pair(),
            ("phone_number", "5551234567")
        );
    }

    #[test]
    fn test_contacted_query_pairs_skip_absent_fields() {
        let query = ContactedQuery::page(25, 50);
        assert_eq!(
            query.to_query_pairs(),
            vec![("limit", "25".to_string()), ("offset", "50".to_string())]
        );
    }

    #[test]
    fn test_contacted_query_pairs_full() {
        let query = ContactedQuery {
            name: Some("Smi".into()),
            followed: Some(false),
            sent_after: NaiveDate::from_ymd_opt(2024, 1, 1),
            sent_before: NaiveDate::from_ymd_opt(2024, 1, 31),
            practice: vec!["P1".into(), "P2".into()],
            ..ContactedQuery::page(10, 0)
        };

        let pairs = query.to_query_pairs();
        assert!(pairs.contains(&("name", "Smi".to_string())));
        assert!(pairs.contains(&("followed", "false".to_string())));
        assert!(pairs.contains(&("sent_after", "2024-01-01".to_string())));
        assert!(pairs.contains(&("sent_before", "2024-01-31".to_string())));
        assert!(pairs.contains(&("practice", "P1,P2".to_string())));
    }
}
