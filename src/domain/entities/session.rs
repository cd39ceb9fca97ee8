//! Authenticated session with access/refresh expiry instants.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::token::{AuthToken, TokenPair};

/// Lifetime granted to a freshly issued access token.
pub const ACCESS_TOKEN_TTL_HOURS: i64 = 12;
/// Lifetime granted to a freshly issued refresh token.
pub const REFRESH_TOKEN_TTL_HOURS: i64 = 24;

/// Where a session stands relative to a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Access token still usable.
    Active,
    /// Access token expired, refresh token still usable.
    AccessExpired,
    /// Refresh token expired, session must be discarded.
    Expired,
}

/// Stored credentials and their expiry instants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    access_token: AuthToken,
    refresh_token: AuthToken,
    access_expires_at: DateTime<Utc>,
    refresh_expires_at: DateTime<Utc>,
}

impl Session {
    /// Builds a session from a newly issued pair, stamping expiries from `now`.
    #[must_use]
    pub fn issue(pair: TokenPair, now: DateTime<Utc>) -> Self {
        Self {
            access_token: pair.access,
            refresh_token: pair.refresh,
            access_expires_at: now + TimeDelta::hours(ACCESS_TOKEN_TTL_HOURS),
            refresh_expires_at: now + TimeDelta::hours(REFRESH_TOKEN_TTL_HOURS),
        }
    }

    /// Creates session with explicit expiries.
    #[must_use]
    pub const fn new(
        access_token: AuthToken,
        refresh_token: AuthToken,
        access_expires_at: DateTime<Utc>,
        refresh_expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
        }
    }

    /// Returns the access token.
    #[must_use]
    pub const fn access_token(&self) -> &AuthToken {
        &self.access_token
    }

    /// Returns the refresh token.
    #[must_use]
    pub const fn refresh_token(&self) -> &AuthToken {
        &self.refresh_token
    }

    /// Expiry of the access token.
    #[must_use]
    pub const fn access_expires_at(&self) -> DateTime<Utc> {
        self.access_expires_at
    }

    /// Expiry of the refresh token.
    #[must_use]
    pub const fn refresh_expires_at(&self) -> DateTime<Utc> {
        self.refresh_expires_at
    }

    /// Classifies the session at `now`. Expiry is strict: a token is still
    /// valid at the exact instant it expires.
    #[must_use]
    pub fn status_at(&self, now: DateTime<Utc>) -> SessionStatus {
        if now > self.refresh_expires_at {
            SessionStatus::Expired
        } else if now > self.access_expires_at {
            SessionStatus::AccessExpired
        } else {
            SessionStatus::Active
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> TokenPair {
        TokenPair::new(
            AuthToken::new_unchecked("access-token"),
            AuthToken::new_unchecked("refresh-token"),
        )
    }

    #[test]
    fn test_issue_stamps_expiries() {
        let now = Utc::now();
        let session = Session::issue(pair(), now);

        assert_eq!(session.access_expires_at(), now + TimeDelta::hours(12));
        assert_eq!(session.refresh_expires_at(), now + TimeDelta::hours(24));
    }

    #[test]
    fn test_status_transitions() {
        let now = Utc::now();
        let session = Session::issue(pair(), now);

        assert_eq!(session.status_at(now), SessionStatus::Active);
        assert_eq!(
            session.status_at(now + TimeDelta::hours(12)),
            SessionStatus::Active
        );
        assert_eq!(
            session.status_at(now + TimeDelta::hours(13)),
            SessionStatus::AccessExpired
        );
        assert_eq!(
            session.status_at(now + TimeDelta::hours(25)),
            SessionStatus::Expired
        );
    }

    #[test]
    fn test_refresh_expiry_wins_over_access_expiry() {
        let now = Utc::now();
        let session = Session::new(
            AuthToken::new_unchecked("a"),
            AuthToken::new_unchecked("r"),
            now + TimeDelta::hours(5),
            now - TimeDelta::minutes(1),
        );

        assert_eq!(session.status_at(now), SessionStatus::Expired);
    }
}
