//! Domain layer with core business entities and port definitions.

/// Authentication state and reducer.
pub mod auth_state;
/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Toast notifications.
pub mod notification;
/// Phone number helpers.
pub mod phone;
/// Port definitions.
pub mod ports;
/// Routes and route guard.
pub mod route;
/// Serde utilities.
pub mod serde_utils;

pub use auth_state::{AuthAction, AuthState};
pub use entities::{AuthToken, Session};
pub use errors::{ApiError, AuthError, ValidationError};
pub use notification::{Notification, NotificationLevel};
pub use ports::{AuthPort, CallCenterPort, SessionStoragePort, SessionStorePort};
pub use route::{Route, RouteDecision};
