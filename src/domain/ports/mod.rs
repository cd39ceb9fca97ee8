mod auth_port;
mod call_center_port;
mod session_storage_port;
mod session_store_port;

pub use auth_port::AuthPort;
pub use call_center_port::{CallCenterPort, ClientSearch, ContactedQuery};
pub use session_storage_port::SessionStoragePort;
pub use session_store_port::SessionStorePort;

#[cfg(test)]
pub use auth_port::MockAuthPort;
