//! Session storage adapters.

mod file_session_storage;
mod keyring_session_storage;
mod memory_session_store;
mod tiered_session_storage;

pub use file_session_storage::FileSessionStorage;
pub use keyring_session_storage::KeyringSessionStorage;
pub use memory_session_store::MemorySessionStore;
pub use tiered_session_storage::TieredSessionStorage;
