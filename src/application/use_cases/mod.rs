//! Use case implementations.

mod login_use_case;
mod search_clients_use_case;

pub use login_use_case::{LoginUseCase, LogoutUseCase};
pub use search_clients_use_case::{
    SearchClientsUseCase, SearchError, SearchMode, SearchOutcome, build_search,
};
