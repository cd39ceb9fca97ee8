//! UI screens.

mod app;
mod client_contacted_screen;
mod login_screen;
mod not_found_screen;
mod notification_popup;
mod search_client_screen;
/// Layout helpers shared by screens.
pub mod utils;

pub use app::{App, AppPorts};
pub use client_contacted_screen::{ClientContactedScreen, ContactedAction, ContactedFocus};
pub use login_screen::{LoginAction, LoginFocus, LoginScreen, LoginState};
pub use not_found_screen::NotFoundScreen;
pub use notification_popup::NotificationPopup;
pub use search_client_screen::{PendingSearch, SearchAction, SearchClientScreen, SearchFocus};
