mod date_range_input;
mod header_bar;
mod input;
mod patients_table;
mod select_list;
mod status_bar;
mod toggle;

pub use date_range_input::{DateRangeInput, RangeValue};
pub use header_bar::{HeaderBar, HeaderBarStyle, NAV_ITEMS};
pub use input::TextInput;
pub use patients_table::{PatientColumn, PatientsTable};
pub use select_list::{SelectEvent, SelectList};
pub use status_bar::{StatusBar, StatusLevel};
pub use toggle::Toggle;
