//! Domain entity definitions.

mod client;
mod client_update;
mod contacted;
mod faq;
mod patient;
mod practice;
mod session;
mod token;

pub use client::{ClientRecord, ClientSummary, Email, Phone, PracticeRef};
pub use client_update::{ClientUpdate, EmailPatch, PatientPatch, PhonePatch};
pub use contacted::{ContactedEntry, ContactedPage, FollowSwitch, PatientName};
pub use faq::FaqEntry;
pub use patient::{Appointment, MAX_COMMENT_LENGTH, Patient, Reminder};
pub use practice::{Practice, PracticeCatalog, PracticeOption, PracticeOptionKind};
pub use session::{
    ACCESS_TOKEN_TTL_HOURS, REFRESH_TOKEN_TTL_HOURS, Session, SessionStatus,
};
pub use token::{AuthToken, TokenPair};
