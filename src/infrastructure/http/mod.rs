//! REST adapter for the call-center backend.

mod client;
mod dto;

pub use client::CallCenterClient;
