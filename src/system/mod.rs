//! Shared state and plumbing between the keyboard subsystems and the
//! indicator controller
pub mod activity;
pub mod event;
pub mod host;
pub mod state;
