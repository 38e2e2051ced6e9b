//! Briefkasten: bookmark dashboard core.
//!
//! Derives the visible page of bookmarks from the collection and the live view
//! state, and runs the confirm-then-commit bookmark capture flow.
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;
