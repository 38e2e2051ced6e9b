// Briefkasten shared type definitions
// Each submodule defines types used across the dashboard core.

pub mod bookmark;
pub mod creation;
pub mod errors;
pub mod notification;
pub mod settings;
pub mod snapshot;
pub mod view;
