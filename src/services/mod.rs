// Briefkasten services
// Services provide stateless or I/O-facing functionality: resolving, paging, config, locale, hydration, creation transport.

pub mod config_engine;
pub mod creation_backend;
pub mod hydration;
pub mod locale;
pub mod pagination;
pub mod resolver;
