// Briefkasten state managers
// Managers own mutable session state: the collection store, page size, capture modal and creation flow.

pub mod capture_trigger;
pub mod collection_store;
pub mod creation_pipeline;
pub mod page_size_controller;
