//! Concrete clients for the remote sources.

pub mod coronavirus;
pub mod wikidata;
pub mod wikipedia;
