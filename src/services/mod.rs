//! Source abstractions the pipelines are written against.

pub mod knowledge_api;
pub mod statistics_api;
