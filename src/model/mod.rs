//! One document model per dialect.

pub mod atom;
pub mod json;
pub mod rdf;
pub mod rss;
