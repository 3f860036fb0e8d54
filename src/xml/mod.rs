//! Structural XML layer: the parsed tree, field coding conventions and the
//! generic namespaced element.

pub mod coding;
mod element;
pub mod tree;

pub use coding::{Coding, DateFormat, DecodeContext, EncodeContext, FieldSchema, XmlRecord, XmlScalar};
pub use element::{NamespacedElement, NoAttributes};
pub use tree::XmlNode;
