//! Typed RSS 2.0, RDF (RSS 1.0), Atom and JSON Feed documents.
//!
//! Every dialect decodes into its own strongly typed model and encodes back
//! to bytes. Namespace extensions (Dublin Core, iTunes, Media RSS,
//! GeoRSS/GML, YouTube, Syndication, Content) are modeled as optional
//! vocabularies on the channel and items, and an encoded document declares
//! exactly the extension namespaces whose data it carries.
//!
//! ```no_run
//! use feedform::{decode, encode, RssFeed};
//!
//! # fn main() -> feedform::Result<()> {
//! let feed: RssFeed = decode(br#"<rss version="2.0"><channel><title>XML.com</title></channel></rss>"#)?;
//! let bytes = encode(&feed)?;
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod macros;

pub mod codec;
pub mod config;
pub mod error;
pub mod model;
pub mod namespace;
pub mod xml;

pub use codec::{decode, encode, Dialect, Document, Feed};
pub use config::{CodecConfig, ConfigError};
pub use error::{FeedError, Result};
pub use model::atom::{AtomEntry, AtomFeed};
pub use model::json::{JsonFeed, JsonFeedItem};
pub use model::rdf::{RdfFeed, RdfItem};
pub use model::rss::{RssChannel, RssFeed, RssItem};
pub use namespace::{Namespace, NamespacedDocument};
pub use xml::NamespacedElement;
