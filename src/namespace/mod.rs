//! XML extension vocabularies and the registry that decides which of them a
//! document declares on its root element.

pub mod atom;
pub mod content;
pub mod dublin_core;
pub mod georss;
pub mod itunes;
pub mod media;
mod registry;
pub mod syndication;
pub mod youtube;

use std::fmt;

pub use registry::NamespacedDocument;

/// RDF syntax vocabulary used by RSS 1.0 documents. Not an extension: it is
/// part of the RDF dialect itself and always declared there.
pub const RDF_SYNTAX: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// RSS 1.0 default namespace.
pub const RSS_1_0: &str = "http://purl.org/rss/1.0/";

/// The closed set of extension vocabularies this crate models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    DublinCore,
    ITunes,
    Syndication,
    Media,
    Content,
    GeoRss,
    Gml,
    YouTube,
    Atom,
}

impl Namespace {
    /// Every namespace, in declaration order.
    pub const ALL: [Namespace; 9] = [
        Namespace::DublinCore,
        Namespace::ITunes,
        Namespace::Syndication,
        Namespace::Media,
        Namespace::Content,
        Namespace::GeoRss,
        Namespace::Gml,
        Namespace::YouTube,
        Namespace::Atom,
    ];

    /// Declaration attribute name, e.g. `xmlns:dc`.
    pub fn prefix(self) -> &'static str {
        registry::entry(self).prefix
    }

    /// Element prefix, e.g. `dc`.
    pub fn local_prefix(self) -> &'static str {
        let prefix = self.prefix();
        prefix.strip_prefix("xmlns:").unwrap_or(prefix)
    }

    pub fn url(self) -> &'static str {
        registry::entry(self).url
    }

    /// Looks a vocabulary up by namespace URL, ignoring ASCII case.
    pub fn from_url(url: &[u8]) -> Option<Namespace> {
        Namespace::ALL
            .into_iter()
            .find(|ns| ns.url().as_bytes().eq_ignore_ascii_case(url))
    }

    /// Whether `document` carries data from this vocabulary.
    pub fn should_include<D: NamespacedDocument>(self, document: &D) -> bool {
        document.includes(self)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.local_prefix())
    }
}
