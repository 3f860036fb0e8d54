//! The Atom Syndication Format (RFC 4287).
//!
//! Elements are modeled by local name; the decoder strips whatever prefix
//! the document binds to the Atom namespace.

use chrono::{DateTime, FixedOffset};

use crate::namespace::atom::AtomLink;
use crate::namespace::media::MediaNamespace;
use crate::namespace::youtube::YouTubeNamespace;
use crate::xml::NamespacedElement;

xml_record! {
    /// `<feed xmlns="http://www.w3.org/2005/Atom">`.
    pub struct AtomFeed {
        lang: String => attr("xml:lang"),
        title: AtomText => child("title"),
        subtitle: AtomText => child("subtitle"),
        links: AtomLink => children("link"),
        updated: DateTime<FixedOffset> => element("updated"),
        authors: AtomPerson => children("author"),
        contributors: AtomPerson => children("contributor"),
        id: String => element("id"),
        generator: AtomGenerator => child("generator"),
        icon: String => element("icon"),
        logo: String => element("logo"),
        rights: AtomText => child("rights"),
        categories: AtomCategory => children("category"),
        entries: AtomEntry => children("entry"),
    }
}

xml_record! {
    pub struct AtomEntry {
        title: AtomText => child("title"),
        summary: AtomText => child("summary"),
        content: AtomContent => child("content"),
        authors: AtomPerson => children("author"),
        contributors: AtomPerson => children("contributor"),
        links: AtomLink => children("link"),
        id: String => element("id"),
        updated: DateTime<FixedOffset> => element("updated"),
        published: DateTime<FixedOffset> => element("published"),
        categories: AtomCategory => children("category"),
        rights: AtomText => child("rights"),
        source: AtomSource => child("source"),
        media: MediaNamespace => flatten,
        you_tube: YouTubeNamespace => flatten,
    }
}

xml_record! {
    /// `author` and `contributor`.
    pub struct AtomPerson {
        name: String => element("name"),
        email: String => element("email"),
        uri: String => element("uri"),
    }
}

xml_record! {
    /// Feed metadata preserved on an entry copied from another feed.
    pub struct AtomSource {
        id: String => element("id"),
        title: AtomText => child("title"),
        subtitle: AtomText => child("subtitle"),
        links: AtomLink => children("link"),
        updated: DateTime<FixedOffset> => element("updated"),
        authors: AtomPerson => children("author"),
        rights: AtomText => child("rights"),
    }
}

// ============================================================================
// Attribute Records
// ============================================================================

xml_record! {
    pub struct AtomTextAttributes {
        /// `text`, `html` or `xhtml`.
        text_type: String => attr("type"),
    }
}

xml_record! {
    pub struct AtomContentAttributes {
        content_type: String => attr("type"),
        /// Out-of-line content.
        src: String => attr("src"),
    }
}

xml_record! {
    pub struct AtomCategoryAttributes {
        term: String => attr("term"),
        scheme: String => attr("scheme"),
        label: String => attr("label"),
    }
}

xml_record! {
    pub struct AtomGeneratorAttributes {
        uri: String => attr("uri"),
        version: String => attr("version"),
    }
}

/// Text construct: `title`, `subtitle`, `summary`, `rights`.
pub type AtomText = NamespacedElement<AtomTextAttributes>;
pub type AtomContent = NamespacedElement<AtomContentAttributes>;
pub type AtomCategory = NamespacedElement<AtomCategoryAttributes>;
pub type AtomGenerator = NamespacedElement<AtomGeneratorAttributes>;

impl AtomFeed {
    pub fn entries(&self) -> &[AtomEntry] {
        self.entries.as_deref().unwrap_or_default()
    }
}
