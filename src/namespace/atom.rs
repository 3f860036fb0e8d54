//! Atom elements embedded in RSS channels (`atom:`), chiefly the
//! `rel="self"` link.

use crate::xml::NamespacedElement;

xml_record! {
    pub struct AtomLinkAttributes {
        href: String => attr("href"),
        rel: String => attr("rel"),
        /// `type`
        media_type: String => attr("type"),
        hreflang: String => attr("hreflang"),
        title: String => attr("title"),
        length: u64 => attr("length"),
    }
}

/// `<link href=".." rel=".." type=".." hreflang=".." title=".." length=".."/>`
pub type AtomLink = NamespacedElement<AtomLinkAttributes>;

xml_record! {
    pub struct AtomNamespace {
        links: AtomLink => children("atom:link"),
    }
}
