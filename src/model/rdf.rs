//! RDF Site Summary 1.0 (<https://web.resource.org/rss/1.0/spec>).
//!
//! Unlike RSS 2.0, image, items and text input are siblings of the channel;
//! the channel only references them by URI.

use crate::namespace::content::ContentNamespace;
use crate::namespace::dublin_core::DublinCoreNamespace;
use crate::namespace::syndication::SyndicationNamespace;
use crate::xml::NamespacedElement;

xml_record! {
    /// `<rdf:RDF>`.
    pub struct RdfFeed {
        channel: RdfChannel => child("channel"),
        image: RdfImage => child("image"),
        items: RdfItem => children("item"),
        text_input: RdfTextInput => child("textinput"),
    }
}

xml_record! {
    pub struct RdfChannel {
        about: String => attr("rdf:about"),
        title: String => element("title"),
        link: String => element("link"),
        description: String => element("description"),
        image: RdfResource => child("image"),
        items: RdfItems => child("items"),
        text_input: RdfResource => child("textinput"),
        dublin_core: DublinCoreNamespace => flatten,
        syndication: SyndicationNamespace => flatten,
    }
}

xml_record! {
    pub struct RdfItem {
        about: String => attr("rdf:about"),
        title: String => element("title"),
        link: String => element("link"),
        description: String => element("description"),
        dublin_core: DublinCoreNamespace => flatten,
        content: ContentNamespace => flatten,
    }
}

xml_record! {
    pub struct RdfImage {
        about: String => attr("rdf:about"),
        title: String => element("title"),
        url: String => element("url"),
        link: String => element("link"),
    }
}

xml_record! {
    pub struct RdfTextInput {
        about: String => attr("rdf:about"),
        title: String => element("title"),
        description: String => element("description"),
        name: String => element("name"),
        link: String => element("link"),
    }
}

xml_record! {
    /// `<items><rdf:Seq>...</rdf:Seq></items>`
    pub struct RdfItems {
        seq: RdfSeq => child("rdf:Seq"),
    }
}

xml_record! {
    /// Ordered list of item URIs.
    pub struct RdfSeq {
        entries: RdfListItem => children("rdf:li"),
    }
}

xml_record! {
    pub struct RdfResourceAttributes {
        resource: String => attr("rdf:resource"),
    }
}

/// `<image rdf:resource="..."/>` inside the channel.
pub type RdfResource = NamespacedElement<RdfResourceAttributes>;

xml_record! {
    /// `<rdf:li>`. The RSS 1.0 examples write `resource` without a prefix;
    /// most producers write `rdf:resource`.
    pub struct RdfListItemAttributes {
        resource: String => attr("rdf:resource"),
        bare_resource: String => attr("resource"),
    }
}

pub type RdfListItem = NamespacedElement<RdfListItemAttributes>;

impl RdfListItemAttributes {
    pub fn target(&self) -> Option<&str> {
        self.resource.as_deref().or(self.bare_resource.as_deref())
    }
}

impl RdfFeed {
    pub fn items(&self) -> &[RdfItem] {
        self.items.as_deref().unwrap_or_default()
    }
}
