//! Static namespace table and the presence predicates that decide which
//! declarations an encoded document carries on its root.

use super::Namespace;
use crate::model::atom::{AtomEntry, AtomFeed};
use crate::model::rdf::RdfFeed;
use crate::model::rss::{RssFeed, RssItem};
use crate::namespace::georss::GeoRssWhere;
use crate::namespace::media::MediaNamespace;
use crate::xml::coding::is_present;

pub(super) struct Entry {
    pub namespace: Namespace,
    pub prefix: &'static str,
    pub url: &'static str,
    in_rss: fn(&RssFeed) -> bool,
    in_atom: fn(&AtomFeed) -> bool,
    in_rdf: fn(&RdfFeed) -> bool,
}

/// One row per namespace, in `Namespace` tag order.
static REGISTRY: [Entry; 9] = [
    Entry {
        namespace: Namespace::DublinCore,
        prefix: "xmlns:dc",
        url: "http://purl.org/dc/elements/1.1/",
        in_rss: rss_dublin_core,
        in_atom: never,
        in_rdf: rdf_dublin_core,
    },
    Entry {
        namespace: Namespace::ITunes,
        prefix: "xmlns:itunes",
        url: "http://www.itunes.com/dtds/podcast-1.0.dtd",
        in_rss: rss_itunes,
        in_atom: never,
        in_rdf: never,
    },
    Entry {
        namespace: Namespace::Syndication,
        prefix: "xmlns:sy",
        url: "http://purl.org/rss/1.0/modules/syndication/",
        in_rss: rss_syndication,
        in_atom: never,
        in_rdf: rdf_syndication,
    },
    Entry {
        namespace: Namespace::Media,
        prefix: "xmlns:media",
        url: "http://search.yahoo.com/mrss/",
        in_rss: rss_media,
        in_atom: atom_media,
        in_rdf: never,
    },
    Entry {
        namespace: Namespace::Content,
        prefix: "xmlns:content",
        url: "http://purl.org/rss/1.0/modules/content/",
        in_rss: rss_content,
        in_atom: never,
        in_rdf: rdf_content,
    },
    Entry {
        namespace: Namespace::GeoRss,
        prefix: "xmlns:georss",
        url: "http://www.georss.org/georss",
        in_rss: rss_georss,
        in_atom: atom_georss,
        in_rdf: never,
    },
    Entry {
        namespace: Namespace::Gml,
        prefix: "xmlns:gml",
        url: "http://www.opengis.net/gml",
        in_rss: rss_gml,
        in_atom: atom_gml,
        in_rdf: never,
    },
    Entry {
        namespace: Namespace::YouTube,
        prefix: "xmlns:yt",
        url: "http://www.youtube.com/xml/schemas/2015",
        // YouTube data only exists on Atom entries.
        in_rss: never,
        in_atom: atom_youtube,
        in_rdf: never,
    },
    Entry {
        namespace: Namespace::Atom,
        prefix: "xmlns:atom",
        url: "http://www.w3.org/2005/Atom",
        in_rss: rss_atom,
        // The default namespace of an Atom document already covers it.
        in_atom: never,
        in_rdf: never,
    },
];

pub(super) fn entry(namespace: Namespace) -> &'static Entry {
    &REGISTRY[namespace as usize]
}

/// A top-level document whose encoding may need namespace declarations.
///
/// A namespace counts as included only when encoding would write at least
/// one of its elements or attributes. `Some` of an empty vocabulary (every
/// field `None` or an empty list) writes nothing and declares nothing.
pub trait NamespacedDocument {
    /// Whether encoding this document writes data from `namespace`.
    fn includes(&self, namespace: Namespace) -> bool;

    /// `(attribute, url)` pairs for every namespace this document includes,
    /// in registry order.
    fn declarations(&self) -> Vec<(&'static str, &'static str)> {
        REGISTRY
            .iter()
            .filter(|entry| self.includes(entry.namespace))
            .map(|entry| (entry.prefix, entry.url))
            .collect()
    }
}

impl NamespacedDocument for RssFeed {
    fn includes(&self, namespace: Namespace) -> bool {
        (entry(namespace).in_rss)(self)
    }
}

impl NamespacedDocument for AtomFeed {
    fn includes(&self, namespace: Namespace) -> bool {
        (entry(namespace).in_atom)(self)
    }
}

impl NamespacedDocument for RdfFeed {
    fn includes(&self, namespace: Namespace) -> bool {
        (entry(namespace).in_rdf)(self)
    }
}

// ============================================================================
// Predicates
// ============================================================================

fn never<D>(_: &D) -> bool {
    false
}

fn any_item(feed: &RssFeed, predicate: impl Fn(&RssItem) -> bool) -> bool {
    feed.items().iter().any(predicate)
}

fn any_entry(feed: &AtomFeed, predicate: impl Fn(&AtomEntry) -> bool) -> bool {
    feed.entries().iter().any(predicate)
}

fn geo(media: &Option<MediaNamespace>) -> Option<&GeoRssWhere> {
    media.as_ref()?.location.as_ref()?.geo_rss.as_ref()
}

fn rss_dublin_core(feed: &RssFeed) -> bool {
    feed.channel.as_ref().is_some_and(|c| is_present(&c.dublin_core))
        || any_item(feed, |item| is_present(&item.dublin_core))
}

fn rss_itunes(feed: &RssFeed) -> bool {
    feed.channel.as_ref().is_some_and(|c| is_present(&c.itunes))
        || any_item(feed, |item| is_present(&item.itunes))
}

fn rss_syndication(feed: &RssFeed) -> bool {
    feed.channel.as_ref().is_some_and(|c| is_present(&c.syndication))
}

fn rss_media(feed: &RssFeed) -> bool {
    any_item(feed, |item| is_present(&item.media))
}

fn rss_content(feed: &RssFeed) -> bool {
    any_item(feed, |item| is_present(&item.content))
}

fn rss_georss(feed: &RssFeed) -> bool {
    any_item(feed, |item| geo(&item.media).is_some())
}

fn rss_gml(feed: &RssFeed) -> bool {
    any_item(feed, |item| geo(&item.media).is_some_and(|g| g.gml_point.is_some()))
}

fn rss_atom(feed: &RssFeed) -> bool {
    feed.channel.as_ref().is_some_and(|c| is_present(&c.atom))
}

fn atom_media(feed: &AtomFeed) -> bool {
    any_entry(feed, |entry| is_present(&entry.media))
}

fn atom_georss(feed: &AtomFeed) -> bool {
    any_entry(feed, |entry| geo(&entry.media).is_some())
}

fn atom_gml(feed: &AtomFeed) -> bool {
    any_entry(feed, |entry| geo(&entry.media).is_some_and(|g| g.gml_point.is_some()))
}

fn atom_youtube(feed: &AtomFeed) -> bool {
    any_entry(feed, |entry| is_present(&entry.you_tube))
}

fn rdf_dublin_core(feed: &RdfFeed) -> bool {
    feed.channel.as_ref().is_some_and(|c| is_present(&c.dublin_core))
        || feed.items().iter().any(|item| is_present(&item.dublin_core))
}

fn rdf_syndication(feed: &RdfFeed) -> bool {
    feed.channel.as_ref().is_some_and(|c| is_present(&c.syndication))
}

fn rdf_content(feed: &RdfFeed) -> bool {
    feed.items().iter().any(|item| is_present(&item.content))
}
