//! Apple Podcasts tags (`itunes:`).

use crate::xml::NamespacedElement;

xml_record! {
    pub struct ITunesCategoryAttributes {
        text: String => attr("text"),
    }
}

/// A browsing category. Subcategories are nested `itunes:category`
/// elements and decode into `children`:
///
/// ```xml
/// <itunes:category text="Society &amp; Culture">
///   <itunes:category text="History"/>
/// </itunes:category>
/// ```
pub type ITunesCategory = NamespacedElement<ITunesCategoryAttributes>;

xml_record! {
    pub struct ITunesImageAttributes {
        href: String => attr("href"),
    }
}

pub type ITunesImage = NamespacedElement<ITunesImageAttributes>;

xml_record! {
    pub struct ITunesOwner {
        name: String => element("itunes:name"),
        email: String => element("itunes:email"),
    }
}

xml_record! {
    /// Podcast-level and episode-level iTunes data. Channels and items share
    /// the vocabulary; which tags apply where is up to the publisher.
    pub struct ITunesNamespace {
        author: String => element("itunes:author"),
        /// `Yes` hides the show or episode.
        block: String => element("itunes:block"),
        categories: ITunesCategory => children("itunes:category"),
        image: ITunesImage => child("itunes:image"),
        /// `HH:MM:SS`, `MM:SS` or plain seconds.
        duration: String => element("itunes:duration"),
        /// `true`/`false` (older feeds: `yes`, `no`, `clean`).
        explicit: String => element("itunes:explicit"),
        is_closed_captioned: String => element("itunes:isClosedCaptioned"),
        order: u32 => element("itunes:order"),
        complete: String => element("itunes:complete"),
        new_feed_url: String => element("itunes:new-feed-url"),
        owner: ITunesOwner => child("itunes:owner"),
        subtitle: String => element("itunes:subtitle"),
        summary: String => element("itunes:summary"),
        keywords: String => element("itunes:keywords"),
        /// `episodic` or `serial`.
        show_type: String => element("itunes:type"),
        /// `full`, `trailer` or `bonus`.
        episode_type: String => element("itunes:episodeType"),
        season: u32 => element("itunes:season"),
        episode: u32 => element("itunes:episode"),
        title: String => element("itunes:title"),
    }
}
