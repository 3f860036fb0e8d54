//! RSS 2.0 (<https://www.rssboard.org/rss-specification>).
//!
//! Field order follows the RSS 2.0 element order, which is also the
//! order fields are written in.

use chrono::{DateTime, FixedOffset};

use crate::namespace::atom::AtomNamespace;
use crate::namespace::content::ContentNamespace;
use crate::namespace::dublin_core::DublinCoreNamespace;
use crate::namespace::itunes::ITunesNamespace;
use crate::namespace::media::MediaNamespace;
use crate::namespace::syndication::SyndicationNamespace;
use crate::xml::NamespacedElement;

xml_record! {
    /// `<rss version="2.0">`.
    pub struct RssFeed {
        version: String => attr("version"),
        channel: RssChannel => child("channel"),
    }
}

xml_record! {
    pub struct RssChannel {
        title: String => element("title"),
        link: String => element("link"),
        description: String => element("description"),
        language: String => element("language"),
        copyright: String => element("copyright"),
        managing_editor: String => element("managingEditor"),
        web_master: String => element("webMaster"),
        pub_date: DateTime<FixedOffset> => element("pubDate"),
        last_build_date: DateTime<FixedOffset> => element("lastBuildDate"),
        categories: RssCategory => children("category"),
        generator: String => element("generator"),
        docs: String => element("docs"),
        cloud: RssCloud => child("cloud"),
        /// Minutes the channel may be cached.
        ttl: u32 => element("ttl"),
        image: RssImage => child("image"),
        /// PICS rating.
        rating: String => element("rating"),
        text_input: RssTextInput => child("textInput"),
        skip_hours: RssSkipHours => child("skipHours"),
        skip_days: RssSkipDays => child("skipDays"),
        atom: AtomNamespace => flatten,
        itunes: ITunesNamespace => flatten,
        dublin_core: DublinCoreNamespace => flatten,
        syndication: SyndicationNamespace => flatten,
        items: RssItem => children("item"),
    }
}

xml_record! {
    pub struct RssItem {
        title: String => element("title"),
        link: String => element("link"),
        description: String => element("description"),
        author: String => element("author"),
        categories: RssCategory => children("category"),
        comments: String => element("comments"),
        enclosure: RssEnclosure => child("enclosure"),
        guid: RssGuid => child("guid"),
        pub_date: DateTime<FixedOffset> => element("pubDate"),
        source: RssSource => child("source"),
        dublin_core: DublinCoreNamespace => flatten,
        content: ContentNamespace => flatten,
        itunes: ITunesNamespace => flatten,
        media: MediaNamespace => flatten,
    }
}

xml_record! {
    /// GIF, JPEG or PNG displayed with the channel.
    pub struct RssImage {
        url: String => element("url"),
        title: String => element("title"),
        link: String => element("link"),
        /// Pixels, at most 144.
        width: u32 => element("width"),
        /// Pixels, at most 400.
        height: u32 => element("height"),
        description: String => element("description"),
    }
}

xml_record! {
    pub struct RssTextInput {
        title: String => element("title"),
        description: String => element("description"),
        name: String => element("name"),
        link: String => element("link"),
    }
}

xml_record! {
    pub struct RssSkipHours {
        /// 0 to 23, GMT.
        hours: u8 => elements("hour"),
    }
}

xml_record! {
    pub struct RssSkipDays {
        days: String => elements("day"),
    }
}

// ============================================================================
// Attribute Records
// ============================================================================

xml_record! {
    pub struct RssCategoryAttributes {
        domain: String => attr("domain"),
    }
}

xml_record! {
    pub struct RssCloudAttributes {
        domain: String => attr("domain"),
        port: u16 => attr("port"),
        path: String => attr("path"),
        register_procedure: String => attr("registerProcedure"),
        protocol: String => attr("protocol"),
    }
}

xml_record! {
    pub struct RssEnclosureAttributes {
        url: String => attr("url"),
        /// Bytes.
        length: u64 => attr("length"),
        /// MIME type.
        media_type: String => attr("type"),
    }
}

xml_record! {
    pub struct RssGuidAttributes {
        is_perma_link: bool => attr("isPermaLink"),
    }
}

xml_record! {
    pub struct RssSourceAttributes {
        url: String => attr("url"),
    }
}

pub type RssCategory = NamespacedElement<RssCategoryAttributes>;
pub type RssCloud = NamespacedElement<RssCloudAttributes>;
pub type RssEnclosure = NamespacedElement<RssEnclosureAttributes>;
pub type RssGuid = NamespacedElement<RssGuidAttributes>;
pub type RssSource = NamespacedElement<RssSourceAttributes>;

impl RssFeed {
    pub fn items(&self) -> &[RssItem] {
        self.channel
            .as_ref()
            .and_then(|c| c.items.as_deref())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{tree, DateFormat, DecodeContext, XmlRecord};

    fn decode(xml: &str) -> crate::error::Result<RssFeed> {
        let node = tree::parse(xml.as_bytes(), None, 64)?;
        let mut ctx = DecodeContext::new(DateFormat::Rfc2822);
        ctx.enter("rss");
        RssFeed::decode_record(&node, &mut ctx)
    }

    #[test]
    fn test_channel_metadata() {
        let feed = decode(
            r#"<rss version="2.0"><channel>
  <title>Liftoff News</title>
  <pubDate>Tue, 10 Jun 2003 04:00:00 GMT</pubDate>
  <ttl>60</ttl>
  <category domain="Syndic8">1765</category>
  <cloud domain="rpc.sys.com" port="80" path="/RPC2" registerProcedure="pingMe" protocol="soap"/>
  <skipHours><hour>0</hour><hour>23</hour></skipHours>
  <skipDays><day>Saturday</day></skipDays>
</channel></rss>"#,
        )
        .unwrap();

        assert_eq!(feed.version.as_deref(), Some("2.0"));
        let channel = feed.channel.unwrap();
        assert_eq!(channel.title.as_deref(), Some("Liftoff News"));
        assert_eq!(
            channel.pub_date.unwrap().to_rfc3339(),
            "2003-06-10T04:00:00+00:00"
        );
        assert_eq!(channel.ttl, Some(60));
        let category = &channel.categories.unwrap()[0];
        assert_eq!(category.text.as_deref(), Some("1765"));
        assert_eq!(
            category.attributes.as_ref().unwrap().domain.as_deref(),
            Some("Syndic8")
        );
        assert_eq!(channel.cloud.unwrap().attributes.unwrap().port, Some(80));
        assert_eq!(channel.skip_hours.unwrap().hours, Some(vec![0, 23]));
        assert_eq!(channel.skip_days.unwrap().days, Some(vec!["Saturday".to_string()]));
        assert_eq!(channel.items, None);
        assert_eq!(channel.dublin_core, None);
    }

    #[test]
    fn test_item_enclosure_and_guid() {
        let feed = decode(
            r#"<rss><channel><item>
  <enclosure url="http://www.scripting.com/mp3s/weatherReportSuite.mp3" length="12216320" type="audio/mpeg"/>
  <guid isPermaLink="false">tag:example.com,2003:1</guid>
</item></channel></rss>"#,
        )
        .unwrap();

        let item = &feed.items()[0];
        let enclosure = item.enclosure.as_ref().unwrap().attributes.as_ref().unwrap();
        assert_eq!(enclosure.length, Some(12216320));
        assert_eq!(enclosure.media_type.as_deref(), Some("audio/mpeg"));
        let guid = item.guid.as_ref().unwrap();
        assert_eq!(guid.text.as_deref(), Some("tag:example.com,2003:1"));
        assert_eq!(guid.attributes.as_ref().unwrap().is_perma_link, Some(false));
    }

    #[test]
    fn test_skip_hour_out_of_range() {
        let err = decode("<rss><channel><skipHours><hour>300</hour></skipHours></channel></rss>").unwrap_err();
        assert!(err.to_string().contains("rss/channel/skipHours/hour[0]"));
    }

    #[test]
    fn test_extensions_flatten_into_channel() {
        let feed = decode(
            r#"<rss xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:sy="http://purl.org/rss/1.0/modules/syndication/">
<channel>
  <dc:creator>Jane</dc:creator>
  <sy:updatePeriod>hourly</sy:updatePeriod>
  <sy:updateFrequency>2</sy:updateFrequency>
</channel></rss>"#,
        )
        .unwrap();
        let channel = feed.channel.unwrap();
        assert_eq!(channel.dublin_core.unwrap().creator.as_deref(), Some("Jane"));
        let sy = channel.syndication.unwrap();
        assert_eq!(sy.update_period.as_deref(), Some("hourly"));
        assert_eq!(sy.update_frequency, Some(2));
        assert_eq!(channel.itunes, None);
    }
}
