//! Integration tests for RSS 2.0 decoding and encoding.
//!
//! These go through the public entry points only: bytes in, typed model out,
//! and back.

use chrono::{TimeZone, Timelike, Utc};
use feedform::model::rss::{RssEnclosure, RssEnclosureAttributes, RssGuid, RssImage};
use feedform::namespace::itunes::{ITunesCategory, ITunesCategoryAttributes, ITunesNamespace};
use feedform::namespace::media::{MediaContent, MediaNamespace};
use feedform::{decode, encode, CodecConfig, Document, FeedError, RssChannel, RssFeed, RssItem};
use pretty_assertions::assert_eq;

const XML_COM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>XML.com</title>
    <link>http://xml.com/pub</link>
    <description>XML.com features a rich mix of information and services for the XML community.</description>
    <item>
      <title>Processing Inclusions with XSLT</title>
      <link>http://xml.com/pub/2000/08/09/xslt/xslt.html</link>
      <description>Processing document inclusions with general XML tools can be problematic.</description>
    </item>
  </channel>
</rss>"#;

// ============================================================================
// Decode
// ============================================================================

#[test]
fn test_xml_com_channel_and_item() {
    let feed: RssFeed = decode(XML_COM.as_bytes()).unwrap();

    let channel = feed.channel.as_ref().unwrap();
    assert_eq!(channel.title.as_deref(), Some("XML.com"));
    assert_eq!(channel.link.as_deref(), Some("http://xml.com/pub"));

    let items = channel.items.as_ref().unwrap();
    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item.title.as_deref(), Some("Processing Inclusions with XSLT"));
    assert_eq!(item.dublin_core, None);
    assert_eq!(item.itunes, None);
    assert_eq!(item.media, None);
}

#[test]
fn test_xml_com_reencode_declares_no_extensions() {
    let feed: RssFeed = decode(XML_COM.as_bytes()).unwrap();
    let xml = String::from_utf8(encode(&feed).unwrap()).unwrap();

    assert!(!xml.contains("xmlns"), "unexpected declaration in:\n{}", xml);
    assert!(xml.contains("<title>XML.com</title>"));
    assert_eq!(decode::<RssFeed>(xml.as_bytes()).unwrap(), feed);
}

#[test]
fn test_root_only_document_is_sparse() {
    let feed: RssFeed = decode(b"<rss/>").unwrap();
    assert_eq!(feed.version, None);
    assert_eq!(feed.channel, None);
    assert!(feed.items().is_empty());
}

#[test]
fn test_empty_channel_is_present_but_empty() {
    let feed: RssFeed = decode(b"<rss version=\"2.0\"><channel></channel></rss>").unwrap();
    assert_eq!(feed.channel, Some(RssChannel::default()));
}

#[test]
fn test_non_numeric_image_width() {
    let err = decode::<RssFeed>(
        br#"<rss><channel><image><url>http://x/y.png</url><width>wide</width></image></channel></rss>"#,
    )
    .unwrap_err();

    match err {
        FeedError::FieldTypeMismatch { path, reason } => {
            assert_eq!(path, "rss/channel/image/width");
            assert!(reason.contains("wide"));
        }
        other => panic!("expected a field mismatch, got {:?}", other),
    }
}

#[test]
fn test_bad_pub_date_in_second_item() {
    let err = decode::<RssFeed>(
        br#"<rss><channel><item/><item><pubDate>the other day</pubDate></item></channel></rss>"#,
    )
    .unwrap_err();
    assert!(
        err.to_string().contains("rss/channel/item[1]/pubDate"),
        "{}",
        err
    );
}

#[test]
fn test_unreadable_bytes() {
    let err = decode::<RssFeed>(b"<rss><channel>").unwrap_err();
    assert!(matches!(err, FeedError::MalformedInput(_)));
}

#[test]
fn test_unmodeled_elements_are_ignored() {
    let feed: RssFeed = decode(
        br#"<rss xmlns:foo="urn:foo"><channel><foo:bar>x</foo:bar><title>T</title></channel></rss>"#,
    )
    .unwrap();
    assert_eq!(feed.channel.unwrap().title.as_deref(), Some("T"));
}

#[test]
fn test_podcast_channel() {
    let feed: RssFeed = decode(
        br#"<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">
<channel>
  <title>Hiking Treks</title>
  <itunes:author>The Sunset Explorers</itunes:author>
  <itunes:image href="https://applehosted.podcasts/hiking/artwork.jpg"/>
  <itunes:category text="Sports"><itunes:category text="Wilderness"/></itunes:category>
  <itunes:explicit>false</itunes:explicit>
  <itunes:owner><itunes:name>Sunset</itunes:name><itunes:email>a@example.com</itunes:email></itunes:owner>
  <item>
    <title>Hiking Treks Trailer</title>
    <enclosure url="http://example.com/podcasts/everything/AllAboutEverythingEpisode4.mp3" length="498537" type="audio/mpeg"/>
    <itunes:duration>1079</itunes:duration>
    <itunes:episodeType>trailer</itunes:episodeType>
    <itunes:season>1</itunes:season>
  </item>
</channel>
</rss>"#,
    )
    .unwrap();

    let channel = feed.channel.as_ref().unwrap();
    let itunes = channel.itunes.as_ref().unwrap();
    assert_eq!(itunes.author.as_deref(), Some("The Sunset Explorers"));
    assert_eq!(
        itunes.image.as_ref().unwrap().attributes.as_ref().unwrap().href.as_deref(),
        Some("https://applehosted.podcasts/hiking/artwork.jpg")
    );
    assert_eq!(itunes.owner.as_ref().unwrap().name.as_deref(), Some("Sunset"));

    let item = &feed.items()[0];
    let episode = item.itunes.as_ref().unwrap();
    assert_eq!(episode.duration.as_deref(), Some("1079"));
    assert_eq!(episode.season, Some(1));
    assert_eq!(
        item.enclosure.as_ref().unwrap().attributes.as_ref().unwrap().length,
        Some(498537)
    );

    // Re-encoding declares iTunes and nothing else.
    let xml = String::from_utf8(feed.to_bytes().unwrap()).unwrap();
    assert!(xml.contains(r#"xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd""#));
    assert_eq!(xml.matches("xmlns").count(), 1);
    assert_eq!(decode::<RssFeed>(xml.as_bytes()).unwrap(), feed);
}

// ============================================================================
// Encode
// ============================================================================

#[test]
fn test_encode_follows_element_order() {
    // Populated out of order, written in channel order.
    let channel = RssChannel {
        ttl: Some(60),
        description: Some("D".into()),
        title: Some("T".into()),
        ..Default::default()
    };
    let feed = RssFeed {
        version: Some("2.0".into()),
        channel: Some(channel),
    };

    let xml = String::from_utf8(feed.encode_with(&CodecConfig::compact()).unwrap()).unwrap();
    assert_eq!(
        xml,
        r#"<rss version="2.0"><channel><title>T</title><description>D</description><ttl>60</ttl></channel></rss>"#
    );
}

#[test]
fn test_encode_is_deterministic() {
    let feed: RssFeed = decode(XML_COM.as_bytes()).unwrap();
    assert_eq!(encode(&feed).unwrap(), encode(&feed).unwrap());
}

#[test]
fn test_encode_dates_as_rfc2822() {
    let feed = RssFeed {
        version: None,
        channel: Some(RssChannel {
            pub_date: Some(chrono::DateTime::parse_from_rfc3339("2002-09-17T09:42:31+00:00").unwrap()),
            ..Default::default()
        }),
    };
    let xml = String::from_utf8(feed.encode_with(&CodecConfig::compact()).unwrap()).unwrap();
    assert!(xml.contains("<pubDate>Tue, 17 Sep 2002 09:42:31 +0000</pubDate>"), "{}", xml);
}

#[test]
fn test_full_model_round_trip() {
    let feed = RssFeed {
        version: Some("2.0".into()),
        channel: Some(RssChannel {
            title: Some("Tom & Jerry".into()),
            link: Some("https://example.com/?a=1&b=2".into()),
            image: Some(RssImage {
                url: Some("https://example.com/logo.png".into()),
                width: Some(88),
                height: Some(31),
                ..Default::default()
            }),
            itunes: Some(ITunesNamespace {
                categories: Some(vec![ITunesCategory {
                    attributes: Some(ITunesCategoryAttributes {
                        text: Some("TV & Film".into()),
                    }),
                    text: None,
                    children: Some(vec![ITunesCategory::with_attributes(
                        ITunesCategoryAttributes {
                            text: Some("After Shows".into()),
                        },
                    )]),
                }]),
                ..Default::default()
            }),
            items: Some(vec![
                RssItem {
                    title: Some("<b>bold</b>".into()),
                    enclosure: Some(RssEnclosure::with_attributes(RssEnclosureAttributes {
                        url: Some("https://example.com/a.mp3".into()),
                        length: Some(1),
                        media_type: Some("audio/mpeg".into()),
                    })),
                    ..Default::default()
                },
                RssItem::default(),
            ]),
            ..Default::default()
        }),
    };

    for config in [CodecConfig::default(), CodecConfig::compact()] {
        let bytes = feed.encode_with(&config).unwrap();
        assert_eq!(RssFeed::decode_with(&bytes, &config).unwrap(), feed);
    }
}

#[test]
fn test_text_round_trips_byte_for_byte() {
    let feed = RssFeed {
        version: Some("2.0".into()),
        channel: Some(RssChannel {
            title: Some("  padded title ".into()),
            description: Some("line\n".into()),
            items: Some(vec![RssItem {
                title: Some(String::new()),
                author: Some("\tjane@example.com".into()),
                guid: Some(RssGuid::with_text("")),
                ..Default::default()
            }]),
            ..Default::default()
        }),
    };

    for config in [CodecConfig::default(), CodecConfig::compact()] {
        let bytes = feed.encode_with(&config).unwrap();
        assert_eq!(RssFeed::decode_with(&bytes, &config).unwrap(), feed);
    }
}

#[test]
fn test_fractional_pub_date_is_stable() {
    let xml = r#"<rss version="2.0"><channel><item><pubDate>2002-09-07T09:42:31.5Z</pubDate></item></channel></rss>"#;
    let feed: RssFeed = decode(xml.as_bytes()).unwrap();
    let first = feed.items()[0].pub_date.unwrap();
    assert_eq!(first.nanosecond(), 500_000_000);

    let again: RssFeed = decode(&encode(&feed).unwrap()).unwrap();
    assert_eq!(again, feed);
}

#[test]
fn test_unwritable_year_is_an_encode_error() {
    let feed = RssFeed {
        version: Some("2.0".into()),
        channel: Some(RssChannel {
            items: Some(vec![RssItem {
                pub_date: Some(Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap().fixed_offset()),
                ..Default::default()
            }]),
            ..Default::default()
        }),
    };
    assert!(matches!(encode(&feed), Err(FeedError::Encode(_))));
}

#[test]
fn test_non_finite_numbers_rejected_both_ways() {
    let xml = r#"<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/"><channel><item><media:content framerate="NaN"/></item></channel></rss>"#;
    let err = decode::<RssFeed>(xml.as_bytes()).unwrap_err();
    assert!(matches!(err, FeedError::FieldTypeMismatch { .. }), "{:?}", err);

    let feed = RssFeed {
        version: Some("2.0".into()),
        channel: Some(RssChannel {
            items: Some(vec![RssItem {
                media: Some(MediaNamespace {
                    contents: Some(vec![MediaContent {
                        framerate: Some(f64::INFINITY),
                        ..Default::default()
                    }]),
                    ..Default::default()
                }),
                ..Default::default()
            }]),
            ..Default::default()
        }),
    };
    assert!(matches!(encode(&feed), Err(FeedError::Encode(_))));
}
