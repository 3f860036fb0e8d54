//! Top-level decode dispatch and the encode path.
//!
//! The caller always names the dialect: RSS, RDF and Atom documents are all
//! XML and overlap too much to tell apart reliably from content alone.
//! [`Dialect::sniff`] exists for callers that want a best guess anyway.

use std::fmt;
use std::str::FromStr;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::config::CodecConfig;
use crate::error::{FeedError, Result};
use crate::model::atom::AtomFeed;
use crate::model::json::{self, JsonFeed};
use crate::model::rdf::RdfFeed;
use crate::model::rss::RssFeed;
use crate::namespace::{NamespacedDocument, RDF_SYNTAX, RSS_1_0};
use crate::xml::{tree, DateFormat, DecodeContext, EncodeContext, XmlRecord};

// ============================================================================
// Dialects
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Rss,
    Rdf,
    Atom,
    Json,
}

impl Dialect {
    pub const ALL: [Dialect; 4] = [Dialect::Rss, Dialect::Rdf, Dialect::Atom, Dialect::Json];

    /// Best-effort guess from the first significant byte or the first start
    /// tag. Returns `None` when nothing looks like a feed.
    pub fn sniff(bytes: &[u8]) -> Option<Dialect> {
        match first_significant_byte(bytes)? {
            b'{' => return Some(Dialect::Json),
            b'<' => {}
            _ => return None,
        }

        let mut reader = Reader::from_reader(bytes);
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    return match e.local_name().as_ref() {
                        b"rss" => Some(Dialect::Rss),
                        b"RDF" => Some(Dialect::Rdf),
                        b"feed" => Some(Dialect::Atom),
                        _ => None,
                    };
                }
                Ok(Event::Eof) | Err(_) => return None,
                _ => {}
            }
            buf.clear();
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dialect::Rss => "RSS 2.0",
            Dialect::Rdf => "RDF",
            Dialect::Atom => "Atom",
            Dialect::Json => "JSON Feed",
        })
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rss" | "rss2" => Ok(Dialect::Rss),
            "rdf" | "rss1" => Ok(Dialect::Rdf),
            "atom" => Ok(Dialect::Atom),
            "json" | "jsonfeed" => Ok(Dialect::Json),
            other => Err(format!(
                "unknown dialect '{}' (expected rss, rdf, atom or json)",
                other
            )),
        }
    }
}

// ============================================================================
// Documents
// ============================================================================

/// A top-level feed model that can be read from and written to bytes.
pub trait Document: Sized {
    const DIALECT: Dialect;

    fn decode_with(bytes: &[u8], config: &CodecConfig) -> Result<Self>;

    fn encode_with(&self, config: &CodecConfig) -> Result<Vec<u8>>;

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::decode_with(bytes, &CodecConfig::default())
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        self.encode_with(&CodecConfig::default())
    }
}

/// Decodes `bytes` as dialect `D` with the default configuration.
pub fn decode<D: Document>(bytes: &[u8]) -> Result<D> {
    D::from_bytes(bytes)
}

/// Encodes `document` with the default configuration.
pub fn encode<D: Document>(document: &D) -> Result<Vec<u8>> {
    document.to_bytes()
}

/// Fixed facts about one XML dialect.
struct XmlDialect {
    dialect: Dialect,
    root: &'static str,
    date_format: DateFormat,
    /// Elements in this namespace are modeled by local name.
    home: Option<&'static str>,
    /// Declarations every document of this dialect carries.
    declarations: &'static [(&'static str, &'static str)],
}

const RSS: XmlDialect = XmlDialect {
    dialect: Dialect::Rss,
    root: "rss",
    date_format: DateFormat::Rfc2822,
    home: None,
    declarations: &[],
};

const RDF: XmlDialect = XmlDialect {
    dialect: Dialect::Rdf,
    root: "rdf:RDF",
    date_format: DateFormat::Rfc3339,
    home: Some(RSS_1_0),
    declarations: &[("xmlns:rdf", RDF_SYNTAX), ("xmlns", RSS_1_0)],
};

const ATOM: XmlDialect = XmlDialect {
    dialect: Dialect::Atom,
    root: "feed",
    date_format: DateFormat::Rfc3339,
    home: Some("http://www.w3.org/2005/Atom"),
    declarations: &[("xmlns", "http://www.w3.org/2005/Atom")],
};

fn decode_xml<T: XmlRecord>(bytes: &[u8], profile: &XmlDialect, config: &CodecConfig) -> Result<T> {
    // SEC-014: Refuse oversized input before parsing
    if bytes.len() > config.max_document_size {
        return Err(FeedError::TooLarge {
            size: bytes.len(),
            max: config.max_document_size,
        });
    }
    if matches!(first_significant_byte(bytes), Some(b'{') | Some(b'[')) {
        return Err(FeedError::UnsupportedDialect {
            expected: profile.dialect,
            found: "JSON document".to_string(),
        });
    }

    let root = tree::parse(bytes, profile.home, config.max_depth)?;
    if root.name != profile.root {
        return Err(FeedError::UnsupportedDialect {
            expected: profile.dialect,
            found: format!("<{}> root element", root.name),
        });
    }

    let mut ctx = DecodeContext::new(profile.date_format);
    ctx.enter(profile.root);
    let document = T::decode_record(&root, &mut ctx)?;

    tracing::debug!(
        dialect = %profile.dialect,
        bytes = bytes.len(),
        elements = root.children.len(),
        "Decoded feed"
    );
    Ok(document)
}

fn encode_xml<T>(document: &T, profile: &XmlDialect, config: &CodecConfig) -> Result<Vec<u8>>
where
    T: XmlRecord + NamespacedDocument,
{
    let ctx = EncodeContext::new(profile.date_format);
    let mut root = document.encode_record(profile.root, &ctx)?;

    for (attribute, url) in profile.declarations {
        root.push_attribute(*attribute, *url);
    }
    let declarations = document.declarations();
    for (attribute, url) in &declarations {
        root.push_attribute(*attribute, *url);
    }

    let bytes = tree::write(&root, config)?;
    tracing::debug!(
        dialect = %profile.dialect,
        namespaces = declarations.len(),
        bytes = bytes.len(),
        "Encoded feed"
    );
    Ok(bytes)
}

impl Document for RssFeed {
    const DIALECT: Dialect = Dialect::Rss;

    fn decode_with(bytes: &[u8], config: &CodecConfig) -> Result<Self> {
        decode_xml(bytes, &RSS, config)
    }

    fn encode_with(&self, config: &CodecConfig) -> Result<Vec<u8>> {
        encode_xml(self, &RSS, config)
    }
}

impl Document for RdfFeed {
    const DIALECT: Dialect = Dialect::Rdf;

    fn decode_with(bytes: &[u8], config: &CodecConfig) -> Result<Self> {
        decode_xml(bytes, &RDF, config)
    }

    fn encode_with(&self, config: &CodecConfig) -> Result<Vec<u8>> {
        encode_xml(self, &RDF, config)
    }
}

impl Document for AtomFeed {
    const DIALECT: Dialect = Dialect::Atom;

    fn decode_with(bytes: &[u8], config: &CodecConfig) -> Result<Self> {
        decode_xml(bytes, &ATOM, config)
    }

    fn encode_with(&self, config: &CodecConfig) -> Result<Vec<u8>> {
        encode_xml(self, &ATOM, config)
    }
}

impl Document for JsonFeed {
    const DIALECT: Dialect = Dialect::Json;

    fn decode_with(bytes: &[u8], config: &CodecConfig) -> Result<Self> {
        if bytes.len() > config.max_document_size {
            return Err(FeedError::TooLarge {
                size: bytes.len(),
                max: config.max_document_size,
            });
        }
        let feed = json::decode(bytes)?;
        tracing::debug!(
            dialect = %Dialect::Json,
            bytes = bytes.len(),
            items = feed.items().len(),
            "Decoded feed"
        );
        Ok(feed)
    }

    fn encode_with(&self, config: &CodecConfig) -> Result<Vec<u8>> {
        json::encode(self, config)
    }
}

// ============================================================================
// Any Dialect
// ============================================================================

/// A decoded document of any dialect.
#[derive(Debug, Clone, PartialEq)]
pub enum Feed {
    Rss(RssFeed),
    Rdf(RdfFeed),
    Atom(AtomFeed),
    Json(JsonFeed),
}

impl Feed {
    pub fn decode(dialect: Dialect, bytes: &[u8], config: &CodecConfig) -> Result<Feed> {
        Ok(match dialect {
            Dialect::Rss => Feed::Rss(RssFeed::decode_with(bytes, config)?),
            Dialect::Rdf => Feed::Rdf(RdfFeed::decode_with(bytes, config)?),
            Dialect::Atom => Feed::Atom(AtomFeed::decode_with(bytes, config)?),
            Dialect::Json => Feed::Json(JsonFeed::decode_with(bytes, config)?),
        })
    }

    pub fn encode(&self, config: &CodecConfig) -> Result<Vec<u8>> {
        match self {
            Feed::Rss(feed) => feed.encode_with(config),
            Feed::Rdf(feed) => feed.encode_with(config),
            Feed::Atom(feed) => feed.encode_with(config),
            Feed::Json(feed) => feed.encode_with(config),
        }
    }

    pub fn dialect(&self) -> Dialect {
        match self {
            Feed::Rss(_) => Dialect::Rss,
            Feed::Rdf(_) => Dialect::Rdf,
            Feed::Atom(_) => Dialect::Atom,
            Feed::Json(_) => Dialect::Json,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Feed::Rss(feed) => feed.channel.as_ref()?.title.as_deref(),
            Feed::Rdf(feed) => feed.channel.as_ref()?.title.as_deref(),
            Feed::Atom(feed) => feed.title.as_ref()?.text.as_deref(),
            Feed::Json(feed) => feed.title.as_deref(),
        }
    }

    pub fn item_count(&self) -> usize {
        match self {
            Feed::Rss(feed) => feed.items().len(),
            Feed::Rdf(feed) => feed.items().len(),
            Feed::Atom(feed) => feed.entries().len(),
            Feed::Json(feed) => feed.items().len(),
        }
    }
}

impl From<RssFeed> for Feed {
    fn from(feed: RssFeed) -> Self {
        Feed::Rss(feed)
    }
}

impl From<RdfFeed> for Feed {
    fn from(feed: RdfFeed) -> Self {
        Feed::Rdf(feed)
    }
}

impl From<AtomFeed> for Feed {
    fn from(feed: AtomFeed) -> Self {
        Feed::Atom(feed)
    }
}

impl From<JsonFeed> for Feed {
    fn from(feed: JsonFeed) -> Self {
        Feed::Json(feed)
    }
}

pub(crate) fn first_significant_byte(bytes: &[u8]) -> Option<u8> {
    bytes
        .strip_prefix(b"\xEF\xBB\xBF")
        .unwrap_or(bytes)
        .iter()
        .copied()
        .find(|b| !b.is_ascii_whitespace())
}
