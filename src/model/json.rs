//! JSON Feed 1.1 (<https://www.jsonfeed.org/version/1.1/>), reading the 1.0
//! `author` object as well.

use chrono::{DateTime, FixedOffset};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codec::{first_significant_byte, Dialect};
use crate::config::CodecConfig;
use crate::error::{FeedError, Result};

/// Prefix every JSON Feed `version` URL starts with.
pub const VERSION_PREFIX: &str = "https://jsonfeed.org/version/";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonFeed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_page_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    /// Deprecated in 1.1 in favour of `authors`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<JsonFeedAuthor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<JsonFeedAuthor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hubs: Option<Vec<JsonFeedHub>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<JsonFeedItem>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonFeedItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_published: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<JsonFeedAuthor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<JsonFeedAuthor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<JsonFeedAttachment>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonFeedAuthor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// WebSub or rssCloud endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonFeedHub {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub hub_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonFeedAttachment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_in_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_in_seconds: Option<f64>,
}

impl JsonFeed {
    pub fn items(&self) -> &[JsonFeedItem] {
        self.items.as_deref().unwrap_or_default()
    }
}

// ============================================================================
// Codec
// ============================================================================

pub(crate) fn decode(bytes: &[u8]) -> Result<JsonFeed> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| {
        if first_significant_byte(bytes) == Some(b'<') {
            FeedError::UnsupportedDialect {
                expected: Dialect::Json,
                found: "XML document".to_string(),
            }
        } else {
            FeedError::malformed(format!("JSON parse error: {}", e))
        }
    })?;

    let mut root = match value {
        Value::Object(root) => root,
        other => {
            return Err(FeedError::UnsupportedDialect {
                expected: Dialect::Json,
                found: format!("JSON {}", kind_of(&other)),
            })
        }
    };

    if let Some(Value::String(version)) = root.get("version") {
        if !version.starts_with(VERSION_PREFIX) {
            return Err(FeedError::UnsupportedDialect {
                expected: Dialect::Json,
                found: format!("version {:?}", version),
            });
        }
    }

    let items = root.remove("items");
    let mut feed: JsonFeed = from_object(root, "")?;

    feed.items = match items {
        None | Some(Value::Null) => None,
        Some(Value::Array(values)) => Some(
            values
                .into_iter()
                .enumerate()
                .map(|(index, value)| decode_item(value, index))
                .collect::<Result<Vec<_>>>()?,
        ),
        Some(other) => {
            return Err(FeedError::FieldTypeMismatch {
                path: "items".to_string(),
                reason: format!("expected an array, found {}", kind_of(&other)),
            })
        }
    };

    Ok(feed)
}

fn decode_item(value: Value, index: usize) -> Result<JsonFeedItem> {
    let path = format!("items[{}]", index);
    match value {
        Value::Object(object) => from_object(object, &path),
        other => Err(FeedError::FieldTypeMismatch {
            path,
            reason: format!("expected an object, found {}", kind_of(&other)),
        }),
    }
}

/// Deserializes `object`; on failure, narrows the error down to the first
/// member that does not convert on its own.
fn from_object<T: DeserializeOwned>(object: Map<String, Value>, path: &str) -> Result<T> {
    match serde_json::from_value::<T>(Value::Object(object.clone())) {
        Ok(value) => Ok(value),
        Err(e) => {
            let member = object.iter().find_map(|(key, value)| {
                let mut single = Map::new();
                single.insert(key.clone(), value.clone());
                serde_json::from_value::<T>(Value::Object(single))
                    .err()
                    .map(|e| (key.clone(), e))
            });
            let (segment, error) = member.unwrap_or_else(|| (String::new(), e));
            let path = [path, segment.as_str()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("/");
            Err(FeedError::FieldTypeMismatch {
                path,
                reason: error.to_string(),
            })
        }
    }
}

pub(crate) fn encode(feed: &JsonFeed, config: &CodecConfig) -> Result<Vec<u8>> {
    let bytes = if config.indent > 0 {
        serde_json::to_vec_pretty(feed)
    } else {
        serde_json::to_vec(feed)
    };
    bytes.map_err(|e| FeedError::Encode(e.to_string()))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"{
  "version": "https://jsonfeed.org/version/1.1",
  "title": "My Example Feed",
  "home_page_url": "https://example.org/",
  "feed_url": "https://example.org/feed.json",
  "authors": [{ "name": "Brent" }],
  "hubs": [{ "type": "WebSub", "url": "https://hub.example.org/" }],
  "items": [
    {
      "id": "2",
      "content_text": "This is a second item.",
      "url": "https://example.org/second-item",
      "date_published": "2010-02-07T14:04:00-05:00",
      "attachments": [{ "url": "https://example.org/a.mp3", "mime_type": "audio/mpeg", "size_in_bytes": 1024 }]
    },
    {
      "id": "1",
      "content_html": "<p>Hello, world!</p>",
      "url": "https://example.org/initial-post"
    }
  ]
}"#;

    #[test]
    fn test_decode_sample() {
        let feed = decode(SAMPLE.as_bytes()).unwrap();
        assert_eq!(feed.title.as_deref(), Some("My Example Feed"));
        assert_eq!(feed.authors.as_ref().unwrap()[0].name.as_deref(), Some("Brent"));
        assert_eq!(feed.hubs.as_ref().unwrap()[0].hub_type.as_deref(), Some("WebSub"));
        assert_eq!(feed.items().len(), 2);

        let first = &feed.items()[0];
        assert_eq!(
            first.date_published.unwrap().to_rfc3339(),
            "2010-02-07T14:04:00-05:00"
        );
        let attachment = &first.attachments.as_ref().unwrap()[0];
        assert_eq!(attachment.size_in_bytes, Some(1024));
        assert_eq!(feed.items()[1].date_published, None);
    }

    #[test]
    fn test_encode_omits_absent_fields() {
        let feed = JsonFeed {
            version: Some("https://jsonfeed.org/version/1.1".into()),
            title: Some("T".into()),
            ..Default::default()
        };
        let bytes = encode(&feed, &CodecConfig::compact()).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"version":"https://jsonfeed.org/version/1.1","title":"T"}"#
        );
    }

    #[test]
    fn test_empty_object_is_sparse_feed() {
        assert_eq!(decode(b"{}").unwrap(), JsonFeed::default());
    }

    #[test]
    fn test_item_type_mismatch_has_path() {
        let err = decode(br#"{"items":[{"id":"1"},{"id":"2","date_published":"soon"}]}"#).unwrap_err();
        match err {
            FeedError::FieldTypeMismatch { path, .. } => assert_eq!(path, "items[1]/date_published"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_top_level_type_mismatch_has_path() {
        let err = decode(br#"{"title":"ok","expired":"no"}"#).unwrap_err();
        match err {
            FeedError::FieldTypeMismatch { path, .. } => assert_eq!(path, "expired"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_foreign_version_rejected() {
        let err = decode(br#"{"version":"https://example.com/v1"}"#).unwrap_err();
        assert!(matches!(err, FeedError::UnsupportedDialect { .. }));
    }

    #[test]
    fn test_xml_input_rejected_as_wrong_dialect() {
        let err = decode(b"  <rss/>").unwrap_err();
        assert!(matches!(err, FeedError::UnsupportedDialect { .. }));
    }

    #[test]
    fn test_array_root_rejected() {
        let err = decode(b"[]").unwrap_err();
        assert!(err.to_string().contains("JSON array"));
    }

    #[test]
    fn test_truncated_json_is_malformed() {
        let err = decode(br#"{"title": "#).unwrap_err();
        assert!(matches!(err, FeedError::MalformedInput(_)));
    }
}
