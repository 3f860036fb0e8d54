use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::{QName, ResolveResult};
use quick_xml::{NsReader, Writer};

use crate::config::CodecConfig;
use crate::error::{FeedError, Result};
use crate::namespace::{Namespace, RDF_SYNTAX};

/// A parsed XML element: qualified name, attributes in document order,
/// concatenated text content and child elements.
///
/// Namespace declarations (`xmlns`, `xmlns:*`) are not kept as attributes;
/// names bound to a known vocabulary carry that vocabulary's canonical prefix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlNode {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First child element with the given name.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn push_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.push((name.into(), value.into()));
    }
}

/// Parses a complete document into its root element.
///
/// `home` is the namespace URL of the dialect itself (Atom for Atom feeds,
/// RSS 1.0 for RDF). Elements bound to it lose their prefix so that
/// `<atom:title>` and `<title xmlns="...Atom">` read the same.
///
/// Text is kept byte for byte. The one exception is whitespace-only text
/// between child elements, which is layout and is dropped. `<a></a>` has
/// the empty string as text; `<a/>` has none.
///
/// # Errors
///
/// - [`FeedError::MalformedInput`] for syntax errors, mismatched or unclosed
///   tags, unknown entities, several root elements, or no root at all.
/// - [`FeedError::MaxDepthExceeded`] when nesting exceeds `max_depth`.
pub fn parse(bytes: &[u8], home: Option<&str>, max_depth: usize) -> Result<XmlNode> {
    // SEC-002: quick-xml (0.37) never expands <!ENTITY> declarations from a DOCTYPE.
    // References to anything but the five XML builtins fail in `unescape()`.
    let mut reader = NsReader::from_reader(bytes);

    let mut buf = Vec::new();
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                // SEC-003: Reject excessively nested documents
                if stack.len() >= max_depth {
                    return Err(FeedError::MaxDepthExceeded(max_depth));
                }
                stack.push(OpenElement {
                    node: open_element(&reader, &e, home)?,
                    runs: Vec::new(),
                });
            }
            Ok(Event::Empty(e)) => {
                if stack.len() >= max_depth {
                    return Err(FeedError::MaxDepthExceeded(max_depth));
                }
                let node = open_element(&reader, &e, home)?;
                attach(node, &mut stack, &mut root)?;
            }
            Ok(Event::End(_)) => {
                let open = stack
                    .pop()
                    .ok_or_else(|| FeedError::malformed("closing tag without an open element"))?;
                attach(open.close(), &mut stack, &mut root)?;
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| FeedError::malformed(format!("XML text error: {}", e)))?;
                push_run(&mut stack, text.into_owned());
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8(e.into_inner().into_owned())
                    .map_err(|e| FeedError::malformed(format!("CDATA is not UTF-8: {}", e)))?;
                push_run(&mut stack, text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(FeedError::malformed(format!(
                    "XML parse error at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(FeedError::malformed(format!("unclosed element <{}>", open.node.name)));
    }
    root.ok_or_else(|| FeedError::malformed("document has no root element"))
}

/// An element between its start and end tags.
struct OpenElement {
    node: XmlNode,
    /// Text and CDATA sections in document order.
    runs: Vec<String>,
}

impl OpenElement {
    fn close(self) -> XmlNode {
        let mut node = self.node;
        node.text = if node.children.is_empty() {
            Some(self.runs.concat())
        } else {
            let text: String = self
                .runs
                .into_iter()
                .filter(|run| !run.trim().is_empty())
                .collect();
            (!text.is_empty()).then_some(text)
        };
        node
    }
}

fn open_element(
    reader: &NsReader<&[u8]>,
    start: &BytesStart<'_>,
    home: Option<&str>,
) -> Result<XmlNode> {
    let (resolved, _) = reader.resolve_element(start.name());
    let mut node = XmlNode::new(canonical_name(resolved, start.name(), home)?);

    for attribute in start.attributes() {
        let attribute = attribute
            .map_err(|e| FeedError::malformed(format!("malformed attribute: {}", e)))?;
        if attribute.key.as_namespace_binding().is_some() {
            continue;
        }
        let (resolved, _) = reader.resolve_attribute(attribute.key);
        let name = canonical_name(resolved, attribute.key, None)?;
        let value = attribute
            .decode_and_unescape_value(reader.decoder())
            .map_err(|e| FeedError::malformed(format!("attribute `{}`: {}", name, e)))?;
        node.push_attribute(name, value.into_owned());
    }

    Ok(node)
}

/// Maps a resolved name onto the spelling the models use.
fn canonical_name(resolved: ResolveResult<'_>, qname: QName<'_>, home: Option<&str>) -> Result<String> {
    let raw = utf8(qname.as_ref())?;
    let local_name = qname.local_name();
    let local = utf8(local_name.as_ref())?;

    if let ResolveResult::Bound(ns) = resolved {
        let url = ns.as_ref();
        if home.is_some_and(|home| home.as_bytes() == url) {
            return Ok(local.to_string());
        }
        if let Some(namespace) = Namespace::from_url(url) {
            return Ok(format!("{}:{}", namespace.local_prefix(), local));
        }
        if url == RDF_SYNTAX.as_bytes() {
            return Ok(format!("rdf:{}", local));
        }
    }
    Ok(raw.to_string())
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| FeedError::malformed(format!("name is not UTF-8: {}", e)))
}

fn attach(node: XmlNode, stack: &mut [OpenElement], root: &mut Option<XmlNode>) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.node.children.push(node),
        None if root.is_some() => {
            return Err(FeedError::malformed(format!(
                "second root element <{}>",
                node.name
            )))
        }
        None => *root = Some(node),
    }
    Ok(())
}

fn push_run(stack: &mut [OpenElement], text: String) {
    // Text outside the root element (prolog, trailing junk) carries no data.
    if let Some(open) = stack.last_mut() {
        open.runs.push(text);
    }
}

/// Serializes `root` as a complete XML document.
pub fn write(root: &XmlNode, config: &CodecConfig) -> Result<Vec<u8>> {
    let mut writer = if config.indent > 0 {
        Writer::new_with_indent(Vec::new(), b' ', config.indent)
    } else {
        Writer::new(Vec::new())
    };

    if config.xml_declaration {
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(encode_error)?;
    }
    write_node(&mut writer, root)?;

    Ok(writer.into_inner())
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &XmlNode) -> Result<()> {
    let mut start = BytesStart::new(node.name.as_str());
    for (key, value) in &node.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if node.text.is_none() && node.children.is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(encode_error);
    }

    writer.write_event(Event::Start(start)).map_err(encode_error)?;
    if let Some(text) = &node.text {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(encode_error)?;
    }
    for child in &node.children {
        write_node(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(node.name.as_str())))
        .map_err(encode_error)
}

fn encode_error(e: impl std::fmt::Display) -> FeedError {
    FeedError::Encode(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ATOM: &str = "http://www.w3.org/2005/Atom";

    fn parse_str(content: &str) -> Result<XmlNode> {
        parse(content.as_bytes(), None, 64)
    }

    #[test]
    fn test_parse_builds_tree() {
        let root = parse_str(
            r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>XML.com</title>
    <item><title>First</title></item>
    <item><title>Second</title></item>
  </channel>
</rss>"#,
        )
        .unwrap();

        assert_eq!(root.name, "rss");
        assert_eq!(root.attribute("version"), Some("2.0"));
        let channel = root.child("channel").unwrap();
        assert_eq!(channel.child("title").unwrap().text.as_deref(), Some("XML.com"));
        let titles: Vec<_> = channel
            .children_named("item")
            .filter_map(|item| item.child("title")?.text.as_deref())
            .collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test]
    fn test_self_closing_has_no_text_but_open_close_pair_is_empty_text() {
        let root = parse_str(r#"<a><b x="1"/><c></c><d><!-- note --></d></a>"#).unwrap();
        let b = root.child("b").unwrap();
        assert_eq!(b.attribute("x"), Some("1"));
        assert_eq!(b.text, None);
        assert_eq!(root.child("c").unwrap().text.as_deref(), Some(""));
        assert_eq!(root.child("d").unwrap().text.as_deref(), Some(""));
    }

    #[test]
    fn test_leaf_text_is_kept_exactly() {
        let root = parse_str("<a>\n  <b>  padded </b>\n  <c>line\n</c>\n  <d>   </d>\n</a>").unwrap();
        assert_eq!(root.text, None);
        assert_eq!(root.child("b").unwrap().text.as_deref(), Some("  padded "));
        assert_eq!(root.child("c").unwrap().text.as_deref(), Some("line\n"));
        assert_eq!(root.child("d").unwrap().text.as_deref(), Some("   "));
    }

    #[test]
    fn test_mixed_content_keeps_text_and_drops_layout() {
        let root = parse_str("<a> lead <b/>\n  <b/>\n</a>").unwrap();
        assert_eq!(root.text.as_deref(), Some(" lead "));
        assert_eq!(root.children.len(), 2);
    }

    #[test]
    fn test_indented_output_reads_back_exactly() {
        let mut root = XmlNode::new("a");
        let mut leaf = XmlNode::new("b");
        leaf.text = Some(" x\n".into());
        let mut empty = XmlNode::new("c");
        empty.text = Some(String::new());
        let mut mixed = XmlNode::new("d");
        mixed.text = Some("outer ".into());
        mixed.children.push(XmlNode::new("d"));
        root.children.extend([leaf, empty, mixed, XmlNode::new("e")]);

        let bytes = write(&root, &CodecConfig::default()).unwrap();
        assert_eq!(parse(&bytes, None, 64).unwrap(), root);
    }

    #[test]
    fn test_cdata_becomes_text() {
        let root = parse_str("<a><![CDATA[<p>Hello & bye</p>]]></a>").unwrap();
        assert_eq!(root.text.as_deref(), Some("<p>Hello & bye</p>"));
    }

    #[test]
    fn test_entities_are_unescaped() {
        let root = parse_str(r#"<a title="Tom &amp; Jerry">1 &lt; 2</a>"#).unwrap();
        assert_eq!(root.attribute("title"), Some("Tom & Jerry"));
        assert_eq!(root.text.as_deref(), Some("1 < 2"));
    }

    #[test]
    fn test_prefixes_are_canonicalised() {
        let root = parse_str(
            r#"<rss xmlns:purl="http://purl.org/dc/elements/1.1/" xmlns:a="http://www.w3.org/2005/Atom">
  <channel>
    <purl:creator>Jane</purl:creator>
    <a:link href="https://example.com/feed" rel="self"/>
  </channel>
</rss>"#,
        )
        .unwrap();
        let channel = root.child("channel").unwrap();
        assert_eq!(channel.child("dc:creator").unwrap().text.as_deref(), Some("Jane"));
        assert!(channel.child("atom:link").is_some());
        // Declarations are not attributes.
        assert!(root.attributes.is_empty());
    }

    #[test]
    fn test_home_namespace_drops_prefix() {
        let content = r#"<atom:feed xmlns:atom="http://www.w3.org/2005/Atom"><atom:title>T</atom:title></atom:feed>"#;
        let root = parse(content.as_bytes(), Some(ATOM), 64).unwrap();
        assert_eq!(root.name, "feed");
        assert_eq!(root.child("title").unwrap().text.as_deref(), Some("T"));
    }

    #[test]
    fn test_rdf_syntax_prefix_is_canonicalised() {
        let content = r#"<r:RDF xmlns:r="http://www.w3.org/1999/02/22-rdf-syntax-ns#"><channel r:about="x"/></r:RDF>"#;
        let root = parse_str(content).unwrap();
        assert_eq!(root.name, "rdf:RDF");
        assert_eq!(root.child("channel").unwrap().attribute("rdf:about"), Some("x"));
    }

    #[test]
    fn test_unknown_prefix_is_kept_verbatim() {
        let root = parse_str(r#"<a xmlns:x="urn:example"><x:thing/></a>"#).unwrap();
        assert!(root.child("x:thing").is_some());
    }

    #[test]
    fn test_malformed_xml_error() {
        let result = parse_str("<not valid xml");
        assert!(matches!(result, Err(FeedError::MalformedInput(_))));
    }

    #[test]
    fn test_mismatched_tags_rejected() {
        let result = parse_str("<a><b></a></b>");
        assert!(matches!(result, Err(FeedError::MalformedInput(_))));
    }

    #[test]
    fn test_missing_root_rejected() {
        let err = parse_str("<?xml version=\"1.0\"?>").unwrap_err();
        assert!(err.to_string().contains("no root"));
    }

    #[test]
    fn test_second_root_rejected() {
        let result = parse_str("<a/><b/>");
        assert!(matches!(result, Err(FeedError::MalformedInput(_))));
    }

    #[test]
    fn test_xxe_entity_not_expanded() {
        // SEC-002: custom entities are never resolved.
        let content = r#"<?xml version="1.0"?>
<!DOCTYPE rss [<!ENTITY xxe SYSTEM "file:///etc/passwd">]>
<rss><channel><title>&xxe;</title></channel></rss>"#;
        match parse_str(content) {
            Ok(root) => {
                let title = root
                    .child("channel")
                    .and_then(|c| c.child("title"))
                    .and_then(|t| t.text.clone())
                    .unwrap_or_default();
                assert!(!title.contains("root:"), "XXE expansion detected: {}", title);
            }
            Err(e) => assert!(matches!(e, FeedError::MalformedInput(_))),
        }
    }

    #[test]
    fn test_deeply_nested_document_rejected() {
        let mut content = String::new();
        for _ in 0..10 {
            content.push_str("<a>");
        }
        for _ in 0..10 {
            content.push_str("</a>");
        }

        assert!(parse(content.as_bytes(), None, 10).is_ok());
        let err = parse(content.as_bytes(), None, 9).unwrap_err();
        assert!(matches!(err, FeedError::MaxDepthExceeded(9)));
    }

    #[test]
    fn test_write_escapes_and_collapses_empty_elements() {
        let mut root = XmlNode::new("rss");
        root.push_attribute("version", "2.0");
        let mut title = XmlNode::new("title");
        title.text = Some("Tom & Jerry <3".to_string());
        root.children.push(title);
        root.children.push(XmlNode::new("empty"));

        let bytes = write(&root, &CodecConfig::compact()).unwrap();
        let xml = String::from_utf8(bytes).unwrap();
        assert_eq!(
            xml,
            r#"<rss version="2.0"><title>Tom &amp; Jerry &lt;3</title><empty/></rss>"#
        );
    }

    #[test]
    fn test_write_then_parse_preserves_tree() {
        let root = parse_str(r#"<a k="v"><b>text</b><c><d/></c></a>"#).unwrap();
        let bytes = write(&root, &CodecConfig::default()).unwrap();
        let reparsed = parse(&bytes, None, 64).unwrap();
        assert_eq!(root, reparsed);
    }
}
