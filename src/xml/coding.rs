//! Field-level coding conventions shared by every XML model.
//!
//! Each model field carries one [`Coding`] marker. The `xml_record!` macro
//! expands a single field table into the struct, its [`FieldSchema`] and both
//! codec directions, so a field is always read and written the same way.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike, Utc};

use super::tree::XmlNode;
use crate::error::{FeedError, Result};

// ============================================================================
// Schema Metadata
// ============================================================================

/// Wire representation of one model field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coding {
    /// An attribute on the element itself.
    Attribute(&'static str),
    /// The element's own text content.
    Text,
    /// One or more child elements with this name.
    Element(&'static str),
    /// A vocabulary record whose fields live directly on this element.
    Flatten(&'static [FieldSchema]),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSchema {
    pub field: &'static str,
    pub coding: Coding,
}

/// Whether `schema` (including flattened vocabularies) models a child element `name`.
pub fn models_element(schema: &[FieldSchema], name: &str) -> bool {
    schema.iter().any(|f| match f.coding {
        Coding::Element(element) => element == name,
        Coding::Flatten(inner) => models_element(inner, name),
        _ => false,
    })
}

/// Whether `schema` (including flattened vocabularies) models an attribute `name`.
pub fn models_attribute(schema: &[FieldSchema], name: &str) -> bool {
    schema.iter().any(|f| match f.coding {
        Coding::Attribute(attribute) => attribute == name,
        Coding::Flatten(inner) => models_attribute(inner, name),
        _ => false,
    })
}

// ============================================================================
// Date Conventions
// ============================================================================

/// The date syntax a dialect mandates for its date fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `Sat, 07 Sep 2002 09:42:31 GMT` (RSS 2.0 `pubDate`).
    Rfc2822,
    /// `2002-09-07T09:42:31Z` (Atom, RDF `dc:date`, W3CDTF).
    Rfc3339,
}

impl DateFormat {
    /// Parses with this convention first, then the other one, then the
    /// reduced W3CDTF forms (`2002-09-07`, `2002-09-07T09:42:31`) as UTC.
    pub fn parse(self, text: &str) -> Option<DateTime<FixedOffset>> {
        let text = text.trim();
        let (primary, fallback): (fn(&str) -> Option<_>, fn(&str) -> Option<_>) = match self {
            DateFormat::Rfc2822 => (parse_rfc2822, parse_rfc3339),
            DateFormat::Rfc3339 => (parse_rfc3339, parse_rfc2822),
        };
        primary(text)
            .or_else(|| fallback(text))
            .or_else(|| parse_w3cdtf(text))
    }

    /// Writes `value` in this convention. RFC 2822 has no fractional seconds,
    /// so such values are written as RFC 3339, which `parse` also accepts.
    ///
    /// # Errors
    ///
    /// [`FeedError::Encode`] for years outside 0000 to 9999, which neither
    /// syntax can carry.
    pub fn render(self, value: &DateTime<FixedOffset>) -> Result<String> {
        // Neither syntax writes offset seconds; keep the instant by going to UTC.
        let value = if value.offset().local_minus_utc() % 60 == 0 {
            *value
        } else {
            value.with_timezone(&Utc.fix())
        };
        if !(0..=9999).contains(&value.year()) {
            return Err(FeedError::Encode(format!(
                "date {:?} has a year outside 0000-9999",
                value
            )));
        }
        Ok(match self {
            DateFormat::Rfc2822 if value.nanosecond() == 0 => value.to_rfc2822(),
            DateFormat::Rfc2822 | DateFormat::Rfc3339 => value.to_rfc3339(),
        })
    }
}

fn parse_rfc2822(text: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(text).ok()
}

fn parse_rfc3339(text: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(text).ok()
}

fn parse_w3cdtf(text: &str) -> Option<DateTime<FixedOffset>> {
    let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;
    Some(Utc.from_utc_datetime(&naive).into())
}

// ============================================================================
// Contexts
// ============================================================================

/// State threaded through one decode call: the date convention and the path
/// of the element being decoded, used to locate conversion failures.
#[derive(Debug)]
pub struct DecodeContext {
    date_format: DateFormat,
    path: Vec<String>,
}

impl DecodeContext {
    pub fn new(date_format: DateFormat) -> Self {
        Self {
            date_format,
            path: Vec::new(),
        }
    }

    pub fn date_format(&self) -> DateFormat {
        self.date_format
    }

    pub fn enter(&mut self, segment: impl Into<String>) {
        self.path.push(segment.into());
    }

    pub fn leave(&mut self) {
        self.path.pop();
    }

    pub fn path(&self) -> String {
        self.path.join("/")
    }

    /// Builds the error for a present value that does not convert.
    pub fn mismatch(&self, segment: &str, expected: &str, raw: &str) -> FeedError {
        let path = if self.path.is_empty() {
            segment.to_string()
        } else {
            format!("{}/{}", self.path(), segment)
        };
        FeedError::FieldTypeMismatch {
            path,
            reason: format!("expected {}, found {:?}", expected, raw),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EncodeContext {
    date_format: DateFormat,
}

impl EncodeContext {
    pub fn new(date_format: DateFormat) -> Self {
        Self { date_format }
    }

    pub fn date_format(&self) -> DateFormat {
        self.date_format
    }
}

// ============================================================================
// Value Traits
// ============================================================================

/// A value carried as text: an attribute value or an element's content.
pub trait XmlScalar: Sized {
    /// Human-readable type name for mismatch errors.
    const EXPECTED: &'static str;

    fn parse_text(text: &str, ctx: &DecodeContext) -> Option<Self>;

    fn render_text(&self, ctx: &EncodeContext) -> Result<String>;
}

impl XmlScalar for String {
    const EXPECTED: &'static str = "text";

    fn parse_text(text: &str, _ctx: &DecodeContext) -> Option<Self> {
        Some(text.to_string())
    }

    fn render_text(&self, _ctx: &EncodeContext) -> Result<String> {
        Ok(self.clone())
    }
}

macro_rules! numeric_scalar {
    ($($ty:ty => $expected:literal),* $(,)?) => {
        $(
            impl XmlScalar for $ty {
                const EXPECTED: &'static str = $expected;

                fn parse_text(text: &str, _ctx: &DecodeContext) -> Option<Self> {
                    text.trim().parse().ok()
                }

                fn render_text(&self, _ctx: &EncodeContext) -> Result<String> {
                    Ok(self.to_string())
                }
            }
        )*
    };
}

numeric_scalar! {
    u8 => "an integer between 0 and 255",
    u16 => "an integer between 0 and 65535",
    u32 => "a non-negative integer",
    u64 => "a non-negative integer",
    i64 => "an integer",
}

/// Media RSS numbers (`average`, `price`, `framerate`) are plain decimals;
/// `NaN` and the infinities are rejected both ways.
impl XmlScalar for f64 {
    const EXPECTED: &'static str = "a finite number";

    fn parse_text(text: &str, _ctx: &DecodeContext) -> Option<Self> {
        text.trim().parse::<f64>().ok().filter(|value| value.is_finite())
    }

    fn render_text(&self, _ctx: &EncodeContext) -> Result<String> {
        if self.is_finite() {
            Ok(self.to_string())
        } else {
            Err(FeedError::Encode(format!("{} is not a finite number", self)))
        }
    }
}

impl XmlScalar for bool {
    const EXPECTED: &'static str = "a boolean";

    fn parse_text(text: &str, _ctx: &DecodeContext) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" => Some(true),
            "false" | "no" => Some(false),
            _ => None,
        }
    }

    fn render_text(&self, _ctx: &EncodeContext) -> Result<String> {
        Ok(self.to_string())
    }
}

impl XmlScalar for DateTime<FixedOffset> {
    const EXPECTED: &'static str = "a date";

    fn parse_text(text: &str, ctx: &DecodeContext) -> Option<Self> {
        ctx.date_format().parse(text)
    }

    fn render_text(&self, ctx: &EncodeContext) -> Result<String> {
        ctx.date_format().render(self)
    }
}

/// A structured element: the model side of the structural codec.
///
/// Implemented through `xml_record!` for plain records and by hand for
/// [`NamespacedElement`](super::NamespacedElement).
pub trait XmlRecord: Sized {
    const SCHEMA: &'static [FieldSchema];

    /// Reads every field from `node`. Absent fields become `None`.
    fn decode_fields(node: &XmlNode, ctx: &mut DecodeContext) -> Result<Self>;

    /// Writes every present field into `node`, in schema order. Fails only
    /// on values the wire format cannot carry.
    fn encode_into(&self, node: &mut XmlNode, ctx: &EncodeContext) -> Result<()>;

    /// True when encoding would write nothing: every field is `None`, an
    /// empty list, or an empty flattened vocabulary.
    fn is_empty(&self) -> bool;

    fn decode_record(node: &XmlNode, ctx: &mut DecodeContext) -> Result<Self> {
        report_unmodeled(node, Self::SCHEMA, ctx);
        Self::decode_fields(node, ctx)
    }

    fn encode_record(&self, name: &str, ctx: &EncodeContext) -> Result<XmlNode> {
        let mut node = XmlNode::new(name);
        self.encode_into(&mut node, ctx)?;
        Ok(node)
    }
}

fn report_unmodeled(node: &XmlNode, schema: &[FieldSchema], ctx: &DecodeContext) {
    if !tracing::enabled!(tracing::Level::TRACE) {
        return;
    }
    for child in &node.children {
        if !models_element(schema, &child.name) {
            tracing::trace!(path = %ctx.path(), element = %child.name, "Skipping unmodeled element");
        }
    }
    for (name, _) in &node.attributes {
        if !models_attribute(schema, name) {
            tracing::trace!(path = %ctx.path(), attribute = %name, "Skipping unmodeled attribute");
        }
    }
}

// ============================================================================
// Field Codecs
// ============================================================================
//
// One decode/encode pair per field shape. `xml_record!` picks the pair from
// the field's marker, so the two directions always agree.

pub fn decode_attribute<T: XmlScalar>(node: &XmlNode, name: &str, ctx: &DecodeContext) -> Result<Option<T>> {
    match node.attribute(name) {
        None => Ok(None),
        Some(raw) => T::parse_text(raw, ctx)
            .map(Some)
            .ok_or_else(|| ctx.mismatch(&format!("@{}", name), T::EXPECTED, raw)),
    }
}

pub fn encode_attribute<T: XmlScalar>(value: &Option<T>, name: &str, node: &mut XmlNode, ctx: &EncodeContext) -> Result<()> {
    if let Some(value) = value {
        node.push_attribute(name, value.render_text(ctx)?);
    }
    Ok(())
}

pub fn decode_text<T: XmlScalar>(node: &XmlNode, ctx: &DecodeContext) -> Result<Option<T>> {
    match node.text.as_deref() {
        None => Ok(None),
        Some(raw) => T::parse_text(raw, ctx)
            .map(Some)
            .ok_or_else(|| ctx.mismatch("text()", T::EXPECTED, raw)),
    }
}

pub fn encode_text<T: XmlScalar>(value: &Option<T>, node: &mut XmlNode, ctx: &EncodeContext) -> Result<()> {
    if let Some(value) = value {
        node.text = Some(value.render_text(ctx)?);
    }
    Ok(())
}

/// A scalar child element. An element that is present but empty reads as
/// the empty string, so it still converts (or fails) like any other value.
pub fn decode_element<T: XmlScalar>(node: &XmlNode, name: &str, ctx: &DecodeContext) -> Result<Option<T>> {
    match node.child(name) {
        None => Ok(None),
        Some(child) => parse_element_text(child, name, ctx).map(Some),
    }
}

pub fn encode_element<T: XmlScalar>(value: &Option<T>, name: &str, node: &mut XmlNode, ctx: &EncodeContext) -> Result<()> {
    if let Some(value) = value {
        node.children.push(scalar_node(name, value, ctx)?);
    }
    Ok(())
}

pub fn decode_elements<T: XmlScalar>(node: &XmlNode, name: &str, ctx: &DecodeContext) -> Result<Option<Vec<T>>> {
    let values = node
        .children_named(name)
        .enumerate()
        .map(|(index, child)| parse_element_text(child, &format!("{}[{}]", name, index), ctx))
        .collect::<Result<Vec<T>>>()?;
    Ok(non_empty(values))
}

pub fn encode_elements<T: XmlScalar>(values: &Option<Vec<T>>, name: &str, node: &mut XmlNode, ctx: &EncodeContext) -> Result<()> {
    for value in values.iter().flatten() {
        node.children.push(scalar_node(name, value, ctx)?);
    }
    Ok(())
}

pub fn decode_child<T: XmlRecord>(node: &XmlNode, name: &str, ctx: &mut DecodeContext) -> Result<Option<T>> {
    let Some(child) = node.child(name) else {
        return Ok(None);
    };
    ctx.enter(name);
    let value = T::decode_record(child, ctx)?;
    ctx.leave();
    Ok(Some(value))
}

pub fn encode_child<T: XmlRecord>(value: &Option<T>, name: &str, node: &mut XmlNode, ctx: &EncodeContext) -> Result<()> {
    if let Some(value) = value {
        node.children.push(value.encode_record(name, ctx)?);
    }
    Ok(())
}

pub fn decode_children<T: XmlRecord>(node: &XmlNode, name: &str, ctx: &mut DecodeContext) -> Result<Option<Vec<T>>> {
    let mut values = Vec::new();
    for (index, child) in node.children_named(name).enumerate() {
        ctx.enter(format!("{}[{}]", name, index));
        values.push(T::decode_record(child, ctx)?);
        ctx.leave();
    }
    Ok(non_empty(values))
}

pub fn encode_children<T: XmlRecord>(values: &Option<Vec<T>>, name: &str, node: &mut XmlNode, ctx: &EncodeContext) -> Result<()> {
    for value in values.iter().flatten() {
        node.children.push(value.encode_record(name, ctx)?);
    }
    Ok(())
}

/// A vocabulary inlined into the current element. Present when at least one
/// of its fields occurred.
pub fn decode_flatten<T: XmlRecord>(node: &XmlNode, ctx: &mut DecodeContext) -> Result<Option<T>> {
    let value = T::decode_fields(node, ctx)?;
    Ok((!value.is_empty()).then_some(value))
}

pub fn encode_flatten<T: XmlRecord>(value: &Option<T>, node: &mut XmlNode, ctx: &EncodeContext) -> Result<()> {
    match value {
        Some(value) => value.encode_into(node, ctx),
        None => Ok(()),
    }
}

/// Whether an optional record would write anything.
pub fn is_present<T: XmlRecord>(value: &Option<T>) -> bool {
    value.as_ref().is_some_and(|value| !value.is_empty())
}

fn parse_element_text<T: XmlScalar>(child: &XmlNode, segment: &str, ctx: &DecodeContext) -> Result<T> {
    let raw = child.text.as_deref().unwrap_or("");
    T::parse_text(raw, ctx).ok_or_else(|| ctx.mismatch(segment, T::EXPECTED, raw))
}

fn scalar_node<T: XmlScalar>(name: &str, value: &T, ctx: &EncodeContext) -> Result<XmlNode> {
    let mut child = XmlNode::new(name);
    child.text = Some(value.render_text(ctx)?);
    Ok(child)
}

fn non_empty<T>(values: Vec<T>) -> Option<Vec<T>> {
    (!values.is_empty()).then_some(values)
}
