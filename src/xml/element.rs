use super::coding::{decode_flatten, encode_flatten, is_present, Coding, DecodeContext, EncodeContext, FieldSchema, XmlRecord};
use super::tree::XmlNode;
use crate::error::Result;

/// A small extension element: typed attributes, optional text, and nested
/// elements of the same name.
///
/// Most namespace vocabularies are built from this one shape, parameterised
/// by an attribute record `A` (a record whose fields are all `attr(..)`):
///
/// ```ignore
/// <itunes:category text="Technology">
///   <itunes:category text="Podcasting"/>
/// </itunes:category>
/// ```
///
/// decodes as `attributes = Some({ text: "Technology" })`, `text = None` and
/// one child. All three fields absent is a valid, empty element, written
/// `<x/>`; `text = Some("")` is written `<x></x>` and reads back the same.
#[derive(Debug, Clone, PartialEq)]
pub struct NamespacedElement<A> {
    pub attributes: Option<A>,
    pub text: Option<String>,
    pub children: Option<Vec<NamespacedElement<A>>>,
}

// Manual impl: an empty element exists for every attribute record, whether
// or not `A` itself has a default.
impl<A> Default for NamespacedElement<A> {
    fn default() -> Self {
        Self {
            attributes: None,
            text: None,
            children: None,
        }
    }
}

impl<A> NamespacedElement<A> {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn with_attributes(attributes: A) -> Self {
        Self {
            attributes: Some(attributes),
            ..Self::default()
        }
    }
}

impl<A: XmlRecord> XmlRecord for NamespacedElement<A> {
    const SCHEMA: &'static [FieldSchema] = &[
        FieldSchema {
            field: "attributes",
            coding: Coding::Flatten(A::SCHEMA),
        },
        FieldSchema {
            field: "text",
            coding: Coding::Text,
        },
    ];

    fn decode_fields(node: &XmlNode, ctx: &mut DecodeContext) -> Result<Self> {
        let attributes = decode_flatten::<A>(node, ctx)?;
        let text = node.text.clone();

        let mut children = Vec::new();
        for (index, child) in node.children_named(&node.name).enumerate() {
            ctx.enter(format!("{}[{}]", node.name, index));
            children.push(Self::decode_fields(child, ctx)?);
            ctx.leave();
        }

        Ok(Self {
            attributes,
            text,
            children: (!children.is_empty()).then_some(children),
        })
    }

    fn encode_into(&self, node: &mut XmlNode, ctx: &EncodeContext) -> Result<()> {
        encode_flatten(&self.attributes, node, ctx)?;
        if let Some(text) = &self.text {
            node.text = Some(text.clone());
        }
        let name = node.name.clone();
        for child in self.children.iter().flatten() {
            node.children.push(child.encode_record(&name, ctx)?);
        }
        Ok(())
    }

    fn is_empty(&self) -> bool {
        !is_present(&self.attributes)
            && self.text.is_none()
            && self.children.as_ref().map_or(true, Vec::is_empty)
    }

    // Other-named children are the parent vocabulary's business, not ours.
    fn decode_record(node: &XmlNode, ctx: &mut DecodeContext) -> Result<Self> {
        Self::decode_fields(node, ctx)
    }
}

/// Attribute record for elements that carry no modeled attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoAttributes;

impl XmlRecord for NoAttributes {
    const SCHEMA: &'static [FieldSchema] = &[];

    fn decode_fields(_node: &XmlNode, _ctx: &mut DecodeContext) -> Result<Self> {
        Ok(NoAttributes)
    }

    fn encode_into(&self, _node: &mut XmlNode, _ctx: &EncodeContext) -> Result<()> {
        Ok(())
    }

    fn is_empty(&self) -> bool {
        true
    }
}
