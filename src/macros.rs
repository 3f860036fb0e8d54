//! `xml_record!`: one field table per model, expanded into the struct, its
//! schema and both codec directions.
//!
//! ```ignore
//! xml_record! {
//!     pub struct RssImage {
//!         url: String => element("url"),
//!         width: u32 => element("width"),
//!     }
//! }
//! ```
//!
//! Field markers:
//!
//! | marker            | field type        | wire form                         |
//! |-------------------|-------------------|-----------------------------------|
//! | `attr("x")`       | `Option<T>`       | attribute `x` on this element     |
//! | `text`            | `Option<T>`       | this element's text               |
//! | `element("x")`    | `Option<T>`       | first child `<x>`, scalar content |
//! | `elements("x")`   | `Option<Vec<T>>`  | every child `<x>`, scalar content |
//! | `child("x")`      | `Option<R>`       | first child `<x>`, a record       |
//! | `children("x")`   | `Option<Vec<R>>`  | every child `<x>`, records        |
//! | `flatten`         | `Option<R>`       | `R`'s fields live on this element |

macro_rules! xml_record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $ty:ty => $kind:ident $( ( $tag:literal ) )?
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field: xml_field_type!($kind, $ty),
            )+
        }

        impl $crate::xml::XmlRecord for $name {
            const SCHEMA: &'static [$crate::xml::FieldSchema] = &[
                $(
                    $crate::xml::FieldSchema {
                        field: stringify!($field),
                        coding: xml_field_coding!($kind $( ($tag) )?, $ty),
                    },
                )+
            ];

            fn decode_fields(
                node: &$crate::xml::XmlNode,
                ctx: &mut $crate::xml::DecodeContext,
            ) -> $crate::error::Result<Self> {
                Ok(Self {
                    $( $field: xml_field_decode!($kind $( ($tag) )?, $ty, node, ctx), )+
                })
            }

            fn encode_into(
                &self,
                node: &mut $crate::xml::XmlNode,
                ctx: &$crate::xml::EncodeContext,
            ) -> $crate::error::Result<()> {
                $( xml_field_encode!($kind $( ($tag) )?, &self.$field, node, ctx)?; )+
                Ok(())
            }

            fn is_empty(&self) -> bool {
                $( xml_field_absent!($kind, &self.$field) )&&+
            }
        }
    };
}

macro_rules! xml_field_type {
    (elements, $ty:ty) => { Option<Vec<$ty>> };
    (children, $ty:ty) => { Option<Vec<$ty>> };
    ($kind:ident, $ty:ty) => { Option<$ty> };
}

macro_rules! xml_field_coding {
    (attr($tag:literal), $ty:ty) => {
        $crate::xml::Coding::Attribute($tag)
    };
    (text, $ty:ty) => {
        $crate::xml::Coding::Text
    };
    (element($tag:literal), $ty:ty) => {
        $crate::xml::Coding::Element($tag)
    };
    (elements($tag:literal), $ty:ty) => {
        $crate::xml::Coding::Element($tag)
    };
    (child($tag:literal), $ty:ty) => {
        $crate::xml::Coding::Element($tag)
    };
    (children($tag:literal), $ty:ty) => {
        $crate::xml::Coding::Element($tag)
    };
    (flatten, $ty:ty) => {
        $crate::xml::Coding::Flatten(<$ty as $crate::xml::XmlRecord>::SCHEMA)
    };
}

/// Whether a field writes nothing. Empty lists and empty flattened
/// vocabularies count as absent; an empty `child` still writes `<x/>`.
macro_rules! xml_field_absent {
    (elements, $value:expr) => {
        $value.as_ref().map_or(true, |values| values.is_empty())
    };
    (children, $value:expr) => {
        $value.as_ref().map_or(true, |values| values.is_empty())
    };
    (flatten, $value:expr) => {
        !$crate::xml::coding::is_present($value)
    };
    ($kind:ident, $value:expr) => {
        $value.is_none()
    };
}

macro_rules! xml_field_decode {
    (attr($tag:literal), $ty:ty, $node:ident, $ctx:ident) => {
        $crate::xml::coding::decode_attribute::<$ty>($node, $tag, $ctx)?
    };
    (text, $ty:ty, $node:ident, $ctx:ident) => {
        $crate::xml::coding::decode_text::<$ty>($node, $ctx)?
    };
    (element($tag:literal), $ty:ty, $node:ident, $ctx:ident) => {
        $crate::xml::coding::decode_element::<$ty>($node, $tag, $ctx)?
    };
    (elements($tag:literal), $ty:ty, $node:ident, $ctx:ident) => {
        $crate::xml::coding::decode_elements::<$ty>($node, $tag, $ctx)?
    };
    (child($tag:literal), $ty:ty, $node:ident, $ctx:ident) => {
        $crate::xml::coding::decode_child::<$ty>($node, $tag, $ctx)?
    };
    (children($tag:literal), $ty:ty, $node:ident, $ctx:ident) => {
        $crate::xml::coding::decode_children::<$ty>($node, $tag, $ctx)?
    };
    (flatten, $ty:ty, $node:ident, $ctx:ident) => {
        $crate::xml::coding::decode_flatten::<$ty>($node, $ctx)?
    };
}

macro_rules! xml_field_encode {
    (attr($tag:literal), $value:expr, $node:ident, $ctx:ident) => {
        $crate::xml::coding::encode_attribute($value, $tag, $node, $ctx)
    };
    (text, $value:expr, $node:ident, $ctx:ident) => {
        $crate::xml::coding::encode_text($value, $node, $ctx)
    };
    (element($tag:literal), $value:expr, $node:ident, $ctx:ident) => {
        $crate::xml::coding::encode_element($value, $tag, $node, $ctx)
    };
    (elements($tag:literal), $value:expr, $node:ident, $ctx:ident) => {
        $crate::xml::coding::encode_elements($value, $tag, $node, $ctx)
    };
    (child($tag:literal), $value:expr, $node:ident, $ctx:ident) => {
        $crate::xml::coding::encode_child($value, $tag, $node, $ctx)
    };
    (children($tag:literal), $value:expr, $node:ident, $ctx:ident) => {
        $crate::xml::coding::encode_children($value, $tag, $node, $ctx)
    };
    (flatten, $value:expr, $node:ident, $ctx:ident) => {
        $crate::xml::coding::encode_flatten($value, $node, $ctx)
    };
}
