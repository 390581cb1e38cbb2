//! Typed element model of a notification payload
//!
//! Every element kind is a plain value type owning its children. The shared
//! parsing hooks live on [`ElementVariant`]; the template parser decides which
//! variant a tag maps to and in which nesting context it is parsed.

mod binding;
mod group;
mod image;
mod text;
mod tile;

pub use binding::{Binding, BindingChild};
pub use group::{Group, Subgroup, SubgroupChild};
pub use image::ImageField;
pub use text::TextField;
pub use tile::{Tile, Visual};

use crate::attributes::AttributesHelper;
use crate::coercion::{self, AttributeValue, Origin};
use crate::context::ParseContext;
use crate::diagnostics::ParseResult;
use crate::object_model::ObjectNode;
use crate::types::{AttributeEnum, ElementKind, EnumKind};
use crate::xml::XmlElement;
use regex::Regex;
use std::sync::OnceLock;

/// Per-element parsing state: where diagnostics go and what the host allows.
pub struct ElementCx<'a> {
    pub result: &'a mut ParseResult,
    pub context: &'a ParseContext,
    pub origin: Origin<'a>,
}

impl<'a> ElementCx<'a> {
    pub fn new(result: &'a mut ParseResult, context: &'a ParseContext, node: &'a XmlElement) -> Self {
        Self {
            result,
            context,
            origin: Origin::new(&node.name, node.line),
        }
    }

    pub fn parse<T: AttributeValue>(&mut self, attributes: &mut AttributesHelper, name: &str) -> Option<T> {
        coercion::try_parse(self.result, attributes, self.origin, name)
    }

    pub fn parse_enum<E: AttributeEnum>(
        &mut self,
        attributes: &mut AttributesHelper,
        name: &str,
        supported: &[E],
    ) -> Option<E> {
        coercion::try_parse_enum(self.result, attributes, self.origin, name, supported)
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.result
            .add_warning(self.origin.element, Some(self.origin.line), message);
    }

    pub fn warn_attribute(&mut self, attribute: &str, message: impl Into<String>) {
        self.result
            .add_attribute_warning(self.origin.element, attribute, Some(self.origin.line), message);
    }
}

/// Hooks shared by all element kinds.
pub trait ElementVariant {
    const KIND: ElementKind;

    /// Consume the attributes this element understands in the given context.
    fn parse_known_attributes(
        &mut self,
        attributes: &mut AttributesHelper,
        cx: &mut ElementCx<'_>,
        is_binding_root_level: bool,
    );

    /// Project into the object model.
    fn convert_to_object(&self) -> ObjectNode;

    /// Narrower set of enum values for `kind`, by payload spelling. `None`
    /// accepts every member.
    fn restricted_enum_values(&self, _kind: EnumKind, _context: &ParseContext) -> Option<Vec<&'static str>> {
        None
    }

    /// Whether `name` is understood by this element at the other nesting level.
    fn is_nesting_restricted(&self, _name: &str) -> bool {
        false
    }

    /// Values of `E` accepted on this element. Host capabilities take
    /// precedence over the element's own restriction.
    fn supported_enum_values<E: AttributeEnum>(&self, context: &ParseContext) -> Vec<E> {
        if let Some(names) = context.capabilities.supported_names(Self::KIND, E::KIND) {
            return members_named(names.iter().map(String::as_str));
        }
        match self.restricted_enum_values(E::KIND, context) {
            Some(names) => members_named(names.into_iter()),
            None => E::VARIANTS.to_vec(),
        }
    }

    fn try_parse_enum<E: AttributeEnum>(
        &self,
        attributes: &mut AttributesHelper,
        cx: &mut ElementCx<'_>,
        name: &str,
    ) -> Option<E> {
        let supported = self.supported_enum_values::<E>(cx.context);
        cx.parse_enum(attributes, name, &supported)
    }

    /// Report every attribute nobody consumed. Unknown attributes are
    /// warnings so newer payloads keep rendering.
    fn handle_remaining_attributes(
        &self,
        attributes: &AttributesHelper,
        cx: &mut ElementCx<'_>,
        is_binding_root_level: bool,
    ) {
        let element = cx.origin.element;
        for (name, _) in attributes.remaining() {
            let message = if !self.is_nesting_restricted(name) {
                format!("Unknown attribute '{}' on <{}>.", name, element)
            } else if is_binding_root_level {
                format!(
                    "Attribute '{}' on <{}> is not supported at binding root level.",
                    name, element
                )
            } else {
                format!(
                    "Attribute '{}' on <{}> is only supported at binding root level.",
                    name, element
                )
            };
            cx.warn_attribute(name, message);
        }
    }
}

fn members_named<'n, E: AttributeEnum>(names: impl Iterator<Item = &'n str>) -> Vec<E> {
    let names: Vec<&str> = names.collect();
    E::VARIANTS
        .iter()
        .copied()
        .filter(|v| names.iter().any(|n| n.eq_ignore_ascii_case(v.as_str())))
        .collect()
}

/// Parse and report the attributes of `node` into `variant`.
pub(crate) fn parse_attributes<V: ElementVariant>(
    variant: &mut V,
    node: &XmlElement,
    result: &mut ParseResult,
    context: &ParseContext,
    is_binding_root_level: bool,
) {
    let mut attributes = AttributesHelper::from_element(node);
    let mut cx = ElementCx::new(result, context, node);
    variant.parse_known_attributes(&mut attributes, &mut cx, is_binding_root_level);
    variant.handle_remaining_attributes(&attributes, &mut cx, is_binding_root_level);
}

/// Name of a `{placeholder}` value, if the whole value is one.
pub fn placeholder_name(value: &str) -> Option<&str> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(r"^\s*\{([A-Za-z_][A-Za-z0-9_.\-]*)\}\s*$").expect("placeholder pattern is valid")
    });
    pattern
        .captures(value)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}
