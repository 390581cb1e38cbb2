//! Typed attribute coercion that reports instead of failing
//!
//! Every helper pops the attribute it looks at. A missing attribute is not an
//! issue (attributes are optional unless the caller says otherwise); a value
//! that does not parse, or an enum value the element does not support, adds
//! a warning and yields `None` so the field keeps its default.

use crate::attributes::AttributesHelper;
use crate::diagnostics::ParseResult;
use crate::types::AttributeEnum;

/// Element an attribute belongs to, used to locate diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Origin<'a> {
    pub element: &'a str,
    pub line: usize,
}

impl<'a> Origin<'a> {
    pub fn new(element: &'a str, line: usize) -> Self {
        Self { element, line }
    }
}

/// Scalar types an attribute can be coerced into.
pub trait AttributeValue: Sized {
    const TYPE_NAME: &'static str;

    fn parse_attribute(value: &str) -> Option<Self>;
}

impl AttributeValue for i32 {
    const TYPE_NAME: &'static str = "integer";

    fn parse_attribute(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }
}

impl AttributeValue for f64 {
    const TYPE_NAME: &'static str = "number";

    fn parse_attribute(value: &str) -> Option<Self> {
        value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

impl AttributeValue for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn parse_attribute(value: &str) -> Option<Self> {
        match value.trim() {
            "1" => Some(true),
            "0" => Some(false),
            v if v.eq_ignore_ascii_case("true") => Some(true),
            v if v.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }
}

/// Pop `name` and coerce it to `T`.
pub fn try_parse<T: AttributeValue>(
    result: &mut ParseResult,
    attributes: &mut AttributesHelper,
    origin: Origin<'_>,
    name: &str,
) -> Option<T> {
    let raw = attributes.pop_value(name)?;
    match T::parse_attribute(&raw) {
        Some(value) => Some(value),
        None => {
            result.add_attribute_warning(
                origin.element,
                name,
                Some(origin.line),
                format!(
                    "Could not parse '{}' as {} for attribute '{}' on <{}>.",
                    raw,
                    T::TYPE_NAME,
                    name,
                    origin.element
                ),
            );
            None
        }
    }
}

/// Pop `name` and coerce it to `E`, accepting only `supported` members.
pub fn try_parse_enum<E: AttributeEnum>(
    result: &mut ParseResult,
    attributes: &mut AttributesHelper,
    origin: Origin<'_>,
    name: &str,
    supported: &[E],
) -> Option<E> {
    let raw = attributes.pop_value(name)?;

    let Some(value) = E::from_attribute(&raw) else {
        result.add_attribute_warning(
            origin.element,
            name,
            Some(origin.line),
            format!(
                "'{}' is not a valid value for attribute '{}' on <{}>. Valid values: {}.",
                raw,
                name,
                origin.element,
                join(E::VARIANTS)
            ),
        );
        return None;
    };

    if !supported.contains(&value) {
        result.add_attribute_warning(
            origin.element,
            name,
            Some(origin.line),
            format!(
                "'{}' is not supported for attribute '{}' on <{}>. Supported values: {}.",
                value.as_str(),
                name,
                origin.element,
                join(supported)
            ),
        );
        return None;
    }

    Some(value)
}

fn join<E: AttributeEnum>(values: &[E]) -> String {
    values.iter().map(|v| v.as_str()).collect::<Vec<_>>().join(", ")
}
