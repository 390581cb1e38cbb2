use super::{placeholder_name, ElementCx, ElementVariant};
use crate::attributes::AttributesHelper;
use crate::context::ParseContext;
use crate::object_model::{ObjectNode, PropertyValue};
use crate::types::{
    AttributeEnum, ElementKind, EnumKind, HintAlign, HintStyle, NotificationType, TextPlacement,
};

const ATTR_ID: &str = "id";
const ATTR_LANG: &str = "lang";
const ATTR_PLACEMENT: &str = "placement";
const ATTR_HINT_STYLE: &str = "hint-style";
const ATTR_HINT_WRAP: &str = "hint-wrap";
const ATTR_HINT_MAX_LINES: &str = "hint-maxLines";
const ATTR_HINT_MIN_LINES: &str = "hint-minLines";
const ATTR_HINT_ALIGN: &str = "hint-align";

const NESTED_ONLY: &[&str] = &[
    ATTR_HINT_STYLE,
    ATTR_HINT_WRAP,
    ATTR_HINT_MAX_LINES,
    ATTR_HINT_MIN_LINES,
    ATTR_HINT_ALIGN,
];

/// Highest value `hint-minLines` can hold
pub const MAX_MIN_LINES: i32 = 10;

/// A `<text>` element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextField {
    pub id: Option<String>,
    /// Literal character data of the element
    pub text: String,
    /// Placeholder the renderer substitutes for `text`
    pub binding_text: Option<String>,
    pub language: Option<String>,
    pub placement: TextPlacement,
    pub hint_style: HintStyle,
    pub hint_wrap: Option<bool>,
    pub hint_align: HintAlign,
    hint_max_lines: Option<i32>,
    hint_min_lines: Option<i32>,
}

impl TextField {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Store the element's character data, recognising `{placeholder}` content.
    pub fn set_content(&mut self, content: &str) {
        self.binding_text = placeholder_name(content).map(str::to_string);
        self.text = content.to_string();
    }

    pub fn hint_max_lines(&self) -> Option<i32> {
        self.hint_max_lines
    }

    /// Values below 1 are raised to 1.
    pub fn set_hint_max_lines(&mut self, value: Option<i32>) {
        self.hint_max_lines = value.map(|v| v.max(1));
    }

    pub fn hint_min_lines(&self) -> Option<i32> {
        self.hint_min_lines
    }

    /// Clamped to `1..=MAX_MIN_LINES`.
    pub fn set_hint_min_lines(&mut self, value: Option<i32>) {
        self.hint_min_lines = value.map(|v| v.clamp(1, MAX_MIN_LINES));
    }
}

impl ElementVariant for TextField {
    const KIND: ElementKind = ElementKind::Text;

    fn parse_known_attributes(
        &mut self,
        attributes: &mut AttributesHelper,
        cx: &mut ElementCx<'_>,
        is_binding_root_level: bool,
    ) {
        // Hints only apply inside groups
        if !is_binding_root_level {
            if let Some(max_lines) = cx.parse::<i32>(attributes, ATTR_HINT_MAX_LINES) {
                self.set_hint_max_lines(Some(max_lines));
            }

            if let Some(align) = self.try_parse_enum(attributes, cx, ATTR_HINT_ALIGN) {
                self.hint_align = align;
            }

            if let Some(min_lines) = cx.parse::<i32>(attributes, ATTR_HINT_MIN_LINES) {
                self.set_hint_min_lines(Some(min_lines));
            }

            if let Some(style) = self.try_parse_enum(attributes, cx, ATTR_HINT_STYLE) {
                self.hint_style = style;
            }

            if let Some(wrap) = cx.parse::<bool>(attributes, ATTR_HINT_WRAP) {
                self.hint_wrap = Some(wrap);
            }
        }

        if cx.context.notification_type == NotificationType::Tile {
            self.id = attributes.pop_value(ATTR_ID);
        }

        self.language = attributes.pop_value(ATTR_LANG);

        if let Some(placement) = self.try_parse_enum(attributes, cx, ATTR_PLACEMENT) {
            self.placement = placement;
        }
    }

    fn restricted_enum_values(&self, kind: EnumKind, _context: &ParseContext) -> Option<Vec<&'static str>> {
        // Attribution only renders where the host says it is available
        match kind {
            EnumKind::TextPlacement => Some(vec![TextPlacement::Inline.as_str()]),
            _ => None,
        }
    }

    fn is_nesting_restricted(&self, name: &str) -> bool {
        NESTED_ONLY.contains(&name)
    }

    fn convert_to_object(&self) -> ObjectNode {
        let text = PropertyValue::bindable(Some(&self.text), self.binding_text.as_deref());

        match self.placement {
            TextPlacement::Attribution => ObjectNode::from_properties(
                "ToastGenericAttributionText",
                [
                    ("Text", text),
                    ("Language", PropertyValue::optional_str(self.language.as_ref())),
                ],
            ),
            TextPlacement::Inline => ObjectNode::from_properties(
                "AdaptiveText",
                [
                    ("Text", text),
                    ("Language", PropertyValue::optional_str(self.language.as_ref())),
                    ("HintStyle", PropertyValue::unless_default(self.hint_style)),
                    ("HintWrap", PropertyValue::optional(self.hint_wrap)),
                    ("HintMaxLines", PropertyValue::optional(self.hint_max_lines)),
                    ("HintMinLines", PropertyValue::optional(self.hint_min_lines)),
                    ("HintAlign", PropertyValue::unless_default(self.hint_align)),
                ],
            ),
        }
    }
}
