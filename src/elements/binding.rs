use super::{ElementCx, ElementVariant, Group, ImageField, TextField};
use crate::attributes::AttributesHelper;
use crate::context::ParseContext;
use crate::object_model::{ObjectNode, PropertyValue};
use crate::types::{AttributeEnum, Branding, ElementKind, EnumKind, Template, TextStacking};

const ATTR_TEMPLATE: &str = "template";
const ATTR_DISPLAY_NAME: &str = "displayName";
const ATTR_BRANDING: &str = "branding";
const ATTR_LANG: &str = "lang";
const ATTR_BASE_URI: &str = "baseUri";
const ATTR_ADD_IMAGE_QUERY: &str = "addImageQuery";
const ATTR_CONTENT_ID: &str = "contentId";
const ATTR_FALLBACK: &str = "fallback";
const ATTR_HINT_TEXT_STACKING: &str = "hint-textStacking";
const ATTR_HINT_OVERLAY: &str = "hint-overlay";

/// Content allowed directly inside a binding
#[derive(Debug, Clone, PartialEq)]
pub enum BindingChild {
    Text(TextField),
    Image(ImageField),
    Group(Group),
}

impl BindingChild {
    pub fn convert_to_object(&self) -> ObjectNode {
        match self {
            BindingChild::Text(text) => text.convert_to_object(),
            BindingChild::Image(image) => image.convert_to_object(),
            BindingChild::Group(group) => group.convert_to_object(),
        }
    }
}

/// A `<binding>`: the content shown for one template.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Binding {
    /// Always set on bindings that made it into a parsed [`Visual`](super::Visual)
    pub template: Option<Template>,
    pub display_name: Option<String>,
    pub branding: Option<Branding>,
    pub language: Option<String>,
    pub base_uri: Option<String>,
    pub add_image_query: Option<bool>,
    pub content_id: Option<String>,
    pub fallback: Option<String>,
    pub hint_text_stacking: TextStacking,
    /// Background image overlay opacity, 0 to 100
    pub hint_overlay: Option<f64>,
    pub children: Vec<BindingChild>,
}

impl Binding {
    pub fn new(template: Template) -> Self {
        Self {
            template: Some(template),
            ..Self::default()
        }
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextField> {
        self.children.iter().filter_map(|child| match child {
            BindingChild::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn images(&self) -> impl Iterator<Item = &ImageField> {
        self.children.iter().filter_map(|child| match child {
            BindingChild::Image(image) => Some(image),
            _ => None,
        })
    }
}

impl ElementVariant for Binding {
    const KIND: ElementKind = ElementKind::Binding;

    fn parse_known_attributes(
        &mut self,
        attributes: &mut AttributesHelper,
        cx: &mut ElementCx<'_>,
        _is_binding_root_level: bool,
    ) {
        if attributes.contains(ATTR_TEMPLATE) {
            self.template = self.try_parse_enum(attributes, cx, ATTR_TEMPLATE);
        } else {
            cx.warn("<binding> is missing the required 'template' attribute.");
        }

        self.display_name = attributes.pop_value(ATTR_DISPLAY_NAME);

        self.branding = self.try_parse_enum(attributes, cx, ATTR_BRANDING);

        self.language = attributes.pop_value(ATTR_LANG);
        self.base_uri = attributes.pop_value(ATTR_BASE_URI);
        self.add_image_query = cx.parse::<bool>(attributes, ATTR_ADD_IMAGE_QUERY);
        self.content_id = attributes.pop_value(ATTR_CONTENT_ID);
        self.fallback = attributes.pop_value(ATTR_FALLBACK);

        if let Some(stacking) = self.try_parse_enum(attributes, cx, ATTR_HINT_TEXT_STACKING) {
            self.hint_text_stacking = stacking;
        }

        self.hint_overlay = cx
            .parse::<f64>(attributes, ATTR_HINT_OVERLAY)
            .map(|overlay| overlay.clamp(0.0, 100.0));
    }

    fn restricted_enum_values(&self, kind: EnumKind, context: &ParseContext) -> Option<Vec<&'static str>> {
        match kind {
            EnumKind::Template => Some(
                context
                    .notification_type
                    .supported_templates()
                    .iter()
                    .map(|t| t.as_str())
                    .collect(),
            ),
            _ => None,
        }
    }

    fn convert_to_object(&self) -> ObjectNode {
        let mut node = ObjectNode::from_properties(
            "TileBinding",
            [
                ("Template", PropertyValue::enumeration(self.template)),
                ("DisplayName", PropertyValue::optional_str(self.display_name.as_ref())),
                ("Branding", PropertyValue::enumeration(self.branding)),
                ("Language", PropertyValue::optional_str(self.language.as_ref())),
                ("BaseUri", PropertyValue::optional_str(self.base_uri.as_ref())),
                ("AddImageQuery", PropertyValue::optional(self.add_image_query)),
                ("ContentId", PropertyValue::optional_str(self.content_id.as_ref())),
                ("Fallback", PropertyValue::optional_str(self.fallback.as_ref())),
                ("HintTextStacking", PropertyValue::unless_default(self.hint_text_stacking)),
                ("HintOverlay", PropertyValue::optional(self.hint_overlay)),
            ],
        );
        for child in &self.children {
            node.push_child(child.convert_to_object());
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ParseResult;
    use crate::elements::parse_attributes;
    use crate::object_model::{Scalar, Value};
    use crate::xml::parse_document;

    fn parse_binding(xml: &str, context: &ParseContext) -> (Binding, ParseResult) {
        let node = parse_document(xml).unwrap();
        let mut result = ParseResult::new();
        let mut binding = Binding::default();
        parse_attributes(&mut binding, &node, &mut result, context, false);
        (binding, result)
    }

    #[test]
    fn test_binding_attributes() {
        let (binding, result) = parse_binding(
            r#"<binding template="TileWide" displayName="Mail" branding="nameAndLogo" hint-overlay="20" hint-textStacking="bottom" contentId="42"/>"#,
            &ParseContext::tile(),
        );
        assert!(result.issues().is_empty(), "{:?}", result.issues());
        assert_eq!(binding.template, Some(Template::TileWide));
        assert_eq!(binding.display_name.as_deref(), Some("Mail"));
        assert_eq!(binding.branding, Some(Branding::NameAndLogo));
        assert_eq!(binding.hint_overlay, Some(20.0));
        assert_eq!(binding.hint_text_stacking, TextStacking::Bottom);
        assert_eq!(binding.content_id.as_deref(), Some("42"));
    }

    #[test]
    fn test_overlay_is_clamped() {
        let (binding, result) = parse_binding(
            r#"<binding template="TileMedium" hint-overlay="250"/>"#,
            &ParseContext::tile(),
        );
        assert_eq!(binding.hint_overlay, Some(100.0));
        assert!(result.issues().is_empty());
    }

    #[test]
    fn test_missing_template() {
        let (binding, result) = parse_binding("<binding/>", &ParseContext::tile());
        assert_eq!(binding.template, None);
        assert_eq!(result.warning_count(), 1);
        assert!(!result.has_errors());
    }

    #[test]
    fn test_template_outside_context() {
        let (binding, result) =
            parse_binding(r#"<binding template="ToastGeneric"/>"#, &ParseContext::tile());
        assert_eq!(binding.template, None);
        assert_eq!(result.warning_count(), 1);
        assert!(result.issues()[0].message.contains("not supported"));

        let (binding, result) =
            parse_binding(r#"<binding template="ToastGeneric"/>"#, &ParseContext::toast());
        assert_eq!(binding.template, Some(Template::ToastGeneric));
        assert!(result.issues().is_empty());
    }

    #[test]
    fn test_projection() {
        let mut binding = Binding::new(Template::TileMedium);
        binding.branding = Some(Branding::Logo);
        binding.children.push(BindingChild::Text(TextField::new("Hi")));

        let object = binding.convert_to_object();
        assert_eq!(object.name, "TileBinding");
        assert_eq!(
            object.property("Template"),
            Some(&Value::Scalar(Scalar::Enum("TileMedium")))
        );
        assert_eq!(object.property("Branding"), Some(&Value::Scalar(Scalar::Enum("Logo"))));
        assert_eq!(object.children().len(), 1);
        assert_eq!(binding.texts().count(), 1);
        assert_eq!(binding.images().count(), 0);
        assert!(object.property("Fallback").is_none());
    }

    #[test]
    fn test_fallback_is_projected() {
        let (binding, result) = parse_binding(
            r#"<binding template="TileSmall" fallback="TileSquareText01"/>"#,
            &ParseContext::tile(),
        );
        assert!(result.issues().is_empty());
        assert_eq!(binding.fallback.as_deref(), Some("TileSquareText01"));

        let object = binding.convert_to_object();
        assert_eq!(
            object.property("Fallback").and_then(Value::as_str),
            Some("TileSquareText01")
        );
    }
}
