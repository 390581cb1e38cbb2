use super::{Binding, ElementCx, ElementVariant};
use crate::attributes::AttributesHelper;
use crate::object_model::{ObjectNode, PropertyValue};
use crate::types::{Branding, ElementKind};

const ATTR_DISPLAY_NAME: &str = "displayName";
const ATTR_BRANDING: &str = "branding";
const ATTR_LANG: &str = "lang";
const ATTR_BASE_URI: &str = "baseUri";
const ATTR_ADD_IMAGE_QUERY: &str = "addImageQuery";
const ATTR_CONTENT_ID: &str = "contentId";
const ATTR_VERSION: &str = "version";

/// The `<visual>` element: defaults shared by all bindings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Visual {
    pub display_name: Option<String>,
    pub branding: Option<Branding>,
    pub language: Option<String>,
    pub base_uri: Option<String>,
    pub add_image_query: Option<bool>,
    pub content_id: Option<String>,
    pub version: Option<i32>,
    /// Bindings in document order
    pub bindings: Vec<Binding>,
}

impl ElementVariant for Visual {
    const KIND: ElementKind = ElementKind::Visual;

    fn parse_known_attributes(
        &mut self,
        attributes: &mut AttributesHelper,
        cx: &mut ElementCx<'_>,
        _is_binding_root_level: bool,
    ) {
        self.display_name = attributes.pop_value(ATTR_DISPLAY_NAME);
        self.branding = self.try_parse_enum(attributes, cx, ATTR_BRANDING);
        self.language = attributes.pop_value(ATTR_LANG);
        self.base_uri = attributes.pop_value(ATTR_BASE_URI);
        self.add_image_query = cx.parse::<bool>(attributes, ATTR_ADD_IMAGE_QUERY);
        self.content_id = attributes.pop_value(ATTR_CONTENT_ID);
        self.version = cx.parse::<i32>(attributes, ATTR_VERSION);
    }

    fn convert_to_object(&self) -> ObjectNode {
        let mut node = ObjectNode::from_properties(
            "TileVisual",
            [
                ("DisplayName", PropertyValue::optional_str(self.display_name.as_ref())),
                ("Branding", PropertyValue::enumeration(self.branding)),
                ("Language", PropertyValue::optional_str(self.language.as_ref())),
                ("BaseUri", PropertyValue::optional_str(self.base_uri.as_ref())),
                ("AddImageQuery", PropertyValue::optional(self.add_image_query)),
                ("ContentId", PropertyValue::optional_str(self.content_id.as_ref())),
                ("Version", PropertyValue::optional(self.version)),
            ],
        );
        for binding in &self.bindings {
            node.push_child(binding.convert_to_object());
        }
        node
    }
}

/// Root of a parsed payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tile {
    pub visual: Visual,
}

impl ElementVariant for Tile {
    const KIND: ElementKind = ElementKind::Tile;

    fn parse_known_attributes(
        &mut self,
        _attributes: &mut AttributesHelper,
        _cx: &mut ElementCx<'_>,
        _is_binding_root_level: bool,
    ) {
    }

    fn convert_to_object(&self) -> ObjectNode {
        let mut node = ObjectNode::new("Tile");
        node.push_child(self.visual.convert_to_object());
        node
    }
}
