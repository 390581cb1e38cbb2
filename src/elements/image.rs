use super::{placeholder_name, ElementCx, ElementVariant};
use crate::attributes::AttributesHelper;
use crate::object_model::{ObjectNode, PropertyValue};
use crate::types::{ElementKind, HintCrop, ImageAlign, ImagePlacement, NotificationType};

const ATTR_ID: &str = "id";
const ATTR_SRC: &str = "src";
const ATTR_ALT: &str = "alt";
const ATTR_ADD_IMAGE_QUERY: &str = "addImageQuery";
const ATTR_PLACEMENT: &str = "placement";
const ATTR_HINT_CROP: &str = "hint-crop";
const ATTR_HINT_REMOVE_MARGIN: &str = "hint-removeMargin";
const ATTR_HINT_ALIGN: &str = "hint-align";

const ROOT_ONLY: &[&str] = &[ATTR_PLACEMENT];
const NESTED_ONLY: &[&str] = &[ATTR_HINT_REMOVE_MARGIN, ATTR_HINT_ALIGN];

/// An `<image>` element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageField {
    pub id: Option<String>,
    pub src: String,
    /// Placeholder the renderer substitutes for `src`
    pub binding_src: Option<String>,
    pub alt: Option<String>,
    pub add_image_query: Option<bool>,
    pub placement: ImagePlacement,
    pub hint_crop: HintCrop,
    pub hint_remove_margin: Option<bool>,
    pub hint_align: ImageAlign,
}

impl ImageField {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            ..Self::default()
        }
    }

    pub fn set_source(&mut self, src: &str) {
        self.binding_src = placeholder_name(src).map(str::to_string);
        self.src = src.to_string();
    }

    /// An image without a source is never rendered.
    pub fn has_source(&self) -> bool {
        self.binding_src.is_some() || !self.src.trim().is_empty()
    }
}

impl ElementVariant for ImageField {
    const KIND: ElementKind = ElementKind::Image;

    fn parse_known_attributes(
        &mut self,
        attributes: &mut AttributesHelper,
        cx: &mut ElementCx<'_>,
        is_binding_root_level: bool,
    ) {
        match attributes.pop_value(ATTR_SRC) {
            Some(src) if !src.trim().is_empty() => self.set_source(&src),
            _ => cx.warn("<image> requires a non-empty 'src' attribute; the image is skipped."),
        }

        self.alt = attributes.pop_value(ATTR_ALT);

        if let Some(add) = cx.parse::<bool>(attributes, ATTR_ADD_IMAGE_QUERY) {
            self.add_image_query = Some(add);
        }

        if let Some(crop) = self.try_parse_enum(attributes, cx, ATTR_HINT_CROP) {
            self.hint_crop = crop;
        }

        if is_binding_root_level {
            if let Some(placement) = self.try_parse_enum(attributes, cx, ATTR_PLACEMENT) {
                self.placement = placement;
            }
        } else {
            if let Some(remove) = cx.parse::<bool>(attributes, ATTR_HINT_REMOVE_MARGIN) {
                self.hint_remove_margin = Some(remove);
            }

            if let Some(align) = self.try_parse_enum(attributes, cx, ATTR_HINT_ALIGN) {
                self.hint_align = align;
            }
        }

        if cx.context.notification_type == NotificationType::Tile {
            self.id = attributes.pop_value(ATTR_ID);
        }
    }

    fn is_nesting_restricted(&self, name: &str) -> bool {
        ROOT_ONLY.contains(&name) || NESTED_ONLY.contains(&name)
    }

    fn convert_to_object(&self) -> ObjectNode {
        let source = PropertyValue::bindable(Some(&self.src), self.binding_src.as_deref());
        let alt = PropertyValue::optional_str(self.alt.as_ref());
        let add_image_query = PropertyValue::optional(self.add_image_query);
        let crop = PropertyValue::unless_default(self.hint_crop);

        match self.placement {
            ImagePlacement::Background => ObjectNode::from_properties(
                "TileBackgroundImage",
                [
                    ("Source", source),
                    ("AlternateText", alt),
                    ("AddImageQuery", add_image_query),
                    ("HintCrop", crop),
                ],
            ),
            ImagePlacement::Peek => ObjectNode::from_properties(
                "TilePeekImage",
                [
                    ("Source", source),
                    ("AlternateText", alt),
                    ("AddImageQuery", add_image_query),
                    ("HintCrop", crop),
                ],
            ),
            ImagePlacement::Inline => ObjectNode::from_properties(
                "AdaptiveImage",
                [
                    ("Source", source),
                    ("AlternateText", alt),
                    ("AddImageQuery", add_image_query),
                    ("HintCrop", crop),
                    ("HintRemoveMargin", PropertyValue::optional(self.hint_remove_margin)),
                    ("HintAlign", PropertyValue::unless_default(self.hint_align)),
                ],
            ),
        }
    }
}
