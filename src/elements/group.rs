use super::{ElementCx, ElementVariant, ImageField, TextField};
use crate::attributes::AttributesHelper;
use crate::object_model::{ObjectNode, PropertyValue};
use crate::types::{ElementKind, TextStacking};

const ATTR_HINT_WEIGHT: &str = "hint-weight";
const ATTR_HINT_TEXT_STACKING: &str = "hint-textStacking";

/// A `<group>`: a horizontal row of subgroups.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    pub subgroups: Vec<Subgroup>,
}

impl ElementVariant for Group {
    const KIND: ElementKind = ElementKind::Group;

    fn parse_known_attributes(
        &mut self,
        _attributes: &mut AttributesHelper,
        _cx: &mut ElementCx<'_>,
        _is_binding_root_level: bool,
    ) {
    }

    fn convert_to_object(&self) -> ObjectNode {
        let mut node = ObjectNode::new("AdaptiveGroup");
        for subgroup in &self.subgroups {
            node.push_child(subgroup.convert_to_object());
        }
        node
    }
}

/// Leaf content allowed inside a subgroup
#[derive(Debug, Clone, PartialEq)]
pub enum SubgroupChild {
    Text(TextField),
    Image(ImageField),
}

impl SubgroupChild {
    pub fn convert_to_object(&self) -> ObjectNode {
        match self {
            SubgroupChild::Text(text) => text.convert_to_object(),
            SubgroupChild::Image(image) => image.convert_to_object(),
        }
    }
}

/// A `<subgroup>`: one column of a group.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Subgroup {
    /// Relative width among sibling subgroups, at least 1
    pub hint_weight: Option<i32>,
    pub hint_text_stacking: TextStacking,
    pub children: Vec<SubgroupChild>,
}

impl ElementVariant for Subgroup {
    const KIND: ElementKind = ElementKind::Subgroup;

    fn parse_known_attributes(
        &mut self,
        attributes: &mut AttributesHelper,
        cx: &mut ElementCx<'_>,
        _is_binding_root_level: bool,
    ) {
        if let Some(weight) = cx.parse::<i32>(attributes, ATTR_HINT_WEIGHT) {
            if weight >= 1 {
                self.hint_weight = Some(weight);
            } else {
                cx.warn_attribute(
                    ATTR_HINT_WEIGHT,
                    format!("hint-weight must be at least 1, found {}; the weight is ignored.", weight),
                );
            }
        }

        if let Some(stacking) = self.try_parse_enum(attributes, cx, ATTR_HINT_TEXT_STACKING) {
            self.hint_text_stacking = stacking;
        }
    }

    fn convert_to_object(&self) -> ObjectNode {
        let mut node = ObjectNode::from_properties(
            "AdaptiveSubgroup",
            [
                ("HintWeight", PropertyValue::optional(self.hint_weight)),
                ("HintTextStacking", PropertyValue::unless_default(self.hint_text_stacking)),
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
    use crate::context::ParseContext;
    use crate::diagnostics::ParseResult;
    use crate::elements::parse_attributes;
    use crate::xml::parse_document;

    #[test]
    fn test_subgroup_attributes() {
        let node = parse_document(r#"<subgroup hint-weight="33" hint-textStacking="center"/>"#).unwrap();
        let mut result = ParseResult::new();
        let mut subgroup = Subgroup::default();
        parse_attributes(&mut subgroup, &node, &mut result, &ParseContext::tile(), false);

        assert!(result.issues().is_empty());
        assert_eq!(subgroup.hint_weight, Some(33));
        assert_eq!(subgroup.hint_text_stacking, TextStacking::Center);
    }

    #[test]
    fn test_non_positive_weight_is_reported() {
        let node = parse_document(r#"<subgroup hint-weight="0"/>"#).unwrap();
        let mut result = ParseResult::new();
        let mut subgroup = Subgroup::default();
        parse_attributes(&mut subgroup, &node, &mut result, &ParseContext::tile(), false);

        assert_eq!(subgroup.hint_weight, None);
        assert_eq!(result.warning_count(), 1);
        assert_eq!(result.issues()[0].attribute.as_deref(), Some("hint-weight"));
    }

    #[test]
    fn test_group_attributes_are_unknown() {
        let node = parse_document(r#"<group hint-weight="1"/>"#).unwrap();
        let mut result = ParseResult::new();
        let mut group = Group::default();
        parse_attributes(&mut group, &node, &mut result, &ParseContext::tile(), true);
        assert_eq!(result.warning_count(), 1);
    }

    #[test]
    fn test_group_projection() {
        let group = Group {
            subgroups: vec![Subgroup {
                hint_weight: Some(2),
                hint_text_stacking: TextStacking::Default,
                children: vec![
                    SubgroupChild::Text(TextField::new("Title")),
                    SubgroupChild::Image(ImageField::new("a.png")),
                ],
            }],
        };

        let object = group.convert_to_object();
        assert_eq!(object.name, "AdaptiveGroup");
        let subgroup = object.children()[0].as_object().unwrap();
        assert_eq!(subgroup.name, "AdaptiveSubgroup");
        assert_eq!(subgroup.properties().len(), 1);
        let names: Vec<_> = subgroup
            .children()
            .iter()
            .filter_map(|c| c.as_object())
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["AdaptiveText", "AdaptiveImage"]);
    }
}
