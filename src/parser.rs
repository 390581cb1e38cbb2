//! Template parser: payload XML to the typed element model
//!
//! Parsing never fails outright. Every problem becomes a diagnostic in the
//! returned [`ParseResult`] and parsing runs to the end of the document, so a
//! payload author sees all issues at once.

use crate::context::ParseContext;
use crate::diagnostics::ParseResult;
use crate::elements::{
    parse_attributes, Binding, BindingChild, Group, ImageField, Subgroup, SubgroupChild, TextField,
    Tile, Visual,
};
use crate::types::ElementKind;
use crate::xml::{parse_document, XmlElement};

/// Element name used for diagnostics about the document itself
const DOCUMENT: &str = "document";

/// Parse `xml` as a payload of the context's notification type.
pub fn parse(xml: &str, context: &ParseContext) -> ParseResult {
    let mut result = ParseResult::new();

    log::debug!("Phase 1: Reading XML ({} bytes)...", xml.len());
    let root = match parse_document(xml) {
        Ok(root) => root,
        Err(err) => {
            result.add_error(DOCUMENT, Some(err.line), format!("Malformed XML: {}", err.message));
            return result;
        }
    };

    log::debug!("Phase 2: Building element tree from <{}>...", root.name);
    let tile = TemplateParser {
        result: &mut result,
        context,
    }
    .parse_root(&root);

    if let Some(tile) = tile {
        log::debug!(
            "Phase 2 complete. {} binding(s), {} issue(s)",
            tile.visual.bindings.len(),
            result.issues().len()
        );
        result.set_tile(tile);
    } else {
        log::debug!("Phase 2 aborted with {} error(s)", result.error_count());
    }

    result
}

struct TemplateParser<'a> {
    result: &'a mut ParseResult,
    context: &'a ParseContext,
}

impl TemplateParser<'_> {
    /// A root of the wrong kind is an Error, but its content is still
    /// checked so later problems are reported in the same pass.
    fn parse_root(&mut self, node: &XmlElement) -> Option<Tile> {
        let expected = self.context.notification_type.root_kind();
        let root_matches = node.name == expected.tag();
        if !root_matches {
            self.result.add_error(
                &node.name,
                Some(node.line),
                format!(
                    "Expected root element <{}> but found <{}>.",
                    expected.tag(),
                    node.name
                ),
            );
        }

        let mut tile = Tile::default();
        parse_attributes(&mut tile, node, self.result, self.context, false);

        let mut visual = None;
        for child in &node.children {
            match ElementKind::from_tag(&child.name) {
                Some(ElementKind::Visual) if visual.is_none() => {
                    visual = Some(self.parse_visual(child));
                }
                Some(ElementKind::Visual) => {
                    self.warn(child, "Only the first <visual> is used; this one is ignored.");
                }
                kind => self.reject_child(node, child, kind),
            }
        }

        match visual {
            Some(visual) => {
                tile.visual = visual;
                root_matches.then_some(tile)
            }
            None => {
                self.result.add_error(
                    &node.name,
                    Some(node.line),
                    format!("<{}> must contain a <visual> element.", node.name),
                );
                None
            }
        }
    }

    fn parse_visual(&mut self, node: &XmlElement) -> Visual {
        let mut visual = Visual::default();
        parse_attributes(&mut visual, node, self.result, self.context, false);

        for child in &node.children {
            match ElementKind::from_tag(&child.name) {
                Some(ElementKind::Binding) => {
                    if let Some(binding) = self.parse_binding(child) {
                        visual.bindings.push(binding);
                    }
                }
                kind => self.reject_child(node, child, kind),
            }
        }

        if visual.bindings.is_empty() {
            self.warn(node, "<visual> contains no usable <binding>; nothing will be shown.");
        }

        visual
    }

    /// Children are checked even when the binding itself is dropped.
    fn parse_binding(&mut self, node: &XmlElement) -> Option<Binding> {
        let mut binding = Binding::default();
        parse_attributes(&mut binding, node, self.result, self.context, false);

        for child in &node.children {
            match ElementKind::from_tag(&child.name) {
                Some(ElementKind::Text) => {
                    binding
                        .children
                        .push(BindingChild::Text(self.parse_text(child, true)));
                }
                Some(ElementKind::Image) => {
                    if let Some(image) = self.parse_image(child, true) {
                        binding.children.push(BindingChild::Image(image));
                    }
                }
                Some(ElementKind::Group) => {
                    binding.children.push(BindingChild::Group(self.parse_group(child)));
                }
                kind => self.reject_child(node, child, kind),
            }
        }

        if binding.template.is_none() {
            log::debug!("Dropping <binding> at line {} without a usable template", node.line);
            return None;
        }
        Some(binding)
    }

    fn parse_group(&mut self, node: &XmlElement) -> Group {
        let mut group = Group::default();
        parse_attributes(&mut group, node, self.result, self.context, false);

        for child in &node.children {
            match ElementKind::from_tag(&child.name) {
                Some(ElementKind::Subgroup) => group.subgroups.push(self.parse_subgroup(child)),
                kind => self.reject_child(node, child, kind),
            }
        }

        group
    }

    fn parse_subgroup(&mut self, node: &XmlElement) -> Subgroup {
        let mut subgroup = Subgroup::default();
        parse_attributes(&mut subgroup, node, self.result, self.context, false);

        for child in &node.children {
            match ElementKind::from_tag(&child.name) {
                Some(ElementKind::Text) => {
                    subgroup
                        .children
                        .push(SubgroupChild::Text(self.parse_text(child, false)));
                }
                Some(ElementKind::Image) => {
                    if let Some(image) = self.parse_image(child, false) {
                        subgroup.children.push(SubgroupChild::Image(image));
                    }
                }
                kind => self.reject_child(node, child, kind),
            }
        }

        subgroup
    }

    fn parse_text(&mut self, node: &XmlElement, is_binding_root_level: bool) -> TextField {
        let mut text = TextField::default();
        text.set_content(node.text.trim());
        parse_attributes(&mut text, node, self.result, self.context, is_binding_root_level);
        self.reject_leaf_children(node);
        text
    }

    /// `None` when the image has no source to show.
    fn parse_image(&mut self, node: &XmlElement, is_binding_root_level: bool) -> Option<ImageField> {
        let mut image = ImageField::default();
        parse_attributes(&mut image, node, self.result, self.context, is_binding_root_level);
        self.reject_leaf_children(node);
        image.has_source().then_some(image)
    }

    fn reject_leaf_children(&mut self, node: &XmlElement) {
        for child in &node.children {
            self.warn(
                child,
                format!("<{}> cannot contain child elements; <{}> is ignored.", node.name, child.name),
            );
        }
    }

    fn reject_child(&mut self, parent: &XmlElement, child: &XmlElement, kind: Option<ElementKind>) {
        let message = match kind {
            Some(_) => format!(
                "<{}> is not allowed inside <{}> and is ignored.",
                child.name, parent.name
            ),
            None => format!("Unknown element <{}> inside <{}> is ignored.", child.name, parent.name),
        };
        self.warn(child, message);
    }

    fn warn(&mut self, node: &XmlElement, message: impl Into<String>) {
        self.result.add_warning(&node.name, Some(node.line), message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Capabilities;
    use crate::diagnostics::Severity;
    use crate::elements::ElementVariant;
    use crate::types::{Branding, HintStyle, ImagePlacement, Template, TextPlacement};

    const WEATHER: &str = r#"<tile>
  <visual displayName="Weather" branding="nameAndLogo">
    <binding template="TileMedium">
      <image src="Assets/sun.png" placement="peek"/>
      <text>Sunny</text>
    </binding>
    <binding template="TileWide" hint-overlay="30">
      <image src="Assets/bg.png" placement="background"/>
      <group>
        <subgroup hint-weight="1">
          <text hint-style="title">21°</text>
          <text hint-style="captionSubtle" hint-maxLines="2">Sunny</text>
        </subgroup>
        <subgroup hint-weight="2">
          <image src="Assets/sun.png" hint-removeMargin="true"/>
        </subgroup>
      </group>
    </binding>
  </visual>
</tile>"#;

    fn tile_of(result: &ParseResult) -> &Tile {
        result.tile().expect("tile present")
    }

    #[test]
    fn test_valid_payload_has_no_issues() {
        let result = parse(WEATHER, &ParseContext::tile());
        assert!(result.issues().is_empty(), "{:?}", result.issues());
        assert!(result.is_ok_for_render());

        let visual = &tile_of(&result).visual;
        assert_eq!(visual.display_name.as_deref(), Some("Weather"));
        assert_eq!(visual.branding, Some(Branding::NameAndLogo));
        assert_eq!(visual.bindings.len(), 2);

        let wide = &visual.bindings[1];
        assert_eq!(wide.template, Some(Template::TileWide));
        assert_eq!(wide.hint_overlay, Some(30.0));
        let BindingChild::Image(background) = &wide.children[0] else {
            panic!("expected background image");
        };
        assert_eq!(background.placement, ImagePlacement::Background);
        let BindingChild::Group(group) = &wide.children[1] else {
            panic!("expected group");
        };
        assert_eq!(group.subgroups.len(), 2);
        let SubgroupChild::Text(title) = &group.subgroups[0].children[0] else {
            panic!("expected text");
        };
        assert_eq!(title.hint_style, HintStyle::Title);
        assert_eq!(title.text, "21°");
    }

    #[test]
    fn test_unknown_attribute_is_single_warning() {
        let xml = r#"<tile><visual><binding template="TileSmall"><text foo="bar">x</text></binding></visual></tile>"#;
        let result = parse(xml, &ParseContext::tile());
        assert_eq!(result.issues().len(), 1);
        let issue = &result.issues()[0];
        assert_eq!(issue.severity, Severity::Warning);
        assert_eq!(issue.attribute.as_deref(), Some("foo"));
        assert!(issue.message.contains("foo"));
        assert!(result.is_ok_for_render());
    }

    #[test]
    fn test_missing_visual_is_error() {
        let result = parse("<tile/>", &ParseContext::tile());
        assert!(result.has_errors());
        assert!(result.tile().is_none());
        assert!(!result.is_ok_for_render());
    }

    #[test]
    fn test_malformed_xml_is_single_error() {
        for xml in ["<tile><visual>", "", "<tile></visual>", "<tile a='1' a='2'/>", "not xml"] {
            let result = parse(xml, &ParseContext::tile());
            assert_eq!(result.issues().len(), 1, "input {:?}", xml);
            assert_eq!(result.error_count(), 1, "input {:?}", xml);
            assert!(result.tile().is_none());
        }
    }

    #[test]
    fn test_wrong_root_is_error() {
        let xml = r#"<toast><visual><binding template="ToastGeneric"/></visual></toast>"#;
        let result = parse(xml, &ParseContext::tile());
        assert_eq!(result.error_count(), 1);
        assert!(result.tile().is_none());

        let result = parse(xml, &ParseContext::toast());
        assert!(result.issues().is_empty(), "{:?}", result.issues());
        assert!(result.is_ok_for_render());
    }

    #[test]
    fn test_wrong_root_still_reports_content() {
        let xml = r#"<toast><visual><binding template="TileSmall"><text foo="1">x</text></binding></visual></toast>"#;
        let result = parse(xml, &ParseContext::tile());
        let severities: Vec<_> = result.issues().iter().map(|i| i.severity).collect();
        assert_eq!(severities, vec![Severity::Error, Severity::Warning]);
        assert_eq!(result.issues()[1].attribute.as_deref(), Some("foo"));
        assert!(result.tile().is_none());
        assert!(!result.is_ok_for_render());
    }

    #[test]
    fn test_missing_visual_keeps_earlier_warnings() {
        let xml = r#"<tile><marquee/><binding template="TileSmall"/></tile>"#;
        let result = parse(xml, &ParseContext::tile());
        let severities: Vec<_> = result.issues().iter().map(|i| i.severity).collect();
        assert_eq!(
            severities,
            vec![Severity::Warning, Severity::Warning, Severity::Error]
        );
        assert!(result.tile().is_none());
    }

    #[test]
    fn test_deeply_nested_unknown_elements() {
        let depth = 100_000;
        let xml = format!(
            r#"<tile><visual><binding template="TileSmall">{}{}</binding></visual></tile>"#,
            "<a>".repeat(depth),
            "</a>".repeat(depth)
        );
        let result = parse(&xml, &ParseContext::tile());
        assert_eq!(result.issues().len(), 1);
        assert_eq!(result.warning_count(), 1);
        assert!(result.issues()[0].message.contains("<a>"));
        assert!(result.is_ok_for_render());
        assert!(tile_of(&result).visual.bindings[0].children.is_empty());
    }

    #[test]
    fn test_placeholder_text() {
        let xml = r#"<tile><visual><binding template="TileMedium"><text>{title}</text></binding></visual></tile>"#;
        let result = parse(xml, &ParseContext::tile());
        let binding = &tile_of(&result).visual.bindings[0];
        let object = binding.convert_to_object();
        let text = object.children()[0].as_object().unwrap();
        assert!(text.property("Text").is_none());
        assert_eq!(text.binding("Text"), Some("title"));
    }

    #[test]
    fn test_binding_without_template_is_dropped() {
        let xml = r#"<tile><visual>
            <binding><text bogus="1">x</text></binding>
            <binding template="TileLarge"/>
        </visual></tile>"#;
        let result = parse(xml, &ParseContext::tile());
        assert!(result.is_ok_for_render());
        assert_eq!(result.warning_count(), 2);
        // Children of the dropped binding are still checked
        assert!(result.issues().iter().any(|i| i.attribute.as_deref() == Some("bogus")));
        assert_eq!(tile_of(&result).visual.bindings.len(), 1);
    }

    #[test]
    fn test_visual_without_bindings_warns() {
        let result = parse("<tile><visual/></tile>", &ParseContext::tile());
        assert_eq!(result.warning_count(), 1);
        assert!(result.is_ok_for_render());
        assert!(tile_of(&result).visual.bindings.is_empty());
    }

    #[test]
    fn test_unknown_and_misplaced_elements() {
        let xml = r#"<tile><visual><binding template="TileWide">
            <marquee/>
            <subgroup/>
            <group><text>loose</text></group>
        </binding></visual></tile>"#;
        let result = parse(xml, &ParseContext::tile());
        assert_eq!(result.warning_count(), 3);
        assert!(!result.has_errors());
        let lines: Vec<_> = result.issues().iter().map(|i| i.line).collect();
        assert_eq!(lines, vec![Some(2), Some(3), Some(4)]);
        assert!(result.issues()[0].message.contains("Unknown element <marquee>"));
        assert!(result.issues()[1].message.contains("not allowed inside <binding>"));
    }

    #[test]
    fn test_extra_visual_and_leaf_children() {
        let xml = r#"<tile>
            <visual><binding template="TileSmall"><text>a<b/></text></binding></visual>
            <visual/>
        </tile>"#;
        let result = parse(xml, &ParseContext::tile());
        assert_eq!(result.warning_count(), 2);
        assert!(result.is_ok_for_render());
    }

    #[test]
    fn test_image_without_source_is_skipped() {
        let xml = r#"<tile><visual><binding template="TileSmall"><image alt="x"/><text>t</text></binding></visual></tile>"#;
        let result = parse(xml, &ParseContext::tile());
        assert_eq!(result.warning_count(), 1);
        let binding = &tile_of(&result).visual.bindings[0];
        assert_eq!(binding.children.len(), 1);
        assert_eq!(binding.images().count(), 0);
    }

    #[test]
    fn test_capabilities_reach_nested_elements() {
        let xml = r#"<tile><visual><binding template="TileWide"><text placement="attribution">via</text></binding></visual></tile>"#;
        let result = parse(xml, &ParseContext::tile());
        assert_eq!(result.warning_count(), 1);

        let context = ParseContext::tile().with_capabilities(Capabilities::new().allow(
            crate::types::ElementKind::Text,
            &[TextPlacement::Inline, TextPlacement::Attribution],
        ));
        let result = parse(xml, &context);
        assert!(result.issues().is_empty());
        let binding = &tile_of(&result).visual.bindings[0];
        let text = binding.texts().next().unwrap();
        assert_eq!(text.placement, TextPlacement::Attribution);
    }

    #[test]
    fn test_issues_follow_document_order() {
        let xml = r#"<tile>
  <visual version="x">
    <binding template="TileMedium" hint-overlay="lots">
      <text hint-wrap="maybe" zzz="1">a</text>
    </binding>
  </visual>
</tile>"#;
        let result = parse(xml, &ParseContext::tile());
        let attributes: Vec<_> = result
            .issues()
            .iter()
            .map(|i| i.attribute.as_deref().unwrap_or(""))
            .collect();
        assert_eq!(attributes, vec!["version", "hint-overlay", "hint-wrap", "zzz"]);
    }
}
