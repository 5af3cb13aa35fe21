//! The renderable intermediate representation.
//!
//! Every view type produces a [`RenderableElement`] tree during the make
//! phase. The tree is the single contract shared by the two back ends: it is
//! realized either as an owned DOM subtree (`crate::dom`) or as a sanitized
//! HTML string (here), without duplicating any view logic.

use crate::sanitize::{escape_attribute, escape_html, sanitize_html, SHADOW_CONTENT_TAG};

/// An attribute value: text, or a flag whose truth toggles presence
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    Flag(bool),
}

/// One child slot of a renderable element
#[derive(Debug, Clone, PartialEq)]
pub enum RenderableChild {
    Element(RenderableElement),
    Raw(RenderableNode),
    Text(String),
}

/// A fragment of HTML that has already passed the allow-list sanitizer.
///
/// The contents are private: the only way to obtain one is
/// [`create_raw_node`], so an unsanitized string can never masquerade as
/// trusted markup. Raw nodes are spliced verbatim and never re-escaped.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderableNode {
    contents: String,
}

impl RenderableNode {
    pub fn as_str(&self) -> &str {
        &self.contents
    }
}

/// Sanitize `contents` and wrap it as a raw trusted node
pub fn create_raw_node(contents: &str) -> RenderableNode {
    RenderableNode {
        contents: sanitize_html(contents),
    }
}

/// Tag/attributes/children node produced by the make phase
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderableElement {
    pub tag: String,
    pub attributes: Vec<(String, AttrValue)>,
    pub children: Vec<RenderableChild>,
}

/// Build an empty element with the given tag
pub fn create_element(tag: &str) -> RenderableElement {
    RenderableElement {
        tag: tag.to_string(),
        attributes: Vec::new(),
        children: Vec::new(),
    }
}

/// Build the shadow-content wrapper: a reserved custom element whose
/// `template` child carries the children destined for the shadow root.
pub fn create_shadowed_element(
    attributes: Vec<(String, AttrValue)>,
    children: Vec<RenderableChild>,
) -> RenderableElement {
    let mut template = create_element("template");
    template.children = children;
    RenderableElement {
        tag: SHADOW_CONTENT_TAG.to_string(),
        attributes,
        children: vec![RenderableChild::Element(template)],
    }
}

impl RenderableElement {
    /// Set a string attribute, replacing any previous value
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if let Some(slot) = self.attributes.iter_mut().find(|(k, _)| k == name) {
            slot.1 = AttrValue::Text(value.to_string());
        } else {
            self.attributes.push((name.to_string(), AttrValue::Text(value.to_string())));
        }
    }

    /// Set a presence-toggled attribute
    pub fn set_flag(&mut self, name: &str, on: bool) {
        if let Some(slot) = self.attributes.iter_mut().find(|(k, _)| k == name) {
            slot.1 = AttrValue::Flag(on);
        } else {
            self.attributes.push((name.to_string(), AttrValue::Flag(on)));
        }
    }

    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn push_element(&mut self, child: RenderableElement) {
        self.children.push(RenderableChild::Element(child));
    }

    pub fn push_text(&mut self, text: &str) {
        self.children.push(RenderableChild::Text(text.to_string()));
    }

    pub fn push_raw(&mut self, node: RenderableNode) {
        self.children.push(RenderableChild::Raw(node));
    }
}

/// Append `styles` to the element's `style` attribute
pub fn set_styles(el: &mut RenderableElement, styles: &[(&str, String)]) {
    let mut resp = match el.attr("style") {
        Some(AttrValue::Text(existing)) => existing.clone(),
        _ => String::new(),
    };
    for (key, value) in styles {
        if !resp.is_empty() {
            resp.push_str("; ");
        }
        resp.push_str(key);
        resp.push_str(": ");
        resp.push_str(value);
    }
    el.set_attr("style", &resp);
}

/// Set the element's class list, skipping `None` entries
pub fn set_class_list(el: &mut RenderableElement, classes: &[Option<&str>]) {
    let joined = classes.iter().flatten().copied().collect::<Vec<_>>().join(" ");
    el.set_attr("class", &joined);
}

/// Serialize an element subtree without the final sanitizer pass
fn element_to_string(el: &RenderableElement) -> String {
    let mut out = String::new();
    out.push('<');
    out.push_str(&el.tag);
    for (name, value) in &el.attributes {
        match value {
            AttrValue::Flag(true) => {
                out.push(' ');
                out.push_str(name);
            }
            AttrValue::Flag(false) => {}
            AttrValue::Text(text) => {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape_attribute(text));
                out.push('"');
            }
        }
    }
    out.push('>');
    for child in &el.children {
        match child {
            RenderableChild::Text(text) => out.push_str(&escape_html(text)),
            RenderableChild::Raw(node) => out.push_str(node.as_str()),
            RenderableChild::Element(child) => out.push_str(&element_to_string(child)),
        }
    }
    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');
    out
}

/// String-mode rendering: serialize with the escaping contract, then run the
/// entire markup through the allow-list sanitizer as a second line of defense.
pub fn render_element_string(el: &RenderableElement) -> String {
    sanitize_html(&element_to_string(el))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_children_are_escaped() {
        let mut el = create_element("p");
        el.push_text("<b>hi</b>");
        let html = render_element_string(&el);
        assert!(html.contains("&lt;b&gt;hi"), "html was {html}");
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_attributes_are_escaped() {
        let mut el = create_element("div");
        el.set_attr("title", "\"><img src=x>");
        let html = element_to_string(&el);
        assert!(html.contains("&quot;&gt;&lt;img src=x&gt;"));
    }

    #[test]
    fn test_flag_attributes_toggle_presence() {
        let mut el = create_element("video");
        el.set_flag("controls", true);
        el.set_flag("autoplay", false);
        let html = element_to_string(&el);
        assert!(html.contains("controls"));
        assert!(!html.contains("autoplay"));
    }

    #[test]
    fn test_raw_nodes_are_not_reescaped() {
        let mut el = create_element("div");
        el.push_raw(create_raw_node("<p>already <em>markup</em></p>"));
        let html = render_element_string(&el);
        assert!(html.contains("<em>markup</em>"));
    }

    #[test]
    fn test_raw_node_constructor_sanitizes() {
        let node = create_raw_node("<p>ok</p><script>alert(1)</script>");
        assert!(!node.as_str().contains("<script"));
    }

    #[test]
    fn test_set_styles_appends() {
        let mut el = create_element("div");
        set_styles(&mut el, &[("margin", "0 16px".to_string())]);
        set_styles(&mut el, &[("padding-top", "13px".to_string())]);
        match el.attr("style") {
            Some(AttrValue::Text(style)) => {
                assert!(style.contains("margin: 0 16px"));
                assert!(style.contains("padding-top: 13px"));
            }
            other => panic!("unexpected style attr: {other:?}"),
        }
    }

    #[test]
    fn test_set_class_list_skips_absent() {
        let mut el = create_element("div");
        set_class_list(&mut el, &[Some("nd-stack"), None, Some("nd-stack-landscape")]);
        assert_eq!(
            el.attr("class"),
            Some(&AttrValue::Text("nd-stack nd-stack-landscape".to_string()))
        );
    }

    #[test]
    fn test_shadowed_element_wraps_template() {
        let el = create_shadowed_element(vec![], vec![RenderableChild::Text("inner".into())]);
        assert_eq!(el.tag, SHADOW_CONTENT_TAG);
        match &el.children[0] {
            RenderableChild::Element(template) => assert_eq!(template.tag, "template"),
            other => panic!("expected template child, got {other:?}"),
        }
    }
}
