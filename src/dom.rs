//! Owned DOM tree and the DOM-mode renderer.
//!
//! The DOM back end materializes a [`crate::renderable::RenderableElement`]
//! tree into an owned element tree suitable for host-side mounting and
//! hydration. Escaping happens at assignment time with the same escape sets
//! the string back end uses, so serializing a DOM tree and rendering the IR
//! in string mode agree modulo attribute ordering.

use scraper::{ElementRef, Html};

use crate::renderable::{AttrValue, RenderableChild, RenderableElement};
use crate::sanitize::{escape_attribute, escape_html, SHADOW_CONTENT_TAG};

/// Tags serialized without a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// One node of the owned DOM tree
#[derive(Debug, Clone, PartialEq)]
pub enum DomNode {
    Element(DomElement),
    /// Text content, stored in its escaped form
    Text(String),
}

/// An element of the owned DOM tree.
///
/// Attribute values are stored escaped; a `None` value is a presence-only
/// (boolean) attribute. `shadow_root` is populated when the element is the
/// reserved shadow-content wrapper.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DomElement {
    pub tag: String,
    attributes: Vec<(String, Option<String>)>,
    children: Vec<DomNode>,
    shadow_root: Option<Vec<DomNode>>,
}

impl DomElement {
    pub fn new(tag: &str) -> Self {
        DomElement {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    /// Set a string attribute; the value is attribute-escaped on assignment
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let escaped = escape_attribute(value);
        if let Some(slot) = self.attributes.iter_mut().find(|(k, _)| k == name) {
            slot.1 = Some(escaped);
        } else {
            self.attributes.push((name.to_string(), Some(escaped)));
        }
    }

    /// Set a presence-only attribute
    pub fn set_flag(&mut self, name: &str) {
        if !self.attributes.iter().any(|(k, _)| k == name) {
            self.attributes.push((name.to_string(), None));
        }
    }

    /// The (escaped) value of an attribute, empty for presence-only ones
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_deref().unwrap_or(""))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let mut list = self.attr("class").unwrap_or("").to_string();
        if !list.is_empty() {
            list.push(' ');
        }
        list.push_str(class);
        self.set_attr("class", &list);
    }

    pub fn remove_class(&mut self, class: &str) {
        let list = match self.attr("class") {
            Some(list) => list
                .split_whitespace()
                .filter(|c| *c != class)
                .collect::<Vec<_>>()
                .join(" "),
            None => return,
        };
        self.set_attr("class", &list);
    }

    pub fn children(&self) -> &[DomNode] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<DomNode> {
        &mut self.children
    }

    pub fn push(&mut self, node: DomNode) {
        self.children.push(node);
    }

    /// Child elements only, skipping text nodes
    pub fn child_elements(&self) -> impl Iterator<Item = &DomElement> + '_ {
        self.children.iter().filter_map(|node| match node {
            DomNode::Element(el) => Some(el),
            DomNode::Text(_) => None,
        })
    }

    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut DomElement> + '_ {
        self.children.iter_mut().filter_map(|node| match node {
            DomNode::Element(el) => Some(el),
            DomNode::Text(_) => None,
        })
    }

    /// First child element matching a class, searching this element's
    /// immediate children.
    pub fn find_child_by_class_mut(&mut self, class: &str) -> Option<&mut DomElement> {
        self.child_elements_mut().find(|el| el.has_class(class))
    }

    /// The shadow root contents, when one has been attached
    pub fn shadow_root(&self) -> Option<&[DomNode]> {
        self.shadow_root.as_deref()
    }

    /// Attach an open shadow root populated from the `template` child.
    ///
    /// Idempotent; does nothing unless this element is the reserved
    /// shadow-content wrapper with a template child.
    pub fn attach_shadow(&mut self) {
        if self.tag != SHADOW_CONTENT_TAG || self.shadow_root.is_some() {
            return;
        }
        let contents = self
            .child_elements()
            .find(|el| el.tag == "template")
            .map(|template| template.children.clone());
        if let Some(contents) = contents {
            self.shadow_root = Some(contents);
        }
    }

    /// Collected text content of the subtree (escaped form)
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                DomNode::Text(text) => out.push_str(text),
                DomNode::Element(el) => out.push_str(&el.text()),
            }
        }
        out
    }

    /// Serialize the subtree to HTML. Shadow roots are not serialized; the
    /// template child carries the same content for the string contract.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            if let Some(value) = value {
                out.push_str(value);
            }
            out.push('"');
        }
        out.push('>');
        if VOID_ELEMENTS.contains(&self.tag.as_str()) && self.children.is_empty() {
            return out;
        }
        for child in &self.children {
            match child {
                DomNode::Text(text) => out.push_str(text),
                DomNode::Element(el) => out.push_str(&el.to_html()),
            }
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
        out
    }
}

/// DOM-mode rendering: materialize an IR tree into an owned element tree
pub fn render_element_dom(el: &RenderableElement) -> DomElement {
    let mut out = DomElement::new(&el.tag);
    for (name, value) in &el.attributes {
        match value {
            AttrValue::Text(text) => out.set_attr(name, text),
            AttrValue::Flag(true) => out.set_flag(name),
            AttrValue::Flag(false) => {}
        }
    }
    for child in &el.children {
        match child {
            RenderableChild::Text(text) => out.push(DomNode::Text(escape_html(text))),
            RenderableChild::Element(child) => out.push(DomNode::Element(render_element_dom(child))),
            RenderableChild::Raw(node) => append_fragment(&mut out, node.as_str()),
        }
    }
    out.attach_shadow();
    out
}

/// Parse sanitized HTML into a detached fragment and move its children into
/// `target`. Raw markup never touches the live tree directly.
pub fn append_fragment(target: &mut DomElement, html: &str) {
    let fragment = Html::parse_fragment(html);
    let root = fragment.root_element();
    for child in root.children() {
        if let Some(el) = ElementRef::wrap(child) {
            target.push(DomNode::Element(convert_element(el)));
        } else if let Some(text) = child.value().as_text() {
            target.push(DomNode::Text(escape_html(&text.text)));
        }
    }
}

fn convert_element(el: ElementRef<'_>) -> DomElement {
    let mut out = DomElement::new(el.value().name());
    for (name, value) in el.value().attrs() {
        out.set_attr(name, value);
    }
    for child in el.children() {
        if let Some(child_el) = ElementRef::wrap(child) {
            out.push(DomNode::Element(convert_element(child_el)));
        } else if let Some(text) = child.value().as_text() {
            out.push(DomNode::Text(escape_html(&text.text)));
        }
    }
    out.attach_shadow();
    out
}
