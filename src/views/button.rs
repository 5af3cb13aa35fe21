//! Buttons and table rows, plus the reserved-scheme action resolver.

use serde_json::Value;

use crate::coerce;
use crate::error::{Error, Result};
use crate::renderable::{create_element, set_class_list, set_styles, RenderableElement};
use crate::sanitize::sanitize_css_color;
use crate::views::{construct_view, encode_component, make_view, ViewNode};
use crate::RenderOptions;

/// Resolve a button action against the reserved URL schemes.
///
/// `javascript:` payloads are percent-encoded from the scheme onward, so the
/// link still resolves but can never execute. `depiction-` and `form-`
/// prefixed actions are rewritten to the context's endpoint templates with
/// the visible label passed along.
pub fn resolve_action(action: &str, label: Option<&str>, options: &RenderOptions) -> String {
    let lowered = action.to_ascii_lowercase();
    if let Some(index) = lowered.find("javascript:") {
        let (head, tail) = action.split_at(index);
        return format!("{head}{}", encode_component(tail));
    }
    if let Some(rest) = action.strip_prefix("depiction-") {
        let label = label.unwrap_or("Depiction");
        return format!(
            "{}{}&name={}",
            options.link_headerless,
            encode_component(rest),
            encode_component(label)
        );
    }
    if let Some(rest) = action.strip_prefix("form-") {
        let label = label.unwrap_or("");
        return format!(
            "{}{}&name={}",
            options.link_form,
            encode_component(rest),
            encode_component(label)
        );
    }
    action.to_string()
}

/// A prominent button. Renders as an anchor so the resolved action is always
/// inspectable; `isLink` only switches the presentation class.
#[derive(Debug)]
pub struct ButtonView {
    text: Option<String>,
    child: Option<Box<ViewNode>>,
    action: String,
    backup_action: String,
    is_link: bool,
    open_external: bool,
    y_padding: f64,
    tint_color: Option<String>,
}

impl ButtonView {
    pub fn new(dict: &Value, options: &RenderOptions) -> Result<Self> {
        let action = coerce::guard_str(dict, "action")?.to_string();

        // A button carries either a nested view or plain text.
        let child = match dict.get("view") {
            Some(view_dict) if view_dict.is_object() => {
                let view = construct_view(view_dict, options)
                    .ok_or_else(|| Error::InvalidChild("button view".to_string()))?;
                Some(Box::new(view))
            }
            _ => None,
        };
        let text = if child.is_none() {
            Some(coerce::guard_str(dict, "text")?.to_string())
        } else {
            None
        };

        Ok(ButtonView {
            text,
            child,
            action,
            backup_action: coerce::str_or(dict, "backupAction", ""),
            is_link: coerce::bool_or(dict, "isLink", false),
            open_external: coerce::bool_or(dict, "openExternal", false),
            y_padding: coerce::f64_or(dict, "yPadding", 0.0),
            tint_color: coerce::opt_color(dict, "tintColor")
                .or_else(|| options.default_tint_color.clone()),
        })
    }

    /// Fallback action for hosts that cannot handle the primary one
    pub fn backup_action(&self) -> &str {
        &self.backup_action
    }

    pub async fn make(&self, options: &RenderOptions) -> Result<RenderableElement> {
        let mut el = create_element("a");
        set_class_list(
            &mut el,
            &[Some("nd-button"), self.is_link.then_some("nd-button-link")],
        );
        el.set_attr(
            "href",
            &resolve_action(&self.action, self.text.as_deref(), options),
        );
        if self.open_external {
            el.set_attr("target", "_blank");
        }
        let mut styles = Vec::new();
        if self.y_padding != 0.0 {
            styles.push(("padding-bottom", format!("{}px", self.y_padding)));
        }
        if let Some(tint) = &self.tint_color {
            styles.push(("background-color", sanitize_css_color(tint)));
        }
        if !styles.is_empty() {
            set_styles(&mut el, &styles);
        }
        if let Some(child) = &self.child {
            el.push_element(make_view(child, options).await?);
        } else if let Some(text) = &self.text {
            el.push_text(text);
        }
        Ok(el)
    }
}

/// A full-width table row that acts as a link
#[derive(Debug)]
pub struct TableButtonView {
    title: String,
    action: String,
    backup_action: String,
    open_external: bool,
    tint_color: Option<String>,
}

impl TableButtonView {
    pub fn new(dict: &Value, options: &RenderOptions) -> Result<Self> {
        Ok(TableButtonView {
            title: coerce::guard_str(dict, "title")?.to_string(),
            action: coerce::guard_str(dict, "action")?.to_string(),
            backup_action: coerce::str_or(dict, "backupAction", ""),
            open_external: coerce::bool_or(dict, "openExternal", false),
            tint_color: coerce::opt_color(dict, "tintColor")
                .or_else(|| options.default_tint_color.clone()),
        })
    }

    /// Fallback action for hosts that cannot handle the primary one
    pub fn backup_action(&self) -> &str {
        &self.backup_action
    }

    pub async fn make(&self, options: &RenderOptions) -> Result<RenderableElement> {
        let mut el = create_element("a");
        set_class_list(&mut el, &[Some("nd-table-button")]);
        el.set_attr(
            "href",
            &resolve_action(&self.action, Some(&self.title), options),
        );
        if self.open_external {
            el.set_attr("target", "_blank");
        }
        if let Some(tint) = &self.tint_color {
            set_styles(&mut el, &[("color", sanitize_css_color(tint))]);
        }
        let mut title = create_element("p");
        set_class_list(&mut title, &[Some("nd-table-button-title")]);
        title.push_text(&self.title);
        el.push_element(title);
        let mut chevron = create_element("span");
        set_class_list(&mut chevron, &[Some("nd-table-button-chevron")]);
        el.push_element(chevron);
        Ok(el)
    }
}

/// A static title/text table row
#[derive(Debug)]
pub struct TableTextView {
    title: String,
    text: String,
}

impl TableTextView {
    pub fn new(dict: &Value, _options: &RenderOptions) -> Result<Self> {
        Ok(TableTextView {
            title: coerce::guard_str(dict, "title")?.to_string(),
            text: coerce::guard_str(dict, "text")?.to_string(),
        })
    }

    pub async fn make(&self, _options: &RenderOptions) -> Result<RenderableElement> {
        let mut el = create_element("div");
        set_class_list(&mut el, &[Some("nd-table-text")]);
        let mut title = create_element("p");
        set_class_list(&mut title, &[Some("nd-table-text-title")]);
        title.push_text(&self.title);
        el.push_element(title);
        let mut text = create_element("p");
        set_class_list(&mut text, &[Some("nd-table-text-text")]);
        text.push_text(&self.text);
        el.push_element(text);
        Ok(el)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderable::render_element_string;
    use serde_json::json;

    #[test]
    fn test_resolve_action_neutralizes_javascript() {
        let options = RenderOptions::default();
        let resolved = resolve_action("javascript:alert(1)", Some("Go"), &options);
        assert!(!resolved.starts_with("javascript:"));
        assert!(resolved.contains("javascript%3A"), "resolved was {resolved}");
    }

    #[test]
    fn test_resolve_action_neutralizes_embedded_javascript() {
        let options = RenderOptions::default();
        let resolved = resolve_action("https://a.example/?r=JavaScript:alert(1)", None, &options);
        assert!(resolved.starts_with("https://a.example/?r="));
        assert!(!resolved.to_lowercase().contains("javascript:"));
    }

    #[test]
    fn test_resolve_action_rewrites_depiction_scheme() {
        let options = RenderOptions::default();
        let resolved = resolve_action("depiction-https://repo.example/dep.json", Some("More"), &options);
        assert!(resolved.starts_with(&options.link_headerless));
        assert!(resolved.contains("name=More"));
        assert!(resolved.contains("https%3A%2F%2Frepo.example%2Fdep.json"));
    }

    #[test]
    fn test_resolve_action_rewrites_form_scheme() {
        let options = RenderOptions::default();
        let resolved = resolve_action("form-https://repo.example/form.json", None, &options);
        assert!(resolved.starts_with(&options.link_form));
    }

    #[test]
    fn test_resolve_action_passes_plain_urls() {
        let options = RenderOptions::default();
        assert_eq!(
            resolve_action("https://example.com", None, &options),
            "https://example.com"
        );
    }

    #[tokio::test]
    async fn test_button_renders_href_and_text() {
        let dict = json!({"text": "Go", "action": "https://example.com"});
        let options = RenderOptions::default();
        let button = ButtonView::new(&dict, &options).unwrap();
        let html = render_element_string(&button.make(&options).await.unwrap());
        assert!(html.contains("href=\"https://example.com\""), "html was {html}");
        assert!(html.contains("Go"));
    }

    #[tokio::test]
    async fn test_button_open_external() {
        let dict = json!({"text": "Go", "action": "https://example.com", "openExternal": true});
        let options = RenderOptions::default();
        let button = ButtonView::new(&dict, &options).unwrap();
        let html = render_element_string(&button.make(&options).await.unwrap());
        assert!(html.contains("target=\"_blank\""));
    }

    #[test]
    fn test_button_requires_text_or_view() {
        let dict = json!({"action": "https://example.com"});
        assert!(ButtonView::new(&dict, &RenderOptions::default()).is_err());
    }

    #[tokio::test]
    async fn test_table_text_escapes_fields() {
        let dict = json!({"title": "<i>t</i>", "text": "body"});
        let options = RenderOptions::default();
        let view = TableTextView::new(&dict, &options).unwrap();
        let html = render_element_string(&view.make(&options).await.unwrap());
        assert!(html.contains("&lt;i&gt;t"));
        assert!(!html.contains("<i>"));
    }
}
