//! Small structural views: spacer, separator, the minimum-version guard, and
//! the unknown-class placeholder.

use serde_json::Value;

use crate::coerce;
use crate::error::{Error, Result};
use crate::renderable::{create_element, set_class_list, set_styles, RenderableElement};
use crate::views::{construct_view, make_view, ViewNode};
use crate::RenderOptions;

/// Fixed-size vertical/horizontal gap
#[derive(Debug)]
pub struct SpacerView {
    spacing: f64,
}

impl SpacerView {
    pub fn new(dict: &Value, _options: &RenderOptions) -> Result<Self> {
        Ok(SpacerView {
            spacing: coerce::guard_f64(dict, "spacing")?,
        })
    }

    pub async fn make(&self, _options: &RenderOptions) -> Result<RenderableElement> {
        let mut el = create_element("div");
        set_class_list(&mut el, &[Some("nd-spacer")]);
        set_styles(
            &mut el,
            &[
                ("min-height", format!("{}px", self.spacing)),
                ("min-width", format!("{}px", self.spacing)),
            ],
        );
        Ok(el)
    }
}

/// A horizontal rule matching first-party styling. Markdown output reuses
/// this exact markup for converter-emitted rules
/// (see `crate::markdown::SEPARATOR_HTML`).
#[derive(Debug)]
pub struct SeparatorView;

impl SeparatorView {
    pub fn new(_dict: &Value, _options: &RenderOptions) -> Result<Self> {
        Ok(SeparatorView)
    }

    pub async fn make(&self, _options: &RenderOptions) -> Result<RenderableElement> {
        let mut el = create_element("hr");
        set_class_list(&mut el, &[Some("nd-separator")]);
        Ok(el)
    }
}

/// Wraps a single view. The version comparison the name promises never
/// shipped in the depiction format; the value of the guard is the strict
/// validation of its `view` payload.
#[derive(Debug)]
pub struct MinVersionView {
    view: Box<ViewNode>,
}

impl MinVersionView {
    pub fn new(dict: &Value, options: &RenderOptions) -> Result<Self> {
        let view_dict = coerce::guard_object(dict, "view")?;
        let view = construct_view(view_dict, options)
            .ok_or_else(|| Error::InvalidChild("minVersion view".to_string()))?;
        Ok(MinVersionView {
            view: Box::new(view),
        })
    }

    pub async fn make(&self, options: &RenderOptions) -> Result<RenderableElement> {
        make_view(&self.view, options).await
    }
}

/// Visible placeholder for a class the registry does not know
#[derive(Debug)]
pub struct UnknownView {
    class: String,
}

impl UnknownView {
    pub fn new(class: &str) -> Self {
        UnknownView {
            class: class.to_string(),
        }
    }

    pub async fn make(&self, _options: &RenderOptions) -> Result<RenderableElement> {
        let mut el = create_element("p");
        set_class_list(&mut el, &[Some("nd-unknown-view")]);
        set_styles(&mut el, &[("opacity", "0.3".to_string())]);
        el.push_text(&format!("[Could not render: {}]", self.class));
        Ok(el)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderable::render_element_string;
    use serde_json::json;

    #[tokio::test]
    async fn test_spacer_styles() {
        let dict = json!({"spacing": 24});
        let options = RenderOptions::default();
        let spacer = SpacerView::new(&dict, &options).unwrap();
        let html = render_element_string(&spacer.make(&options).await.unwrap());
        assert!(html.contains("min-height: 24px"));
    }

    #[test]
    fn test_spacer_requires_number() {
        assert!(SpacerView::new(&json!({"spacing": "big"}), &RenderOptions::default()).is_err());
    }

    #[tokio::test]
    async fn test_separator_matches_markdown_constant() {
        let options = RenderOptions::default();
        let separator = SeparatorView::new(&json!({}), &options).unwrap();
        let html = render_element_string(&separator.make(&options).await.unwrap());
        let constant = crate::sanitize::sanitize_html(crate::markdown::SEPARATOR_HTML);
        assert_eq!(html, constant);
    }

    #[tokio::test]
    async fn test_min_version_delegates() {
        let dict = json!({
            "view": {"class": "DepictionLabelView", "text": "inner"},
        });
        let options = RenderOptions::default();
        let view = MinVersionView::new(&dict, &options).unwrap();
        let html = render_element_string(&view.make(&options).await.unwrap());
        assert!(html.contains("inner"));
    }

    #[test]
    fn test_min_version_requires_valid_view() {
        let dict = json!({"view": {"class": "DepictionLabelView"}});
        assert!(MinVersionView::new(&dict, &RenderOptions::default()).is_err());
    }

    #[tokio::test]
    async fn test_unknown_placeholder_escapes_class() {
        let options = RenderOptions::default();
        let view = UnknownView::new("<svg onload=x>");
        let html = render_element_string(&view.make(&options).await.unwrap());
        assert!(html.contains("Could not render"));
        assert!(!html.contains("<svg"));
    }
}
