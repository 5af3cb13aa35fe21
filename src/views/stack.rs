//! Stack containers: plain vertical/horizontal stacks and the fixed-column
//! auto stack.

use serde_json::Value;

use crate::coerce::{self, Expected};
use crate::error::{Error, Result};
use crate::renderable::{create_element, set_class_list, set_styles, RenderableElement};
use crate::sanitize::sanitize_css_color;
use crate::views::{construct_view, construct_views, make_views, ViewNode};
use crate::RenderOptions;

/// A sequence of child views, vertical by default, horizontal in landscape
/// orientation.
#[derive(Debug)]
pub struct StackView {
    views: Vec<ViewNode>,
    is_landscape: bool,
    x_padding: f64,
    background_color: Option<String>,
}

impl StackView {
    pub fn new(dict: &Value, options: &RenderOptions) -> Result<Self> {
        let view_dicts = coerce::guard_array(dict, "views")?;

        let mut is_landscape = false;
        if let Some(orientation) = coerce::opt_str(dict, "orientation") {
            match orientation.as_str() {
                "landscape" => is_landscape = true,
                "portrait" => {}
                other => return Err(Error::InvalidOrientation(other.to_string())),
            }
        }

        Ok(StackView {
            views: construct_views(view_dicts, options),
            is_landscape,
            x_padding: coerce::f64_or(dict, "xPadding", 0.0),
            background_color: coerce::opt_color(dict, "backgroundColor"),
        })
    }

    pub async fn make(&self, options: &RenderOptions) -> Result<RenderableElement> {
        let children = make_views(&self.views, options).await?;
        let mut el = create_element("div");
        set_class_list(
            &mut el,
            &[Some("nd-stack"), self.is_landscape.then_some("nd-stack-landscape")],
        );
        let mut styles = vec![("padding", format!("0 {}px", self.x_padding))];
        if let Some(color) = &self.background_color {
            styles.push(("background-color", sanitize_css_color(color)));
        }
        set_styles(&mut el, &styles);
        for child in children {
            el.push_element(child);
        }
        Ok(el)
    }
}

/// A stack whose children declare preferred pixel widths, rendered as a
/// fixed-column grid with a uniform gap.
#[derive(Debug)]
pub struct AutoStackView {
    views: Vec<ViewNode>,
    view_widths: Vec<f64>,
    horizontal_spacing: f64,
    background_color: Option<String>,
}

impl AutoStackView {
    pub fn new(dict: &Value, options: &RenderOptions) -> Result<Self> {
        let view_dicts = coerce::guard_array(dict, "views")?;
        let horizontal_spacing = coerce::guard_f64(dict, "horizontalSpacing")?;

        // Unlike a plain stack, an auto stack needs every child's width, so
        // one bad child fails the whole container.
        let mut views = Vec::with_capacity(view_dicts.len());
        let mut view_widths = Vec::with_capacity(view_dicts.len());
        for view_dict in view_dicts {
            let class = coerce::guard(view_dict, "class", Expected::String)?;
            view_widths.push(coerce::guard_f64(view_dict, "preferredWidth")?);
            let view = construct_view(view_dict, options).ok_or_else(|| {
                Error::InvalidChild(class.as_str().unwrap_or_default().to_string())
            })?;
            views.push(view);
        }

        Ok(AutoStackView {
            views,
            view_widths,
            horizontal_spacing,
            background_color: coerce::opt_color(dict, "backgroundColor"),
        })
    }

    pub async fn make(&self, options: &RenderOptions) -> Result<RenderableElement> {
        let children = make_views(&self.views, options).await?;
        let mut el = create_element("div");
        set_class_list(&mut el, &[Some("nd-auto-stack")]);
        let columns = self
            .view_widths
            .iter()
            .map(|w| format!("{w}px"))
            .collect::<Vec<_>>()
            .join(" ");
        let mut styles = vec![
            ("grid-template-columns", columns),
            ("column-gap", format!("{}px", self.horizontal_spacing)),
        ];
        if let Some(color) = &self.background_color {
            styles.push(("background-color", sanitize_css_color(color)));
        }
        set_styles(&mut el, &styles);
        for child in children {
            el.push_element(child);
        }
        Ok(el)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderable::render_element_string;
    use serde_json::json;

    #[tokio::test]
    async fn test_stack_renders_children_in_order() {
        let dict = json!({
            "class": "DepictionStackView",
            "views": [
                {"class": "DepictionLabelView", "text": "one"},
                {"class": "DepictionLabelView", "text": "two"},
            ],
        });
        let options = RenderOptions::default();
        let stack = StackView::new(&dict, &options).unwrap();
        let html = render_element_string(&stack.make(&options).await.unwrap());
        let one = html.find("one").unwrap();
        let two = html.find("two").unwrap();
        assert!(one < two);
    }

    #[test]
    fn test_stack_rejects_bad_orientation() {
        let dict = json!({"class": "DepictionStackView", "views": [], "orientation": "diagonal"});
        let err = StackView::new(&dict, &RenderOptions::default()).unwrap_err();
        assert!(err.to_string().contains("diagonal"));
    }

    #[tokio::test]
    async fn test_landscape_stack_class() {
        let dict = json!({"class": "DepictionStackView", "views": [], "orientation": "landscape"});
        let options = RenderOptions::default();
        let stack = StackView::new(&dict, &options).unwrap();
        let html = render_element_string(&stack.make(&options).await.unwrap());
        assert!(html.contains("nd-stack-landscape"));
    }

    #[test]
    fn test_stack_drops_malformed_children() {
        let dict = json!({
            "class": "DepictionStackView",
            "views": [
                {"class": "DepictionLabelView", "text": "ok"},
                {"class": "DepictionLabelView"},
            ],
        });
        let stack = StackView::new(&dict, &RenderOptions::default()).unwrap();
        assert_eq!(stack.views.len(), 1);
    }

    #[test]
    fn test_auto_stack_requires_child_widths() {
        let dict = json!({
            "class": "DepictionAutoStackView",
            "horizontalSpacing": 8,
            "views": [{"class": "DepictionLabelView", "text": "a"}],
        });
        assert!(AutoStackView::new(&dict, &RenderOptions::default()).is_err());
    }

    #[tokio::test]
    async fn test_auto_stack_grid_columns() {
        let dict = json!({
            "class": "DepictionAutoStackView",
            "horizontalSpacing": 8,
            "views": [
                {"class": "DepictionLabelView", "text": "a", "preferredWidth": 120},
                {"class": "DepictionLabelView", "text": "b", "preferredWidth": 80},
            ],
        });
        let options = RenderOptions::default();
        let stack = AutoStackView::new(&dict, &options).unwrap();
        let html = render_element_string(&stack.make(&options).await.unwrap());
        assert!(html.contains("grid-template-columns: 120px 80px"), "html was {html}");
        assert!(html.contains("column-gap: 8px"));
    }
}
