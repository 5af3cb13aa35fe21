//! Text views: header, subheader, and label.

use serde_json::Value;

use crate::coerce;
use crate::error::Result;
use crate::renderable::{create_element, set_class_list, set_styles, RenderableElement};
use crate::sanitize::sanitize_css_color;
use crate::views::Alignment;
use crate::RenderOptions;

/// Muted color used for non-bold headers
const MUTED_HEADER_COLOR: &str = "rgb(175, 175, 175)";

/// Section header; also backs the subheader, which differs only in its
/// default weight and class.
#[derive(Debug)]
pub struct HeaderView {
    title: String,
    alignment: Alignment,
    bold: bool,
    use_margins: bool,
    use_bottom_margin: bool,
    subheader: bool,
}

impl HeaderView {
    pub fn new(dict: &Value, _options: &RenderOptions) -> Result<Self> {
        Self::build(dict, false)
    }

    pub fn new_subheader(dict: &Value, _options: &RenderOptions) -> Result<Self> {
        Self::build(dict, true)
    }

    fn build(dict: &Value, subheader: bool) -> Result<Self> {
        Ok(HeaderView {
            title: coerce::guard_str(dict, "title")?.to_string(),
            alignment: Alignment::from_value(dict.get("alignment")),
            bold: coerce::bool_or(dict, "useBoldText", !subheader),
            use_margins: coerce::bool_or(dict, "useMargins", true),
            use_bottom_margin: coerce::bool_or(dict, "useBottomMargin", true),
            subheader,
        })
    }

    pub fn is_subheader(&self) -> bool {
        self.subheader
    }

    pub async fn make(&self, _options: &RenderOptions) -> Result<RenderableElement> {
        let mut el = create_element("p");
        let base = if self.subheader { "nd-subheader" } else { "nd-header" };
        // Margin toggles map to spacing classes; the stylesheet owns the
        // exact vertical metrics.
        set_class_list(
            &mut el,
            &[
                Some(base),
                (!self.use_margins).then_some("nd-header-tight"),
                (self.use_margins && !self.use_bottom_margin).then_some("nd-header-no-bottom"),
            ],
        );
        let mut styles = vec![
            ("text-align", self.alignment.css().to_string()),
            ("font-weight", if self.bold { "bold" } else { "normal" }.to_string()),
        ];
        if !self.bold {
            styles.push(("color", MUTED_HEADER_COLOR.to_string()));
        }
        set_styles(&mut el, &styles);
        el.push_text(&self.title);
        Ok(el)
    }
}

/// Map a depiction font weight name to a CSS weight
fn font_weight(name: &str) -> &'static str {
    match name {
        "black" => "900",
        "heavy" => "800",
        "bold" => "700",
        "semibold" => "600",
        "medium" => "500",
        "light" => "400",
        "thin" => "300",
        "ultralight" => "200",
        _ => "400",
    }
}

/// A run of plain text with font and margin controls
#[derive(Debug)]
pub struct LabelView {
    text: String,
    margins: Insets,
    weight: &'static str,
    font_size: f64,
    text_color: Option<String>,
    alignment: Alignment,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Insets {
    top: f64,
    left: f64,
    bottom: f64,
    right: f64,
}

impl LabelView {
    pub fn new(dict: &Value, _options: &RenderOptions) -> Result<Self> {
        let text = coerce::guard_str(dict, "text")?.to_string();

        let mut margins = Insets {
            top: 0.0,
            left: 0.0,
            bottom: 0.0,
            right: 0.0,
        };
        if let Some(raw) = coerce::opt_str(dict, "margins") {
            if let Some((top, left, bottom, right)) = coerce::parse_insets(&raw) {
                margins = Insets {
                    top,
                    left,
                    bottom,
                    right,
                };
            }
        }
        if margins.left == 0.0 {
            margins.left = 16.0;
        }
        if margins.right == 0.0 {
            margins.right = 16.0;
        }

        let use_margins = coerce::bool_or(dict, "useMargins", true);
        let use_padding = coerce::bool_or(dict, "usePadding", true);
        if !use_margins {
            margins = Insets {
                top: 0.0,
                left: 0.0,
                bottom: 0.0,
                right: 0.0,
            };
        } else if !use_padding {
            margins.top = 0.0;
            margins.bottom = 0.0;
        }

        let weight = coerce::opt_str(dict, "fontWeight")
            .map(|name| font_weight(&name.to_lowercase()))
            .unwrap_or("400");

        Ok(LabelView {
            text,
            margins,
            weight,
            font_size: coerce::f64_or(dict, "fontSize", 14.0),
            text_color: coerce::opt_color(dict, "textColor"),
            alignment: Alignment::from_value(dict.get("alignment")),
        })
    }

    pub async fn make(&self, _options: &RenderOptions) -> Result<RenderableElement> {
        let mut el = create_element("p");
        set_class_list(&mut el, &[Some("nd-label")]);
        let mut styles = vec![
            ("text-align", self.alignment.css().to_string()),
            ("font-weight", self.weight.to_string()),
            ("font-size", format!("{}px", self.font_size)),
            (
                "margin",
                format!(
                    "{}px {}px {}px {}px",
                    self.margins.top, self.margins.right, self.margins.bottom, self.margins.left
                ),
            ),
        ];
        if let Some(color) = &self.text_color {
            styles.push(("color", sanitize_css_color(color)));
        }
        set_styles(&mut el, &styles);
        el.push_text(&self.text);
        Ok(el)
    }
}
