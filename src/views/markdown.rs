//! Markdown-backed views: the markdown block itself, reviews, and ratings.

use serde_json::Value;

use crate::coerce;
use crate::error::Result;
use crate::markdown::render_markdown;
use crate::renderable::{
    create_element, create_raw_node, create_shadowed_element, set_class_list, set_styles,
    RenderableChild, RenderableElement,
};
use crate::sanitize::sanitize_css_color;
use crate::views::Alignment;
use crate::RenderOptions;

/// A markdown block, rendered into shadowed content so depiction-supplied
/// styles cannot leak into the host page.
#[derive(Debug)]
pub struct MarkdownView {
    markdown: String,
    use_raw_format: bool,
    use_margins: bool,
    use_spacing: bool,
    tint_color: Option<String>,
}

impl MarkdownView {
    pub fn new(dict: &Value, options: &RenderOptions) -> Result<Self> {
        Ok(MarkdownView {
            markdown: coerce::guard_str(dict, "markdown")?.to_string(),
            use_raw_format: coerce::bool_or(dict, "useRawFormat", false),
            use_margins: coerce::bool_or(dict, "useMargins", true),
            use_spacing: coerce::bool_or(dict, "useSpacing", true),
            tint_color: coerce::opt_color(dict, "tintColor")
                .or_else(|| options.default_tint_color.clone()),
        })
    }

    pub async fn make(&self, _options: &RenderOptions) -> Result<RenderableElement> {
        let rendered = render_markdown(&self.markdown, self.use_raw_format).await?;
        let raw = create_raw_node(&rendered);

        let mut el = create_shadowed_element(Vec::new(), vec![RenderableChild::Raw(raw)]);
        set_class_list(&mut el, &[Some("nd-markdown")]);

        let margins = if self.use_margins { 16.0 } else { 0.0 };
        let spacing = if self.use_spacing { 13.0 } else { 0.0 };
        let mut styles = vec![
            ("margin", format!("0 {margins}px")),
            ("padding-top", format!("{spacing}px")),
            ("padding-bottom", format!("{spacing}px")),
        ];
        if let Some(tint) = &self.tint_color {
            styles.push(("--kennel-tint-color", sanitize_css_color(tint)));
        }
        set_styles(&mut el, &styles);
        Ok(el)
    }
}

/// Star row shared by the rating and review views
pub(crate) fn make_rating_element(rating: f64, alignment: Alignment) -> RenderableElement {
    let mut el = create_element("div");
    set_class_list(&mut el, &[Some("nd-rating")]);
    set_styles(
        &mut el,
        &[
            ("--kennel-rating-progress", format!("{}%", rating * 20.0)),
            ("text-align", alignment.css().to_string()),
        ],
    );
    let mut stars = create_element("span");
    stars.push_text("★★★★★");
    el.push_element(stars);
    el
}

/// A standalone star rating
#[derive(Debug)]
pub struct RatingView {
    rating: f64,
    alignment: Alignment,
}

impl RatingView {
    pub fn new(dict: &Value, _options: &RenderOptions) -> Result<Self> {
        Ok(RatingView {
            rating: coerce::guard_f64(dict, "rating")?,
            alignment: Alignment::from_value(dict.get("alignment")),
        })
    }

    pub async fn make(&self, _options: &RenderOptions) -> Result<RenderableElement> {
        Ok(make_rating_element(self.rating, self.alignment))
    }
}

/// A user review: title, author, optional rating, markdown body
#[derive(Debug)]
pub struct ReviewView {
    title: String,
    author: String,
    markdown: String,
    rating: Option<f64>,
}

impl ReviewView {
    pub fn new(dict: &Value, _options: &RenderOptions) -> Result<Self> {
        Ok(ReviewView {
            title: coerce::guard_str(dict, "title")?.to_string(),
            author: coerce::guard_str(dict, "author")?.to_string(),
            markdown: coerce::guard_str(dict, "markdown")?.to_string(),
            rating: coerce::opt_f64(dict, "rating"),
        })
    }

    pub async fn make(&self, _options: &RenderOptions) -> Result<RenderableElement> {
        // Review bodies always use the strict markdown path.
        let rendered = render_markdown(&self.markdown, false).await?;

        let mut el = create_element("div");
        set_class_list(&mut el, &[Some("nd-review")]);

        let mut title = create_element("p");
        set_class_list(&mut title, &[Some("nd-review-title")]);
        title.push_text(&self.title);
        el.push_element(title);

        let mut subtitle = create_element("div");
        set_class_list(&mut subtitle, &[Some("nd-review-subtitle")]);
        let mut author = create_element("p");
        set_class_list(&mut author, &[Some("nd-review-author")]);
        author.push_text(&format!("by {}", self.author));
        subtitle.push_element(author);
        if let Some(rating) = self.rating {
            subtitle.push_element(make_rating_element(rating, Alignment::Right));
        }
        el.push_element(subtitle);

        // A div, not a p: the markdown body contains block elements.
        let mut content = create_element("div");
        set_class_list(&mut content, &[Some("nd-review-content")]);
        content.push_raw(create_raw_node(&rendered));
        el.push_element(content);
        Ok(el)
    }
}
