//! Escaping and allow-list sanitization.
//!
//! Two independent layers, both mandatory: pure escaping for anything placed
//! in a text or attribute position, and an allow-list sanitizer pass for any
//! fragment that is permitted to already be markup. A raw fragment only
//! enters the renderable tree through [`crate::renderable::create_raw_node`],
//! which routes through [`sanitize_html`].

use std::sync::OnceLock;

use ammonia::{Builder, UrlRelative};

/// Tag name of the custom element that wraps shadow-DOM content
pub const SHADOW_CONTENT_TAG: &str = "nd-shadowed-content";

/// Escape a string for a text-node position.
///
/// Escape set: `& < > " ' / ` =`
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '/' => out.push_str("&#x2F;"),
            '`' => out.push_str("&#x60;"),
            '=' => out.push_str("&#x3D;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a string for a quoted attribute-value position.
///
/// Narrower set than [`escape_html`] (`< > " `` ` ``); quoting neutralizes the
/// rest, and both render modes must apply the identical set so their outputs
/// agree.
pub fn escape_attribute(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '`' => out.push_str("&#x60;"),
            _ => out.push(c),
        }
    }
    out
}

/// Neutralize a depiction-supplied CSS color for use inside a style value.
///
/// Colors are accepted permissively at parse time; here everything outside
/// the charset a CSS color can need is dropped, which keeps `;`, `:`, braces
/// and quotes out of style attributes.
pub fn sanitize_css_color(input: &str) -> String {
    input
        .chars()
        .filter(|c| {
            c.is_ascii_alphanumeric()
                || matches!(c, '#' | '(' | ')' | ',' | '.' | '%' | '-' | ' ')
        })
        .collect()
}

static SANITIZER: OnceLock<Builder<'static>> = OnceLock::new();

/// The process-wide sanitizer, configured once on first use.
///
/// Depictions are allowed to embed video/iframe/style/template content that
/// the default safe set would strip, so those tags and the handful of
/// attributes the views emit are added to the allow list. `link_rel` is
/// cleared so the string and DOM back ends produce the same attributes.
fn sanitizer() -> &'static Builder<'static> {
    SANITIZER.get_or_init(|| {
        let mut builder = Builder::default();
        builder
            .add_tags(["iframe", "template", "style", "video", "source", "button", SHADOW_CONTENT_TAG])
            .rm_clean_content_tags(["style"])
            .add_generic_attributes(["class", "style", "id", "data-kennel-view", "data-target"])
            .add_tag_attributes("iframe", ["src", "width", "height", "frameborder"])
            .add_tag_attributes("video", ["src", "width", "height", "controls", "autoplay", "loop"])
            .add_tag_attributes("img", ["loading", "width", "height"])
            .add_tag_attributes("a", ["target"])
            .url_schemes(["http", "https", "mailto", "cydia"].into_iter().collect())
            .url_relative(UrlRelative::PassThrough)
            .link_rel(None);
        builder
    })
}

/// Run an HTML fragment through the allow-list sanitizer
pub fn sanitize_html(html: &str) -> String {
    sanitizer().clean(html).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_set() {
        assert_eq!(escape_html("<b>hi</b>"), "&lt;b&gt;hi&lt;&#x2F;b&gt;");
        assert_eq!(escape_html(r#"a="1" & 'b'"#), "a&#x3D;&quot;1&quot; &amp; &#39;b&#39;");
        assert_eq!(escape_html("`tick`"), "&#x60;tick&#x60;");
    }

    #[test]
    fn test_escape_attribute_set() {
        assert_eq!(escape_attribute(r#""><img src=x>"#), "&quot;&gt;&lt;img src=x&gt;");
        // The attribute set leaves & and ' alone.
        assert_eq!(escape_attribute("a&'b"), "a&'b");
    }

    #[test]
    fn test_sanitize_css_color() {
        assert_eq!(sanitize_css_color("#6264d3"), "#6264d3");
        assert_eq!(sanitize_css_color("rgba(1, 2, 3, 0.5)"), "rgba(1, 2, 3, 0.5)");
        assert_eq!(sanitize_css_color("red;} body {display:none"), "red bodydisplaynone");
    }

    #[test]
    fn test_sanitize_html_strips_script() {
        let cleaned = sanitize_html("<p>ok</p><script>alert(1)</script>");
        assert!(!cleaned.contains("<script"));
        assert!(cleaned.contains("<p>ok</p>"));
    }

    #[test]
    fn test_sanitize_html_keeps_allowed_extras() {
        let cleaned = sanitize_html(
            r#"<video src="https://example.com/v.mp4" controls=""></video><iframe src="https://example.com" frameborder="0"></iframe>"#,
        );
        assert!(cleaned.contains("<video"));
        assert!(cleaned.contains("controls"));
        assert!(cleaned.contains("<iframe"));
    }

    #[test]
    fn test_sanitize_html_strips_event_handlers() {
        let cleaned = sanitize_html(r#"<img src="https://example.com/x.png" onerror="alert(1)">"#);
        assert!(!cleaned.contains("onerror"));
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let once = sanitize_html("<div class=\"a\"><p>text &amp; more</p></div>");
        let twice = sanitize_html(&once);
        assert_eq!(once, twice);
    }
}
