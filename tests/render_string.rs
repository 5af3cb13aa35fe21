//! Integration tests for string-mode rendering

use kennel::{Kennel, RenderOptions};
use pretty_assertions::assert_eq;
use serde_json::json;

fn ssr_options() -> RenderOptions {
    RenderOptions {
        ssr: true,
        ..Default::default()
    }
}

async fn render(depiction: serde_json::Value) -> String {
    Kennel::new(&depiction, ssr_options())
        .expect("depiction failed validation")
        .render()
        .await
        .expect("render failed")
        .into_html()
}

#[tokio::test]
async fn test_label_text_is_escaped() {
    let html = render(json!({
        "views": [{"class": "DepictionLabelView", "text": "<b>hi</b>"}],
    }))
    .await;
    assert!(html.contains("&lt;b&gt;hi"), "html was {html}");
    assert!(!html.contains("<b>hi</b>"));
}

#[tokio::test]
async fn test_markdown_strict_renders_bold() {
    let html = render(json!({
        "views": [{"class": "DepictionMarkdownView", "markdown": "**bold**", "useRawFormat": false}],
    }))
    .await;
    assert!(html.contains("<strong>bold</strong>"), "html was {html}");
}

#[tokio::test]
async fn test_markdown_raw_script_is_neutralized() {
    let html = render(json!({
        "views": [{
            "class": "DepictionMarkdownView",
            "markdown": "<script>alert(1)</script>",
            "useRawFormat": true,
        }],
    }))
    .await;
    assert!(html.contains("nd-xss-warning"), "html was {html}");
    assert!(!html.to_lowercase().contains("<script>"));
}

#[tokio::test]
async fn test_button_javascript_action_is_percent_encoded() {
    let html = render(json!({
        "views": [{"class": "DepictionButtonView", "text": "Go", "action": "javascript:alert(1)"}],
    }))
    .await;
    assert!(!html.contains("href=\"javascript:"), "html was {html}");
    assert!(html.contains("javascript%3A"), "html was {html}");
}

#[tokio::test]
async fn test_malformed_sibling_degrades_gracefully() {
    let html = render(json!({
        "views": [
            {"class": "DepictionLabelView", "text": "valid"},
            {"class": "DepictionLabelView"},
        ],
    }))
    .await;
    assert!(html.contains("valid"));
    assert_eq!(html.matches("nd-label").count(), 1);
}

#[tokio::test]
async fn test_alignment_mapping_across_views() {
    for (value, css) in [(0, "left"), (1, "center"), (2, "right"), (5, "left")] {
        let html = render(json!({
            "views": [
                {"class": "DepictionHeaderView", "title": "h", "alignment": value},
                {"class": "DepictionLabelView", "text": "l", "alignment": value},
                {"class": "DepictionRatingView", "rating": 4, "alignment": value},
            ],
        }))
        .await;
        assert_eq!(
            html.matches(&format!("text-align: {css}")).count(),
            3,
            "alignment {value} html was {html}"
        );
    }
}

#[tokio::test]
async fn test_unknown_view_renders_placeholder() {
    let html = render(json!({
        "views": [{"class": "DepictionMysteryView"}],
    }))
    .await;
    assert!(html.contains("[Could not render: DepictionMysteryView]"), "html was {html}");
}

#[tokio::test]
async fn test_unknown_view_silenced() {
    let depiction = json!({
        "views": [{"class": "DepictionMysteryView"}],
    });
    let options = RenderOptions {
        ssr: true,
        silence_errors: true,
        ..Default::default()
    };
    let html = Kennel::new(&depiction, options)
        .unwrap()
        .render()
        .await
        .unwrap()
        .into_html();
    assert!(!html.contains("Could not render"));
}

#[tokio::test]
async fn test_render_is_deterministic() {
    let depiction = json!({
        "tintColor": "#6264d3",
        "views": [
            {"class": "DepictionHeaderView", "title": "Title"},
            {"class": "DepictionMarkdownView", "markdown": "Some *styled* text."},
            {"class": "DepictionSeparatorView"},
            {"class": "DepictionLabelView", "text": "label"},
        ],
    });
    let first = render(depiction.clone()).await;
    let second = render(depiction).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_output_sanitization_is_idempotent() {
    let html = render(json!({
        "views": [
            {"class": "DepictionHeaderView", "title": "Title & <More>"},
            {"class": "DepictionMarkdownView", "markdown": "plain"},
        ],
    }))
    .await;
    assert_eq!(kennel::sanitize::sanitize_html(&html), html);
}

#[tokio::test]
async fn test_no_unescaped_injection_from_fields() {
    let html = render(json!({
        "views": [
            {"class": "DepictionLabelView", "text": "\"><img src=x onerror=alert(1)>"},
            {"class": "DepictionTableTextView", "title": "<u>t</u>", "text": "<i>x</i>"},
        ],
    }))
    .await;
    assert!(!html.contains("<img"));
    assert!(!html.contains("<u>"));
    assert!(!html.contains("<i>"));
    assert!(!html.contains("onerror=alert"));
}

#[tokio::test]
async fn test_empty_depiction_is_document_level_error() {
    let err = Kennel::new(&json!({"tintColor": "#fff"}), ssr_options()).unwrap_err();
    assert!(err.to_string().contains("no `views` or `tabs`"));
}

#[tokio::test]
async fn test_stack_with_background_and_nested_views() {
    let html = render(json!({
        "views": [{
            "class": "DepictionStackView",
            "backgroundColor": "#101010",
            "views": [
                {"class": "DepictionSubheaderView", "title": "Nested"},
                {"class": "DepictionSpacerView", "spacing": 8},
            ],
        }],
    }))
    .await;
    assert!(html.contains("nd-stack"));
    assert!(html.contains("background-color: #101010"));
    assert!(html.contains("nd-subheader"));
    assert!(html.contains("nd-spacer"));
}

#[tokio::test]
async fn test_depiction_link_rewrite() {
    let html = render(json!({
        "views": [{
            "class": "DepictionTableButtonView",
            "title": "More Tweaks",
            "action": "depiction-https://repo.example/other.json",
        }],
    }))
    .await;
    assert!(
        html.contains("https://api.parcility.co/render/headerless?url="),
        "html was {html}"
    );
    assert!(html.contains("name=More"));
}

#[tokio::test]
async fn test_image_alignment_margins() {
    let base = json!({
        "class": "DepictionImageView",
        "URL": "https://example.com/a.png",
        "width": 100, "height": 50, "cornerRadius": 4,
    });

    let mut centered = base.clone();
    centered["alignment"] = json!(1);
    let html = render(json!({"views": [centered]})).await;
    assert!(html.contains("margin-left: auto"), "html was {html}");
    assert!(html.contains("margin-right: auto"));

    let mut right = base.clone();
    right["alignment"] = json!(2);
    let html = render(json!({"views": [right]})).await;
    assert!(html.contains("margin-left: auto"));
    assert!(!html.contains("margin-right: auto"));

    let html = render(json!({"views": [base]})).await;
    assert!(html.contains("margin-right: auto"));
    assert!(!html.contains("margin-left: auto"));
}
