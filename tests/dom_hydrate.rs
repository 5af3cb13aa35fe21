//! Integration tests for DOM-mode rendering and hydration

use kennel::{hydrate, switch_tab, DomElement, Kennel, RenderOptions};
use serde_json::json;

async fn render_dom(depiction: serde_json::Value) -> DomElement {
    Kennel::new(&depiction, RenderOptions::default())
        .expect("depiction failed validation")
        .render()
        .await
        .expect("render failed")
        .into_dom()
        .expect("DOM output")
}

fn tab_depiction() -> serde_json::Value {
    json!({
        "tabs": [
            {"tabname": "Details", "class": "DepictionStackView", "views": [
                {"class": "DepictionLabelView", "text": "details page"},
            ]},
            {"tabname": "Changelog", "class": "DepictionStackView", "views": [
                {"class": "DepictionLabelView", "text": "changelog page"},
            ]},
            {"tabname": "Support", "class": "DepictionStackView", "views": [
                {"class": "DepictionLabelView", "text": "support page"},
            ]},
        ],
    })
}

fn find_by_class<'a>(el: &'a DomElement, class: &str) -> Option<&'a DomElement> {
    if el.has_class(class) {
        return Some(el);
    }
    el.child_elements().find_map(|child| find_by_class(child, class))
}

#[tokio::test]
async fn test_tab_first_page_active_after_render() {
    let dom = render_dom(tab_depiction()).await;
    let pages = find_by_class(&dom, "nd-tab-pages").expect("pages container");
    let states: Vec<bool> = pages
        .child_elements()
        .map(|page| !page.has_class("nd-tab-page-inactive"))
        .collect();
    assert_eq!(states, vec![true, false, false]);
}

#[tokio::test]
async fn test_tab_switch_activates_exactly_one() {
    let mut dom = render_dom(tab_depiction()).await;
    hydrate(&mut dom);

    let target = {
        let controls = find_by_class(&dom, "nd-tab-controls").expect("controls");
        controls
            .child_elements()
            .nth(2)
            .and_then(|c| c.attr("data-target"))
            .expect("third control target")
            .to_string()
    };

    let tab_root = {
        // data-kennel-view marks the hydratable tab container.
        fn find_marked(el: &mut DomElement) -> Option<&mut DomElement> {
            if el.attr("data-kennel-view") == Some("DepictionTabView") {
                return Some(el);
            }
            for child in el.child_elements_mut() {
                if let Some(found) = find_marked(child) {
                    return Some(found);
                }
            }
            None
        }
        find_marked(&mut dom).expect("marked tab root")
    };
    switch_tab(tab_root, &target);

    let pages = find_by_class(&dom, "nd-tab-pages").expect("pages container");
    let active: Vec<_> = pages
        .child_elements()
        .filter(|p| !p.has_class("nd-tab-page-inactive"))
        .collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].attr("id"), Some(target.as_str()));
}

#[tokio::test]
async fn test_markdown_gets_shadow_root() {
    let dom = render_dom(json!({
        "views": [{"class": "DepictionMarkdownView", "markdown": "**bold** body"}],
    }))
    .await;
    let markdown = find_by_class(&dom, "nd-markdown").expect("markdown wrapper");
    assert_eq!(markdown.tag, "nd-shadowed-content");
    let shadow = markdown.shadow_root().expect("shadow root");
    assert!(!shadow.is_empty());
}

#[tokio::test]
async fn test_dom_and_string_modes_agree_on_content() {
    let depiction = json!({
        "views": [
            {"class": "DepictionHeaderView", "title": "Shared Title"},
            {"class": "DepictionTableTextView", "title": "Version", "text": "1.2.3"},
        ],
    });
    let dom_html = render_dom(depiction.clone()).await.to_html();
    let ssr_html = Kennel::new(
        &depiction,
        RenderOptions {
            ssr: true,
            ..Default::default()
        },
    )
    .unwrap()
    .render()
    .await
    .unwrap()
    .into_html();

    for needle in ["Shared Title", "nd-header", "nd-table-text", "Version", "1.2.3"] {
        assert!(dom_html.contains(needle), "DOM output missing {needle}");
        assert!(ssr_html.contains(needle), "SSR output missing {needle}");
    }
}

#[tokio::test]
async fn test_video_flags_materialize_as_boolean_attributes() {
    let dom = render_dom(json!({
        "views": [{
            "class": "DepictionVideoView",
            "URL": "https://example.com/v.mp4",
            "width": 320, "height": 180,
            "autoplay": true,
        }],
    }))
    .await;
    let video = find_by_class(&dom, "nd-video").expect("video element");
    assert_eq!(video.attr("autoplay"), Some(""));
    assert_eq!(video.attr("controls"), Some(""));
    assert_eq!(video.attr("loop"), None);
}
