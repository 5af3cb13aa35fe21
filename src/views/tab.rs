//! The tab container: named pages constructed eagerly, exactly one active.

use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future;
use serde_json::Value;

use crate::coerce;
use crate::dom::DomElement;
use crate::error::Result;
use crate::renderable::{create_element, set_class_list, AttrValue, RenderableElement};
use crate::views::{construct_view, make_view, ViewNode};
use crate::RenderOptions;

/// Container sequence counter. Page ids must not collide when one document
/// holds several tab containers.
static TAB_SEQ: AtomicUsize = AtomicUsize::new(0);

fn slug(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect()
}

#[derive(Debug)]
struct TabPage {
    name: String,
    html_id: String,
    view: ViewNode,
}

/// An ordered set of named pages; the first is active after initial render
/// and switching is a pure presentation toggle.
#[derive(Debug)]
pub struct TabView {
    pages: Vec<TabPage>,
}

impl TabView {
    pub fn new(dict: &Value, options: &RenderOptions) -> Result<Self> {
        let tabs = coerce::guard_array(dict, "tabs")?;
        let seq = TAB_SEQ.fetch_add(1, Ordering::Relaxed);

        // Entries without a name or class are skipped, not fatal.
        let pages = tabs
            .iter()
            .filter_map(|tab| {
                let name = coerce::opt_str(tab, "tabname")?;
                coerce::opt_str(tab, "class")?;
                let view = construct_view(tab, options)?;
                let html_id = format!("nd-tab-{seq}-{}", slug(&name));
                Some(TabPage {
                    name,
                    html_id,
                    view,
                })
            })
            .collect();

        Ok(TabView { pages })
    }

    pub async fn make(&self, options: &RenderOptions) -> Result<RenderableElement> {
        let mut el = create_element("div");
        set_class_list(&mut el, &[Some("nd-tabs")]);

        let mut controls = create_element("div");
        set_class_list(&mut controls, &[Some("nd-tab-controls")]);
        for (index, page) in self.pages.iter().enumerate() {
            let mut control = create_element("button");
            set_class_list(
                &mut control,
                &[
                    Some("nd-tab-control"),
                    (index == 0).then_some("nd-tab-control-active"),
                ],
            );
            control.set_attr("data-target", &page.html_id);
            control.push_text(&page.name);
            controls.push_element(control);
        }
        el.push_element(controls);

        // All pages are constructed and made eagerly; inactive ones are
        // merely hidden. Sibling makes are joined before assembly.
        let made = future::try_join_all(
            self.pages.iter().map(|page| make_view(&page.view, options)),
        )
        .await?;

        let mut pages_el = create_element("div");
        set_class_list(&mut pages_el, &[Some("nd-tab-pages")]);
        for (index, (page, mut page_el)) in self.pages.iter().zip(made).enumerate() {
            page_el.set_attr("id", &page.html_id);
            append_class(&mut page_el, "nd-tab-page");
            if index != 0 {
                append_class(&mut page_el, "nd-tab-page-inactive");
            }
            pages_el.push_element(page_el);
        }
        el.push_element(pages_el);
        Ok(el)
    }
}

fn append_class(el: &mut RenderableElement, class: &str) {
    let joined = match el.attr("class") {
        Some(AttrValue::Text(existing)) if !existing.is_empty() => format!("{existing} {class}"),
        _ => class.to_string(),
    };
    el.set_attr("class", &joined);
}

/// Post-mount behavior: normalize the container so exactly one page is
/// active, matching its control.
pub fn hydrate(el: &mut DomElement) {
    let targets: Vec<String> = match el.find_child_by_class_mut("nd-tab-controls") {
        Some(controls) => controls
            .child_elements()
            .filter_map(|control| control.attr("data-target").map(str::to_string))
            .collect(),
        None => return,
    };

    let active = active_target(el).or_else(|| targets.first().cloned());
    if let Some(active) = active {
        switch_tab(el, &active);
    }
}

/// The id of the currently active page, if any
fn active_target(el: &mut DomElement) -> Option<String> {
    let pages = el.find_child_by_class_mut("nd-tab-pages")?;
    pages
        .child_elements()
        .find(|page| page.has_class("nd-tab-page") && !page.has_class("nd-tab-page-inactive"))
        .and_then(|page| page.attr("id").map(str::to_string))
}

/// Activate the page with `target_id` and deactivate every other page in
/// this container. The host's click glue calls this with a control's
/// `data-target`.
pub fn switch_tab(el: &mut DomElement, target_id: &str) {
    if let Some(controls) = el.find_child_by_class_mut("nd-tab-controls") {
        for control in controls.child_elements_mut() {
            if control.attr("data-target") == Some(target_id) {
                control.add_class("nd-tab-control-active");
            } else {
                control.remove_class("nd-tab-control-active");
            }
        }
    }
    if let Some(pages) = el.find_child_by_class_mut("nd-tab-pages") {
        for page in pages.child_elements_mut() {
            if page.attr("id") == Some(target_id) {
                page.remove_class("nd-tab-page-inactive");
            } else if page.has_class("nd-tab-page") {
                page.add_class("nd-tab-page-inactive");
            }
        }
    }
}
