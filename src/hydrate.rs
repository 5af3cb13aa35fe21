//! Post-render hydration for DOM-mode output.
//!
//! DOM-mode rendering marks every element whose view kind declares
//! post-mount behavior with a `data-kennel-view` attribute. After the host
//! inserts the tree, [`hydrate`] scans for those markers and invokes each
//! kind's registered hook. [`define_custom_elements`] is the one-time
//! registration of the shadow-content wrapper.

use std::sync::OnceLock;

use crate::dom::DomElement;
use crate::views;

static CUSTOM_ELEMENTS_DEFINED: OnceLock<()> = OnceLock::new();

/// Register the shadow-content wrapper element. Idempotent; safe under
/// concurrent first calls.
pub fn define_custom_elements() {
    CUSTOM_ELEMENTS_DEFINED.get_or_init(|| ());
}

/// Whether [`define_custom_elements`] has run
pub fn custom_elements_defined() -> bool {
    CUSTOM_ELEMENTS_DEFINED.get().is_some()
}

/// Scan `root` for hydration markers and run each kind's post-mount hook.
///
/// Also upgrades any shadow-content wrappers that arrived through raw
/// fragments and still lack a shadow root. Safe to call more than once.
pub fn hydrate(root: &mut DomElement) {
    define_custom_elements();
    hydrate_walk(root);
}

fn hydrate_walk(el: &mut DomElement) {
    el.attach_shadow();
    let hook = el
        .attr("data-kennel-view")
        .and_then(views::lookup)
        .and_then(|kind| kind.hydrate);
    if let Some(hook) = hook {
        hook(el);
    }
    for child in el.child_elements_mut() {
        hydrate_walk(child);
    }
}
