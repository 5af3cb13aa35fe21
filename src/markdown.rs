//! Markdown conversion with XSS mitigation.
//!
//! Two modes, selected per markdown node. Strict mode escapes the source
//! before conversion so no author-supplied HTML can survive, and enables the
//! GFM-ish extensions. Raw mode converts the source as-is with extensions
//! disabled, then runs a heuristic stripping pass over the converter output.
//! The heuristic pass is defense-in-depth on top of the mandatory allow-list
//! sanitizer every raw node goes through; it is not a substitute for it.

use std::sync::OnceLock;

use pulldown_cmark::{html, Options, Parser};
use regex::Regex;

use crate::error::Result;
use crate::sanitize::escape_html;

/// Visible banner prepended when the mitigation pass rewrites anything
pub const XSS_WARNING: &str =
    "<p class=\"nd-xss-warning\">[Warning: This depiction may be trying to maliciously run code in your browser.]</p>";

/// Separator markup spliced over converter-emitted horizontal rules, so
/// depiction-authored rules match the native separator view.
pub const SEPARATOR_HTML: &str = "<hr class=\"nd-separator\">";

static SCRIPT_OPEN_RE: OnceLock<Regex> = OnceLock::new();
static SCRIPT_CLOSE_RE: OnceLock<Regex> = OnceLock::new();
static EVENT_HANDLER_RE: OnceLock<Regex> = OnceLock::new();

fn script_open_re() -> &'static Regex {
    SCRIPT_OPEN_RE.get_or_init(|| Regex::new(r"(?i)<script>").unwrap())
}

fn script_close_re() -> &'static Regex {
    SCRIPT_CLOSE_RE.get_or_init(|| Regex::new(r"(?i)</script>").unwrap())
}

fn event_handler_re() -> &'static Regex {
    EVENT_HANDLER_RE.get_or_init(|| Regex::new(r"(?i)\bon\w+\s*=").unwrap())
}

/// Run the external converter over a markdown string
fn convert(source: &str, gfm: bool) -> String {
    let options = if gfm {
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
    } else {
        // Raw format keeps embedded HTML; the richer parsing rules interact
        // unsafely with it, so they stay off.
        Options::empty()
    };
    let parser = Parser::new_ext(source, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Heuristic mitigation over raw-mode converter output: escape literal
/// script tags, neutralize inline `on*=` handlers, and prepend the warning
/// banner once if either rewrite fired.
fn mitigate_raw_output(mut rendered: String) -> String {
    let mut tripped = false;

    if script_open_re().is_match(&rendered) || script_close_re().is_match(&rendered) {
        rendered = script_open_re().replace_all(&rendered, "&lt;script&gt;").into_owned();
        rendered = script_close_re()
            .replace_all(&rendered, "&lt;/script&gt;")
            .into_owned();
        tripped = true;
    }

    if event_handler_re().is_match(&rendered) {
        rendered = event_handler_re()
            .replace_all(&rendered, "onXSSAttempt=")
            .into_owned();
        tripped = true;
    }

    if tripped {
        format!("{XSS_WARNING}{rendered}")
    } else {
        rendered
    }
}

fn replace_horizontal_rules(rendered: &str) -> String {
    rendered.replace("<hr />", SEPARATOR_HTML).replace("<hr>", SEPARATOR_HTML)
}

/// Convert a markdown string to HTML in the requested mode.
///
/// The caller is responsible for wrapping the result in a raw node, which
/// applies the allow-list sanitizer.
pub async fn render_markdown(source: &str, use_raw_format: bool) -> Result<String> {
    let rendered = if use_raw_format {
        mitigate_raw_output(convert(source, false))
    } else {
        // Escaping the source first means the converter only ever sees text.
        convert(&escape_html(source), true)
    };
    Ok(replace_horizontal_rules(&rendered))
}
