//! Kennel: a sanitizing renderer for native depiction documents.
//!
//! A depiction is a recursively nested JSON document describing a package's
//! rich description UI. Depiction authors are untrusted, so every field is
//! validated, every piece of free text is escaped, and anything permitted to
//! carry raw markup passes through an allow-list sanitizer. The same
//! validated view tree renders to either an owned DOM subtree or an
//! equivalent serialized HTML string.
//!
//! # Example
//!
//! ```no_run
//! use kennel::{Kennel, RenderOptions};
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let depiction = json!({
//!     "tintColor": "#6264d3",
//!     "views": [
//!         {"class": "DepictionHeaderView", "title": "My Tweak"},
//!         {"class": "DepictionMarkdownView", "markdown": "Makes your phone **better**."},
//!     ],
//! });
//!
//! let options = RenderOptions { ssr: true, ..Default::default() };
//! let kennel = Kennel::new(&depiction, options)?;
//! let html = kennel.render().await?.into_html();
//! println!("{html}");
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod coerce;
pub mod dom;
pub mod error;
pub mod hydrate;
pub mod markdown;
pub mod renderable;
pub mod sanitize;
pub mod views;

pub use dom::{DomElement, DomNode};
pub use error::{Error, Result};
pub use hydrate::{define_custom_elements, hydrate};
pub use renderable::{render_element_string, RenderableElement, RenderableNode};
pub use views::tab::switch_tab;
pub use views::{construct_view, construct_views, ViewNode};

use renderable::{create_element, set_class_list, set_styles};
use sanitize::sanitize_css_color;

/// Configuration threaded through one render pass.
///
/// One context per render call; construction and rendering never mutate it.
/// The defaults are conservative: no proxying, no suppressed views, errors
/// surfaced as visible placeholders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    /// Render to a serialized HTML string instead of a DOM tree
    pub ssr: bool,
    /// Tint color used when the document does not set one
    pub default_tint_color: Option<String>,
    /// Background color used when the document does not set one
    pub default_background_color: Option<String>,
    /// View classes to suppress entirely
    pub ignored_view_names: Vec<String>,
    /// Drop unknown view classes silently instead of rendering placeholders
    pub silence_errors: bool,
    /// Prefix prepended (with the URL percent-encoded) to image sources
    pub proxy_image_url: Option<String>,
    /// Prefix prepended to video sources
    pub proxy_video_url: Option<String>,
    /// Prefix prepended to iframe sources
    pub proxy_iframe_url: Option<String>,
    /// Endpoint template for `depiction-` button actions
    pub link_headerless: String,
    /// Endpoint template for `form-` button actions
    pub link_form: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            ssr: false,
            default_tint_color: None,
            default_background_color: None,
            ignored_view_names: Vec::new(),
            silence_errors: false,
            proxy_image_url: None,
            proxy_video_url: None,
            proxy_iframe_url: None,
            link_headerless: "https://api.parcility.co/render/headerless?url=".to_string(),
            link_form: "https://api.parcility.co/render/form?url=".to_string(),
        }
    }
}

/// Output of one render pass
#[derive(Debug)]
pub enum RenderOutput {
    /// A live element tree ready for insertion and hydration
    Dom(DomElement),
    /// A sanitized, self-contained HTML string
    Html(String),
}

impl RenderOutput {
    /// The output as HTML, serializing DOM-mode output
    pub fn into_html(self) -> String {
        match self {
            RenderOutput::Dom(el) => el.to_html(),
            RenderOutput::Html(html) => html,
        }
    }

    pub fn as_dom(&self) -> Option<&DomElement> {
        match self {
            RenderOutput::Dom(el) => Some(el),
            RenderOutput::Html(_) => None,
        }
    }

    pub fn into_dom(self) -> Option<DomElement> {
        match self {
            RenderOutput::Dom(el) => Some(el),
            RenderOutput::Html(_) => None,
        }
    }
}

/// A parsed, validated depiction ready to render.
///
/// Parsing happens once per render request: the constructor validates the
/// document into an owned view tree, and [`Kennel::render`] realizes that
/// tree in the mode the options select.
#[derive(Debug)]
pub struct Kennel {
    options: RenderOptions,
    tint_color: Option<String>,
    background_color: Option<String>,
    processed: Vec<ViewNode>,
}

impl Kennel {
    /// Validate a depiction document.
    ///
    /// A root with a `tabs` array becomes an implicit tab container; a root
    /// with a `views` array becomes an implicit vertical stack. A document
    /// with neither is the one case that fails outright. Individual
    /// malformed views inside the document degrade to nothing or to a
    /// placeholder without failing the whole document.
    pub fn new(depiction: &Value, options: RenderOptions) -> Result<Self> {
        let tint_color =
            coerce::opt_color(depiction, "tintColor").or_else(|| options.default_tint_color.clone());
        let background_color = coerce::opt_color(depiction, "backgroundColor")
            .or_else(|| options.default_background_color.clone());

        let processed = if depiction.get("tabs").is_some_and(Value::is_array) {
            // The root object doubles as the tab container's dictionary.
            let mut root = depiction.clone();
            if let Some(object) = root.as_object_mut() {
                object.insert("class".to_string(), Value::String("DepictionTabView".to_string()));
            }
            construct_view(&root, &options).into_iter().collect()
        } else if let Some(view_dicts) = depiction.get("views").and_then(Value::as_array) {
            construct_views(view_dicts, &options)
        } else {
            return Err(Error::EmptyDepiction);
        };

        Ok(Kennel {
            options,
            tint_color,
            background_color,
            processed,
        })
    }

    /// The view tree constructed from the document
    pub fn views(&self) -> &[ViewNode] {
        &self.processed
    }

    /// Render the depiction in the mode selected by the options.
    ///
    /// Sibling views' makes are issued together and joined before the root
    /// element is assembled.
    pub async fn render(&self) -> Result<RenderOutput> {
        let mut root = create_element("div");
        set_class_list(&mut root, &[Some("nd-depiction")]);
        let mut styles = Vec::new();
        if let Some(tint) = &self.tint_color {
            styles.push(("--kennel-tint-color", sanitize_css_color(tint)));
        }
        if let Some(background) = &self.background_color {
            styles.push(("background-color", sanitize_css_color(background)));
        }
        if !styles.is_empty() {
            set_styles(&mut root, &styles);
        }

        for child in views::make_views(&self.processed, &self.options).await? {
            root.push_element(child);
        }

        if self.options.ssr {
            Ok(RenderOutput::Html(render_element_string(&root)))
        } else {
            Ok(RenderOutput::Dom(dom::render_element_dom(&root)))
        }
    }
}
