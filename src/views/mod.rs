//! View node types and the registry that constructs them.
//!
//! A depiction node is dispatched on its `class` string through a static
//! registry of view kinds. Construction is fail-soft per node: a malformed
//! view is logged and dropped without disturbing its siblings, and only a
//! document with no content at all aborts the render. The make phase is
//! asynchronous; a composite view issues its children's makes together and
//! joins them before assembling its own element.

pub mod button;
pub mod markdown;
pub mod media;
pub mod misc;
pub mod stack;
pub mod tab;
pub mod text;

use futures::future::{self, BoxFuture, FutureExt};
use serde_json::Value;

use crate::dom::DomElement;
use crate::error::Result;
use crate::renderable::RenderableElement;
use crate::RenderOptions;

pub use button::{ButtonView, TableButtonView, TableTextView};
pub use markdown::{MarkdownView, RatingView, ReviewView};
pub use media::{BannersView, ImageView, ScreenshotsView, VideoView, WebView};
pub use misc::{MinVersionView, SeparatorView, SpacerView, UnknownView};
pub use stack::{AutoStackView, StackView};
pub use tab::TabView;
pub use text::{HeaderView, LabelView};

/// Horizontal alignment shared by every view that supports it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Map the depiction's integer enum: 0/1/2 are left/center/right, and
    /// anything else (or nothing) falls back to left. Every view resolves
    /// alignment through this one function.
    pub fn from_value(value: Option<&Value>) -> Alignment {
        match value.and_then(Value::as_i64) {
            Some(1) => Alignment::Center,
            Some(2) => Alignment::Right,
            _ => Alignment::Left,
        }
    }

    pub fn css(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// Percent-encode a string for splicing into a URL template
pub(crate) fn encode_component(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}

/// Align a fixed-size element inside its row via auto margins
pub fn apply_alignment_margin(el: &mut RenderableElement, alignment: Alignment) {
    let mut styles: Vec<(&str, String)> = Vec::new();
    if alignment != Alignment::Left {
        styles.push(("margin-left", "auto".to_string()));
    }
    if alignment != Alignment::Right {
        styles.push(("margin-right", "auto".to_string()));
    }
    crate::renderable::set_styles(el, &styles);
}

/// A constructible view kind: the tag it answers to, its constructor, and an
/// optional post-mount hydrator for DOM-mode output.
pub struct ViewKind {
    pub name: &'static str,
    construct: fn(&Value, &RenderOptions) -> Result<ViewNode>,
    pub hydrate: Option<fn(&mut DomElement)>,
}

/// The registry. Populated at compile time, read-only thereafter.
static VIEWS: &[ViewKind] = &[
    ViewKind {
        name: "DepictionStackView",
        construct: |v, o| Ok(ViewNode::Stack(StackView::new(v, o)?)),
        hydrate: None,
    },
    ViewKind {
        name: "DepictionAutoStackView",
        construct: |v, o| Ok(ViewNode::AutoStack(AutoStackView::new(v, o)?)),
        hydrate: None,
    },
    ViewKind {
        name: "DepictionTabView",
        construct: |v, o| Ok(ViewNode::Tab(TabView::new(v, o)?)),
        hydrate: Some(tab::hydrate),
    },
    ViewKind {
        name: "DepictionHeaderView",
        construct: |v, o| Ok(ViewNode::Header(HeaderView::new(v, o)?)),
        hydrate: None,
    },
    ViewKind {
        name: "DepictionSubheaderView",
        construct: |v, o| Ok(ViewNode::Header(HeaderView::new_subheader(v, o)?)),
        hydrate: None,
    },
    ViewKind {
        name: "DepictionLabelView",
        construct: |v, o| Ok(ViewNode::Label(LabelView::new(v, o)?)),
        hydrate: None,
    },
    ViewKind {
        name: "DepictionImageView",
        construct: |v, o| Ok(ViewNode::Image(ImageView::new(v, o)?)),
        hydrate: None,
    },
    ViewKind {
        name: "DepictionVideoView",
        construct: |v, o| Ok(ViewNode::Video(VideoView::new(v, o)?)),
        hydrate: None,
    },
    ViewKind {
        name: "DepictionWebView",
        construct: |v, o| Ok(ViewNode::Web(WebView::new(v, o)?)),
        hydrate: None,
    },
    ViewKind {
        name: "DepictionButtonView",
        construct: |v, o| Ok(ViewNode::Button(ButtonView::new(v, o)?)),
        hydrate: None,
    },
    ViewKind {
        name: "DepictionTableButtonView",
        construct: |v, o| Ok(ViewNode::TableButton(TableButtonView::new(v, o)?)),
        hydrate: None,
    },
    ViewKind {
        name: "DepictionTableTextView",
        construct: |v, o| Ok(ViewNode::TableText(TableTextView::new(v, o)?)),
        hydrate: None,
    },
    ViewKind {
        name: "DepictionMarkdownView",
        construct: |v, o| Ok(ViewNode::Markdown(MarkdownView::new(v, o)?)),
        hydrate: None,
    },
    ViewKind {
        name: "DepictionReviewView",
        construct: |v, o| Ok(ViewNode::Review(ReviewView::new(v, o)?)),
        hydrate: None,
    },
    ViewKind {
        name: "DepictionRatingView",
        construct: |v, o| Ok(ViewNode::Rating(RatingView::new(v, o)?)),
        hydrate: None,
    },
    ViewKind {
        name: "DepictionScreenshotsView",
        construct: |v, o| Ok(ViewNode::Screenshots(ScreenshotsView::new(v, o)?)),
        hydrate: None,
    },
    ViewKind {
        name: "FeaturedBannersView",
        construct: |v, o| Ok(ViewNode::Banners(BannersView::new(v, o)?)),
        hydrate: None,
    },
    ViewKind {
        name: "DepictionSpacerView",
        construct: |v, o| Ok(ViewNode::Spacer(SpacerView::new(v, o)?)),
        hydrate: None,
    },
    ViewKind {
        name: "DepictionSeparatorView",
        construct: |v, o| Ok(ViewNode::Separator(SeparatorView::new(v, o)?)),
        hydrate: None,
    },
    ViewKind {
        name: "DepictionMinVersionForceView",
        construct: |v, o| Ok(ViewNode::MinVersion(MinVersionView::new(v, o)?)),
        hydrate: None,
    },
];

/// Find a view kind by its tag string
pub fn lookup(name: &str) -> Option<&'static ViewKind> {
    VIEWS.iter().find(|kind| kind.name == name)
}

/// A constructed, validated view node. Fields are fixed after construction;
/// rendering never mutates a node.
#[derive(Debug)]
pub enum ViewNode {
    Stack(StackView),
    AutoStack(AutoStackView),
    Tab(TabView),
    Header(HeaderView),
    Label(LabelView),
    Image(ImageView),
    Video(VideoView),
    Web(WebView),
    Button(ButtonView),
    TableButton(TableButtonView),
    TableText(TableTextView),
    Markdown(MarkdownView),
    Review(ReviewView),
    Rating(RatingView),
    Screenshots(ScreenshotsView),
    Banners(BannersView),
    Spacer(SpacerView),
    Separator(SeparatorView),
    MinVersion(MinVersionView),
    Unknown(UnknownView),
}

impl ViewNode {
    /// Registry tag for this node, when it has one
    pub fn view_name(&self) -> Option<&'static str> {
        match self {
            ViewNode::Stack(_) => Some("DepictionStackView"),
            ViewNode::AutoStack(_) => Some("DepictionAutoStackView"),
            ViewNode::Tab(_) => Some("DepictionTabView"),
            ViewNode::Header(view) => Some(if view.is_subheader() {
                "DepictionSubheaderView"
            } else {
                "DepictionHeaderView"
            }),
            ViewNode::Label(_) => Some("DepictionLabelView"),
            ViewNode::Image(_) => Some("DepictionImageView"),
            ViewNode::Video(_) => Some("DepictionVideoView"),
            ViewNode::Web(_) => Some("DepictionWebView"),
            ViewNode::Button(_) => Some("DepictionButtonView"),
            ViewNode::TableButton(_) => Some("DepictionTableButtonView"),
            ViewNode::TableText(_) => Some("DepictionTableTextView"),
            ViewNode::Markdown(_) => Some("DepictionMarkdownView"),
            ViewNode::Review(_) => Some("DepictionReviewView"),
            ViewNode::Rating(_) => Some("DepictionRatingView"),
            ViewNode::Screenshots(_) => Some("DepictionScreenshotsView"),
            ViewNode::Banners(_) => Some("FeaturedBannersView"),
            ViewNode::Spacer(_) => Some("DepictionSpacerView"),
            ViewNode::Separator(_) => Some("DepictionSeparatorView"),
            ViewNode::MinVersion(_) => Some("DepictionMinVersionForceView"),
            ViewNode::Unknown(_) => None,
        }
    }

    /// Build this node's renderable element. Boxed so composite views can
    /// recurse through their children.
    pub fn make<'a>(&'a self, options: &'a RenderOptions) -> BoxFuture<'a, Result<RenderableElement>> {
        match self {
            ViewNode::Stack(view) => view.make(options).boxed(),
            ViewNode::AutoStack(view) => view.make(options).boxed(),
            ViewNode::Tab(view) => view.make(options).boxed(),
            ViewNode::Header(view) => view.make(options).boxed(),
            ViewNode::Label(view) => view.make(options).boxed(),
            ViewNode::Image(view) => view.make(options).boxed(),
            ViewNode::Video(view) => view.make(options).boxed(),
            ViewNode::Web(view) => view.make(options).boxed(),
            ViewNode::Button(view) => view.make(options).boxed(),
            ViewNode::TableButton(view) => view.make(options).boxed(),
            ViewNode::TableText(view) => view.make(options).boxed(),
            ViewNode::Markdown(view) => view.make(options).boxed(),
            ViewNode::Review(view) => view.make(options).boxed(),
            ViewNode::Rating(view) => view.make(options).boxed(),
            ViewNode::Screenshots(view) => view.make(options).boxed(),
            ViewNode::Banners(view) => view.make(options).boxed(),
            ViewNode::Spacer(view) => view.make(options).boxed(),
            ViewNode::Separator(view) => view.make(options).boxed(),
            ViewNode::MinVersion(view) => view.make(options).boxed(),
            ViewNode::Unknown(view) => view.make(options).boxed(),
        }
    }
}

/// Construct one view from its raw dictionary.
///
/// Fail-soft per node: anything wrong with this dictionary is logged and the
/// node degrades to `None` (not shown), except an unknown class, which
/// becomes a visible placeholder unless errors are silenced.
pub fn construct_view(dict: &Value, options: &RenderOptions) -> Option<ViewNode> {
    let class = match dict.get("class").and_then(Value::as_str) {
        Some(class) => class,
        None => {
            log::error!("depiction view is missing its `class` discriminator");
            return None;
        }
    };

    if options.ignored_view_names.iter().any(|name| name == class) {
        return None;
    }

    // Hidden views render as empty output; not an error.
    if class.to_lowercase().contains("hidden") {
        return None;
    }

    let Some(kind) = lookup(class) else {
        if options.silence_errors {
            return None;
        }
        log::warn!("unknown depiction view class: {class}");
        return Some(ViewNode::Unknown(UnknownView::new(class)));
    };

    match (kind.construct)(dict, options) {
        Ok(view) => Some(view),
        Err(err) => {
            log::error!("failed to construct {class}: {err}");
            None
        }
    }
}

/// Construct an ordered list of views, dropping the ones that fail
pub fn construct_views(dicts: &[Value], options: &RenderOptions) -> Vec<ViewNode> {
    dicts.iter().filter_map(|dict| construct_view(dict, options)).collect()
}

/// Make one view's element, stamping the hydration marker when its kind
/// declares post-mount behavior.
pub async fn make_view(view: &ViewNode, options: &RenderOptions) -> Result<RenderableElement> {
    let mut el = view.make(options).await?;
    if let Some(kind) = view.view_name().and_then(lookup) {
        if kind.hydrate.is_some() {
            el.set_attr("data-kennel-view", kind.name);
        }
    }
    Ok(el)
}

/// Make sibling views together: their futures are issued without forced
/// ordering and joined before the caller assembles the parent element.
pub async fn make_views(views: &[ViewNode], options: &RenderOptions) -> Result<Vec<RenderableElement>> {
    future::try_join_all(views.iter().map(|view| make_view(view, options))).await
}
