//! Media views: images, video, web embeds, screenshot galleries, and
//! featured banners.

use serde_json::Value;

use crate::coerce;
use crate::error::Result;
use crate::renderable::{create_element, set_class_list, set_styles, RenderableElement};
use crate::views::{apply_alignment_margin, encode_component, Alignment};
use crate::RenderOptions;

/// Rewrite a media URL through a proxy prefix when one is configured
fn proxied(url: &str, prefix: Option<&str>) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}{}", encode_component(url)),
        None => url.to_string(),
    }
}

/// A fixed-size inline image
#[derive(Debug)]
pub struct ImageView {
    url: String,
    width: f64,
    height: f64,
    corner_radius: f64,
    x_padding: f64,
    alignment: Alignment,
}

impl ImageView {
    pub fn new(dict: &Value, _options: &RenderOptions) -> Result<Self> {
        Ok(ImageView {
            url: coerce::guard_url(dict, "URL")?,
            width: coerce::guard_f64(dict, "width")?,
            height: coerce::guard_f64(dict, "height")?,
            corner_radius: coerce::guard_f64(dict, "cornerRadius")?,
            x_padding: coerce::f64_or(dict, "xPadding", 0.0),
            alignment: Alignment::from_value(dict.get("alignment")),
        })
    }

    pub async fn make(&self, options: &RenderOptions) -> Result<RenderableElement> {
        let mut el = create_element("img");
        set_class_list(&mut el, &[Some("nd-image")]);
        el.set_attr("src", &proxied(&self.url, options.proxy_image_url.as_deref()));
        el.set_attr("alt", "");
        el.set_attr("loading", "lazy");
        set_styles(
            &mut el,
            &[
                ("width", format!("{}px", self.width)),
                ("height", format!("{}px", self.height)),
                ("border-radius", format!("{}px", self.corner_radius)),
                ("padding", format!("0 {}px", self.x_padding)),
                ("max-width", "100%".to_string()),
            ],
        );
        apply_alignment_margin(&mut el, self.alignment);
        Ok(el)
    }
}

/// An inline video player
#[derive(Debug)]
pub struct VideoView {
    url: String,
    width: f64,
    height: f64,
    corner_radius: f64,
    alignment: Alignment,
    autoplay: bool,
    loop_enabled: bool,
    show_controls: bool,
}

impl VideoView {
    pub fn new(dict: &Value, _options: &RenderOptions) -> Result<Self> {
        Ok(VideoView {
            url: coerce::guard_url(dict, "URL")?,
            width: coerce::guard_f64(dict, "width")?,
            height: coerce::guard_f64(dict, "height")?,
            corner_radius: coerce::f64_or(dict, "cornerRadius", 0.0),
            alignment: Alignment::from_value(dict.get("alignment")),
            autoplay: coerce::bool_or(dict, "autoplay", false),
            loop_enabled: coerce::bool_or(dict, "loop", false),
            show_controls: coerce::bool_or(dict, "showPlaybackControls", true),
        })
    }

    pub async fn make(&self, options: &RenderOptions) -> Result<RenderableElement> {
        let mut el = create_element("video");
        set_class_list(&mut el, &[Some("nd-video")]);
        el.set_attr("src", &proxied(&self.url, options.proxy_video_url.as_deref()));
        el.set_flag("controls", self.show_controls);
        el.set_flag("autoplay", self.autoplay);
        el.set_flag("loop", self.loop_enabled);
        set_styles(
            &mut el,
            &[
                ("width", format!("{}px", self.width)),
                ("height", format!("{}px", self.height)),
                ("border-radius", format!("{}px", self.corner_radius)),
            ],
        );
        apply_alignment_margin(&mut el, self.alignment);
        Ok(el)
    }
}

/// An embedded web page
#[derive(Debug)]
pub struct WebView {
    url: String,
    width: f64,
    height: f64,
    alignment: Alignment,
}

impl WebView {
    pub fn new(dict: &Value, _options: &RenderOptions) -> Result<Self> {
        Ok(WebView {
            url: coerce::guard_url(dict, "URL")?,
            width: coerce::guard_f64(dict, "width")?,
            height: coerce::guard_f64(dict, "height")?,
            alignment: Alignment::from_value(dict.get("alignment")),
        })
    }

    pub async fn make(&self, options: &RenderOptions) -> Result<RenderableElement> {
        let mut el = create_element("iframe");
        set_class_list(&mut el, &[Some("nd-webview")]);
        el.set_attr("src", &proxied(&self.url, options.proxy_iframe_url.as_deref()));
        el.set_attr("width", &format!("{}", self.width));
        el.set_attr("height", &format!("{}", self.height));
        el.set_attr("frameborder", "0");
        apply_alignment_margin(&mut el, self.alignment);
        Ok(el)
    }
}

/// One validated screenshot entry
#[derive(Debug, Clone, PartialEq)]
pub struct Screenshot {
    pub url: String,
    pub full_size_url: Option<String>,
    pub accessibility_text: String,
    pub video: bool,
}

/// A horizontally scrolling screenshot gallery
#[derive(Debug)]
pub struct ScreenshotsView {
    screenshots: Vec<Screenshot>,
    item_width: f64,
    item_height: f64,
    item_corner_radius: f64,
}

impl ScreenshotsView {
    pub fn new(dict: &Value, _options: &RenderOptions) -> Result<Self> {
        // Some depictions nest the real payload under a device key.
        let dict = dict.get("iphone").filter(|v| v.is_object()).unwrap_or(dict);

        let raw_size = coerce::guard_str(dict, "itemSize")?;
        let (item_width, item_height) = coerce::parse_size(raw_size).unwrap_or((0.0, 0.0));
        let item_corner_radius = coerce::guard_f64(dict, "itemCornerRadius")?;

        let screenshots = coerce::guard_array(dict, "screenshots")?
            .iter()
            .filter_map(Self::parse_screenshot)
            .collect();

        Ok(ScreenshotsView {
            screenshots,
            item_width,
            item_height,
            item_corner_radius,
        })
    }

    /// Validate one gallery entry; malformed entries are skipped, not fatal
    fn parse_screenshot(dict: &Value) -> Option<Screenshot> {
        Some(Screenshot {
            url: coerce::opt_url(dict, "url")?,
            accessibility_text: coerce::opt_str(dict, "accessibilityText")?,
            full_size_url: coerce::opt_url(dict, "fullSizeURL"),
            video: coerce::bool_or(dict, "video", false),
        })
    }

    pub async fn make(&self, options: &RenderOptions) -> Result<RenderableElement> {
        let mut el = create_element("div");
        set_class_list(&mut el, &[Some("nd-screenshots")]);
        set_styles(
            &mut el,
            &[
                ("--screenshot-item-width", format!("{}px", self.item_width)),
                ("--screenshot-item-height", format!("{}px", self.item_height)),
                ("--screenshot-item-radius", format!("{}px", self.item_corner_radius)),
            ],
        );
        for screenshot in &self.screenshots {
            let mut media = create_element(if screenshot.video { "video" } else { "img" });
            set_class_list(&mut media, &[Some("nd-screenshot-item")]);
            media.set_attr(
                "src",
                &proxied(&screenshot.url, options.proxy_image_url.as_deref()),
            );
            if !screenshot.video {
                media.set_attr("alt", &screenshot.accessibility_text);
                media.set_attr("loading", "lazy");
            }
            if let Some(full_size) = &screenshot.full_size_url {
                let mut link = create_element("a");
                link.set_attr("href", full_size);
                link.set_attr("target", "_blank");
                link.push_element(media);
                el.push_element(link);
            } else {
                el.push_element(media);
            }
        }
        Ok(el)
    }
}

/// One validated banner entry
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub url: String,
    pub title: String,
    pub package: Option<String>,
    pub hide_shadow: bool,
}

/// Large tappable banner cards, optionally linking to a package
#[derive(Debug)]
pub struct BannersView {
    banners: Vec<Banner>,
    item_width: f64,
    item_height: f64,
    item_corner_radius: f64,
}

impl BannersView {
    pub fn new(dict: &Value, _options: &RenderOptions) -> Result<Self> {
        let raw_size = coerce::guard_str(dict, "itemSize")?;
        let (item_width, item_height) = coerce::parse_size(raw_size).unwrap_or((0.0, 0.0));
        let item_corner_radius = coerce::guard_f64(dict, "itemCornerRadius")?;

        let banners = coerce::guard_array(dict, "banners")?
            .iter()
            .filter_map(Self::parse_banner)
            .collect();

        Ok(BannersView {
            banners,
            item_width,
            item_height,
            item_corner_radius,
        })
    }

    fn parse_banner(dict: &Value) -> Option<Banner> {
        Some(Banner {
            url: coerce::opt_url(dict, "url")?,
            title: coerce::str_or(dict, "title", ""),
            package: coerce::opt_str(dict, "package"),
            hide_shadow: coerce::bool_or(dict, "hideShadow", false),
        })
    }

    pub async fn make(&self, options: &RenderOptions) -> Result<RenderableElement> {
        let mut el = create_element("div");
        set_class_list(&mut el, &[Some("nd-featured-banners")]);
        set_styles(
            &mut el,
            &[
                ("--banner-item-width", format!("{}px", self.item_width)),
                ("--banner-item-height", format!("{}px", self.item_height)),
                ("--banner-item-radius", format!("{}px", self.item_corner_radius)),
            ],
        );
        for banner in &self.banners {
            let mut link = create_element("a");
            set_class_list(&mut link, &[Some("nd-banner-item")]);
            match &banner.package {
                Some(package) => link.set_attr("href", &format!("cydia://{package}")),
                None => link.set_attr("href", &banner.url),
            }

            let mut image = create_element("img");
            image.set_attr("src", &proxied(&banner.url, options.proxy_image_url.as_deref()));
            image.set_attr("alt", &banner.title);
            link.push_element(image);

            if !banner.title.is_empty() {
                let mut title = create_element("span");
                if !banner.hide_shadow {
                    set_class_list(&mut title, &[Some("nd-banner-shadow")]);
                }
                title.push_text(&banner.title);
                link.push_element(title);
            }
            el.push_element(link);
        }
        Ok(el)
    }
}
