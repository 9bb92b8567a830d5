use crate::cnxml::SourceNode;
use crate::common::xml::{escape_attribute, escape_text};
use crate::pretext::context::ConversionContext;
use crate::pretext::converter::{Converter, collapse_whitespace, id_attr};
use tracing::{debug, warn};

impl Converter<'_> {
    /// Emit a figure: title, caption, first image, then nested subfigures.
    pub(crate) fn convert_figure(&self, node: &SourceNode, ctx: ConversionContext) -> String {
        let mut inner = String::new();
        if let Some(title) = self.render_title(node) {
            inner.push_str(&self.title_line(ctx.level + 1, &title));
        }
        if let Some(caption) = node.child("caption") {
            let rendered = self.render_inline(caption, ctx);
            let rendered = rendered.trim();
            if !rendered.is_empty() {
                inner.push_str(&self.line_element(ctx.level + 1, "caption", "", rendered));
            }
        }

        if let Some((image, alt)) = figure_image(node, None) {
            inner.push_str(&self.convert_image(image, alt, ctx.nested()));
        }

        for subfigure in node.children_named("subfigure") {
            inner.push_str(&self.convert_figure(subfigure, ctx.nested()));
        }

        if inner.is_empty() {
            debug!(id = node.id(), "skipping figure without caption or image");
            return String::new();
        }
        self.wrap_block(ctx.level, "figure", &id_attr(node.id()), inner)
    }

    /// A standalone `media` block outside any figure.
    pub(crate) fn convert_media(&self, node: &SourceNode, ctx: ConversionContext) -> String {
        match node.child("image") {
            Some(image) => self.convert_image(image, node.attr("alt"), ctx),
            None => {
                debug!(id = node.id(), "skipping media without an image");
                String::new()
            },
        }
    }

    /// An `image` element with a rewritten source path and percent width.
    pub(crate) fn convert_image(&self, image: &SourceNode, alt: Option<&str>, ctx: ConversionContext) -> String {
        let Some(src) = image.attr("src").map(str::trim).filter(|s| !s.is_empty()) else {
            debug!("skipping image without src");
            return String::new();
        };

        let mut attrs = format!(" source=\"{}\"", escape_attribute(&self.options.rewrite_media_path(src)));
        if let Some(width) = image.attr("width") {
            match self.width_percent(width) {
                Some(percent) => attrs.push_str(&format!(" width=\"{}%\"", percent)),
                None => warn!(src, width, "ignoring unparseable image width"),
            }
        }

        let alt = alt.map(collapse_whitespace).filter(|a| !a.is_empty());
        match alt {
            Some(alt) => {
                let description = self.line_element(ctx.level + 1, "description", "", &escape_text(&alt));
                self.wrap_block(ctx.level, "image", &attrs, description)
            },
            None => self.line_element(ctx.level, "image", &attrs, ""),
        }
    }

    /// Width as a whole percentage of the text width, clamped to 1..=100.
    ///
    /// Percent values are rounded; pixel values (bare or with a `px` suffix)
    /// are divided by the configured pixels-per-percent ratio.
    pub(crate) fn width_percent(&self, width: &str) -> Option<u32> {
        let width = width.trim();
        let percent = if let Some(value) = width.strip_suffix('%') {
            let value: f64 = value.trim().parse().ok()?;
            if !value.is_finite() {
                return None;
            }
            value.round().max(0.0) as u64
        } else {
            let pixels: u64 = width.strip_suffix("px").unwrap_or(width).trim().parse().ok()?;
            pixels / u64::from(self.options.pixels_per_percent.max(1))
        };
        Some(percent.clamp(1, 100) as u32)
    }
}

/// First `image` under a figure in document order, with the alt text of its
/// nearest enclosing `media` (falling back to the image's own `alt`).
/// Subfigures own their images and are not searched.
fn figure_image<'a>(node: &'a SourceNode, media_alt: Option<&'a str>) -> Option<(&'a SourceNode, Option<&'a str>)> {
    node.children.iter().find_map(|child| {
        if child.is("subfigure") || child.is("caption") {
            None
        } else if child.is("image") {
            Some((child, media_alt.or_else(|| child.attr("alt"))))
        } else if child.is("media") {
            figure_image(child, child.attr("alt").or(media_alt))
        } else {
            figure_image(child, media_alt)
        }
    })
}
