use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::foundation::core::SurfaceSize;
use crate::foundation::error::{BannerError, BannerResult};
use crate::text::label::{BannerLabel, StackLayout};
use crate::text::mask::Mask;
use crate::text::raster::MaskRasterizer;

/// Rasterizes the label through an SVG document rendered by `resvg`, resolving fonts from the
/// system font database plus any extra font directories.
pub struct SvgTextRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl SvgTextRasterizer {
    /// Rasterizer over system fonts only.
    pub fn new() -> Self {
        Self::with_font_dirs(std::iter::empty::<PathBuf>())
    }

    /// Rasterizer over system fonts plus every `.ttf`/`.otf`/`.ttc` file in `dirs`.
    pub fn with_font_dirs<P: AsRef<Path>>(dirs: impl IntoIterator<Item = P>) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        for dir in dirs {
            load_fonts_from_dir(&mut db, dir.as_ref());
        }
        tracing::debug!(faces = db.len(), "loaded svg font database");
        Self {
            fontdb: Arc::new(db),
        }
    }

    /// Number of font faces available for resolution.
    pub fn face_count(&self) -> usize {
        self.fontdb.len()
    }
}

impl Default for SvgTextRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl MaskRasterizer for SvgTextRasterizer {
    fn rasterize(
        &mut self,
        label: &BannerLabel,
        layout: &StackLayout,
        surface: SurfaceSize,
    ) -> BannerResult<Mask> {
        if self.fontdb.is_empty() {
            tracing::warn!("no fonts available; the text mask will be empty");
        }

        let doc = label_svg_document(label, layout, surface);
        let opts = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            font_resolver: make_font_resolver(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&doc, &opts)
            .map_err(|e| BannerError::raster(format!("parse label svg: {e}")))?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(surface.width, surface.height)
            .ok_or_else(|| BannerError::raster("failed to allocate label pixmap"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );

        Mask::from_rgba8(surface.width, surface.height, pixmap.data())
    }

    fn name(&self) -> &'static str {
        "svg"
    }
}

/// Build the SVG document for the label: one centered, top-aligned `<text>` per line.
pub fn label_svg_document(label: &BannerLabel, layout: &StackLayout, surface: SurfaceSize) -> String {
    let families = label
        .font_families
        .iter()
        .map(|f| css_family(f))
        .collect::<Vec<_>>()
        .join(", ");
    let weight = if label.bold { "bold" } else { "normal" };

    let mut out = String::with_capacity(1024);
    out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = surface.width,
        h = surface.height
    ));
    out.push_str(&format!(
        r##"<g fill="#ffffff" font-family="{}" font-weight="{weight}" text-anchor="middle" dominant-baseline="text-before-edge">"##,
        xml_escape(&families)
    ));
    for line in layout.lines(label) {
        if line.text.trim().is_empty() {
            continue;
        }
        out.push_str(&format!(
            r#"<text x="{:.3}" y="{:.3}" font-size="{:.3}">{}</text>"#,
            line.center_x,
            line.top,
            line.font_px,
            xml_escape(line.text)
        ));
    }
    out.push_str("</g></svg>");
    out
}

fn css_family(name: &str) -> String {
    match name {
        "serif" | "sans-serif" | "monospace" | "cursive" | "fantasy" => name.to_owned(),
        _ => format!("'{}'", name.replace('\'', "")),
    }
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory is not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), "skipping font: {e}");
        }
    }
}

/// Query the requested families first, then generic fallbacks, then any face at all.
fn make_font_resolver() -> usvg::FontResolver<'static> {
    use usvg::FontResolver;

    FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families = Vec::<usvg::fontdb::Family<'_>>::new();
            for family in font.families() {
                families.push(match family {
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => usvg::fontdb::Family::Name(s),
                });
            }
            families.push(usvg::fontdb::Family::SansSerif);
            families.push(usvg::fontdb::Family::Serif);

            let style = match font.style() {
                usvg::FontStyle::Normal => usvg::fontdb::Style::Normal,
                usvg::FontStyle::Italic => usvg::fontdb::Style::Italic,
                usvg::FontStyle::Oblique => usvg::fontdb::Style::Oblique,
            };

            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style,
            };

            if let Some(id) = fontdb.query(&query) {
                return Some(id);
            }
            fontdb.faces().next().map(|f| f.id)
        }),
        select_fallback: FontResolver::default_fallback_selector(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/svg.rs"]
mod tests;
