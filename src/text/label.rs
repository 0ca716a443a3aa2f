//! The four-line announcement label and the vertical stack geometry shared by drawing and
//! sampling.

use crate::foundation::core::{Point, SurfaceSize};
use crate::foundation::error::{BannerError, BannerResult};
use crate::particles::particle::Category;

/// Base size of the emphasis lines at scale 1.0.
pub const EMPHASIS_FONT_PX: f64 = 60.0;
/// Base size of the heading and closing lines at scale 1.0.
pub const TITLE_FONT_PX: f64 = 40.0;
/// Line height as a multiple of the emphasis font size.
pub const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// Text content and font selection for the banner.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BannerLabel {
    pub heading: String,
    pub first_emphasis: String,
    pub second_emphasis: String,
    pub closing: String,
    /// Font families in preference order; generic names (`sans-serif`, `serif`, `monospace`)
    /// are honored by the SVG rasterizer.
    pub font_families: Vec<String>,
    pub bold: bool,
}

impl Default for BannerLabel {
    fn default() -> Self {
        Self {
            heading: "DarkLead!".to_owned(),
            first_emphasis: "SHADOW".to_owned(),
            second_emphasis: "APOCALYPSE CTF".to_owned(),
            closing: "Coming Soon!".to_owned(),
            font_families: vec!["Arial".to_owned(), "sans-serif".to_owned()],
            bold: true,
        }
    }
}

impl BannerLabel {
    pub fn validate(&self) -> BannerResult<()> {
        if self.font_families.is_empty() {
            return Err(BannerError::validation(
                "label font_families must name at least one family",
            ));
        }
        let all_blank = [
            &self.heading,
            &self.first_emphasis,
            &self.second_emphasis,
            &self.closing,
        ]
        .iter()
        .all(|s| s.trim().is_empty());
        if all_blank {
            return Err(BannerError::validation("label must contain some text"));
        }
        Ok(())
    }
}

/// One positioned line of the label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSpec<'a> {
    pub text: &'a str,
    pub font_px: f64,
    /// Horizontal center in surface pixels.
    pub center_x: f64,
    /// Top of the em box in surface pixels.
    pub top: f64,
    pub category: Category,
}

/// Vertical stack geometry for a given surface and scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackLayout {
    pub scale: f64,
    pub font_px: f64,
    pub title_font_px: f64,
    pub line_height: f64,
    pub total_height: f64,
    /// Top-center of the stack in surface pixels.
    pub origin: Point,
}

impl StackLayout {
    pub fn new(surface: SurfaceSize, scale: f64) -> Self {
        let font_px = EMPHASIS_FONT_PX * scale;
        let title_font_px = TITLE_FONT_PX * scale;
        let line_height = font_px * LINE_HEIGHT_FACTOR;
        let total_height = title_font_px + line_height * 2.0 + font_px * 0.8;
        let center = surface.center();
        Self {
            scale,
            font_px,
            title_font_px,
            line_height,
            total_height,
            origin: Point::new(center.x, center.y - total_height / 2.0),
        }
    }

    /// Offset of the first emphasis line below the stack top.
    fn first_emphasis_offset(&self) -> f64 {
        self.title_font_px + self.font_px * 0.5
    }

    /// Heading, two emphasis lines, and the closing line, top to bottom.
    pub fn lines<'a>(&self, label: &'a BannerLabel) -> [LineSpec<'a>; 4] {
        let x = self.origin.x;
        let y = self.origin.y;
        let emph = self.first_emphasis_offset();
        [
            LineSpec {
                text: &label.heading,
                font_px: self.title_font_px,
                center_x: x,
                top: y,
                category: Category::Title,
            },
            LineSpec {
                text: &label.first_emphasis,
                font_px: self.font_px,
                center_x: x,
                top: y + emph,
                category: Category::Shadow,
            },
            LineSpec {
                text: &label.second_emphasis,
                font_px: self.font_px,
                center_x: x,
                top: y + emph + self.line_height,
                category: Category::Apocalypse,
            },
            LineSpec {
                text: &label.closing,
                font_px: self.title_font_px,
                center_x: x,
                top: y + emph + self.line_height * 2.0,
                category: Category::Title,
            },
        ]
    }

    /// Classify a surface row into the label line it belongs to.
    ///
    /// The bands are the same offsets used to place the lines; rows outside both emphasis bands
    /// (heading, closing, and the gaps around them) count as [`Category::Title`].
    pub fn classify_row(&self, y: f64) -> Category {
        let rel = y - self.origin.y;
        let emph = self.first_emphasis_offset();
        if rel > self.title_font_px && rel < emph + self.line_height {
            Category::Shadow
        } else if rel >= emph + self.line_height && rel < emph + self.line_height * 2.0 {
            Category::Apocalypse
        } else {
            Category::Title
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/label.rs"]
mod tests;
