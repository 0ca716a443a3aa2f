use std::path::Path;

use crate::foundation::core::{Rgba8, SurfaceSize};
use crate::foundation::error::{BannerError, BannerResult};
use crate::input::pointer::DeviceKind;
use crate::text::label::BannerLabel;

/// Closed-open range `[min, max)` sampled uniformly.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpanF64 {
    pub min: f64,
    pub max: f64,
}

impl SpanF64 {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Map a unit sample `t` in `[0, 1)` into the span.
    pub fn lerp(self, t: f64) -> f64 {
        self.min + t * (self.max - self.min)
    }

    fn validate(self, what: &str) -> BannerResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(BannerError::validation(format!(
                "{what} must be a finite range with min <= max"
            )));
        }
        Ok(())
    }
}

/// Upper bound on live particles, whatever the surface size.
pub const MAX_PARTICLES: u32 = 1_000_000;

/// Particle population and sampling parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldConfig {
    /// Particle count at the reference surface size.
    pub base_count: u32,
    pub reference_width: u32,
    pub reference_height: u32,
    /// Random pixel samples per particle before giving up.
    pub max_sample_attempts: u32,
    /// Mask pixels with alpha strictly above this are "on".
    pub alpha_threshold: u8,
    pub size: SpanF64,
    /// Lifespan in ticks.
    pub life: SpanF64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            base_count: 7000,
            reference_width: 1920,
            reference_height: 1080,
            max_sample_attempts: 100,
            alpha_threshold: 128,
            size: SpanF64::new(0.5, 1.5),
            life: SpanF64::new(50.0, 150.0),
        }
    }
}

impl FieldConfig {
    /// `floor(base_count * sqrt(area / reference_area))`, capped at [`MAX_PARTICLES`].
    pub fn target_count(&self, surface: SurfaceSize) -> usize {
        let reference = (self.reference_width as f64) * (self.reference_height as f64);
        if reference <= 0.0 {
            return 0;
        }
        let ratio = (surface.area() as f64) / reference;
        let target = (f64::from(self.base_count) * ratio.sqrt()).floor();
        target.min(f64::from(MAX_PARTICLES)) as usize
    }
}

/// Pointer interaction parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionConfig {
    /// Pointer distance below which particles scatter.
    pub repulsion_radius: f64,
    /// Displacement from rest when the pointer sits on the particle.
    pub max_displacement: f64,
    /// Fraction of the remaining distance to rest covered per tick.
    pub ease_factor: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            repulsion_radius: 240.0,
            max_displacement: 60.0,
            ease_factor: 0.1,
        }
    }
}

/// Viewport-dependent text scale.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewportConfig {
    /// Surfaces narrower than this use `narrow_scale`.
    pub narrow_breakpoint_px: u32,
    pub narrow_scale: f64,
    pub wide_scale: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            narrow_breakpoint_px: 768,
            narrow_scale: 0.6,
            wide_scale: 1.0,
        }
    }
}

impl ViewportConfig {
    pub fn scale_for(&self, surface: SurfaceSize) -> f64 {
        if surface.width < self.narrow_breakpoint_px {
            self.narrow_scale
        } else {
            self.wide_scale
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    pub base: Rgba8,
    pub scattered: Rgba8,
    pub background: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            base: Rgba8::WHITE,
            scattered: Rgba8::opaque(255, 0, 0),
            background: Rgba8::BLACK,
        }
    }
}

/// Everything the banner needs besides a rasterizer and a surface.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BannerConfig {
    pub label: BannerLabel,
    pub field: FieldConfig,
    pub motion: MotionConfig,
    pub viewport: ViewportConfig,
    pub palette: Palette,
    pub device: DeviceKind,
    /// Seed for particle sampling; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl BannerConfig {
    pub fn from_json_str(s: &str) -> BannerResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> BannerResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            BannerError::validation(format!("failed to read config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> BannerResult<()> {
        self.label.validate()?;

        let f = &self.field;
        if f.reference_width == 0 || f.reference_height == 0 {
            return Err(BannerError::validation(
                "field reference size must be non-zero",
            ));
        }
        if f.base_count > MAX_PARTICLES {
            return Err(BannerError::validation(format!(
                "field base_count {} exceeds the limit of {MAX_PARTICLES}",
                f.base_count
            )));
        }
        if f.max_sample_attempts == 0 {
            return Err(BannerError::validation(
                "field max_sample_attempts must be > 0",
            ));
        }
        f.size.validate("field size")?;
        f.life.validate("field life")?;
        if f.size.min <= 0.0 {
            return Err(BannerError::validation("field size must be > 0"));
        }
        if f.life.min <= 0.0 {
            return Err(BannerError::validation("field life must be > 0"));
        }

        let m = &self.motion;
        if !m.repulsion_radius.is_finite() || m.repulsion_radius <= 0.0 {
            return Err(BannerError::validation(
                "motion repulsion_radius must be finite and > 0",
            ));
        }
        if !m.max_displacement.is_finite() {
            return Err(BannerError::validation(
                "motion max_displacement must be finite",
            ));
        }
        if !(0.0..=1.0).contains(&m.ease_factor) {
            return Err(BannerError::validation(
                "motion ease_factor must be within [0, 1]",
            ));
        }

        if self.palette.background.a != u8::MAX {
            return Err(BannerError::validation(
                "palette background must be opaque",
            ));
        }

        let v = &self.viewport;
        for (name, s) in [("narrow_scale", v.narrow_scale), ("wide_scale", v.wide_scale)] {
            if !s.is_finite() || s <= 0.0 {
                return Err(BannerError::validation(format!(
                    "viewport {name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
