//! Particle banner: a text-to-particle "coming soon" effect.
//!
//! A four-line label is rasterized into an offscreen alpha [`Mask`], the mask is sampled to seed
//! particles, and each tick moves them (pointer repulsion or easing back to rest), ages them, and
//! respawns expired ones. The engine is headless:
//!
//! - Build a [`Scene`] from a [`BannerConfig`], a [`MaskRasterizer`] and a [`SurfaceSize`]
//! - Feed it [`InputEvent`]s and call [`Scene::tick`] once per display refresh
//! - Or hand it to an [`AnimationLoop`] that renders every tick into a [`FrameSink`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod encode;
pub(crate) mod input;
pub(crate) mod particles;
pub(crate) mod render;
pub(crate) mod scene;
pub(crate) mod schedule;
pub(crate) mod text;

pub use crate::foundation::core::{Fps, FrameIndex, Point, Rect, Rgba8, SurfaceSize, Vec2};
pub use crate::foundation::error::{BannerError, BannerResult};

pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, ensure_parent_dir, is_ffmpeg_on_path};
pub use crate::encode::png::{PngSequenceSink, write_frame_png, write_mask_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, NullSink, SinkConfig};
pub use crate::input::pointer::{DeviceKind, InputEvent, PointerState};
pub use crate::input::script::{EventScript, ScriptedEvent};
pub use crate::particles::field::{ParticleField, StepStats};
pub use crate::particles::particle::{Category, Dot, Particle};
pub use crate::particles::sampler::ParticleSampler;
pub use crate::render::cpu::CpuFrameRenderer;
pub use crate::render::frame::FrameRGBA;
pub use crate::scene::banner::Scene;
pub use crate::scene::config::{
    BannerConfig, FieldConfig, MAX_PARTICLES, MotionConfig, Palette, SpanF64, ViewportConfig,
};
pub use crate::scene::metadata::{SiteCredit, SiteMetadata};
pub use crate::schedule::animation::{AnimationLoop, LoopStats};
pub use crate::schedule::scheduler::{
    Clock, FrameScheduler, ManualClock, OfflineScheduler, PacedScheduler, SystemClock,
};
pub use crate::schedule::teardown::TeardownHandle;
pub use crate::text::glyph::{GlyphRasterizer, TextBrushRgba8, TextLayoutEngine};
pub use crate::text::label::{BannerLabel, LineSpec, StackLayout};
pub use crate::text::mask::Mask;
pub use crate::text::raster::{
    FnRasterizer, MAX_SURFACE_DIM, MaskRasterizer, RasterizedText, rasterize_text,
};
pub use crate::text::svg::{SvgTextRasterizer, label_svg_document};
