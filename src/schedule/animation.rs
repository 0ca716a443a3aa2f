use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::Fps;
use crate::foundation::error::BannerResult;
use crate::input::script::EventScript;
use crate::render::cpu::CpuFrameRenderer;
use crate::scene::banner::Scene;
use crate::schedule::scheduler::FrameScheduler;
use crate::schedule::teardown::TeardownHandle;

/// Counters returned by [`AnimationLoop::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoopStats {
    /// Ticks the scene advanced.
    pub ticks: u64,
    /// Frames handed to the sink.
    pub frames_rendered: u64,
    /// Ticks not rendered because the surface had no area.
    pub frames_skipped: u64,
    /// Scripted events delivered to the scene.
    pub events_applied: u64,
    /// Events for which default host handling (scrolling) was suppressed.
    pub defaults_suppressed: u64,
    /// Particles alive after the last tick.
    pub final_particles: usize,
    /// The loop stopped because teardown was requested.
    pub torn_down: bool,
}

/// Drives a [`Scene`]: one tick per scheduler frame, each rendered and pushed to a sink.
///
/// Per tick, in order: teardown check, scripted input for that tick, scene tick (which applies
/// any pending resize first), render, push.
pub struct AnimationLoop {
    fps: Fps,
    script: EventScript,
    teardown: TeardownHandle,
    renderer: CpuFrameRenderer,
}

impl AnimationLoop {
    pub fn new(fps: Fps) -> Self {
        Self {
            fps,
            script: EventScript::new(),
            teardown: TeardownHandle::new(),
            renderer: CpuFrameRenderer::new(),
        }
    }

    pub fn with_script(mut self, script: EventScript) -> Self {
        self.script = script;
        self
    }

    pub fn with_teardown(mut self, teardown: TeardownHandle) -> Self {
        self.teardown = teardown;
        self
    }

    /// A handle that stops this loop from any thread.
    pub fn teardown_handle(&self) -> TeardownHandle {
        self.teardown.clone()
    }

    #[tracing::instrument(skip_all, fields(fps = self.fps.as_f64()))]
    pub fn run(
        &mut self,
        scene: &mut Scene,
        scheduler: &mut dyn FrameScheduler,
        sink: &mut dyn FrameSink,
    ) -> BannerResult<LoopStats> {
        let surface = scene.surface();
        sink.begin(SinkConfig {
            width: surface.width,
            height: surface.height,
            fps: self.fps,
        })?;

        let mut stats = LoopStats::default();
        loop {
            if self.teardown.is_requested() {
                tracing::debug!(ticks = stats.ticks, "teardown requested");
                stats.torn_down = true;
                break;
            }
            let Some(idx) = scheduler.next_frame() else {
                break;
            };

            for event in self.script.events_at(idx.0) {
                stats.events_applied += 1;
                if scene.handle_event(event) {
                    stats.defaults_suppressed += 1;
                }
            }

            let step = scene.tick();
            stats.ticks += 1;
            tracing::trace!(
                tick = idx.0,
                drawn = step.drawn,
                scattered = step.scattered,
                respawned = step.respawned,
                "tick"
            );

            let surface = scene.surface();
            if surface.is_empty() {
                stats.frames_skipped += 1;
                continue;
            }
            let frame = self.renderer.render(
                surface,
                scene.config().palette.background,
                scene.draws(),
            )?;
            sink.push_frame(idx, &frame)?;
            stats.frames_rendered += 1;
        }

        sink.end()?;
        stats.final_particles = scene.field().len();
        tracing::debug!(
            ticks = stats.ticks,
            rendered = stats.frames_rendered,
            particles = stats.final_particles,
            "animation loop finished"
        );
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/animation.rs"]
mod tests;
