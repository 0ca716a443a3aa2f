use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::{FrameIndex, SurfaceSize};
use crate::input::pointer::InputEvent;
use crate::render::frame::FrameRGBA;
use crate::scene::config::BannerConfig;
use crate::schedule::scheduler::OfflineScheduler;
use crate::text::label::StackLayout;
use crate::text::mask::Mask;
use crate::text::raster::FnRasterizer;

fn scene(width: u32, height: u32) -> Scene {
    let raster = FnRasterizer::new(|_layout: &StackLayout, s: SurfaceSize| {
        Ok(Mask::from_fn(s.width, s.height, |_, _| 255))
    });
    Scene::new(
        BannerConfig {
            seed: Some(3),
            ..BannerConfig::default()
        },
        Box::new(raster),
        SurfaceSize::new(width, height),
    )
    .unwrap()
}

fn fps() -> Fps {
    Fps::new(60, 1).unwrap()
}

#[test]
fn renders_one_frame_per_tick_in_order() {
    let mut scene = scene(64, 32);
    let mut sink = InMemorySink::new();
    let stats = AnimationLoop::new(fps())
        .run(&mut scene, &mut OfflineScheduler::new(4), &mut sink)
        .unwrap();

    assert_eq!(stats.ticks, 4);
    assert_eq!(stats.frames_rendered, 4);
    assert!(!stats.torn_down);
    assert!(sink.ended());
    assert_eq!(
        sink.config(),
        Some(SinkConfig {
            width: 64,
            height: 32,
            fps: fps()
        })
    );
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1, 2, 3]);
    assert_eq!(stats.final_particles, scene.field().len());
}

#[test]
fn scripted_events_are_applied_on_their_tick() {
    let mut script = EventScript::new();
    script.push(1, InputEvent::TouchMove { x: 5.0, y: 5.0 });
    script.push(2, InputEvent::resize(SurfaceSize::new(40, 20)));
    script.push(99, InputEvent::Leave);

    let mut scene = scene(64, 32);
    let mut sink = InMemorySink::new();
    let stats = AnimationLoop::new(fps())
        .with_script(script)
        .run(&mut scene, &mut OfflineScheduler::new(3), &mut sink)
        .unwrap();

    assert_eq!(stats.events_applied, 2);
    assert_eq!(stats.defaults_suppressed, 1);
    let sizes: Vec<(u32, u32)> = sink
        .frames()
        .iter()
        .map(|(_, f)| (f.width, f.height))
        .collect();
    // The resize lands before tick 2 is stepped and rendered.
    assert_eq!(sizes, vec![(64, 32), (64, 32), (40, 20)]);
}

struct StopAfter {
    inner: InMemorySink,
    handle: TeardownHandle,
    after: usize,
}

impl FrameSink for StopAfter {
    fn begin(&mut self, cfg: SinkConfig) -> BannerResult<()> {
        self.inner.begin(cfg)
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> BannerResult<()> {
        self.inner.push_frame(idx, frame)?;
        if self.inner.frames().len() >= self.after {
            self.handle.request();
        }
        Ok(())
    }

    fn end(&mut self) -> BannerResult<()> {
        self.inner.end()
    }
}

#[test]
fn teardown_stops_the_loop_and_finalizes_the_sink() {
    let mut looper = AnimationLoop::new(fps());
    let mut sink = StopAfter {
        inner: InMemorySink::new(),
        handle: looper.teardown_handle(),
        after: 2,
    };
    let mut scene = scene(16, 16);
    let stats = looper
        .run(&mut scene, &mut OfflineScheduler::unbounded(), &mut sink)
        .unwrap();

    assert!(stats.torn_down);
    assert_eq!(stats.ticks, 2);
    assert_eq!(sink.inner.frames().len(), 2);
    assert!(sink.inner.ended());
}

#[test]
fn zero_area_surface_skips_rendering() {
    let mut scene = scene(0, 0);
    let mut sink = InMemorySink::new();
    let stats = AnimationLoop::new(fps())
        .run(&mut scene, &mut OfflineScheduler::new(2), &mut sink)
        .unwrap();
    assert_eq!(stats.frames_skipped, 2);
    assert_eq!(stats.frames_rendered, 0);
    assert_eq!(stats.final_particles, 0);
    assert!(sink.frames().is_empty());
}
