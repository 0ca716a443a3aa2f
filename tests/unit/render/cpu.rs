use super::*;

fn dot(x: f64, y: f64, size: f64, color: Rgba8) -> Dot {
    Dot { x, y, size, color }
}

#[test]
fn empty_draw_list_is_solid_background() {
    let mut r = CpuFrameRenderer::new();
    let frame = r.render(SurfaceSize::new(16, 8), Rgba8::BLACK, &[]).unwrap();
    assert_eq!((frame.width, frame.height), (16, 8));
    assert_eq!(frame.data.len(), 16 * 8 * 4);
    assert!(frame.premultiplied);
    assert_eq!(frame.count_color(Rgba8::BLACK), 16 * 8);
}

#[test]
fn pixel_aligned_dots_fill_their_squares() {
    let mut r = CpuFrameRenderer::new();
    let red = Rgba8::opaque(255, 0, 0);
    let frame = r
        .render(
            SurfaceSize::new(16, 16),
            Rgba8::BLACK,
            &[
                dot(2.0, 3.0, 1.0, Rgba8::WHITE),
                dot(8.0, 8.0, 2.0, red),
            ],
        )
        .unwrap();

    assert_eq!(frame.pixel(2, 3), Some(Rgba8::WHITE));
    assert_eq!(frame.pixel(3, 3), Some(Rgba8::BLACK));
    for (x, y) in [(8, 8), (9, 8), (8, 9), (9, 9)] {
        assert_eq!(frame.pixel(x, y), Some(red));
    }
    assert_eq!(frame.count_color(red), 4);
    assert_eq!(frame.pixel(16, 0), None);
}

#[test]
fn context_is_reused_and_resized() {
    let mut r = CpuFrameRenderer::new();
    let a = r
        .render(SurfaceSize::new(8, 8), Rgba8::BLACK, &[dot(0.0, 0.0, 1.0, Rgba8::WHITE)])
        .unwrap();
    // A second frame must not keep dots from the first.
    let b = r.render(SurfaceSize::new(8, 8), Rgba8::BLACK, &[]).unwrap();
    assert_eq!(a.pixel(0, 0), Some(Rgba8::WHITE));
    assert_eq!(b.pixel(0, 0), Some(Rgba8::BLACK));

    let c = r.render(SurfaceSize::new(4, 2), Rgba8::WHITE, &[]).unwrap();
    assert_eq!(c.data.len(), 4 * 2 * 4);
    assert_eq!(c.count_color(Rgba8::WHITE), 8);
}

#[test]
fn degenerate_surfaces_are_rejected() {
    let mut r = CpuFrameRenderer::new();
    assert!(r.render(SurfaceSize::new(0, 8), Rgba8::BLACK, &[]).is_err());
    assert!(r.render(SurfaceSize::new(70_000, 8), Rgba8::BLACK, &[]).is_err());
}
