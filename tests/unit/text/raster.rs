use super::*;

fn solid() -> FnRasterizer<impl FnMut(&StackLayout, SurfaceSize) -> BannerResult<Mask>> {
    FnRasterizer::new(|_layout: &StackLayout, s: SurfaceSize| {
        Ok(Mask::from_fn(s.width, s.height, |_, _| 255))
    })
}

#[test]
fn zero_area_surface_is_rejected_without_calling_backend() {
    let mut called = false;
    let mut r = FnRasterizer::new(|_layout: &StackLayout, s: SurfaceSize| {
        called = true;
        Ok(Mask::empty(s.width, s.height))
    });
    let label = BannerLabel::default();
    let err = rasterize_text(&mut r, &label, SurfaceSize::new(0, 0), 1.0).unwrap_err();
    assert!(matches!(err, BannerError::Validation(_)));
    let err = rasterize_text(&mut r, &label, SurfaceSize::new(100, 0), 1.0).unwrap_err();
    assert!(matches!(err, BannerError::Validation(_)));
    drop(r);
    assert!(!called);
}

#[test]
fn layout_and_scale_are_reported() {
    let mut r = solid();
    let out = rasterize_text(
        &mut r,
        &BannerLabel::default(),
        SurfaceSize::new(320, 240),
        0.6,
    )
    .unwrap();
    assert_eq!(out.scale(), 0.6);
    assert_eq!(out.mask.size(), SurfaceSize::new(320, 240));
    assert_eq!(out.layout, StackLayout::new(SurfaceSize::new(320, 240), 0.6));
}

#[test]
fn mismatched_mask_size_is_a_raster_error() {
    let mut r = FnRasterizer::new(|_layout: &StackLayout, _s: SurfaceSize| Ok(Mask::empty(1, 1)));
    let err = rasterize_text(
        &mut r,
        &BannerLabel::default(),
        SurfaceSize::new(8, 8),
        1.0,
    )
    .unwrap_err();
    assert!(matches!(err, BannerError::Raster(_)));
}

#[test]
fn backend_errors_propagate() {
    let mut r = FnRasterizer::new(|_layout: &StackLayout, _s: SurfaceSize| {
        Err(BannerError::raster("capture failed"))
    });
    let err = rasterize_text(
        &mut r,
        &BannerLabel::default(),
        SurfaceSize::new(8, 8),
        1.0,
    )
    .unwrap_err();
    assert!(err.to_string().contains("capture failed"));
}

#[test]
fn invalid_scale_is_rejected() {
    let mut r = solid();
    let label = BannerLabel::default();
    assert!(rasterize_text(&mut r, &label, SurfaceSize::new(8, 8), 0.0).is_err());
    assert!(rasterize_text(&mut r, &label, SurfaceSize::new(8, 8), f64::NAN).is_err());
}
