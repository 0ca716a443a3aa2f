use super::*;
use serde_json::json;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(60, 0).is_err());
    let fps = Fps::new(60, 1).unwrap();
    assert!((fps.frames_to_secs(30) - 0.5).abs() < 1e-12);
}

#[test]
fn surface_area_and_center() {
    let s = SurfaceSize::new(1920, 1080);
    assert_eq!(s.area(), 1920 * 1080);
    assert_eq!(s.center(), Point::new(960.0, 540.0));
    assert!(!s.is_empty());
    assert!(SurfaceSize::new(0, 10).is_empty());
    assert!(SurfaceSize::new(10, 0).is_empty());
}

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: Rgba8 = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, Rgba8::opaque(255, 0, 0));

    let c: Rgba8 = serde_json::from_value(json!("#0000FF80")).unwrap();
    assert_eq!(c.to_array(), [0, 0, 255, 128]);

    assert!(serde_json::from_value::<Rgba8>(json!("#fff")).is_err());
    assert!(serde_json::from_value::<Rgba8>(json!("#gg0000")).is_err());
}

#[test]
fn parses_arrays_and_serializes_as_hex() {
    let c: Rgba8 = serde_json::from_value(json!([1, 2, 3])).unwrap();
    assert_eq!(c, Rgba8::opaque(1, 2, 3));
    assert_eq!(serde_json::to_value(c).unwrap(), json!("#010203"));

    let c: Rgba8 = serde_json::from_value(json!([1, 2, 3, 4])).unwrap();
    assert_eq!(serde_json::to_value(c).unwrap(), json!("#01020304"));

    assert!(serde_json::from_value::<Rgba8>(json!([1, 2])).is_err());
}
