use super::*;

#[test]
fn full_scale_geometry_matches_line_height_formula() {
    let layout = StackLayout::new(SurfaceSize::new(1920, 1080), 1.0);
    assert_eq!(layout.font_px, 60.0);
    assert_eq!(layout.title_font_px, 40.0);
    assert!((layout.line_height - 72.0).abs() < 1e-9);
    // 40 + 72 * 2 + 48
    assert!((layout.total_height - 232.0).abs() < 1e-9);
    assert_eq!(layout.origin.x, 960.0);
    assert!((layout.origin.y - (540.0 - 116.0)).abs() < 1e-9);
}

#[test]
fn narrow_scale_shrinks_everything() {
    let layout = StackLayout::new(SurfaceSize::new(400, 800), 0.6);
    assert!((layout.font_px - 36.0).abs() < 1e-9);
    assert!((layout.title_font_px - 24.0).abs() < 1e-9);
    assert!((layout.total_height - 232.0 * 0.6).abs() < 1e-9);
}

#[test]
fn lines_are_stacked_top_to_bottom() {
    let label = BannerLabel::default();
    let layout = StackLayout::new(SurfaceSize::new(1000, 1000), 1.0);
    let lines = layout.lines(&label);
    let top = layout.origin.y;

    assert_eq!(lines[0].text, "DarkLead!");
    assert_eq!(lines[0].top, top);
    assert_eq!(lines[1].text, "SHADOW");
    assert!((lines[1].top - (top + 70.0)).abs() < 1e-9);
    assert_eq!(lines[2].text, "APOCALYPSE CTF");
    assert!((lines[2].top - (top + 142.0)).abs() < 1e-9);
    assert_eq!(lines[3].text, "Coming Soon!");
    assert!((lines[3].top - (top + 214.0)).abs() < 1e-9);

    assert!(lines.iter().all(|l| l.center_x == 500.0));
    assert_eq!(lines[0].font_px, 40.0);
    assert_eq!(lines[3].font_px, 40.0);
}

#[test]
fn classify_row_uses_drawing_offsets() {
    let layout = StackLayout::new(SurfaceSize::new(1000, 1000), 1.0);
    let top = layout.origin.y;

    assert_eq!(layout.classify_row(top + 10.0), Category::Title);
    // Exactly at the heading font size is still the heading band (strict comparison).
    assert_eq!(layout.classify_row(top + 40.0), Category::Title);
    assert_eq!(layout.classify_row(top + 41.0), Category::Shadow);
    assert_eq!(layout.classify_row(top + 141.0), Category::Shadow);
    assert_eq!(layout.classify_row(top + 142.0), Category::Apocalypse);
    assert_eq!(layout.classify_row(top + 213.0), Category::Apocalypse);
    assert_eq!(layout.classify_row(top + 214.0), Category::Title);
    assert_eq!(layout.classify_row(top - 5.0), Category::Title);
}

#[test]
fn label_validation() {
    assert!(BannerLabel::default().validate().is_ok());

    let mut label = BannerLabel::default();
    label.font_families.clear();
    assert!(label.validate().is_err());

    let label = BannerLabel {
        heading: " ".to_owned(),
        first_emphasis: String::new(),
        second_emphasis: String::new(),
        closing: String::new(),
        ..BannerLabel::default()
    };
    assert!(label.validate().is_err());
}
