use super::*;
use crate::foundation::core::Fps;

fn frame(w: u32, h: u32, v: u8) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: vec![v; (w * h * 4) as usize],
        premultiplied: true,
    }
}

fn out_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_png").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn sequence_writes_numbered_files() {
    let dir = out_dir("sequence");
    let mut sink = PngSequenceSink::new(&dir).with_prefix("t_");
    sink.begin(SinkConfig {
        width: 4,
        height: 2,
        fps: Fps::new(30, 1).unwrap(),
    })
    .unwrap();
    sink.push_frame(FrameIndex(0), &frame(4, 2, 255)).unwrap();
    sink.push_frame(FrameIndex(7), &frame(4, 2, 255)).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.written(), 2);
    assert!(dir.join("t_00000.png").is_file());
    let img = image::open(dir.join("t_00007.png")).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (4, 2));
    assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
}

#[test]
fn out_of_order_frames_are_rejected() {
    let dir = out_dir("order");
    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(SinkConfig {
        width: 1,
        height: 1,
        fps: Fps::new(30, 1).unwrap(),
    })
    .unwrap();
    sink.push_frame(FrameIndex(3), &frame(1, 1, 255)).unwrap();
    assert!(sink.push_frame(FrameIndex(3), &frame(1, 1, 255)).is_err());
}

#[test]
fn mask_png_is_grayscale_alpha() {
    let dir = out_dir("mask");
    let path = dir.join("mask.png");
    let mask = Mask::new(2, 1, vec![0, 200]).unwrap();
    write_mask_png(&path, &mask).unwrap();
    let img = image::open(&path).unwrap().to_luma8();
    assert_eq!(img.get_pixel(0, 0).0, [0]);
    assert_eq!(img.get_pixel(1, 0).0, [200]);
}
