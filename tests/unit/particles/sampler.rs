use super::*;
use crate::foundation::core::SurfaceSize;
use crate::particles::particle::Category;
use rand::SeedableRng as _;
use rand::rngs::StdRng;

fn setup(mask: Mask) -> (ParticleSampler, StackLayout, Mask) {
    let layout = StackLayout::new(mask.size(), 1.0);
    (ParticleSampler::new(&BannerConfig::default()), layout, mask)
}

#[test]
fn empty_mask_yields_none_after_bounded_attempts() {
    let (sampler, layout, mask) = setup(Mask::empty(64, 64));
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..10 {
        assert!(sampler.sample(&mask, &layout, &mut rng).is_none());
    }
}

#[test]
fn threshold_is_strict() {
    let (sampler, layout, mask) = setup(Mask::from_fn(16, 16, |_, _| 128));
    let mut rng = StdRng::seed_from_u64(2);
    assert!(sampler.sample(&mask, &layout, &mut rng).is_none());

    let (sampler, layout, mask) = setup(Mask::from_fn(16, 16, |_, _| 129));
    assert!(sampler.sample(&mask, &layout, &mut rng).is_some());
}

#[test]
fn particles_land_on_lit_pixels_with_ranged_attributes() {
    // Only a 4x4 block at (10..14, 20..24) is lit.
    let mask = Mask::from_fn(64, 64, |x, y| {
        if (10..14).contains(&x) && (20..24).contains(&y) {
            255
        } else {
            0
        }
    });
    let (sampler, layout, mask) = setup(mask);
    let mut rng = StdRng::seed_from_u64(3);

    let mut found = 0;
    for _ in 0..500 {
        let Some(p) = sampler.sample(&mask, &layout, &mut rng) else {
            continue;
        };
        found += 1;
        assert!((10.0..14.0).contains(&p.x));
        assert!((20.0..24.0).contains(&p.y));
        assert_eq!(p.x.fract(), 0.0);
        assert_eq!(p.y.fract(), 0.0);
        assert_eq!((p.x, p.y), (p.base_x, p.base_y));
        assert!((0.5..1.5).contains(&p.size));
        assert!((50.0..150.0).contains(&p.life));
        assert_eq!(p.color, Rgba8::WHITE);
        assert_eq!(p.scattered_color, Rgba8::opaque(255, 0, 0));
    }
    assert!(found > 0);
}

#[test]
fn category_follows_the_row_band() {
    let surface = SurfaceSize::new(200, 1000);
    let layout = StackLayout::new(surface, 1.0);
    let row = (layout.origin.y + 100.0) as u32;
    let mask = Mask::from_fn(surface.width, surface.height, |_, y| if y == row { 255 } else { 0 });
    let sampler = ParticleSampler::new(&BannerConfig {
        field: crate::scene::config::FieldConfig {
            max_sample_attempts: 100_000,
            ..Default::default()
        },
        ..BannerConfig::default()
    });
    let mut rng = StdRng::seed_from_u64(4);
    let p = sampler.sample(&mask, &layout, &mut rng).unwrap();
    assert_eq!(p.y, f64::from(row));
    assert_eq!(p.category, Category::Shadow);
}

#[test]
fn same_seed_same_particle() {
    let (sampler, layout, mask) = setup(Mask::from_fn(32, 32, |x, _| if x % 2 == 0 { 255 } else { 0 }));
    let a = sampler.sample(&mask, &layout, &mut StdRng::seed_from_u64(9));
    let b = sampler.sample(&mask, &layout, &mut StdRng::seed_from_u64(9));
    assert_eq!(a, b);
}
