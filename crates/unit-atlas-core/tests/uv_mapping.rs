use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use unit_atlas_core::prelude::*;

#[test]
fn uv_width_recovers_fragment_width() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(99);
    let mut archive = MemoryArchive::new("tex.gaf");
    let mut names = BTreeSet::new();
    for i in 0..40 {
        let name = format!("t{:02}", i);
        let w = rng.gen_range(1..=48);
        let h = rng.gen_range(1..=48);
        archive = archive.with_entry(name.clone(), vec![ArchiveFrame::solid(w, h, 1)]);
        names.insert(name);
    }
    let index = TextureIndex::from_archives([Box::new(archive) as Box<dyn ArchiveReader>]);
    let atlas = compose_atlas(&names, &index, &AtlasConfig::default())
        .unwrap()
        .unwrap();

    let (cw, ch) = (atlas.width() as f64, atlas.height() as f64);
    for (name, f) in atlas.fragments() {
        let uv = atlas.uv(name);
        assert!(((uv.u_max - uv.u_min) * cw - f.rect.w as f64).abs() <= 1e-9);
        assert!(((uv.v_max - uv.v_min) * ch - f.rect.h as f64).abs() <= 1e-9);
        assert!(0.0 <= uv.u_min && uv.u_min < uv.u_max && uv.u_max <= 1.0);
        assert!(0.0 <= uv.v_min && uv.v_min < uv.v_max && uv.v_max <= 1.0);
    }
}

#[test]
fn uv_of_known_fragment() {
    let archive = MemoryArchive::new("tex.gaf")
        .with_entry("A", vec![ArchiveFrame::solid(16, 16, 1)])
        .with_entry("B", vec![ArchiveFrame::solid(32, 16, 1)]);
    let index = TextureIndex::from_archives([Box::new(archive) as Box<dyn ArchiveReader>]);
    let names: BTreeSet<String> = ["A", "B"].iter().map(|s| s.to_string()).collect();
    let atlas = compose_atlas(&names, &index, &AtlasConfig::default())
        .unwrap()
        .unwrap();
    let uv = atlas.uv("B");
    assert_eq!(
        uv,
        UvRect {
            u_min: 0.0,
            v_min: 0.25,
            u_max: 0.5,
            v_max: 0.5
        }
    );
}

#[test]
fn unknown_name_maps_to_zero_rect() {
    let index = TextureIndex::new();
    let atlas = compose_atlas(&BTreeSet::new(), &index, &AtlasConfig::default())
        .unwrap()
        .unwrap();
    assert_eq!(atlas.uv("nope"), UvRect::zero());
    assert_eq!(atlas.uv("nope").max(), [0.0, 0.0]);
}
