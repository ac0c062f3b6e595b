use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use unit_atlas_core::packer::Packer;
use unit_atlas_core::packer::grid::GridPacker;
use unit_atlas_core::prelude::*;

fn generate_fragments(count: usize, min_size: u32, max_size: u32) -> Vec<(String, u32, u32)> {
    let mut rng = StdRng::seed_from_u64(0xA71A5);
    (0..count)
        .map(|i| {
            let w = rng.gen_range(min_size..=max_size);
            let h = rng.gen_range(min_size..=max_size);
            (format!("tex_{}", i), w, h)
        })
        .collect()
}

fn bench_grid_first_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_first_fit");

    for count in [50usize, 100, 200] {
        let fragments = generate_fragments(count, 4, 64);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &fragments, |b, frags| {
            b.iter(|| {
                let mut packer = GridPacker::new(1024, 1024);
                for (_, w, h) in frags {
                    black_box(packer.pack(*w, *h, false));
                }
                black_box(packer.used_cells())
            });
        });
    }

    group.finish();
}

fn bench_compose_atlas(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose_atlas");
    group.sample_size(20);

    for count in [25usize, 75] {
        let fragments = generate_fragments(count, 8, 64);
        let mut archive = MemoryArchive::new("textures.gaf");
        for (i, (name, w, h)) in fragments.iter().enumerate() {
            archive = archive.with_entry(name.clone(), vec![ArchiveFrame::solid(*w, *h, i as u8)]);
        }
        let index = TextureIndex::from_archives([Box::new(archive) as Box<dyn ArchiveReader>]);
        let mut names: BTreeSet<String> = fragments.into_iter().map(|(n, _, _)| n).collect();
        names.insert("__colorIndex7".to_string());
        let cfg = AtlasConfig::default();

        group.throughput(Throughput::Elements(names.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &names, |b, names| {
            b.iter(|| black_box(compose_atlas(names, &index, &cfg)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_grid_first_fit, bench_compose_atlas);
criterion_main!(benches);
