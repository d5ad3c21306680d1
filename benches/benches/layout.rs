// Copyright 2026 the Probe HUD Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for the Probe HUD estimator and renderer.
//!
//! Scenes are synthetic: a block identity followed by `rows` bar rows and one
//! detached inventory of `slots` slots.

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use probe_hud::{
    Bar, Canvas, HudConfig, HudTextures, Identity, ItemStack, LayoutBounds, MonospaceMetrics,
    ProbeEntry, RenderMode, Renderer, measure, normalize, units,
};
use probe_hud_imaging::ItemId;
use probe_hud_imaging_ref::RefBackend;

fn scene(rows: u32, slots: u32) -> Vec<ProbeEntry> {
    let mut raw = Vec::new();
    for i in 0..rows {
        let unit = if i % 2 == 0 { units::FORGE_UNITS } else { units::PERCENT };
        raw.push(
            ProbeEntry::new()
                .with_label(format!("Row {i}"))
                .with_bar(Bar::new(0.0, f64::from(i * 7 % 100), 100.0).with_unit(unit)),
        );
    }
    raw.push(ProbeEntry::new().with_inventory((0..slots).map(|i| {
        (i % 3 != 0).then(|| ItemStack::new(ItemId(i), i * 13 % 200))
    })));
    normalize(&raw, Identity::new(ItemStack::single(ItemId(1)), "Bench Block"))
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("probe_hud");
    group.sample_size(50);
    let metrics = MonospaceMetrics::default();

    for &(rows, slots) in &[(2_u32, 9_u32), (8_u32, 27_u32), (32_u32, 108_u32)] {
        let entries = scene(rows, slots);

        group.bench_function(format!("measure(rows={rows},slots={slots})"), |b| {
            b.iter(|| {
                black_box(measure(
                    black_box(&entries),
                    &metrics,
                    LayoutBounds::uniform(0, 0),
                ))
            });
        });

        group.bench_function(format!("render(rows={rows},slots={slots})"), |b| {
            b.iter_batched(
                || {
                    let mut backend = RefBackend::default();
                    let textures = HudTextures::register(&mut backend);
                    let renderer =
                        Renderer::new(HudConfig::default(), textures).expect("valid config");
                    (backend, renderer)
                },
                |(mut backend, renderer)| {
                    let rendered = renderer.render(
                        &mut backend,
                        &entries,
                        &metrics,
                        Canvas::new(200, 120),
                        RenderMode::Hud,
                        None,
                    );
                    black_box((rendered, backend.events().len()));
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
