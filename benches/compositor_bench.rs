//! Benchmark für die Minimap-Hotpaths.
//!
//! Misst die Kosten pro Rebuild bzw. Frame:
//! - Objekt-Layer: Marker für viele Entitäten rasterisieren
//! - Parzellen-Layer: alle Regionen im Puffer-Bereich ablaufen
//! - Komposition: Viewport-Pixel aus Hintergrund und Layern zusammensetzen

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{DVec3, Vec2};
use sl_minimap::{
    ColorCategory, EntityKind, EntityView, MinimapCompositor, MinimapConfiguration, WorldSnapshot,
};
use std::hint::black_box;
use std::time::Instant;

/// Demo-Welt mit `entity_count` zusätzlich gestreuten Entitäten.
fn build_world(entity_count: usize) -> WorldSnapshot {
    let mut world = WorldSnapshot::demo();
    let center = world.camera.global_position;
    world.entities = (0..entity_count)
        .map(|i| {
            let x = (i % 200) as f64 - 100.0 + (i as f64 * 0.0017).fract();
            let y = (i / 200 % 200) as f64 - 100.0 + (i as f64 * 0.0031).fract();
            EntityView {
                id: i as u64 + 1,
                kind: if i % 10 == 0 {
                    EntityKind::Avatar
                } else {
                    EntityKind::Object
                },
                position: center + DVec3::new(x, y, (i % 40) as f64 - 20.0),
                category: ColorCategory::OtherOwn,
                radius_meters: 0.5 + (i % 4) as f32,
            }
        })
        .collect();
    world
}

fn compositor_for(world: &WorldSnapshot, viewport: f32, config: MinimapConfiguration) -> MinimapCompositor {
    let mut compositor = MinimapCompositor::new(config, Vec2::splat(viewport));
    compositor.set_camera(world.camera);
    compositor
}

/// Misst: Objekt-Layer-Rebuild bei wachsender Entitätenzahl
fn bench_object_layer(c: &mut Criterion) {
    let mut group = c.benchmark_group("object_layer_rebuild");

    for &entity_count in &[100usize, 1_000, 10_000] {
        let world = build_world(entity_count);
        let mut compositor = compositor_for(&world, 300.0, MinimapConfiguration::default());

        group.bench_with_input(
            BenchmarkId::new("entities", entity_count),
            &world,
            |b, world| {
                b.iter(|| {
                    let stats = compositor.rebuild_object_layer(black_box(world), Instant::now());
                    black_box(stats.drawn)
                })
            },
        );
    }

    group.finish();
}

/// Misst: Parzellen-Layer-Rebuild bei verschiedenen Skalierungen
fn bench_parcel_layer(c: &mut Criterion) {
    let mut group = c.benchmark_group("parcel_layer_rebuild");
    let world = build_world(0);
    let config = MinimapConfiguration {
        show_for_sale_parcels: true,
        ..MinimapConfiguration::default()
    };

    for &scale in &[64.0f32, 256.0, 1024.0] {
        let mut compositor = compositor_for(&world, 300.0, config.clone());
        compositor.set_scale(scale);

        group.bench_with_input(
            BenchmarkId::new("scale", scale as u32),
            &world,
            |b, world| {
                b.iter(|| {
                    let stats = compositor.rebuild_parcel_layer(black_box(world), Instant::now());
                    black_box(stats.regions_drawn)
                })
            },
        );
    }

    group.finish();
}

/// Misst: Frame-Komposition bei verschiedenen Viewport-Größen
fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose_frame");
    let world = build_world(1_000);
    let config = MinimapConfiguration {
        rotate_to_heading: true,
        ..MinimapConfiguration::default()
    };

    for &viewport in &[128.0f32, 256.0, 400.0] {
        let mut compositor = compositor_for(&world, viewport, config.clone());
        compositor.set_camera(world.camera.with_heading(0.6));
        compositor.update(&world, Instant::now());

        group.bench_with_input(
            BenchmarkId::new("viewport", viewport as u32),
            &world,
            |b, world| {
                b.iter(|| {
                    let frame = compositor.compose(black_box(world));
                    black_box(frame.dimensions())
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_object_layer,
    bench_parcel_layer,
    bench_compose
);
criterion_main!(benches);
