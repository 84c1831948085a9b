use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::hint::black_box;
use thumbsynth::config::EngineConfig;
use thumbsynth::{render_thumbnail, Category, RenderRequest};

fn title_case(name: &str) -> RenderRequest {
    let (title, category, tool) = match name {
        "short_latin" => ("Quick Start", "general", None),
        "japanese_tutorial" => (
            "【2025年最新版】Suno AIの使い方完全ガイド",
            "tutorial",
            Some("Suno"),
        ),
        "long_mixed" => (
            "Sunoで作る本格的なAI音楽 - プロンプト設計から商用リリースまでの完全ワークフロー解説",
            "music",
            Some("Suno"),
        ),
        "comparison" => ("Suno vs Udio vs MusicGen", "comparison", None),
        _ => panic!("unknown case"),
    };
    RenderRequest {
        title: title.to_string(),
        category: Category::parse(category),
        tool_label: tool.map(str::to_string),
        theme_override: None,
        seed: Some(42),
    }
}

fn bench_full_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    group.sample_size(20);
    let config = EngineConfig::default();
    for name in ["short_latin", "japanese_tutorial", "long_mixed", "comparison"] {
        let request = title_case(name);
        group.bench_with_input(BenchmarkId::from_parameter(name), &request, |b, req| {
            b.iter(|| {
                let bytes = render_thumbnail(black_box(req), &config).expect("render failed");
                black_box(bytes.len());
            });
        });
    }
    group.finish();
}

fn bench_background(c: &mut Criterion) {
    let mut group = c.benchmark_group("background");
    let config = EngineConfig::default();
    let theme = thumbsynth::theme::lookup("neon_purple").unwrap();
    group.bench_function("gradient_with_noise", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(1);
            let pixmap = thumbsynth::gradient::build(
                &config.canvas,
                theme,
                thumbsynth::gradient::GradientMode::Radial,
                &config.noise,
                &mut rng,
            )
            .expect("gradient failed");
            black_box(pixmap.width());
        });
    });
    group.finish();
}

fn bench_bloom(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom");
    group.sample_size(30);
    let config = EngineConfig::default();
    let theme = thumbsynth::theme::lookup("cyber_blue").unwrap();
    let mut rng = StdRng::seed_from_u64(2);
    let base = thumbsynth::gradient::build(
        &config.canvas,
        theme,
        thumbsynth::gradient::GradientMode::Vertical,
        &config.noise,
        &mut rng,
    )
    .expect("gradient failed");
    group.bench_function("full_canvas", |b| {
        b.iter(|| {
            let mut pixmap = base.clone();
            thumbsynth::bloom::apply(&mut pixmap, &config.glow);
            black_box(pixmap.width());
        });
    });
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_full_render, bench_background, bench_bloom
);
criterion_main!(benches);
