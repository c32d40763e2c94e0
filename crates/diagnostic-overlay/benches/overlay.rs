use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use diagnostic_overlay::{
    Diagnostic, DiagnosticManager, DiagnosticPosition, DiagnosticRange, DiagnosticSeverity,
    DocumentId, HeadlessSurface, MemoryClipboard, OverlayConfig, Workspace,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

const LINES: usize = 50_000;

fn large_text(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 64);
    for i in 0..line_count {
        out.push_str(&format!(
            "{i:06} the quick brown fox jumps over the lazy dog (diagnostic benchmark line)\n"
        ));
    }
    out.pop();
    out
}

fn random_diagnostics(count: usize, seed: u64) -> Vec<Diagnostic> {
    const SEVERITIES: [Option<DiagnosticSeverity>; 5] = [
        Some(DiagnosticSeverity::Error),
        Some(DiagnosticSeverity::Warning),
        Some(DiagnosticSeverity::Information),
        Some(DiagnosticSeverity::Hint),
        None,
    ];

    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let line = rng.gen_range(0..LINES as u32);
            let start = rng.gen_range(0..40);
            let end = start + rng.gen_range(1..20);
            Diagnostic {
                range: DiagnosticRange::from_coords((line, start), (line, end)),
                severity: SEVERITIES[rng.gen_range(0..SEVERITIES.len())],
                message: format!("diagnostic {i}"),
            }
        })
        .collect()
}

fn manager(text: &str, doc: &DocumentId) -> DiagnosticManager<Workspace, HeadlessSurface> {
    let mut workspace = Workspace::new();
    workspace
        .open(doc.clone(), text, 1)
        .expect("fresh workspace");
    let config = OverlayConfig {
        size_threshold_enabled: false,
        ..OverlayConfig::default()
    };
    DiagnosticManager::new(
        workspace,
        HeadlessSurface::new(),
        config,
        Arc::new(MemoryClipboard::new()),
    )
}

fn bench_publish(c: &mut Criterion) {
    let text = large_text(LINES);
    let doc = DocumentId::from("/bench/large.rs");
    let diagnostics = random_diagnostics(5_000, 7);

    c.bench_function("publish/5k_diagnostics_50k_lines", |b| {
        b.iter_batched(
            || (manager(&text, &doc), diagnostics.clone()),
            |(mut manager, diagnostics)| {
                manager.publish(&doc, diagnostics, Some(1));
                black_box(manager.marker_count());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_edit_then_republish(c: &mut Criterion) {
    let text = large_text(LINES);
    let doc = DocumentId::from("/bench/large.rs");
    let reports: Vec<Vec<Diagnostic>> = (0..10).map(|seed| random_diagnostics(500, seed)).collect();

    c.bench_function("edit_republish/10_revisions", |b| {
        b.iter_batched(
            || manager(&text, &doc),
            |mut manager| {
                for report in &reports {
                    let revision = manager
                        .host_mut()
                        .insert(&doc, 0, "x")
                        .expect("document is open");
                    manager.publish(&doc, report.clone(), Some(revision));
                }
                black_box(manager.marker_count());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_diagnostics_at(c: &mut Criterion) {
    let text = large_text(LINES);
    let doc = DocumentId::from("/bench/large.rs");
    let mut manager = manager(&text, &doc);
    manager.set_diagnostics(&doc, random_diagnostics(5_000, 11), Some(1));

    c.bench_function("diagnostics_at/5k_diagnostics", |b| {
        b.iter(|| {
            let found = manager.diagnostics_at(&doc, DiagnosticPosition::new(25_000, 10));
            black_box(found);
        })
    });
}

criterion_group!(
    benches,
    bench_publish,
    bench_edit_then_republish,
    bench_diagnostics_at
);
criterion_main!(benches);
