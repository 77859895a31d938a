//! Benchmarks for the resume pipeline.
//!
//! Run with: cargo bench
//!
//! Covers everything up to the external converter: parsing, reduction,
//! assembly and DOCX packaging.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use onepage::parser::parse;
use onepage::reduce::default_rules;
use onepage::render::{assemble, to_docx_bytes};
use onepage::FormatProfile;

/// Creates a synthetic resume with the given number of project subsections.
fn create_test_resume(projects: usize) -> String {
    let mut md = String::new();

    md.push_str("# Jane Doe\n");
    md.push_str("Omaha, NE\n");
    md.push_str("jane@example.com | (402) 555-0199 | linkedin.com/in/jane | github.com/jane\n\n");

    md.push_str("## EXPERIENCE\n");
    md.push_str("### Technical & IT Support Roles\n");
    for i in 0..6 {
        md.push_str(&format!("- Resolved **{}** tickets across the help desk queue\n", i * 10));
    }
    md.push_str("\n### Other Professional Experience\n- Retail\n- Warehouse\n\n");

    md.push_str("## TECHNICAL PROJECTS\n");
    for i in 0..projects {
        md.push_str(&format!("### Project {} - https://example.com/p{}\n", i, i));
        md.push_str("- Built a lab network\n- Wrote detection rules\n- Documented results\n\n");
    }

    md
}

/// Benchmark line parsing and normalization.
fn bench_parse(c: &mut Criterion) {
    let source = create_test_resume(8);

    c.bench_function("parse_resume", |b| {
        b.iter(|| parse(black_box(&source)));
    });
}

/// Benchmark applying the full rule list.
fn bench_reduce(c: &mut Criterion) {
    let lines = parse(&create_test_resume(8));
    let rules = default_rules();

    c.bench_function("apply_default_rules", |b| {
        b.iter(|| {
            rules
                .iter()
                .fold(black_box(lines.clone()), |current, rule| rule.apply(&current))
        });
    });
}

/// Benchmark assembly and packaging at various sizes.
fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_docx");
    let profile = FormatProfile::standard();

    for projects in [2, 8, 32].iter() {
        let lines = parse(&create_test_resume(*projects));

        group.bench_function(format!("{}_projects", projects), |b| {
            b.iter(|| {
                let doc = assemble(black_box(&lines), &profile);
                to_docx_bytes(&doc).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_reduce, bench_render);
criterion_main!(benches);
