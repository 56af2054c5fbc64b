use criterion::{black_box, criterion_group, criterion_main, Criterion};
use loader::Configuration;
use parsers::parse_file;
use std::path::PathBuf;

struct LanguageBench {
    name: &'static str,
    fixture: &'static str,
    language: &'static str,
}

const LANGUAGE_BENCHES: &[LanguageBench] = &[
    LanguageBench {
        name: "analyze_php",
        fixture: "../fixtures/php/echoed_request.php",
        language: "php",
    },
    LanguageBench {
        name: "analyze_javascript",
        fixture: "../fixtures/javascript/echoed_request.js",
        language: "javascript",
    },
    LanguageBench {
        name: "analyze_python",
        fixture: "../fixtures/python/echoed_request.py",
        language: "python",
    },
    LanguageBench {
        name: "analyze_go",
        fixture: "../fixtures/go/echoed_request.go",
        language: "go",
    },
    LanguageBench {
        name: "analyze_java",
        fixture: "../fixtures/java/EchoedRequest.java",
        language: "java",
    },
];

fn bench_parsers(c: &mut Criterion) {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    for bench in LANGUAGE_BENCHES {
        let file = root.join(bench.fixture);
        c.bench_function(&format!("parse_{}", bench.language), |b| {
            b.iter(|| parse_file(black_box(&file), None).unwrap())
        });
    }
}

fn bench_single_file_analysis(c: &mut Criterion) {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    for bench in LANGUAGE_BENCHES {
        let file = root.join(bench.fixture);
        let parsed = parse_file(&file, None).unwrap().expect("parse fixture");
        c.bench_function(bench.name, |b| {
            b.iter(|| engine::analyze_file(black_box(&parsed.ast), black_box(&parsed.language)))
        });
    }
}

fn bench_directory_trace(c: &mut Criterion) {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../fixtures");
    let config = Configuration::default();
    c.bench_function("trace_fixtures_directory", |b| {
        b.iter(|| engine::trace_directory(black_box(&root), black_box(&config)))
    });
}

criterion_group!(benches, bench_parsers, bench_single_file_analysis, bench_directory_trace);
criterion_main!(benches);
