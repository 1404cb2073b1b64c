//! Criterion microbenches for imgtag tag parsing and mapping.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - Nested category markup parsing and flattening
//! - Delimited path parsing
//! - Mapping a full exiftool entry to a record

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use imgtag::extract::exiftool::from_exiftool_str;
use imgtag::meta::{map_fields, Field, TagTree};

// Include test fixtures at compile time (no file I/O during benchmark)
const EXIFTOOL_FIXTURE: &str = include_str!("../tests/fixtures/sample.exiftool.json");

const MARKUP_FIXTURE: &str = "<Categories>\
<Category>Animals<Category>Dogs<Category>Poodle</Category><Category>Beagle</Category></Category>\
<Category>Cats</Category></Category>\
<Category>Places<Category>Portugal<Category>Lisbon</Category><Category>Porto</Category></Category></Category>\
<Category>Events<Category>Wedding</Category></Category>\
</Categories>";

/// Benchmark nested markup parsing plus flattening.
fn bench_markup_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("tag_tree");
    group.throughput(Throughput::Bytes(MARKUP_FIXTURE.len() as u64));

    group.bench_function("markup_flatten", |b| {
        b.iter(|| {
            let tree = TagTree::parse(Field::Categories, black_box(MARKUP_FIXTURE)).unwrap();
            black_box(tree.flatten())
        })
    });

    group.finish();
}

/// Benchmark delimited path parsing plus flattening.
fn bench_delimited_flatten(c: &mut Criterion) {
    let paths = [
        "Places|Portugal|Lisbon|Alfama",
        "Animals/Dogs/Poodle",
        "Events > Wedding > Ceremony",
    ];
    let mut group = c.benchmark_group("tag_tree");

    group.bench_function("delimited_flatten", |b| {
        b.iter(|| {
            let mut tree = TagTree::new();
            for path in black_box(&paths) {
                tree.extend(TagTree::parse(Field::HierarchicalSubject, path).unwrap());
            }
            black_box(tree.flatten())
        })
    });

    group.finish();
}

/// Benchmark mapping already extracted entries.
///
/// We parse the exiftool fixture once, then benchmark only the mapping.
fn bench_map_fields(c: &mut Criterion) {
    let entries = from_exiftool_str(EXIFTOOL_FIXTURE).unwrap();
    let mut group = c.benchmark_group("mapper");

    group.bench_function("map_fields", |b| {
        b.iter(|| {
            for entry in black_box(&entries) {
                black_box(map_fields(entry).unwrap());
            }
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_markup_flatten,
    bench_delimited_flatten,
    bench_map_fields
);
criterion_main!(benches);
