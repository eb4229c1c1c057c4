//! Benchmarks for chatzip parsing, resolution and output.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench parsing -- transcript`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chatzip::archive::MemoryArchive;
use chatzip::attachment::resolve_attachment;
use chatzip::config::OutputConfig;
use chatzip::output::{to_csv, to_json, to_jsonl};
use chatzip::parse_str;
use chatzip::parsing::classify_line;

// =============================================================================
// Test Data Generators
// =============================================================================

fn generate_transcript(count: usize) -> String {
    let mut lines = Vec::with_capacity(count * 2);
    for i in 0..count {
        let sender = if i % 2 == 0 { "Alice" } else { "Bob 💕" };
        let hour = i % 12 + 1;
        let minute = i % 60;
        let meridiem = if i % 24 < 12 { "AM" } else { "PM" };

        match i % 5 {
            0 => lines.push(format!(
                "[1/{}/24, {hour}:{minute:02}:00 {meridiem}] {sender}: <attached: {i:08}-PHOTO.jpg>",
                i % 28 + 1
            )),
            1 => {
                lines.push(format!(
                    "[1/{}/24, {hour}:{minute:02}:00 {meridiem}] {sender}: first line of {i}",
                    i % 28 + 1
                ));
                lines.push("second line".to_string());
            }
            _ => lines.push(format!(
                "[1/{}/24, {hour}:{minute:02}:00 {meridiem}] {sender}: Message number {i}",
                i % 28 + 1
            )),
        }
    }
    lines.join("\n")
}

fn generate_archive(count: usize) -> MemoryArchive {
    let mut archive = MemoryArchive::new().with_entry("_chat.txt", "");
    for i in 0..count {
        archive.insert(format!("media/{i:08}-PHOTO.jpg"), vec![0u8; 256]);
    }
    archive
}

// =============================================================================
// Parsing
// =============================================================================

fn bench_classify_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify_line");

    group.bench_function("header", |b| {
        b.iter(|| classify_line(black_box("[8/20/25, 4:44:08 PM] Ann: Hello there")));
    });
    group.bench_function("continuation", |b| {
        b.iter(|| classify_line(black_box("just a continuation line with: a colon")));
    });

    group.finish();
}

fn bench_transcript_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("transcript");

    for size in [100, 1_000, 10_000] {
        let txt = generate_transcript(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| parse_str(black_box(txt)));
        });
    }

    group.finish();
}

// =============================================================================
// Attachment resolution
// =============================================================================

fn bench_resolve_attachment(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_attachment");

    for size in [10, 100, 1_000] {
        let archive = generate_archive(size);
        let token = format!("{:08}-PHOTO.jpg", size - 1);
        group.bench_with_input(BenchmarkId::from_parameter(size), &token, |b, token| {
            b.iter(|| resolve_attachment(&archive, black_box(token)));
        });
    }

    group.finish();
}

// =============================================================================
// Output
// =============================================================================

fn bench_output(c: &mut Criterion) {
    let mut group = c.benchmark_group("output");
    let messages = parse_str(&generate_transcript(1_000)).messages;
    let config = OutputConfig::new();

    group.throughput(Throughput::Elements(messages.len() as u64));
    group.bench_function("json", |b| b.iter(|| to_json(black_box(&messages), &config)));
    group.bench_function("jsonl", |b| b.iter(|| to_jsonl(black_box(&messages), &config)));
    group.bench_function("csv", |b| b.iter(|| to_csv(black_box(&messages), &config)));

    group.finish();
}

criterion_group!(
    benches,
    bench_classify_line,
    bench_transcript_parsing,
    bench_resolve_attachment,
    bench_output
);
criterion_main!(benches);
