//! Parsing performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::fs;
use tempfile::TempDir;
use tilec::*;

const SIMPLE: &str = r#"<tile>
  <visual displayName="Weather" branding="nameAndLogo">
    <binding template="TileMedium">
      <text>Sunny</text>
    </binding>
  </visual>
</tile>"#;

fn grouped_payload(groups: usize) -> String {
    let mut content = String::from(r#"<tile><visual><binding template="TileLarge">"#);
    for i in 0..groups {
        content.push_str(&format!(
            r#"<group><subgroup hint-weight="1"><text hint-style="caption">Item {i}</text></subgroup><subgroup hint-weight="2"><image src="Assets/{i}.png" hint-removeMargin="true"/><text hint-maxLines="2">{{detail}}</text></subgroup></group>"#
        ));
    }
    content.push_str("</binding></visual></tile>");
    content
}

fn bench_simple_parse(c: &mut Criterion) {
    let context = ParseContext::tile();
    c.bench_function("simple_parse", |b| {
        b.iter(|| parse(black_box(SIMPLE), &context))
    });
}

fn bench_large_parse(c: &mut Criterion) {
    let content = grouped_payload(500);
    let context = ParseContext::tile();
    c.bench_function("large_parse", |b| {
        b.iter(|| parse(black_box(&content), &context))
    });
}

fn bench_file_parse_and_select(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("grouped.xml");
    fs::write(&input_path, grouped_payload(50)).unwrap();
    let context = ParseContext::tile();

    c.bench_function("file_parse_and_select", |b| {
        b.iter(|| {
            let result = parse_file(black_box(&input_path), &context).unwrap();
            let tile = result.tile().unwrap();
            let json = select_binding(&tile.visual, TileSize::Large)
                .map(|binding| binding.convert_to_object().to_json());
            json
        })
    });
}

criterion_group!(benches, bench_simple_parse, bench_large_parse, bench_file_parse_and_select);
criterion_main!(benches);
