//! Benchmarks for the range-lookup hot path.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use range_trainer::range::grid::{hand_key_to_rc, rc_to_hand_key};
use range_trainer::range::resolver::{resolve_expected_action, ProblemContext};
use range_trainer::range::RangeTable;

fn test_document() -> String {
    // A full OR/EP position with all 169 keys tagged
    let mut hands = Vec::new();
    for row in 0..13 {
        for col in 0..13 {
            let key = rc_to_hand_key(row, col).unwrap();
            hands.push(format!("\"{}\": \"OPEN_RAISE\"", key));
        }
    }
    format!(
        r#"{{ "ranges": {{ "OR": {{ "EP": {{ {} }} }} }},
             "legend_by_kind": {{ "OR": {{ "OPEN_RAISE": "D7E4BC" }} }} }}"#,
        hands.join(", ")
    )
}

fn tag_lookup_benchmark(c: &mut Criterion) {
    let table = RangeTable::from_json_str(&test_document()).unwrap();

    c.bench_function("get_tag_for_hand", |b| {
        b.iter(|| {
            let (tag, _) = table.get_tag_for_hand(black_box("OR"), black_box("EP"), black_box("AKS"));
            black_box(tag)
        })
    });
}

fn grid_roundtrip_benchmark(c: &mut Criterion) {
    c.bench_function("grid_roundtrip_169", |b| {
        b.iter(|| {
            for row in 0..13 {
                for col in 0..13 {
                    let key = rc_to_hand_key(row, col).unwrap();
                    black_box(hand_key_to_rc(&key).unwrap());
                }
            }
        })
    });
}

fn resolver_benchmark(c: &mut Criterion) {
    let ctx = ProblemContext::for_position("BTN", true);

    c.bench_function("resolve_expected_action", |b| {
        b.iter(|| black_box(resolve_expected_action(black_box("OPEN_RAISE_IF_FISH"), &ctx)))
    });
}

fn grid_view_benchmark(c: &mut Criterion) {
    let table = RangeTable::from_json_str(&test_document()).unwrap();

    c.bench_function("get_range_grid_view", |b| {
        b.iter(|| black_box(table.get_range_grid_view("OR", "EP").unwrap()))
    });
}

criterion_group!(
    benches,
    tag_lookup_benchmark,
    grid_roundtrip_benchmark,
    resolver_benchmark,
    grid_view_benchmark
);
criterion_main!(benches);
