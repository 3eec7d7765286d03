// Copyright 2026 benchratio Contributors
// SPDX-License-Identifier: Apache-2.0

//! Property tests for indexing and ratio alignment.

use benchratio_core::{
    align, align_operation, AlignSpec, BenchmarkRecord, Direction, RatioError, ResultIndex,
    ARRAY_LENGTH,
};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Distinct sizes mapped to strictly positive scores.
fn measurements() -> impl Strategy<Value = BTreeMap<u64, f64>> {
    prop::collection::btree_map(1u64..1 << 26, 0.001f64..1.0e6, 0..24)
}

/// Records for `identifier` in a shuffled order.
fn records_for(identifier: &str, points: &BTreeMap<u64, f64>, seed: u64) -> Vec<BenchmarkRecord> {
    let mut records: Vec<BenchmarkRecord> = points
        .iter()
        .map(|(size, score)| BenchmarkRecord::new(identifier, ARRAY_LENGTH, *size, *score))
        .collect();
    // Deterministic shuffle so the aligner never sees pre-sorted input.
    records.sort_by_key(|r| {
        let size: u64 = r.parameters[ARRAY_LENGTH].parse().unwrap_or(0);
        size.wrapping_mul(0x9E37_79B9_7F4A_7C15).wrapping_add(seed)
    });
    records
}

fn spec(direction: Direction) -> AlignSpec {
    AlignSpec::new("Base", "Comp")
        .with_prefix("bench.")
        .with_direction(direction)
}

fn indexes(
    base: &BTreeMap<u64, f64>,
    comp: &BTreeMap<u64, f64>,
    seed: u64,
) -> (ResultIndex, ResultIndex) {
    let baseline = ResultIndex::build(&records_for("bench.opBase", base, seed), ARRAY_LENGTH)
        .expect("generated baseline records are well formed");
    let comparison = ResultIndex::build(&records_for("bench.opComp", comp, seed), ARRAY_LENGTH)
        .expect("generated comparison records are well formed");
    (baseline, comparison)
}

proptest! {
    #[test]
    fn lookup_returns_ingested_pairs(points in measurements(), seed in any::<u64>()) {
        prop_assume!(!points.is_empty());
        let records = records_for("bench.opBase", &points, seed);
        let index = ResultIndex::build(&records, ARRAY_LENGTH).unwrap();

        let found: HashSet<(u64, u64)> = index
            .get("bench.opBase")
            .unwrap()
            .iter()
            .map(|p| (p.size, p.score.to_bits()))
            .collect();
        let expected: HashSet<(u64, u64)> =
            points.iter().map(|(s, v)| (*s, v.to_bits())).collect();
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn align_is_idempotent(base in measurements(), comp in measurements(), seed in any::<u64>()) {
        let (baseline, comparison) = indexes(&base, &comp, seed);
        let spec = spec(Direction::ComparisonOverBaseline);

        let first = align(&["op"], &baseline, &comparison, &spec);
        let second = align(&["op"], &baseline, &comparison, &spec);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn directions_are_reciprocal(base in measurements(), comp in measurements(), seed in any::<u64>()) {
        prop_assume!(!base.is_empty() && !comp.is_empty());
        let (baseline, comparison) = indexes(&base, &comp, seed);

        let forward = align_operation("op", &baseline, &comparison, &spec(Direction::ComparisonOverBaseline)).unwrap();
        let backward = align_operation("op", &baseline, &comparison, &spec(Direction::BaselineOverComparison)).unwrap();

        prop_assert_eq!(forward.len(), backward.len());
        for (f, b) in forward.iter().zip(&backward) {
            prop_assert_eq!(f.size, b.size);
            let product = f.ratio * b.ratio;
            prop_assert!((product - 1.0).abs() < 1e-9, "{} * {} = {}", f.ratio, b.ratio, product);
        }
    }

    #[test]
    fn sizes_are_sorted_intersection(base in measurements(), comp in measurements(), seed in any::<u64>()) {
        prop_assume!(!base.is_empty() && !comp.is_empty());
        let (baseline, comparison) = indexes(&base, &comp, seed);
        let points = align_operation("op", &baseline, &comparison, &spec(Direction::ComparisonOverBaseline)).unwrap();

        let sizes: Vec<u64> = points.iter().map(|p| p.size).collect();
        let base_sizes: BTreeSet<u64> = base.keys().copied().collect();
        let comp_sizes: BTreeSet<u64> = comp.keys().copied().collect();
        let expected: Vec<u64> = base_sizes.intersection(&comp_sizes).copied().collect();

        prop_assert_eq!(&sizes, &expected);
        prop_assert!(sizes.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn disjoint_sizes_give_empty_series(base in measurements(), seed in any::<u64>()) {
        prop_assume!(!base.is_empty());
        // Odd sizes on one side, even on the other.
        let odd: BTreeMap<u64, f64> = base.iter().map(|(s, v)| (s * 2 + 1, *v)).collect();
        let even: BTreeMap<u64, f64> = base.iter().map(|(s, v)| (s * 2, *v)).collect();
        let (baseline, comparison) = indexes(&odd, &even, seed);

        let points = align_operation("op", &baseline, &comparison, &spec(Direction::ComparisonOverBaseline)).unwrap();
        prop_assert!(points.is_empty());

        let report = align(&["op"], &baseline, &comparison, &spec(Direction::ComparisonOverBaseline));
        prop_assert!(report.failures().is_empty());
        prop_assert_eq!(report.no_data(), vec!["op"]);
    }

    #[test]
    fn zero_divisor_never_returns_partial_series(
        base in measurements(),
        seed in any::<u64>(),
        pick in any::<prop::sample::Index>(),
    ) {
        prop_assume!(!base.is_empty());
        let zero_at = *pick.get(&base.keys().copied().collect::<Vec<_>>());
        let mut zeroed = base.clone();
        zeroed.insert(zero_at, 0.0);

        let (baseline, comparison) = indexes(&zeroed, &base, seed);
        let result = align_operation("op", &baseline, &comparison, &spec(Direction::ComparisonOverBaseline));
        let is_zero_division = matches!(
            result,
            Err(RatioError::DivisionByZero { size, .. }) if size == zero_at
        );
        prop_assert!(is_zero_division);
    }
}
