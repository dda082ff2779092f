//! Property-based tests for swarmlab
//!
//! Uses proptest to verify invariants and properties of the library.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use swarmlab::prelude::*;

proptest! {
    // ==================== Bounds Properties ====================

    #[test]
    fn clamped_positions_are_contained(
        min in -100.0f64..0.0,
        width in 0.1f64..100.0,
        x in -1e3f64..1e3,
        y in -1e3f64..1e3
    ) {
        let bounds = Bounds::new(min, min + width);
        let clamped = bounds.clamp_position([x, y]);
        prop_assert!(bounds.contains_position(&clamped));
        if bounds.contains(x) {
            prop_assert_eq!(clamped[0], x);
        }
    }

    #[test]
    fn random_positions_are_contained(seed in any::<u64>(), half_width in 0.1f64..50.0) {
        let mut rng = StdRng::seed_from_u64(seed);
        let bounds = Bounds::symmetric(half_width);
        for _ in 0..20 {
            prop_assert!(bounds.contains_position(&bounds.random_position(&mut rng)));
        }
    }

    #[test]
    fn inverted_bounds_are_rejected(min in -10.0f64..10.0, gap in 0.0f64..10.0) {
        prop_assert!(Bounds::try_new(min, min - gap).is_err());
    }

    // ==================== Distance Properties ====================

    #[test]
    fn distance_is_a_metric(
        a in prop::array::uniform2(-10.0f64..10.0),
        b in prop::array::uniform2(-10.0f64..10.0),
        c in prop::array::uniform2(-10.0f64..10.0)
    ) {
        prop_assert!(distance(&a, &a) == 0.0);
        prop_assert!((distance(&a, &b) - distance(&b, &a)).abs() < 1e-12);
        prop_assert!(distance(&a, &c) <= distance(&a, &b) + distance(&b, &c) + 1e-9);
    }

    #[test]
    fn centroid_lies_inside_the_hull_box(
        points in prop::collection::vec(prop::array::uniform2(-10.0f64..10.0), 1..20)
    ) {
        let c = centroid(points.iter()).unwrap();
        for axis in 0..2 {
            let lo = points.iter().map(|p| p[axis]).fold(f64::INFINITY, f64::min);
            let hi = points.iter().map(|p| p[axis]).fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(c[axis] >= lo - 1e-9 && c[axis] <= hi + 1e-9);
        }
    }

    // ==================== Permutation Properties ====================

    #[test]
    fn random_permutation_is_valid(n in 1usize..50, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let perm = Permutation::random(n, &mut rng);
        prop_assert_eq!(perm.len(), n);
        prop_assert!(perm.is_valid_permutation());
    }

    #[test]
    fn swap_sequence_reaches_target(n in 1usize..30, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let from = Permutation::random(n, &mut rng);
        let to = Permutation::random(n, &mut rng);
        let swaps = from.swap_sequence_to(&to).unwrap();
        prop_assert!(swaps.len() < n.max(1));

        let mut walked = from.clone();
        walked.apply_swaps(&swaps);
        prop_assert_eq!(walked, to);
    }

    #[test]
    fn segment_reversal_keeps_validity(
        n in 2usize..30,
        seed in any::<u64>(),
        a in 0usize..30,
        b in 0usize..30
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut perm = Permutation::random(n, &mut rng);
        let (i, j) = (a % n, b % n);
        perm.reverse_segment(i.min(j), i.max(j));
        prop_assert!(perm.is_valid_permutation());
    }

    #[test]
    fn tour_length_is_rotation_invariant(
        n in 3usize..12,
        seed in any::<u64>(),
        shift in 0usize..12
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let points: Vec<[f64; 2]> = (0..n)
            .map(|_| Bounds::symmetric(10.0).random_position(&mut rng))
            .collect();
        let matrix = distance_matrix(&points);
        let perm = Permutation::random(n, &mut rng);

        let mut rotated = perm.as_slice().to_vec();
        rotated.rotate_left(shift % n);
        let rotated = Permutation::try_new(rotated).unwrap();

        let delta = tour_length(&perm, &matrix) - tour_length(&rotated, &matrix);
        prop_assert!(delta.abs() < 1e-9);
    }

    // ==================== BitString Properties ====================

    #[test]
    fn flip_twice_is_identity(
        bits in prop::collection::vec(any::<bool>(), 1..64),
        idx in 0usize..64
    ) {
        let original = BitString::new(bits);
        let i = idx % original.len();
        let mut flipped = original.clone();
        flipped.flip(i);
        prop_assert_eq!(flipped.hamming_distance(&original).unwrap(), 1);
        flipped.flip(i);
        prop_assert_eq!(flipped, original);
    }

    #[test]
    fn count_ones_matches_values(bits in prop::collection::vec(any::<bool>(), 0..64)) {
        let s = BitString::new(bits);
        let sum: f64 = (0..s.len()).map(|i| s.value(i)).sum();
        prop_assert_eq!(sum as usize, s.count_ones());
    }

    #[test]
    fn sigmoid_is_a_probability(v in -1e3f64..1e3) {
        let p = sigmoid(v);
        prop_assert!((0.0..=1.0).contains(&p));
    }

    // ==================== Numeric Properties ====================

    #[test]
    fn chaos_maps_stay_in_unit_interval(seed in 0.01f64..0.99, steps in 1usize..200) {
        for map in ChaosMap::ALL {
            let mut seq = ChaoticSequence::new(map, seed);
            for _ in 0..steps {
                let x = seq.next_value();
                prop_assert!((0.0..=1.0).contains(&x), "{:?} produced {}", map, x);
            }
        }
    }

    #[test]
    fn gamma_satisfies_recurrence(z in 0.1f64..10.0) {
        let lhs = gamma(z + 1.0);
        let rhs = z * gamma(z);
        prop_assert!((lhs - rhs).abs() <= 1e-9 * lhs.abs().max(1.0));
    }

    #[test]
    fn levy_steps_are_finite(beta in 1.0f64..2.0, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..100 {
            prop_assert!(levy_step(beta, &mut rng).is_finite());
        }
    }

    // ==================== Benchmark Properties ====================

    #[test]
    fn benchmarks_attain_their_optimum(idx in 0usize..9) {
        let benchmark = benchmark_by_name(BENCHMARK_NAMES[idx]).unwrap();
        let [x, y] = benchmark.optimal_position();
        prop_assert!((benchmark.evaluate(x, y) - benchmark.optimal_fitness()).abs() < 1e-3);
    }

    #[test]
    fn benchmarks_never_beat_their_optimum(
        idx in 0usize..9,
        u in 0.0f64..1.0,
        v in 0.0f64..1.0
    ) {
        let benchmark = benchmark_by_name(BENCHMARK_NAMES[idx]).unwrap();
        let bounds = benchmark.bounds();
        let (x, y) = (bounds.denormalize(u), bounds.denormalize(v));
        prop_assert!(benchmark.evaluate(x, y) >= benchmark.optimal_fitness() - 1e-3);
    }
}
