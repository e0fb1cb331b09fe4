//! Unit tests for the sampling context.
//!
//! This module contains tests verifying:
//! - Initial state of root and degenerate root contexts
//! - Assignment and cloning
//! - Dimension and instance bookkeeping across splits
//! - Offset computation (Faure-permuted and Monte Carlo padded)
//! - Fast and slow draw paths
//! - Precondition checks (debug builds)

use super::*;
use crate::qmc::{
    permuted_radical_inverse, radical_inverse, radical_inverse_base2, PRIMES,
};
use crate::rng::SamplingRng;
use approx::assert_relative_eq;

fn make_rng(seed: u64) -> RefCell<SamplingRng> {
    RefCell::new(SamplingRng::from_seed(seed))
}

/// Expected Faure-scrambled offset of absolute dimension `d` for `instance`.
fn expected_offset(d: usize, instance: usize) -> f64 {
    permuted_radical_inverse(PRIMES[d], &FAURE_PERMUTATIONS[d], instance as u64)
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_initial_state_is_correct() {
    let rng = make_rng(42);
    let context = QmcSamplingContext::root(&rng);

    assert_eq!(context.base_dimension(), 0);
    assert_eq!(context.base_instance(), 0);
    assert_eq!(context.dimension(), 0);
    assert_eq!(context.sample_count(), 0);
    assert_eq!(context.instance(), 0);
    assert!(context.offset().is_empty());
    assert_eq!(context.total_dimension(), 0);
    assert_eq!(context.total_instance(), 0);
}

#[test]
fn test_root_construction() {
    let rng = make_rng(42);
    let context = QmcSamplingContext::new(&rng, 2, 4);

    assert_eq!(context.base_dimension(), 0);
    assert_eq!(context.base_instance(), 0);
    assert_eq!(context.dimension(), 2);
    assert_eq!(context.sample_count(), 4);
    assert_eq!(context.instance(), 0);
    // The permuted radical inverse of instance 0 is 0 in every base
    assert_eq!(context.offset(), &[0.0, 0.0]);
}

#[test]
fn test_root_with_instance() {
    let rng = make_rng(42);
    let context = QmcSamplingContext::with_instance(&rng, 3, 0, 17);

    assert_eq!(context.instance(), 17);
    assert_eq!(context.total_instance(), 17);
    assert_eq!(context.base_instance(), 0);
}

#[test]
fn test_from_config() {
    let rng = make_rng(1);
    let config = SamplingConfig::builder()
        .dimension(2)
        .sample_count(8)
        .instance(3)
        .build()
        .unwrap();

    let context = QmcSamplingContext::from_config(&rng, &config).unwrap();

    assert_eq!(context.dimension(), 2);
    assert_eq!(context.sample_count(), 8);
    assert_eq!(context.instance(), 3);
}

#[test]
fn test_dimension_four_is_accepted() {
    let rng = make_rng(42);
    let mut context = QmcSamplingContext::new(&rng, MAX_DIMENSION, 1);

    let v = context.next_vector2::<4>();
    assert!(v.iter().all(|x| (0.0..1.0).contains(x)));
}

#[test]
#[should_panic]
fn test_dimension_five_is_rejected() {
    let rng = make_rng(42);
    let _ = QmcSamplingContext::new(&rng, MAX_DIMENSION + 1, 1);
}

// ============================================================================
// Assignment and cloning
// ============================================================================

#[test]
fn test_assignment() {
    let rng = make_rng(42);
    let mut source = QmcSamplingContext::new(&rng, 2, 0);
    source.next_vector2::<2>();
    let source = source.split(3, 5);

    let mut target = QmcSamplingContext::root(&rng);
    target.assign(&source);

    assert_eq!(target.base_dimension(), source.base_dimension());
    assert_eq!(target.base_instance(), source.base_instance());
    assert_eq!(target.dimension(), source.dimension());
    assert_eq!(target.sample_count(), source.sample_count());
    assert_eq!(target.instance(), source.instance());
    assert_eq!(target.offset(), source.offset());
}

#[test]
fn test_assignment_keeps_own_generator() {
    let rng_a = make_rng(1);
    let rng_b = make_rng(2);

    // Deep enough that every dimension is padded
    let mut source = QmcSamplingContext::root(&rng_a).split(4, 0);
    for _ in 0..8 {
        source.split_in_place(4, 0);
    }

    let mut target = QmcSamplingContext::root(&rng_b);
    target.assign(&source);
    let child = target.split(1, 0);

    // The padded offset of the child came from rng_b, which advanced
    let mut fresh_b = SamplingRng::from_seed(2);
    assert_eq!(child.offset()[0], fresh_b.gen_uniform());
}

#[test]
fn test_clone_is_independent() {
    let rng = make_rng(42);
    let original = QmcSamplingContext::new(&rng, 2, 0);
    let mut copy = original.clone();

    copy.next_vector2::<2>();
    copy.next_vector2::<2>();

    assert_eq!(original.instance(), 0);
    assert_eq!(copy.instance(), 2);
}

// ============================================================================
// Splitting
// ============================================================================

#[test]
fn test_splitting() {
    let rng = make_rng(42);
    let mut parent = QmcSamplingContext::new(&rng, 2, 8);
    for _ in 0..8 {
        parent.next_vector2::<2>();
    }
    assert!(parent.is_exhausted());

    let child = parent.split(3, 4);

    assert_eq!(child.base_dimension(), 2);
    assert_eq!(child.base_instance(), 8);
    assert_eq!(child.dimension(), 3);
    assert_eq!(child.sample_count(), 4);
    assert_eq!(child.instance(), 0);
    assert_eq!(child.total_dimension(), 5);
    assert_eq!(child.total_instance(), 8);

    // The parent is untouched
    assert_eq!(parent.dimension(), 2);
    assert_eq!(parent.instance(), 8);
}

#[test]
fn test_double_splitting() {
    let rng = make_rng(42);
    let mut context = QmcSamplingContext::new(&rng, 2, 8);
    for _ in 0..8 {
        context.next_vector2::<2>();
    }

    context.split_in_place(3, 4);
    for _ in 0..4 {
        context.next_vector2::<3>();
    }
    context.split_in_place(4, 1);

    assert_eq!(context.base_dimension(), 5);
    assert_eq!(context.base_instance(), 12);
    assert_eq!(context.dimension(), 4);
    assert_eq!(context.sample_count(), 1);
    assert_eq!(context.instance(), 0);
}

#[test]
fn test_split_and_split_in_place_agree() {
    let rng = make_rng(42);
    let mut parent = QmcSamplingContext::new(&rng, 1, 0);
    for _ in 0..5 {
        parent.next_double2();
    }

    let child = parent.split(3, 2);
    parent.split_in_place(3, 2);

    assert_eq!(child.base_dimension(), parent.base_dimension());
    assert_eq!(child.base_instance(), parent.base_instance());
    assert_eq!(child.offset(), parent.offset());
}

#[test]
fn test_split_from_unstarted_root_is_stable() {
    let rng = make_rng(42);
    let root = QmcSamplingContext::root(&rng);

    let first = root.split(3, 1);
    let second = root.split(3, 1);

    assert_eq!(first.base_dimension(), second.base_dimension());
    assert_eq!(first.base_instance(), second.base_instance());
    assert_eq!(first.offset(), second.offset());
}

#[test]
fn test_splits_at_different_times_have_increasing_base_instance() {
    let rng = make_rng(42);
    let mut parent = QmcSamplingContext::new(&rng, 1, 0);

    parent.next_double2();
    let early = parent.split(2, 1);
    parent.next_double2();
    parent.next_double2();
    let late = parent.split(2, 1);

    assert_eq!(early.base_instance(), 1);
    assert_eq!(late.base_instance(), 3);
    assert!(late.base_instance() > early.base_instance());
    assert_eq!(early.base_dimension(), late.base_dimension());
}

// ============================================================================
// Offsets
// ============================================================================

#[test]
fn test_offsets_are_faure_scrambled_radical_inverses() {
    let rng = make_rng(42);
    let mut parent = QmcSamplingContext::new(&rng, 2, 0);
    for _ in 0..10 {
        parent.next_vector2::<2>();
    }

    let child = parent.split(4, 1);

    for (i, &offset) in child.offset().iter().enumerate() {
        assert_eq!(offset, expected_offset(2 + i, 10));
    }
}

#[test]
fn test_offset_at_base_dimension_three() {
    let rng = make_rng(42);
    let mut parent = QmcSamplingContext::new(&rng, 3, 0);
    for _ in 0..10 {
        parent.next_vector2::<3>();
    }

    let child = parent.split(1, 1);

    // Base 7, Faure permutation [0, 2, 5, 3, 1, 4, 6], 10 = (13)_7
    assert_eq!(child.base_dimension(), 3);
    assert_relative_eq!(
        child.offset()[0],
        3.0 / 7.0 + 2.0 / 49.0,
        max_relative = 1e-15
    );
}

#[test]
fn test_padding_draws_from_shared_generator() {
    let rng = make_rng(7);
    let mut context = QmcSamplingContext::root(&rng).split(4, 0);
    for _ in 0..7 {
        context.split_in_place(4, 0);
    }
    // Dimensions 28..32 are still inside the Faure table
    assert_eq!(context.base_dimension(), 28);

    context.split_in_place(4, 0);
    assert_eq!(context.base_dimension(), FAURE_PERMUTATION_TABLE_SIZE);

    let mut reference = SamplingRng::from_seed(7);
    for &offset in context.offset() {
        assert_eq!(offset, reference.gen_uniform());
    }
}

#[test]
fn test_padding_straddles_table_boundary() {
    let rng = make_rng(9);
    let mut context = QmcSamplingContext::root(&rng).split(3, 0);
    for _ in 0..10 {
        context.split_in_place(3, 0);
    }
    // Dimensions 30, 31 permuted; 32 padded
    assert_eq!(context.base_dimension(), 30);
    assert_eq!(context.offset()[0], expected_offset(30, 0));
    assert_eq!(context.offset()[1], expected_offset(31, 0));

    let mut reference = SamplingRng::from_seed(9);
    assert_eq!(context.offset()[2], reference.gen_uniform());
}

#[test]
fn test_offsets_in_unit_interval() {
    let rng = make_rng(3);
    let mut context = QmcSamplingContext::new(&rng, 4, 0);

    for step in 0..40 {
        for _ in 0..step {
            context.next_vector2::<4>();
        }
        context.split_in_place(4, 0);
        for &offset in context.offset() {
            assert!((0.0..1.0).contains(&offset));
        }
    }
}

// ============================================================================
// Drawing
// ============================================================================

#[test]
fn test_draws_are_rotated_halton_points() {
    let rng = make_rng(42);
    let mut parent = QmcSamplingContext::new(&rng, 1, 0);
    for _ in 0..6 {
        parent.next_double2();
    }
    let mut child = parent.split(2, 0);
    let offset = child.offset().to_vec();
    assert!(offset.iter().any(|&o| o > 0.0));

    for instance in 0..50u64 {
        let v = child.next_vector2::<2>();
        assert_eq!(v[0], rotate(radical_inverse_base2(instance), offset[0]));
        assert_eq!(v[1], rotate(radical_inverse(3, instance), offset[1]));
        // Offsets never change between draws
        assert_eq!(child.offset(), &offset[..]);
    }
}

#[test]
fn test_fast_and_slow_paths_agree() {
    let rng = make_rng(42);
    let start = PRECOMPUTED_HALTON_SEQUENCE_SIZE - 4;
    let mut context = QmcSamplingContext::with_instance(&rng, 4, 0, start);

    for instance in start..start + 8 {
        let v = context.next_vector2::<4>();
        for (i, &x) in v.iter().enumerate() {
            assert_eq!(x, fast_radical_inverse(i, instance as u64));
        }
    }
}

#[test]
fn test_instance_monotonicity() {
    let rng = make_rng(42);
    let mut context = QmcSamplingContext::with_instance(&rng, 2, 0, 5);

    for k in 1..=100 {
        context.next_vector2::<2>();
        assert_eq!(context.total_instance(), 5 + k);
    }
}

#[test]
fn test_unbounded_draws_past_precomputed_table() {
    let rng = make_rng(42);
    let mut context = QmcSamplingContext::new(&rng, 3, 0);
    let draws = PRECOMPUTED_HALTON_SEQUENCE_SIZE + 500;

    for _ in 0..draws {
        let v = context.next_vector2::<3>();
        assert!(v.iter().all(|x| (0.0..1.0).contains(x)));
    }
    assert_eq!(context.instance(), draws);
    assert!(!context.is_exhausted());
}

#[test]
fn test_next_vector2_into_slice() {
    let rng = make_rng(42);
    let mut a = QmcSamplingContext::new(&rng, 3, 2);
    let mut b = a.clone();

    let mut v = [0.0; 3];
    a.next_vector2_into(&mut v);

    assert_eq!(v, b.next_vector2::<3>());
}

#[test]
fn test_next_double2_is_first_coordinate() {
    let rng = make_rng(42);
    let mut context = QmcSamplingContext::new(&rng, 1, 3);

    assert_eq!(context.next_double2(), 0.0);
    assert_eq!(context.next_double2(), 0.5);
    assert_eq!(context.next_double2(), 0.25);
    assert!(context.is_exhausted());
}

#[test]
fn test_closed_interval_draws_are_not_implemented() {
    let rng = make_rng(42);
    let mut context = QmcSamplingContext::new(&rng, 2, 1);
    let expected = SamplingError::NotImplemented {
        operation: "next_vector1",
    };

    assert_eq!(context.next_vector1::<2>(), Err(expected.clone()));
    let mut v = [0.0; 2];
    assert_eq!(context.next_vector1_into(&mut v), Err(expected.clone()));

    let mut single = QmcSamplingContext::new(&rng, 1, 1);
    assert_eq!(single.next_double1(), Err(expected));

    // Failed draws do not consume samples
    assert_eq!(context.instance(), 0);
    assert_eq!(single.instance(), 0);
}

#[test]
fn test_scattering_decision_protocol() {
    let rng = make_rng(42);
    let mut context = QmcSamplingContext::new(&rng, 2, 1);
    context.next_vector2::<2>();

    context.split_in_place(3, 1);
    let s = context.next_vector2::<3>();

    // Coordinates 0-1 pick a direction, coordinate 2 picks a lobe
    let lobe_weights = [0.3, 0.7];
    let lobe = if s[2] < lobe_weights[0] { 0 } else { 1 };
    assert!(lobe < lobe_weights.len());
    assert!(context.is_exhausted());
    assert_eq!(context.total_dimension(), 5);
}

#[test]
fn test_debug_output() {
    let rng = make_rng(42);
    let context = QmcSamplingContext::new(&rng, 2, 4);
    let text = format!("{:?}", context);

    assert!(text.contains("QmcSamplingContext"));
    assert!(text.contains("dimension: 2"));
    assert!(text.contains("sample_count: 4"));
}

// ============================================================================
// Precondition checks (debug builds)
// ============================================================================

#[cfg(debug_assertions)]
mod preconditions {
    use super::*;

    #[test]
    #[should_panic(expected = "dimension 0")]
    fn test_drawing_from_degenerate_root_panics() {
        let rng = make_rng(42);
        let mut root = QmcSamplingContext::root(&rng);
        root.next_double2();
    }

    #[test]
    #[should_panic(expected = "exhausted")]
    fn test_overrunning_sample_count_panics() {
        let rng = make_rng(42);
        let mut context = QmcSamplingContext::new(&rng, 1, 1);
        context.next_double2();
        context.next_double2();
    }

    #[test]
    #[should_panic(expected = "middle of a sequence")]
    fn test_split_mid_sequence_panics() {
        let rng = make_rng(42);
        let mut context = QmcSamplingContext::new(&rng, 2, 4);
        context.next_vector2::<2>();
        let _ = context.split(1, 1);
    }

    #[test]
    #[should_panic(expected = "middle of a sequence")]
    fn test_split_in_place_mid_sequence_panics() {
        let rng = make_rng(42);
        let mut context = QmcSamplingContext::new(&rng, 2, 4);
        context.next_vector2::<2>();
        context.split_in_place(1, 1);
    }

    #[test]
    #[should_panic(expected = "vector width")]
    fn test_wrong_vector_width_panics() {
        let rng = make_rng(42);
        let mut context = QmcSamplingContext::new(&rng, 3, 0);
        context.next_vector2::<2>();
    }

    #[test]
    #[should_panic(expected = "exceeds 4")]
    fn test_split_in_place_above_capacity_panics() {
        let rng = make_rng(42);
        let mut context = QmcSamplingContext::new(&rng, 1, 0);
        context.split_in_place(5, 1);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property test: rotation keeps values in [0, 1).
    #[test]
    fn prop_rotation_closure(x in 0.0..1.0f64, offset in 0.0..1.0f64) {
        let r = rotate(x, offset);
        prop_assert!((0.0..1.0).contains(&r), "rotate({}, {}) = {}", x, offset, r);
    }

    /// Property test: rotation by the largest offset below 1 stays closed.
    #[test]
    fn prop_rotation_closure_extreme_offset(x in 0.0..1.0f64) {
        let r = rotate(x, crate::qmc::ONE_MINUS_EPSILON);
        prop_assert!((0.0..1.0).contains(&r));
    }

    /// Property test: two trees built from the same seed draw identical sequences.
    #[test]
    fn prop_determinism(seed in any::<u64>(), depth in 0..12usize, draws in 1..20usize) {
        let rng1 = make_rng(seed);
        let rng2 = make_rng(seed);
        let mut a = QmcSamplingContext::root(&rng1).split(4, 0);
        let mut b = QmcSamplingContext::root(&rng2).split(4, 0);

        for _ in 0..depth {
            a.split_in_place(4, 0);
            b.split_in_place(4, 0);
        }
        for _ in 0..draws {
            prop_assert_eq!(a.next_vector2::<4>(), b.next_vector2::<4>());
        }
    }

    /// Property test: split bookkeeping follows the allocation rule.
    #[test]
    fn prop_split_bookkeeping(
        parent_dim in 1..=MAX_DIMENSION,
        child_dim in 1..=MAX_DIMENSION,
        draws in 0..50usize,
        start in 0..2000usize,
    ) {
        let rng = make_rng(0);
        let mut parent = QmcSamplingContext::with_instance(&rng, parent_dim, 0, start);
        let mut v = vec![0.0; parent_dim];
        for _ in 0..draws {
            parent.next_vector2_into(&mut v);
        }

        let child = parent.split(child_dim, 1);

        prop_assert_eq!(child.base_dimension(), parent_dim);
        prop_assert_eq!(child.base_instance(), start + draws);
        prop_assert_eq!(child.total_dimension(), parent_dim + child_dim);
        prop_assert_eq!(child.instance(), 0);
    }
}
