use super::*;
use crate::helpers::utils::FakeRandom;

#[test]
fn can_return_weights() {
    let random = DefaultRandom::new_with_seed(42);
    let weights = &[100, 50, 20];
    let experiments = 10000_usize;
    let total_sum = weights.iter().sum::<usize>();
    let mut counter = [0_usize; 3];

    (0..experiments).for_each(|_| {
        let idx = random.weighted(weights);
        *counter.get_mut(idx).unwrap() += 1;
    });

    weights.iter().enumerate().for_each(|(idx, weight)| {
        let actual_ratio = counter[idx] as f64 / experiments as f64;
        let expected_ratio = *weight as f64 / total_sum as f64;

        assert!((actual_ratio - expected_ratio).abs() < 0.05);
    });
}

#[test]
fn can_reproduce_sequence_with_the_same_seed() {
    let sample = |random: &DefaultRandom| {
        (0..20).map(|_| (random.uniform_int(0, 100), random.uniform_real(0., 1.).to_bits())).collect::<Vec<_>>()
    };

    assert_eq!(sample(&DefaultRandom::new_with_seed(7)), sample(&DefaultRandom::new_with_seed(7)));
    assert_ne!(sample(&DefaultRandom::new_with_seed(7)), sample(&DefaultRandom::new_with_seed(8)));
}

#[test]
fn can_handle_degenerate_ranges() {
    let random = DefaultRandom::new_with_seed(0);

    assert_eq!(random.uniform_int(3, 3), 3);
    assert_eq!(random.uniform_real(1.5, 1.5), 1.5);
    assert!(!random.is_hit(0.));
    assert!(random.is_hit(1.));
    assert!(!random.is_hit(f64::NAN));
}

#[test]
fn can_sample_distinct_indices() {
    let random = DefaultRandom::new_with_seed(1);

    (0..100).for_each(|_| {
        let mut indices = random.sample_indices(10, 4);
        assert_eq!(indices.len(), 4);
        assert!(indices.iter().all(|&idx| idx < 10));

        indices.sort_unstable();
        indices.dedup();
        assert_eq!(indices.len(), 4);
    });

    assert_eq!(random.sample_indices(3, 5).len(), 3);
}

#[test]
fn can_use_default_methods_with_predefined_values() {
    let random = FakeRandom::new(vec![3], vec![0.2, 0.9, 0.5, 0.1, 0.99]);

    assert!(random.is_hit(0.3));
    assert!(!random.is_hit(0.3));
    // the heaviest weight gets the smallest sampled value
    assert_eq!(random.weighted(&[1, 1, 100]), 2);
    // swaps position 0 with 3
    assert_eq!(random.sample_indices(4, 1), vec![3]);
}
