//! Property-based tests for the statistical primitives.
//!
//! - Percentiles are monotone in the requested percentile
//! - Percentiles stay within the data range
//! - Correlation is symmetric with a unit diagonal
//! - Φ and Φ⁻¹ are inverses

use proptest::prelude::*;
use varlab_math::prelude::*;

fn finite_series(min_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1_000.0..1_000.0f64, min_len..200)
}

proptest! {
    #[test]
    fn percentile_is_monotone(data in finite_series(1), p1 in 0.0..100.0f64, p2 in 0.0..100.0f64) {
        let (lo, hi) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
        let a = percentile(&data, lo).unwrap();
        let b = percentile(&data, hi).unwrap();
        prop_assert!(a <= b);
    }

    #[test]
    fn percentile_within_range(data in finite_series(1), p in 0.0..=100.0f64) {
        let v = percentile(&data, p).unwrap();
        prop_assert!(v >= min(&data).unwrap());
        prop_assert!(v <= max(&data).unwrap());
    }

    #[test]
    fn correlation_is_symmetric(
        pairs in prop::collection::vec((-1.0..1.0f64, -1.0..1.0f64), 3..100)
    ) {
        let a: Vec<f64> = pairs.iter().map(|p| p.0).collect();
        let b: Vec<f64> = pairs.iter().map(|p| p.1).collect();
        if let (Ok(ab), Ok(ba)) = (pearson(&a, &b), pearson(&b, &a)) {
            prop_assert_eq!(ab, ba);
            prop_assert!((-1.0..=1.0).contains(&ab));

            let r = CorrelationMatrix::from_series(&[a.as_slice(), b.as_slice()]).unwrap();
            prop_assert_eq!(r.get(0, 0), 1.0);
            prop_assert_eq!(r.get(1, 1), 1.0);
            prop_assert_eq!(r.get(0, 1), r.get(1, 0));
        }
    }

    #[test]
    fn self_correlation_is_one(data in finite_series(2)) {
        if let Ok(r) = pearson(&data, &data) {
            prop_assert_eq!(r, 1.0);
        }
    }

    #[test]
    fn inverse_cdf_round_trip(p in 1e-6..(1.0 - 1e-6)) {
        let x = StandardNormal.inverse_cdf(p);
        prop_assert!((StandardNormal.cdf(x) - p).abs() < 1e-10);
    }

    #[test]
    fn histogram_counts_everything(data in finite_series(1), buckets in 1usize..50) {
        let hist = Histogram::new(&data, buckets).unwrap();
        let counted: usize = hist.buckets().iter().map(|b| b.count).sum();
        prop_assert_eq!(counted, data.len());
        prop_assert_eq!(hist.bucket_count(), buckets);
    }
}
