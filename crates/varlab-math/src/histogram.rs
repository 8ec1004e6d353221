//! Fixed bucket-count histograms.

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};

/// A single histogram bucket covering `[lower, upper)`.
///
/// The last bucket of a histogram is closed on the right so the maximum
/// observation is counted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    /// Inclusive lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
    /// Number of observations in the bucket.
    pub count: usize,
}

impl Bucket {
    /// Bucket width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Equal-width histogram over the range of the data.
///
/// When every observation is identical the histogram has zero width: all
/// buckets collapse onto that value and the first bucket holds every count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    buckets: Vec<Bucket>,
    total: usize,
}

impl Histogram {
    /// Builds a histogram with `bucket_count` equal-width buckets.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` is empty, `bucket_count` is zero, or any
    /// observation is not finite.
    pub fn new(data: &[f64], bucket_count: usize) -> MathResult<Self> {
        if data.is_empty() {
            return Err(MathError::insufficient_data(1, 0));
        }
        if bucket_count == 0 {
            return Err(MathError::invalid_input("bucket count must be positive"));
        }
        if let Some(bad) = data.iter().find(|x| !x.is_finite()) {
            return Err(MathError::invalid_input(format!(
                "histogram data must be finite, got {bad}"
            )));
        }

        let lower = data.iter().copied().fold(f64::INFINITY, f64::min);
        let upper = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let width = (upper - lower) / bucket_count as f64;

        let mut buckets: Vec<Bucket> = (0..bucket_count)
            .map(|i| Bucket {
                lower: lower + width * i as f64,
                upper: if i + 1 == bucket_count {
                    upper
                } else {
                    lower + width * (i + 1) as f64
                },
                count: 0,
            })
            .collect();

        for &x in data {
            let index = if width > 0.0 {
                (((x - lower) / width).floor() as usize).min(bucket_count - 1)
            } else {
                0
            };
            buckets[index].count += 1;
        }

        Ok(Self {
            buckets,
            total: data.len(),
        })
    }

    /// The buckets, lowest first.
    #[must_use]
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Number of buckets.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of observations.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Lower bound of the first bucket.
    #[must_use]
    pub fn lower_bound(&self) -> f64 {
        self.buckets.first().map_or(0.0, |b| b.lower)
    }

    /// Upper bound of the last bucket.
    #[must_use]
    pub fn upper_bound(&self) -> f64 {
        self.buckets.last().map_or(0.0, |b| b.upper)
    }

    /// Returns true when all observations share one value.
    #[must_use]
    pub fn is_zero_width(&self) -> bool {
        self.upper_bound() == self.lower_bound()
    }

    /// Largest bucket count, used to scale bar charts.
    #[must_use]
    pub fn max_count(&self) -> usize {
        self.buckets.iter().map(|b| b.count).max().unwrap_or(0)
    }
}
