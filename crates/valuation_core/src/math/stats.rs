//! Order statistics over peer observations.
//!
//! This module provides the median and percentile routines used to
//! aggregate comparable-company multiples. The median is preferred over
//! the mean throughout the workspace because small peer sets are prone
//! to outliers.
//!
//! Non-finite observations are dropped before any statistic is computed;
//! a statistic over an empty (or fully non-finite) sample is `None`,
//! never NaN.

/// Returns the p-th percentile of a sample using linear interpolation.
///
/// # Mathematical Definition
/// ```text
/// pos   = p / 100 × (n − 1)        over the ascending-sorted sample
/// value = x[⌊pos⌋] + (pos − ⌊pos⌋) × (x[⌈pos⌉] − x[⌊pos⌋])
/// ```
///
/// Non-finite observations are dropped before sorting.
///
/// # Arguments
/// * `values` - Sample observations, any order
/// * `p` - Percentile in [0, 100]
///
/// # Returns
/// The interpolated percentile, or `None` when the filtered sample is
/// empty or `p` is outside [0, 100].
///
/// # Examples
/// ```
/// use valuation_core::math::stats::percentile;
///
/// let sample = [10.0, 12.0, 15.0];
/// assert_eq!(percentile(&sample, 25.0), Some(11.0));
/// assert_eq!(percentile(&sample, 50.0), Some(12.0));
/// assert_eq!(percentile(&sample, 75.0), Some(13.5));
/// ```
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    if !(0.0..=100.0).contains(&p) {
        return None;
    }

    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let pos = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let weight = pos - lower as f64;

    Some(sorted[lower] + weight * (sorted[upper] - sorted[lower]))
}

/// Returns the median of a sample.
///
/// Equivalent to the 50th percentile under linear interpolation: the
/// middle observation for odd-sized samples, the midpoint of the two
/// middle observations for even-sized samples.
///
/// # Examples
/// ```
/// use valuation_core::math::stats::median;
///
/// assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
/// assert_eq!(median(&[2.0, 3.0]), Some(2.5));
/// assert_eq!(median(&[]), None);
/// ```
pub fn median(values: &[f64]) -> Option<f64> {
    percentile(values, 50.0)
}

/// Quartile summary of a sample.
///
/// The three values reported for every peer-multiple band: lower
/// quartile, median and upper quartile.
///
/// # Examples
/// ```
/// use valuation_core::math::stats::Quartiles;
///
/// let q = Quartiles::compute(&[10.0, 12.0, 15.0]).unwrap();
/// assert_eq!(q.p25, 11.0);
/// assert_eq!(q.p50, 12.0);
/// assert_eq!(q.p75, 13.5);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quartiles {
    /// Lower quartile (25th percentile).
    pub p25: f64,
    /// Median (50th percentile).
    pub p50: f64,
    /// Upper quartile (75th percentile).
    pub p75: f64,
}

impl Quartiles {
    /// Computes the quartile summary of a sample.
    ///
    /// Non-finite observations are dropped first; `None` when nothing
    /// usable remains.
    pub fn compute(values: &[f64]) -> Option<Self> {
        Some(Self {
            p25: percentile(values, 25.0)?,
            p50: percentile(values, 50.0)?,
            p75: percentile(values, 75.0)?,
        })
    }

    /// Applies a positive scale to all three quartiles.
    ///
    /// Used to turn a multiple band into a value band by scaling with
    /// the subject company's base metric.
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            p25: self.p25 * factor,
            p50: self.p50 * factor,
            p75: self.p75 * factor,
        }
    }

    /// Shifts all three quartiles by the same amount.
    ///
    /// Used for the enterprise-to-equity bridge, which subtracts net
    /// debt from every point of a band.
    pub fn shift(&self, offset: f64) -> Self {
        Self {
            p25: self.p25 + offset,
            p50: self.p50 + offset,
            p75: self.p75 + offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ========================================
    // percentile
    // ========================================

    #[test]
    fn test_percentile_three_points() {
        let sample = [10.0, 12.0, 15.0];
        assert_eq!(percentile(&sample, 25.0), Some(11.0));
        assert_eq!(percentile(&sample, 50.0), Some(12.0));
        assert_eq!(percentile(&sample, 75.0), Some(13.5));
    }

    #[test]
    fn test_percentile_two_points() {
        let sample = [2.0, 3.0];
        assert_eq!(percentile(&sample, 25.0), Some(2.25));
        assert_eq!(percentile(&sample, 50.0), Some(2.5));
        assert_eq!(percentile(&sample, 75.0), Some(2.75));
    }

    #[test]
    fn test_percentile_four_points() {
        let sample = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&sample, 25.0), Some(1.75));
        assert_eq!(percentile(&sample, 50.0), Some(2.5));
        assert_eq!(percentile(&sample, 75.0), Some(3.25));
    }

    #[test]
    fn test_percentile_single_point() {
        let sample = [7.0];
        assert_eq!(percentile(&sample, 25.0), Some(7.0));
        assert_eq!(percentile(&sample, 50.0), Some(7.0));
        assert_eq!(percentile(&sample, 75.0), Some(7.0));
    }

    #[test]
    fn test_percentile_endpoints() {
        let sample = [5.0, 1.0, 3.0];
        assert_eq!(percentile(&sample, 0.0), Some(1.0));
        assert_eq!(percentile(&sample, 100.0), Some(5.0));
    }

    #[test]
    fn test_percentile_unsorted_input() {
        let sample = [15.0, 10.0, 12.0];
        assert_eq!(percentile(&sample, 50.0), Some(12.0));
    }

    #[test]
    fn test_percentile_drops_non_finite() {
        let sample = [10.0, f64::NAN, 12.0, f64::INFINITY, 15.0, f64::NEG_INFINITY];
        assert_eq!(percentile(&sample, 50.0), Some(12.0));
    }

    #[test]
    fn test_percentile_empty() {
        assert_eq!(percentile(&[], 50.0), None);
        assert_eq!(percentile(&[f64::NAN], 50.0), None);
    }

    #[test]
    fn test_percentile_out_of_range() {
        let sample = [1.0, 2.0];
        assert_eq!(percentile(&sample, -1.0), None);
        assert_eq!(percentile(&sample, 101.0), None);
    }

    // ========================================
    // median
    // ========================================

    #[test]
    fn test_median_odd() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
    }

    #[test]
    fn test_median_even() {
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn test_median_single() {
        assert_eq!(median(&[42.0]), Some(42.0));
    }

    #[test]
    fn test_median_empty() {
        assert_eq!(median(&[]), None);
    }

    // ========================================
    // Quartiles
    // ========================================

    #[test]
    fn test_quartiles_compute() {
        let q = Quartiles::compute(&[10.0, 12.0, 15.0]).unwrap();
        assert_eq!(q.p25, 11.0);
        assert_eq!(q.p50, 12.0);
        assert_eq!(q.p75, 13.5);
    }

    #[test]
    fn test_quartiles_empty() {
        assert_eq!(Quartiles::compute(&[]), None);
        assert_eq!(Quartiles::compute(&[f64::NAN, f64::INFINITY]), None);
    }

    #[test]
    fn test_quartiles_scale() {
        let q = Quartiles::compute(&[1.0, 2.0, 3.0]).unwrap();
        let scaled = q.scale(10.0);
        assert_relative_eq!(scaled.p25, 15.0);
        assert_relative_eq!(scaled.p50, 20.0);
        assert_relative_eq!(scaled.p75, 25.0);
    }

    #[test]
    fn test_quartiles_shift() {
        let q = Quartiles::compute(&[1.0, 2.0, 3.0]).unwrap();
        let shifted = q.shift(-1.0);
        assert_relative_eq!(shifted.p25, 0.5);
        assert_relative_eq!(shifted.p50, 1.0);
        assert_relative_eq!(shifted.p75, 1.5);
    }

    // ========================================
    // Property-based tests
    // ========================================

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        // Samples of 1..=20 moderate finite values
        fn sample_strategy() -> impl Strategy<Value = Vec<f64>> {
            prop::collection::vec(-1.0e6..1.0e6_f64, 1..20)
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(1000))]

            #[test]
            fn test_median_within_sample_bounds(sample in sample_strategy()) {
                let mid = median(&sample).expect("non-empty sample has a median");
                let lo = sample.iter().copied().fold(f64::INFINITY, f64::min);
                let hi = sample.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                prop_assert!(
                    mid >= lo && mid <= hi,
                    "median {} outside sample range [{}, {}]",
                    mid, lo, hi
                );
            }

            #[test]
            fn test_percentile_monotone_in_p(sample in sample_strategy()) {
                let p25 = percentile(&sample, 25.0).unwrap();
                let p50 = percentile(&sample, 50.0).unwrap();
                let p75 = percentile(&sample, 75.0).unwrap();
                prop_assert!(p25 <= p50 && p50 <= p75);
            }

            #[test]
            fn test_quartiles_are_ordered(sample in sample_strategy()) {
                let q = Quartiles::compute(&sample).unwrap();
                prop_assert!(q.p25 <= q.p50 && q.p50 <= q.p75);
            }
        }
    }
}
