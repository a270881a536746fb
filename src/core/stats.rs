//! Histogram binning and kernel density estimates for feature plots.

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `counts.len() + 1` ascending bin edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` using the "auto" rule: the smaller of the Sturges and
    /// Freedman–Diaconis bin widths. Falls back to Sturges when the FD count
    /// would exceed [`MAX_BINS`]. Returns `None` for an empty input or
    /// non-finite values.
    pub fn auto(values: &[f64]) -> Option<Self> {
        if values.is_empty() || values.iter().any(|v| !v.is_finite()) {
            return None;
        }

        let (min, max) = min_max(values);
        if min == max {
            return Some(Self::with_edges(values, vec![min - 0.5, min + 0.5]));
        }

        let bins = auto_bin_count(values, min, max);
        let width = (max - min) / bins as f64;
        let edges = (0..=bins).map(|i| min + width * i as f64).collect();
        Some(Self::with_edges(values, edges))
    }

    fn with_edges(values: &[f64], edges: Vec<f64>) -> Self {
        let bins = edges.len() - 1;
        let (lo, hi) = (edges[0], edges[bins]);
        let mut counts = vec![0usize; bins];

        for &v in values {
            // right edge of the last bin is inclusive
            let idx = if v >= hi {
                bins - 1
            } else {
                (((v - lo) / (hi - lo)) * bins as f64).floor() as usize
            };
            counts[idx.min(bins - 1)] += 1;
        }
        Self { edges, counts }
    }

    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// Upper bound on the "auto" bin count.
pub const MAX_BINS: usize = 1000;

fn auto_bin_count(values: &[f64], min: f64, max: f64) -> usize {
    let n = values.len() as f64;
    let range = max - min;

    let sturges_bins = (n.log2() + 1.0).ceil();
    let iqr = percentile(values, 75.0) - percentile(values, 25.0);
    let fd_width = 2.0 * iqr * n.powf(-1.0 / 3.0);

    // a tight cluster plus an outlier makes the FD count explode
    let fd_bins = (range / fd_width).ceil();
    let bins = if fd_width > 0.0 && fd_bins <= MAX_BINS as f64 {
        sturges_bins.max(fd_bins)
    } else {
        sturges_bins
    };
    (bins as usize).clamp(1, MAX_BINS)
}

/// Linear-interpolated percentile, `q` in `[0, 100]`.
pub fn percentile(values: &[f64], q: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}

/// Sample standard deviation (n - 1 denominator).
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    var.sqrt()
}

/// Gaussian kernel density estimate with Scott's bandwidth, evaluated at
/// `points` evenly spaced positions across the data range.
///
/// Returns `None` when the bandwidth would be zero (fewer than two distinct
/// values).
pub fn gaussian_kde(values: &[f64], points: usize) -> Option<Vec<(f64, f64)>> {
    let n = values.len() as f64;
    let bandwidth = std_dev(values) * n.powf(-1.0 / 5.0);
    if bandwidth <= 0.0 || !bandwidth.is_finite() || points < 2 {
        return None;
    }

    let (min, max) = min_max(values);
    let step = (max - min) / (points - 1) as f64;
    let norm = 1.0 / (n * bandwidth * (2.0 * std::f64::consts::PI).sqrt());

    Some(
        (0..points)
            .map(|i| {
                let x = min + step * i as f64;
                let density: f64 = values
                    .iter()
                    .map(|v| (-0.5 * ((x - v) / bandwidth).powi(2)).exp())
                    .sum();
                (x, density * norm)
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_counts_every_value() {
        let values = [1.0, 2.0, 2.0, 3.0, 4.0, 5.0, 5.0, 5.0];
        let hist = Histogram::auto(&values).unwrap();
        assert_eq!(hist.total(), values.len());
        assert_eq!(hist.edges.len(), hist.counts.len() + 1);
        assert_eq!(hist.edges[0], 1.0);
        assert!((hist.edges[hist.counts.len()] - 5.0).abs() < 1e-9);
        // maximum lands in the last bin
        assert!(*hist.counts.last().unwrap() >= 3);
    }

    #[test]
    fn test_constant_values_use_one_unit_bin() {
        let hist = Histogram::auto(&[3.0, 3.0, 3.0]).unwrap();
        assert_eq!(hist.edges, vec![2.5, 3.5]);
        assert_eq!(hist.counts, vec![3]);
    }

    #[test]
    fn test_outlier_column_falls_back_to_sturges() {
        let mut values: Vec<f64> = (0..100).map(|i| i as f64 * 1e-6).collect();
        values.push(1e6);

        let hist = Histogram::auto(&values).unwrap();
        assert_eq!(hist.counts.len(), 8);
        assert_eq!(hist.total(), values.len());
        assert_eq!(hist.counts[0], 100);
        assert_eq!(*hist.counts.last().unwrap(), 1);
    }

    #[test]
    fn test_empty_or_nan_input() {
        assert!(Histogram::auto(&[]).is_none());
        assert!(Histogram::auto(&[1.0, f64::NAN]).is_none());
    }

    #[test]
    fn test_percentile_interpolates() {
        let values = [4.0, 1.0, 3.0, 2.0];
        assert_eq!(percentile(&values, 0.0), 1.0);
        assert_eq!(percentile(&values, 100.0), 4.0);
        assert!((percentile(&values, 50.0) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_kde_integrates_to_roughly_one() {
        let values: Vec<f64> = (0..50).map(|i| (i % 10) as f64).collect();
        let curve = gaussian_kde(&values, 200).unwrap();
        let step = curve[1].0 - curve[0].0;
        let area: f64 = curve.iter().map(|(_, d)| d * step).sum();
        // evaluated on the data range only, so some tail mass is missing
        assert!(area > 0.8 && area <= 1.01, "area = {}", area);
    }

    #[test]
    fn test_kde_needs_spread() {
        assert!(gaussian_kde(&[2.0, 2.0], 10).is_none());
        assert!(gaussian_kde(&[2.0], 10).is_none());
    }
}
