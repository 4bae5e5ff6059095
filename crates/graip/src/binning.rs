//! Adaptive degree-histogram binning (C6).
//!
//! Mean degree counts estimated from Monte Carlo sampling get noisy in the
//! tail: many degree values are expected to hold fewer than one node on
//! average, and scoring a generated graph bin-by-bin against those degrees
//! directly would be dominated by sampling noise. Binning merges low-mass
//! degrees from the top down until each bin holds at least one expected
//! node, then runs a second pass that tightens each multi-degree bin's
//! lo/hi edges inward until the mass trimmed off each end clears 1% of the
//! total, before finally setting each bin's acceptance bound.
//! Grounded on `bin_degrees`/`custom_degree_histogram` in
//! `generator/models.py`.

/// One bin of an adaptively-binned degree histogram, covering degrees
/// `lo..=hi`.
#[derive(Debug, Clone, PartialEq)]
pub struct DegreeBin {
    /// Inclusive lower degree bound.
    pub lo: usize,
    /// Inclusive upper degree bound.
    pub hi: usize,
    /// Expected node count summed over this bin's degree range.
    pub mean: f64,
    /// Acceptable absolute deviation from `mean` before a proposal's count
    /// in this bin is considered out of bounds.
    pub bound: f64,
}

impl DegreeBin {
    /// Bin width, in degree values.
    #[must_use]
    pub fn width(&self) -> usize {
        self.hi - self.lo + 1
    }

    /// Whether `count` (nodes observed at degrees in this bin) is within
    /// the acceptable range around `mean`.
    #[must_use]
    pub fn accepts(&self, count: f64) -> bool {
        (count - self.mean).abs() <= self.bound
    }

    /// Sum `hist`'s counts over this bin's degree range.
    #[must_use]
    pub fn observed(&self, hist: &[usize]) -> f64 {
        hist.iter()
            .skip(self.lo)
            .take(self.width())
            .map(|&c| c as f64)
            .sum()
    }
}

/// Merge a degree histogram's mean/std arrays into adaptive bins.
///
/// Degrees are merged from the top down until each bin's expected mass
/// clears `1 - 0.1/samples`. Any bin wider than one degree then has its
/// `lo`/`hi` edges tightened inward, trimming degrees off each end until
/// the excluded mass at that end clears 1% of the total (dropping the
/// long near-zero tails binning alone leaves behind), before its bound is
/// set from the fractional part of its mass. Trailing zero-mean degrees
/// are dropped before binning.
///
/// # Panics
///
/// Panics if `mean.len() != std.len()`.
#[must_use]
pub fn bin_degrees(mean: &[f64], std: &[f64], samples: usize) -> Vec<DegreeBin> {
    assert_eq!(mean.len(), std.len());
    let trimmed_len = mean.iter().rposition(|&m| m > 0.0).map_or(0, |i| i + 1);
    let mean = &mean[..trimmed_len];
    let std = &std[..trimmed_len];

    if mean.is_empty() {
        return Vec::new();
    }

    let tolerance = 1.0 - 0.1 / samples as f64;

    // Accumulate from the highest degree down; each time the running mass
    // clears the tolerance (or we hit degree 0), close the current bin and
    // start a new one.
    let mut raw_bins: Vec<(usize, usize, f64)> = Vec::new();
    let mut hi = mean.len() - 1;
    let mut mass = 0.0;
    for d in (0..mean.len()).rev() {
        mass += mean[d];
        if mass >= tolerance || d == 0 {
            raw_bins.push((d, hi, mass));
            if d > 0 {
                hi = d - 1;
                mass = 0.0;
            }
        }
    }
    raw_bins.reverse();

    // Second pass: bin widths depend on sample count, because peaks broaden
    // at larger sample sizes. For any bin wider than one degree, tighten
    // its bounds inward, trimming degrees off the bottom and top until the
    // excluded mass at each end clears 1% of the total.
    let limit = 0.01;
    for (lo, hi, mass) in &mut raw_bins {
        if *hi == *lo || *mass == 0.0 {
            continue;
        }
        let mut lower_part = mean[*lo] + mean.get(*lo + 1).copied().unwrap_or(0.0);
        while lower_part < limit && *lo + 1 < *hi {
            *lo += 1;
            lower_part += mean.get(*lo + 1).copied().unwrap_or(0.0);
        }
        let mut upper_part = mean[*hi] + mean[*hi - 1];
        while upper_part < limit && *hi > *lo + 1 {
            *hi -= 1;
            upper_part += mean[*hi - 1];
        }
    }

    raw_bins
        .into_iter()
        .map(|(lo, hi, mass)| {
            let bound = if hi == lo {
                let next = std.get(hi + 1).copied().unwrap_or(std[hi]);
                2.0 * next
            } else {
                let frac_up = mass.ceil() - mass;
                let frac_down = mass - mass.floor();
                1.1 * frac_up.max(frac_down)
            };
            DegreeBin {
                lo,
                hi,
                mean: mass,
                bound,
            }
        })
        .collect()
}
