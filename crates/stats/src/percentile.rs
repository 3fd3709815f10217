//! Bounded-range percentile estimation for non-negative integers.
//!
//! Values are counted into a fixed-width frequency histogram rather than
//! stored, so memory and query time depend only on the configured capacity.
//! Everything at or above `capacity - 1` is counted in the top bucket, which
//! keeps the bound but flattens the tail of the distribution.

use crate::summary::RunningSummary;
use graxx_core::{GraxxError, Result, Sample};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{BufRead, Write};

/// Streaming percentile estimator over a clamped integer histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "IntegerStatsRepr")]
pub struct IntegerStats {
    buckets: Vec<u64>,
    total: u64,
    summary: RunningSummary,
}

impl IntegerStats {
    /// Create an empty estimator whose valid bucket range is `0..capacity`.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(GraxxError::InvalidCapacity(capacity));
        }
        tracing::debug!(capacity, "created integer histogram");
        Ok(Self {
            buckets: vec![0; capacity],
            total: 0,
            summary: RunningSummary::new(),
        })
    }

    /// Build an estimator from a mixed sequence of integers, floats and text.
    ///
    /// The first item that cannot be coerced aborts the whole load.
    pub fn from_samples<I>(capacity: usize, samples: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Sample>,
    {
        let mut stats = Self::new(capacity)?;
        for sample in samples {
            stats.push_sample(&sample.into())?;
        }
        tracing::debug!(capacity, total = stats.total, "bulk-loaded samples");
        Ok(stats)
    }

    /// Build an estimator from a line-oriented source, one integer per line.
    pub fn from_reader<R: BufRead>(capacity: usize, reader: R) -> Result<Self> {
        let mut stats = Self::new(capacity)?;
        for line in reader.lines() {
            let line = line?;
            stats.push_sample(&Sample::Text(line))?;
        }
        tracing::debug!(capacity, total = stats.total, "bulk-loaded lines");
        Ok(stats)
    }

    /// Coerce `sample` and count it.
    pub fn push_sample(&mut self, sample: &Sample) -> Result<()> {
        self.ingest(sample.to_count()?);
        Ok(())
    }

    /// Count one observation.
    pub fn ingest(&mut self, value: u64) {
        let top = self.buckets.len() - 1;
        let index = usize::try_from(value).map_or(top, |v| v.min(top));
        self.buckets[index] += 1;
        self.total += 1;
        self.summary.add(value);
    }

    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Number of values ingested, including clamped ones.
    pub fn total_count(&self) -> u64 {
        self.total
    }

    pub fn bucket(&self, index: usize) -> Option<u64> {
        self.buckets.get(index).copied()
    }

    pub fn buckets(&self) -> &[u64] {
        &self.buckets
    }

    /// Summary statistics of the raw, unclamped values.
    pub fn summary(&self) -> &RunningSummary {
        &self.summary
    }

    /// Estimate the `percentile`-th percentile (1..=100).
    ///
    /// `Ok(None)` means the percentile is undefined, which is the case for an
    /// empty estimator.
    pub fn percentile(&self, percentile: u32) -> Result<Option<usize>> {
        if !(1..=100).contains(&percentile) {
            return Err(GraxxError::InvalidPercentile(percentile));
        }
        Ok(self.locate(percentile))
    }

    pub fn median(&self) -> Option<usize> {
        self.locate(50)
    }

    fn locate(&self, percentile: u32) -> Option<usize> {
        if self.total == 0 {
            return None;
        }
        let target = target_rank(self.total, percentile);
        let mut passed = 0u64;
        for (i, &count) in self.buckets.iter().enumerate() {
            passed += count;
            if passed < target {
                continue;
            }
            if self.total % 2 != 0 {
                return Some(i);
            }
            // Even totals average with the next occupied bucket, if any.
            let next = self.buckets[i + 1..]
                .iter()
                .position(|&c| c > 0)
                .map(|offset| i + 1 + offset);
            return Some(match next {
                Some(k) => (i + k) / 2,
                None => i,
            });
        }
        None
    }

    /// Fraction of observations whose bucket index is `>= threshold`.
    ///
    /// Returns `NaN` on an empty estimator.
    pub fn fraction_above(&self, threshold: usize) -> f64 {
        let start = threshold.min(self.buckets.len());
        let above: u64 = self.buckets[start..].iter().sum();
        above as f64 / self.total as f64
    }

    pub fn percentage_above(&self, threshold: usize) -> f64 {
        100.0 * self.fraction_above(threshold)
    }

    /// Write `index \t count \t cumulative fraction below` for every bucket.
    pub fn write_tsv<W: Write>(&self, mut out: W) -> Result<()> {
        let mut below = 0u64;
        for (i, &count) in self.buckets.iter().enumerate() {
            let above = self.total - below;
            let fraction_below = 1.0 - above as f64 / self.total as f64;
            // Debug formatting keeps the trailing ".0" on whole numbers.
            writeln!(out, "{i}\t{count}\t{fraction_below:?}")?;
            below += count;
        }
        out.flush()?;
        Ok(())
    }
}

/// Rank threshold for `percentile`, computed in single precision as
/// `total / (100 / percentile)` and truncated.
fn target_rank(total: u64, percentile: u32) -> u64 {
    (total as f32 / (100f32 / percentile as f32)) as u64
}

impl fmt::Display for IntegerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;
        writeln!(f, "IntegerStats:")?;
        writeln!(f, "n: {}", s.count())?;
        match (s.min(), s.max()) {
            (Some(min), Some(max)) => {
                writeln!(f, "min: {min}")?;
                writeln!(f, "max: {max}")?;
            }
            _ => {
                writeln!(f, "min: NaN")?;
                writeln!(f, "max: NaN")?;
            }
        }
        writeln!(f, "sum: {}", s.sum())?;
        writeln!(f, "mean: {}", s.mean())?;
        writeln!(f, "variance: {}", s.variance())?;
        writeln!(f, "standard deviation: {}", s.std_dev())?;
        match self.median() {
            Some(m) => writeln!(f, "Median: {m}"),
            None => writeln!(f, "Median: -1"),
        }
    }
}

#[derive(Deserialize)]
struct IntegerStatsRepr {
    buckets: Vec<u64>,
    total: u64,
    summary: RunningSummary,
}

impl TryFrom<IntegerStatsRepr> for IntegerStats {
    type Error = String;

    fn try_from(repr: IntegerStatsRepr) -> std::result::Result<Self, Self::Error> {
        if repr.buckets.is_empty() {
            return Err("histogram must have at least one bucket".to_string());
        }
        let sum = repr
            .buckets
            .iter()
            .try_fold(0u64, |acc, &count| acc.checked_add(count))
            .ok_or_else(|| "bucket counts overflow u64".to_string())?;
        if sum != repr.total {
            return Err(format!(
                "bucket counts sum to {sum} but total is {}",
                repr.total
            ));
        }
        if repr.summary.count() != repr.total {
            return Err(format!(
                "summary holds {} values but total is {}",
                repr.summary.count(),
                repr.total
            ));
        }
        Ok(Self {
            buckets: repr.buckets,
            total: repr.total,
            summary: repr.summary,
        })
    }
}
