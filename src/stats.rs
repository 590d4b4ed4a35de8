//! Streaming min / max / mean summary of a temperature
//! field.

use std::ops::AddAssign;

use serde_derive::*;

/// Accumulator over temperature samples.
///
/// Merging two accumulators with `+=` is equivalent to
/// accumulating their inputs in sequence, so per-frame
/// stats can be folded into a cumulative one across a
/// batch.
#[derive(Debug, Clone, Copy)]
pub struct Stats {
    count: usize,
    sum: f64,
    min: f64,
    max: f64,
}

impl Default for Stats {
    fn default() -> Self {
        Stats {
            count: 0,
            sum: 0.,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl AddAssign<f64> for Stats {
    fn add_assign(&mut self, temp: f64) {
        self.count += 1;
        self.sum += temp;
        self.min = self.min.min(temp);
        self.max = self.max.max(temp);
    }
}

impl AddAssign<&Stats> for Stats {
    fn add_assign(&mut self, other: &Stats) {
        self.count += other.count;
        self.sum += other.sum;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }
}

impl Stats {
    pub fn count(&self) -> usize {
        self.count
    }

    /// `None` when nothing has been accumulated.
    pub fn summary(&self) -> Option<FrameStats> {
        if self.count == 0 {
            return None;
        }
        Some(FrameStats {
            min: self.min,
            max: self.max,
            avg: self.sum / self.count as f64,
        })
    }
}

/// Min / max / average of one temperature field, in
/// celsius.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

impl FrameStats {
    /// Display labels in the conventional max / min / avg
    /// order, values rounded to two decimals.
    pub fn labels(&self) -> [String; 3] {
        [
            format!("max_temp = {}", round2(self.max)),
            format!("min_temp = {}", round2(self.min)),
            format!("avg_temp = {}", round2(self.avg)),
        ]
    }
}

/// Round half away from zero to two decimals.
pub fn round2(val: f64) -> f64 {
    (val * 100.).round() / 100.
}
