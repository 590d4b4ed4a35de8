//! Map a temperature field to a false-color image.
//!
//! The palette is a four-segment piecewise-linear rainbow
//! ramp (blue → cyan → green → yellow → red) over the
//! frame-normalized 0–255 range. Channel bytes are written
//! in BGR order, the convention of the display pipelines
//! this feeds; [`bgr_to_rgb_bytes`] flattens to the RGB
//! order most image encoders expect.

use itertools::iproduct;
use ndarray::{Array2, Array3};
use serde_derive::*;

use crate::error::{Error, Result};

/// Width of each ramp segment in the 0–255 range.
pub const DEFAULT_STEP: i32 = 64;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RainbowPalette {
    #[serde(default = "default_step")]
    step: i32,
}

fn default_step() -> i32 {
    DEFAULT_STEP
}

impl Default for RainbowPalette {
    fn default() -> Self {
        RainbowPalette { step: DEFAULT_STEP }
    }
}

impl RainbowPalette {
    pub fn new(step: i32) -> Result<Self> {
        if step <= 0 {
            return Err(Error::InvalidStep(step));
        }
        Ok(RainbowPalette { step })
    }

    pub fn step(&self) -> i32 {
        self.step
    }

    /// BGR shade of a normalized value scaled to 0–255.
    ///
    /// Inputs outside `[0, 255]` only arise from
    /// floating-point drift at the edges of the
    /// normalization; both the value and each channel are
    /// clamped rather than left to wrap.
    pub fn shade(&self, scaled: i32) -> [u8; 3] {
        let v = scaled.max(0).min(255);
        let step = self.step;
        if v < step {
            // blue to cyan
            [255, channel(v * 4), 0]
        } else if v < step * 2 {
            // cyan to green
            [channel(255 - (v - step) * 4), 255, 0]
        } else if v < step * 3 {
            // green to yellow
            [0, 255, channel((v - step * 2) * 4)]
        } else {
            // yellow to red
            [0, channel(255 - (v - step * 3) * 4), 255]
        }
    }

    /// Renders a temperature field against the given range.
    ///
    /// `min` and `max` are the field's own statistics; the
    /// mapper does not recompute them. A zero-width range
    /// degenerates to the lowest shade on every pixel
    /// instead of dividing by zero. Rows are independent,
    /// so the pass is parallelized by row.
    pub fn colorize(&self, temps: &Array2<f64>, min: f64, max: f64) -> Array3<u8> {
        let range = if max == min { 1. } else { max - min };
        let (height, width) = temps.dim();
        let mut color = Array3::zeros((height, width, 3));

        ndarray::Zip::from(temps.outer_iter())
            .and(color.outer_iter_mut())
            .par_for_each(|temp_row, mut color_row| {
                for (col, &temp) in temp_row.iter().enumerate() {
                    let normalized = (temp - min) / range;
                    let bgr = self.shade((normalized * 255.) as i32);
                    for (chan, &val) in bgr.iter().enumerate() {
                        color_row[[col, chan]] = val;
                    }
                }
            });

        color
    }
}

fn channel(val: i32) -> u8 {
    val.max(0).min(255) as u8
}

/// Flattens a BGR color frame into row-major RGB bytes.
pub fn bgr_to_rgb_bytes(color: &Array3<u8>) -> Vec<u8> {
    let (height, width, _) = color.dim();
    let mut bytes = Vec::with_capacity(height * width * 3);
    for (row, col) in iproduct!(0..height, 0..width) {
        bytes.push(color[[row, col, 2]]);
        bytes.push(color[[row, col, 1]]);
        bytes.push(color[[row, col, 0]]);
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shade_segment_boundaries() {
        let palette = RainbowPalette::default();
        assert_eq!(palette.shade(0), [255, 0, 0]);
        assert_eq!(palette.shade(63), [255, 252, 0]);
        assert_eq!(palette.shade(64), [255, 255, 0]);
        assert_eq!(palette.shade(127), [3, 255, 0]);
        assert_eq!(palette.shade(128), [0, 255, 0]);
        assert_eq!(palette.shade(191), [0, 255, 252]);
        assert_eq!(palette.shade(192), [0, 255, 255]);
        assert_eq!(palette.shade(255), [0, 3, 255]);
    }

    #[test]
    fn shade_clamps_out_of_range_input() {
        let palette = RainbowPalette::default();
        assert_eq!(palette.shade(-3), palette.shade(0));
        assert_eq!(palette.shade(270), palette.shade(255));
    }

    #[test]
    fn narrow_step_clamps_channels() {
        // With step 16 the last segment spans far more than
        // 64 values, so the green channel would underflow
        // without clamping.
        let palette = RainbowPalette::new(16).unwrap();
        assert_eq!(palette.shade(255), [0, 0, 255]);
    }

    #[test]
    fn flat_field_degenerates_to_lowest_shade() {
        let palette = RainbowPalette::default();
        let temps = Array2::from_elem((3, 4), 25.0);
        let color = palette.colorize(&temps, 25.0, 25.0);
        assert_eq!(color.dim(), (3, 4, 3));
        for (row, col) in iproduct!(0..3, 0..4) {
            assert_eq!(color[[row, col, 0]], 255);
            assert_eq!(color[[row, col, 1]], 0);
            assert_eq!(color[[row, col, 2]], 0);
        }
    }

    #[test]
    fn extremes_map_to_ramp_ends() {
        let palette = RainbowPalette::default();
        let temps = Array2::from_shape_vec((1, 2), vec![20.0, 30.0]).unwrap();
        let color = palette.colorize(&temps, 20.0, 30.0);
        let pixel = |col: usize| [color[[0, col, 0]], color[[0, col, 1]], color[[0, col, 2]]];
        assert_eq!(pixel(0), [255, 0, 0]);
        assert_eq!(pixel(1), [0, 3, 255]);
    }

    #[test]
    fn dimensions_follow_input() {
        let palette = RainbowPalette::default();
        for &(height, width) in &[(1, 1), (1, 7), (7, 1), (512, 640)] {
            let temps = Array2::from_shape_fn((height, width), |(r, c)| (r + c) as f64);
            let color = palette.colorize(&temps, 0., (height + width) as f64);
            assert_eq!(color.dim(), (height, width, 3));
        }
    }

    #[test]
    fn rejects_non_positive_step() {
        assert_eq!(RainbowPalette::new(0).unwrap_err(), Error::InvalidStep(0));
        assert!(RainbowPalette::new(-4).is_err());
        assert!(RainbowPalette::new(32).is_ok());
    }

    #[test]
    fn bgr_to_rgb_swaps_channels() {
        let mut color = Array3::zeros((1, 2, 3));
        color[[0, 0, 0]] = 255; // blue pixel
        color[[0, 1, 2]] = 255; // red pixel
        assert_eq!(bgr_to_rgb_bytes(&color), vec![0, 0, 255, 255, 0, 0]);
    }
}
