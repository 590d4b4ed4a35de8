//! Convert raw sensor samples to temperature values.
//!
//! Radiometric 16-bit cores emit one unsigned sample per
//! pixel in centi-kelvin, so conversion to celsius is a
//! fixed scale and offset rather than a per-image
//! calibration. The scale is part of the sensor contract
//! and is deliberately not configurable.

use ndarray::Array2;

use crate::error::{Error, Result};
use crate::frame::FrameGeometry;
use crate::stats::Stats;

const CELSIUS_OFFSET: f64 = 273.15;
const CENTIKELVIN_PER_KELVIN: f64 = 100.0;

/// Temperature in celsius for a single raw sample.
#[inline]
pub fn raw_to_celsius(raw: u16) -> f64 {
    raw as f64 / CENTIKELVIN_PER_KELVIN - CELSIUS_OFFSET
}

/// Decodes raw sample buffers of a fixed geometry into
/// temperature fields.
#[derive(Debug)]
pub struct Decoder {
    geometry: FrameGeometry,
}

impl Decoder {
    pub fn new(geometry: FrameGeometry) -> Result<Self> {
        geometry.validate()?;
        Ok(Decoder { geometry })
    }

    pub fn geometry(&self) -> FrameGeometry {
        self.geometry
    }

    /// Converts a full frame of samples, accumulating the
    /// frame statistics in the same pass.
    ///
    /// The buffer must hold exactly `width * height`
    /// row-major samples; anything else is rejected before
    /// any output is produced.
    pub fn decode(&self, samples: &[u16]) -> Result<(Array2<f64>, Stats)> {
        let FrameGeometry { width, height } = self.geometry;
        let expected = self.geometry.num_pixels();
        if samples.len() != expected {
            return Err(Error::BufferLengthMismatch {
                len: samples.len(),
                expected,
                width,
                height,
            });
        }

        let mut stats = Stats::default();
        let values: Vec<f64> = samples
            .iter()
            .map(|&raw| {
                let temp = raw_to_celsius(raw);
                stats += temp;
                temp
            })
            .collect();

        let field = Array2::from_shape_vec((height, width), values).map_err(|_| {
            Error::BufferLengthMismatch {
                len: samples.len(),
                expected,
                width,
                height,
            }
        })?;
        Ok((field, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_matches_fixed_scale() {
        for &raw in &[0u16, 1, 100, 27315, 29815, u16::MAX] {
            let expected = raw as f64 / 100.0 - 273.15;
            assert!((raw_to_celsius(raw) - expected).abs() < 1e-9);
        }
        assert_eq!(raw_to_celsius(29815), 25.0);
        assert_eq!(raw_to_celsius(0), -273.15);
    }

    #[test]
    fn stats_match_brute_force_scan() {
        let decoder = Decoder::new(FrameGeometry::new(5, 3)).unwrap();
        let samples: Vec<u16> = (0..15).map(|i| 20000 + 517 * i as u16).collect();
        let (field, stats) = decoder.decode(&samples).unwrap();
        let summary = stats.summary().unwrap();

        let brute_min = field.iter().cloned().fold(f64::INFINITY, f64::min);
        let brute_max = field.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let brute_avg = field.iter().sum::<f64>() / field.len() as f64;
        assert_eq!(summary.min, brute_min);
        assert_eq!(summary.max, brute_max);
        assert!((summary.avg - brute_avg).abs() < 1e-9);
        assert!(summary.min <= summary.avg && summary.avg <= summary.max);
    }

    #[test]
    fn field_is_row_major() {
        let decoder = Decoder::new(FrameGeometry::new(3, 2)).unwrap();
        let (field, _) = decoder
            .decode(&[27315, 27415, 27515, 27615, 27715, 27815])
            .unwrap();
        assert_eq!(field.dim(), (2, 3));
        assert!((field[[0, 1]] - 1.0).abs() < 1e-9);
        assert!((field[[1, 0]] - 3.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_bad_buffer_length() {
        let decoder = Decoder::new(FrameGeometry::new(4, 4)).unwrap();
        let err = decoder.decode(&[0u16; 15]).unwrap_err();
        assert_eq!(
            err,
            Error::BufferLengthMismatch {
                len: 15,
                expected: 16,
                width: 4,
                height: 4,
            }
        );
    }

    #[test]
    fn rejects_empty_geometry() {
        let err = Decoder::new(FrameGeometry::new(0, 4)).unwrap_err();
        assert_eq!(err, Error::InvalidDimensions { width: 0, height: 4 });
    }
}
