//! One-frame processing pipeline: decode, summarize,
//! colorize.

use ndarray::{Array2, Array3};
use serde_derive::*;

use crate::error::{Error, Result};
use crate::frame::FrameGeometry;
use crate::palette::{RainbowPalette, DEFAULT_STEP};
use crate::stats::FrameStats;
use crate::temperature::Decoder;

/// Knobs exposed to the embedding system.
///
/// Deserializes with per-field defaults, so `{}` yields the
/// stock 640x512 / step-64 setup.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct PipelineConfig {
    pub width: usize,
    pub height: usize,
    pub step: i32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let FrameGeometry { width, height } = FrameGeometry::default();
        PipelineConfig {
            width,
            height,
            step: DEFAULT_STEP,
        }
    }
}

/// Everything derived from one raw frame.
#[derive(Debug)]
pub struct ProcessedFrame {
    /// Per-pixel celsius values, row-major.
    pub temperatures: Array2<f64>,
    pub stats: FrameStats,
    /// `height x width x 3` BGR bytes.
    pub color: Array3<u8>,
}

/// Decoder and palette wired together for one geometry.
///
/// Validation happens at construction; processing is pure
/// and allocates fresh output buffers per call, so one
/// pipeline can serve concurrent frames.
pub struct FramePipeline {
    decoder: Decoder,
    palette: RainbowPalette,
}

impl FramePipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        Ok(FramePipeline {
            decoder: Decoder::new(FrameGeometry::new(config.width, config.height))?,
            palette: RainbowPalette::new(config.step)?,
        })
    }

    pub fn geometry(&self) -> FrameGeometry {
        self.decoder.geometry()
    }

    /// Runs one raw sample buffer through the full
    /// pipeline.
    pub fn process(&self, samples: &[u16]) -> Result<ProcessedFrame> {
        let (temperatures, stats) = self.decoder.decode(samples)?;
        let geometry = self.decoder.geometry();
        let stats = stats.summary().ok_or(Error::InvalidDimensions {
            width: geometry.width,
            height: geometry.height,
        })?;
        let color = self.palette.colorize(&temperatures, stats.min, stats.max);
        Ok(ProcessedFrame {
            temperatures,
            stats,
            color,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline(width: usize, height: usize) -> FramePipeline {
        FramePipeline::new(PipelineConfig {
            width,
            height,
            step: 64,
        })
        .unwrap()
    }

    #[test]
    fn uniform_frame_end_to_end() {
        // 29815 centi-kelvin is exactly 25 celsius.
        let frame = pipeline(4, 4).process(&[29815u16; 16]).unwrap();
        assert_eq!(
            frame.stats,
            FrameStats {
                min: 25.0,
                max: 25.0,
                avg: 25.0,
            }
        );
        assert_eq!(
            frame.stats.labels(),
            [
                "max_temp = 25".to_string(),
                "min_temp = 25".to_string(),
                "avg_temp = 25".to_string(),
            ]
        );
        assert_eq!(frame.color.dim(), (4, 4, 3));
        for ((_, _, chan), &val) in frame.color.indexed_iter() {
            assert_eq!(val, if chan == 0 { 255 } else { 0 });
        }
    }

    #[test]
    fn repeated_runs_are_identical() {
        let p = pipeline(8, 6);
        let samples: Vec<u16> = (0..48).map(|i| 27315 + 251 * i as u16).collect();
        let first = p.process(&samples).unwrap();
        let second = p.process(&samples).unwrap();
        assert_eq!(first.color, second.color);
        assert_eq!(first.stats, second.stats);
        assert_eq!(first.temperatures, second.temperatures);
    }

    #[test]
    fn buffer_length_mismatch_is_rejected() {
        let err = pipeline(4, 4).process(&[0u16; 10]).unwrap_err();
        assert_eq!(
            err,
            Error::BufferLengthMismatch {
                len: 10,
                expected: 16,
                width: 4,
                height: 4,
            }
        );
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        assert!(FramePipeline::new(PipelineConfig {
            width: 0,
            height: 4,
            step: 64,
        })
        .is_err());
        assert!(FramePipeline::new(PipelineConfig {
            width: 4,
            height: 4,
            step: 0,
        })
        .is_err());
    }

    #[test]
    fn config_defaults_from_empty_json() {
        let config: PipelineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(
            config,
            PipelineConfig {
                width: 640,
                height: 512,
                step: 64,
            }
        );
    }
}
