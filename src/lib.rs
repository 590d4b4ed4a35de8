//! Library to colorize and summarize 16-bit grayscale
//! frames from thermal cameras.
//!
//! The crate implements the classic radiometric display
//! loop as a pure, per-frame pipeline:
//!
//! 1. [Decode][temperature::Decoder] every raw sensor
//!    sample into degrees celsius, accumulating the frame
//!    [statistics][stats::Stats] (min / max / average) in
//!    the same pass.
//! 2. [Map][palette::RainbowPalette] the temperature field
//!    through a four-segment rainbow ramp, normalized to
//!    the frame's own temperature range.
//!
//! # Usage
//!
//! Configure a [`FramePipeline`] once with the frame
//! geometry and palette step, then feed it one raw sample
//! buffer per tick. The pipeline holds no buffers of its
//! own, so a single instance can serve concurrent frames.
//!
//! ```rust
//! # fn main() -> thermoview::Result<()> {
//! use thermoview::{FramePipeline, PipelineConfig};
//!
//! let pipeline = FramePipeline::new(PipelineConfig {
//!     width: 2,
//!     height: 2,
//!     step: 64,
//! })?;
//! let frame = pipeline.process(&[29815; 4])?;
//! assert_eq!(frame.stats.avg, 25.0);
//! assert_eq!(frame.color.dim(), (2, 2, 3));
//! # Ok(())
//! # }
//! ```
//!
//! The raw-to-celsius conversion is the fixed centi-kelvin
//! scale used by 16-bit radiometric cores; see
//! [`raw_to_celsius`][crate::temperature::raw_to_celsius].
//! The color ramp and its BGR channel convention are
//! documented on
//! [`RainbowPalette`][crate::palette::RainbowPalette].

pub mod error;
pub mod frame;
pub mod palette;
pub mod pipeline;
pub mod stats;
pub mod temperature;

#[cfg(feature = "cli")]
pub mod cli;

pub use crate::error::{Error, Result};
pub use crate::frame::FrameGeometry;
pub use crate::palette::RainbowPalette;
pub use crate::pipeline::{FramePipeline, PipelineConfig, ProcessedFrame};
pub use crate::stats::{FrameStats, Stats};
