//! Helpers to parse CLI arguments and load frames in the
//! accompanying binaries.
//!
//! APIs here shouldn't be considered stable / used as a
//! library.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use anyhow::{ensure, Context, Result};
use byteordered::ByteOrdered;
pub use clap::{App, Arg};
use indicatif::{ProgressBar, ProgressStyle};
pub use inflector::Inflector;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::frame::FrameGeometry;

#[macro_export]
macro_rules! args_parser {
    ($name:expr) => {{
        $crate::cli::App::new($name)
            .version(clap::crate_version!())
            .author(clap::crate_authors!())
    }};
}

#[macro_export]
macro_rules! arg {
    ($name:expr) => {{
        use $crate::cli::Inflector;
        $crate::cli::Arg::with_name($name).value_name(&$name.to_screaming_snake_case())
    }};
}

#[macro_export]
macro_rules! opt {
    ($name:expr) => {{
        use $crate::cli::Inflector;
        $crate::cli::Arg::with_name($name)
            .long(&$name.to_kebab_case())
            .value_name(&$name.to_screaming_snake_case())
    }};
}

/// A raw frame loaded from disk, ready for the pipeline.
pub struct FrameInput {
    pub filename: String,
    pub geometry: FrameGeometry,
    pub samples: Vec<u16>,
}

impl FrameInput {
    /// Loads 16-bit samples from a path. PNG inputs carry
    /// their own dimensions; anything else is treated as a
    /// raw little-endian sample dump of `geometry` size.
    pub fn try_from_path(geometry: FrameGeometry, filename: String) -> Result<Self> {
        let path = Path::new(&filename);
        let input = match path.extension().and_then(|e| e.to_str()) {
            Some("png") => Self::try_from_png(path, filename.clone()),
            _ => Self::try_from_raw(path, geometry, filename.clone()),
        };
        input.with_context(|| format!("could not load thermal frame from {}", filename))
    }

    fn try_from_png(path: &Path, filename: String) -> Result<Self> {
        let decoder = png::Decoder::new(File::open(path)?);
        let (info, mut reader) = decoder.read_info()?;
        ensure!(
            info.color_type == png::ColorType::Grayscale
                && info.bit_depth == png::BitDepth::Sixteen,
            "expected 16-bit grayscale png, found {:?} {:?}",
            info.color_type,
            info.bit_depth
        );

        let mut buf = vec![0; info.buffer_size()];
        reader.next_frame(&mut buf)?;
        // 16-bit png samples are big-endian
        let samples = buf
            .chunks_exact(2)
            .map(|be| u16::from_be_bytes([be[0], be[1]]))
            .collect();

        Ok(FrameInput {
            filename,
            geometry: FrameGeometry::new(info.width as usize, info.height as usize),
            samples,
        })
    }

    fn try_from_raw(path: &Path, geometry: FrameGeometry, filename: String) -> Result<Self> {
        let num_pixels = geometry.num_pixels();
        let mut reader = ByteOrdered::le(BufReader::new(File::open(path)?));
        let mut samples = Vec::with_capacity(num_pixels);
        for _ in 0..num_pixels {
            samples.push(reader.read_u16()?);
        }

        let mut trailing = [0u8; 1];
        ensure!(
            reader.into_inner().read(&mut trailing)? == 0,
            "raw dump holds more than {}x{} samples",
            geometry.width,
            geometry.height
        );

        Ok(FrameInput {
            filename,
            geometry,
            samples,
        })
    }
}

pub fn process_paths_par(
    paths: Vec<String>,
    geometry: FrameGeometry,
) -> impl IntoParallelIterator<Item = Result<FrameInput>> {
    let bar = ProgressBar::new(paths.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {wide_bar:cyan/blue} {pos:>7}/{len:7}"),
    );

    paths
        .into_par_iter()
        .map(move |p| FrameInput::try_from_path(geometry, p))
        .inspect(move |_| bar.inc(1))
}
