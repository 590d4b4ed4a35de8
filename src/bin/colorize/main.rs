mod args;

use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use args::Args;
use rayon::prelude::*;
use serde_derive::*;

use thermoview::cli::process_paths_par;
use thermoview::palette::bgr_to_rgb_bytes;
use thermoview::pipeline::{FramePipeline, PipelineConfig};
use thermoview::stats::FrameStats;
use thermoview::FrameGeometry;

fn main() -> Result<()> {
    let args = Args::from_cmd_line()?;
    let geometry = FrameGeometry::new(args.width, args.height);
    let step = args.step;
    let output = args.output;
    let roi = args.roi;

    let reports: Vec<FrameReport> = process_paths_par(args.paths, geometry)
        .into_par_iter()
        .map(|try_input| -> Result<FrameReport> {
            let input = try_input?;
            let pipeline = FramePipeline::new(PipelineConfig {
                width: input.geometry.width,
                height: input.geometry.height,
                step,
            })?;
            let frame = pipeline.process(&input.samples)?;

            let mut rgb = bgr_to_rgb_bytes(&frame.color);
            if let Some(rect) = roi {
                draw_rect(&mut rgb, input.geometry, rect);
            }

            let outpath = output_path_for(&output, Path::new(&input.filename));
            write_png(&outpath, input.geometry, &rgb)
                .with_context(|| format!("could not write {:?}", outpath))?;

            for label in frame.stats.labels().iter() {
                eprintln!("{}: {}", input.filename, label);
            }

            Ok(FrameReport {
                path: input.filename,
                output: outpath,
                stats: frame.stats,
            })
        })
        .collect::<Result<_>>()?;

    serde_json::to_writer(std::io::stdout().lock(), &reports)?;
    Ok(())
}

#[derive(Serialize, Debug)]
struct FrameReport {
    path: String,
    output: PathBuf,
    stats: FrameStats,
}

fn output_path_for(output: &Path, path: &Path) -> PathBuf {
    output.join(path.file_stem().unwrap()).with_extension("png")
}

fn write_png(path: &Path, geometry: FrameGeometry, rgb: &[u8]) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    let mut encoder = png::Encoder::new(writer, geometry.width as u32, geometry.height as u32);
    encoder.set_color(png::ColorType::RGB);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.write_header()?.write_image_data(rgb)?;
    Ok(())
}

const ROI_THICKNESS: usize = 3;
const ROI_COLOR: [u8; 3] = [255, 0, 0];

/// Strokes the reference rectangle onto the RGB bytes,
/// clamped to the image bounds.
fn draw_rect(rgb: &mut [u8], geometry: FrameGeometry, rect: [usize; 4]) {
    let x0 = rect[0].min(geometry.width.saturating_sub(1));
    let y0 = rect[1].min(geometry.height.saturating_sub(1));
    let x1 = rect[2].min(geometry.width.saturating_sub(1));
    let y1 = rect[3].min(geometry.height.saturating_sub(1));

    for t in 0..ROI_THICKNESS {
        for x in x0..=x1 {
            put_pixel(rgb, geometry, x, y0 + t);
            put_pixel(rgb, geometry, x, y1.saturating_sub(t));
        }
        for y in y0..=y1 {
            put_pixel(rgb, geometry, x0 + t, y);
            put_pixel(rgb, geometry, x1.saturating_sub(t), y);
        }
    }
}

fn put_pixel(rgb: &mut [u8], geometry: FrameGeometry, x: usize, y: usize) {
    if x >= geometry.width || y >= geometry.height {
        return;
    }
    let idx = (y * geometry.width + x) * 3;
    rgb[idx..idx + 3].copy_from_slice(&ROI_COLOR);
}
