mod args;

use anyhow::{anyhow, Result};
use args::Args;
use rayon::prelude::*;
use serde_derive::*;

use thermoview::cli::{process_paths_par, FrameInput};
use thermoview::stats::{FrameStats, Stats};
use thermoview::temperature::Decoder;
use thermoview::FrameGeometry;

fn main() -> Result<()> {
    let Args {
        paths,
        width,
        height,
    } = Args::from_cmd_line()?;
    let geometry = FrameGeometry::new(width, height);

    let (frames, cumulative) = process_paths_par(paths, geometry)
        .into_par_iter()
        .map(|try_input| -> Result<_> {
            let input = try_input?;
            FrameReport::from_input(&input)
        })
        .try_fold(
            || (vec![], Stats::default()),
            |mut acc, try_frame| -> Result<_> {
                let (report, stats) = try_frame?;
                acc.0.push(report);
                acc.1 += &stats;
                Ok(acc)
            },
        )
        .try_reduce(
            || (vec![], Stats::default()),
            |mut acc1, acc2| -> Result<_> {
                acc1.0.extend(acc2.0);
                acc1.1 += &acc2.1;
                Ok(acc1)
            },
        )?;

    #[derive(Debug, Serialize)]
    struct OutputJson {
        frame_stats: Vec<FrameReport>,
        cumulative: Option<FrameStats>,
    }

    serde_json::to_writer(
        std::io::stdout().lock(),
        &OutputJson {
            frame_stats: frames,
            cumulative: cumulative.summary(),
        },
    )?;

    Ok(())
}

#[derive(Serialize, Debug)]
pub struct FrameReport {
    path: String,
    width: usize,
    height: usize,
    stats: FrameStats,
}

impl FrameReport {
    fn from_input(input: &FrameInput) -> Result<(Self, Stats)> {
        let decoder = Decoder::new(input.geometry)?;
        let (_temps, stats) = decoder.decode(&input.samples)?;
        let summary = stats
            .summary()
            .ok_or_else(|| anyhow!("empty frame: {}", input.filename))?;

        Ok((
            FrameReport {
                path: input.filename.clone(),
                width: input.geometry.width,
                height: input.geometry.height,
                stats: summary,
            },
            stats,
        ))
    }
}
