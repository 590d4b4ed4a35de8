use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::value_t_or_exit;
use thermoview::{arg, args_parser, opt};

pub struct Args {
    pub paths: Vec<String>,
    pub output: PathBuf,
    pub width: usize,
    pub height: usize,
    pub step: i32,
    pub roi: Option<[usize; 4]>,
}

impl Args {
    pub fn from_cmd_line() -> Result<Args> {
        let matches = args_parser!("colorize")
            .about("Render 16-bit thermal frames as false-color PNGs.")
            .arg(
                opt!("output")
                    .short("o")
                    .help("Directory for output PNGs. Default is the current directory"),
            )
            .arg(opt!("width").help("Raw frame width. Default is 640"))
            .arg(opt!("height").help("Raw frame height. Default is 512"))
            .arg(opt!("step").help("Palette segment width. Default is 64"))
            .arg(opt!("roi").help("Rectangle to draw for reference, as X0,Y0,X1,Y1"))
            .arg(
                arg!("paths")
                    .required(true)
                    .multiple(true)
                    .help("Frame paths: raw little-endian sample dumps or 16-bit grayscale pngs"),
            )
            .get_matches();

        let paths = matches
            .values_of("paths")
            .unwrap()
            .map(|f| f.into())
            .collect();
        let output = matches
            .value_of("output")
            .map(PathBuf::from)
            .unwrap_or_else(|| ".".into());
        let width = matches
            .is_present("width")
            .then(|| value_t_or_exit!(matches.value_of("width"), usize))
            .unwrap_or(640);
        let height = matches
            .is_present("height")
            .then(|| value_t_or_exit!(matches.value_of("height"), usize))
            .unwrap_or(512);
        let step = matches
            .is_present("step")
            .then(|| value_t_or_exit!(matches.value_of("step"), i32))
            .unwrap_or(64);
        let roi = matches.value_of("roi").map(parse_roi).transpose()?;

        Ok(Args {
            paths,
            output,
            width,
            height,
            step,
            roi,
        })
    }
}

fn parse_roi(value: &str) -> Result<[usize; 4]> {
    let parts: Vec<usize> = value
        .split(',')
        .map(|p| Ok(p.trim().parse()?))
        .collect::<Result<_>>()?;
    ensure!(parts.len() == 4, "roi must be X0,Y0,X1,Y1");
    ensure!(
        parts[0] <= parts[2] && parts[1] <= parts[3],
        "roi corners are out of order"
    );
    Ok([parts[0], parts[1], parts[2], parts[3]])
}
