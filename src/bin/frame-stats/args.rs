use anyhow::Result;
use clap::value_t_or_exit;
use thermoview::{arg, args_parser, opt};

pub struct Args {
    pub paths: Vec<String>,
    pub width: usize,
    pub height: usize,
}

impl Args {
    pub fn from_cmd_line() -> Result<Args> {
        let matches = args_parser!("frame-stats")
            .about("Compute temperature stats from raw thermal frames.")
            .arg(opt!("width").help("Raw frame width. Default is 640"))
            .arg(opt!("height").help("Raw frame height. Default is 512"))
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
        let width = matches
            .is_present("width")
            .then(|| value_t_or_exit!(matches.value_of("width"), usize))
            .unwrap_or(640);
        let height = matches
            .is_present("height")
            .then(|| value_t_or_exit!(matches.value_of("height"), usize))
            .unwrap_or(512);

        Ok(Args {
            paths,
            width,
            height,
        })
    }
}
