/*
This file is part of the Raster Utilities
Copyright (C) 2022 Novel-T

The Raster Utilities are free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/
use std::process::exit;
use std::time::Instant;

use anyhow::Result;
use log::{info, LevelFilter};
use raster_util::util::format_duration;
use simple_logger::SimpleLogger;
use structopt::StructOpt;

use crate::cmd_blur_resize::{run_blur_resize, BlurResizeArgs};
use crate::cmd_compress::{run_compress, CompressArgs};
use crate::cmd_reproject::{run_reproject, ReprojectArgs};

mod cmd_blur_resize;
mod cmd_compress;
mod cmd_reproject;

#[derive(StructOpt)]
struct Cli {

    #[structopt(long, default_value = "Warn")]
    log_level: LevelFilter,

    #[structopt(subcommand)]
    cmd: Command
}

#[derive(StructOpt)]
enum Command {
    #[structopt(help="Moves a raster by a random multiple of its size, nodata set to 0")]
    Reproject(ReprojectArgs),
    #[structopt(help="Downsamples a raster, format taken from the output extension (tif, tiff, jp2, else img)")]
    BlurResize(BlurResizeArgs),
    #[structopt(help="Compresses a raster to JPEG2000 at a given quality, prints the size ratio")]
    Compress(CompressArgs),
}

fn run() -> Result<()> {
    let args = Cli::from_args();

    SimpleLogger::new().with_level(args.log_level).init()?;

    let now = Instant::now();

    match &args.cmd {
        Command::Reproject(r) => {
            run_reproject(r)?;
        },
        Command::BlurResize(r) => {
            println!("{}", run_blur_resize(r)?);
        },
        Command::Compress(r) => {
            println!("{}", run_compress(r)?);
        },
    }

    info!("Done in {}", format_duration(now.elapsed()));

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        exit(1);
    }
}

#[cfg(test)]
mod raster_tools_tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        let cli = Cli::from_iter_safe(&[
            "raster_tools", "--log-level", "Debug",
            "reproject", "--input", "in.tif", "--output", "out.tif",
        ]).unwrap();

        assert_eq!(cli.log_level, LevelFilter::Debug);
        assert!(matches!(cli.cmd, Command::Reproject(_)));
    }

    #[test]
    fn test_default_log_level() {
        let cli = Cli::from_iter_safe(&[
            "raster_tools", "compress", "--input", "in.tif", "--output", "out.jp2", "--low",
        ]).unwrap();

        assert_eq!(cli.log_level, LevelFilter::Warn);
        assert!(matches!(cli.cmd, Command::Compress(_)));
    }

    #[test]
    fn test_unknown_subcommand() {
        assert!(Cli::from_iter_safe(&["raster_tools", "translate"]).is_err());
    }
}
