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
use std::path::PathBuf;

use anyhow::Result;
use raster_util::raster::compress::HIGH_QUALITY;
use raster_util::raster::{compress_given_quality, compress_high_quality, compress_low_quality};
use structopt::StructOpt;

#[derive(StructOpt)]
pub struct CompressArgs {

    #[structopt(long, parse(from_os_str))]
    input: PathBuf,

    /// Always written as JPEG2000
    #[structopt(long, parse(from_os_str))]
    output: PathBuf,

    #[structopt(long, allow_hyphen_values = true, conflicts_with_all = &["low", "high"])]
    quality: Option<i32>,

    /// Quality 10
    #[structopt(long, conflicts_with = "high")]
    low: bool,

    /// Quality 100, the default
    #[structopt(long)]
    high: bool,
}

/// Returns the output / input size ratio
pub fn run_compress(args: &CompressArgs) -> Result<f64> {
    if args.low {
        return compress_low_quality(&args.input, &args.output);
    }
    if args.high {
        return compress_high_quality(&args.input, &args.output);
    }

    compress_given_quality(&args.input, &args.output, args.quality.unwrap_or(HIGH_QUALITY))
}
