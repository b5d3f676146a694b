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
use raster_util::raster::{blur_and_resize_with, BlurResizeParams, SizeReport};
use structopt::StructOpt;

#[derive(StructOpt)]
pub struct BlurResizeArgs {

    #[structopt(long, parse(from_os_str))]
    input: PathBuf,

    /// tif/tiff => GeoTIFF, jp2 => JPEG2000, anything else => Erdas Imagine
    #[structopt(long, parse(from_os_str))]
    output: PathBuf,

    #[structopt(long, default_value = "0.9")]
    blur_factor: f64,

    #[structopt(long, default_value = "5.5")]
    scale_factor: f64,
}

pub fn run_blur_resize(args: &BlurResizeArgs) -> Result<SizeReport> {
    let params = BlurResizeParams {
        blur_factor: args.blur_factor,
        scale_factor: args.scale_factor,
    };

    blur_and_resize_with(&args.input, &args.output, &params)
}
