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
use raster_util::raster::reproject_raster_seeded;
use structopt::StructOpt;

#[derive(StructOpt)]
pub struct ReprojectArgs {

    #[structopt(long, parse(from_os_str))]
    input: PathBuf,

    /// Overwritten if it exists
    #[structopt(long, parse(from_os_str))]
    output: PathBuf,

    /// Makes the random displacement reproducible
    #[structopt(long)]
    seed: Option<u64>,
}

pub fn run_reproject(args: &ReprojectArgs) -> Result<()> {
    reproject_raster_seeded(&args.input, &args.output, args.seed)
}

#[cfg(test)]
mod cmd_reproject_tests {
    use gdal::raster::GdalDataType;
    use ndarray::Array3;
    use raster_util::raster::test_util::{create_test_raster, test_profile};
    use raster_util::raster::Raster;

    use super::*;

    #[test]
    fn test_reproject_cmd() {
        let dir = tempfile::tempdir().unwrap();

        let profile = test_profile(6, 4, 1, GdalDataType::UInt16);
        let data = Array3::from_shape_fn((1, 4, 6), |(_, r, c)| (r * 6 + c) as u16);
        let input = create_test_raster(dir.path(), "in.tif", &profile, &data).unwrap();
        let output = dir.path().join("out.tif");

        let args = ReprojectArgs::from_iter_safe(&[
            "reproject",
            "--input", input.to_str().unwrap(),
            "--output", output.to_str().unwrap(),
            "--seed", "11",
        ]).unwrap();

        run_reproject(&args).unwrap();
        let first = Raster::open(&output).unwrap().profile.transform;

        // same seed, same displacement
        run_reproject(&args).unwrap();
        let out = Raster::open(&output).unwrap();

        assert_eq!(out.profile.transform, first);
        assert_ne!(out.profile.transform, profile.transform);
        assert_eq!(out.profile.no_data_value, Some(0.0));
    }
}
