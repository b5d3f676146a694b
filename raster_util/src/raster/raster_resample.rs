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
use core::fmt;
use std::path::Path;

use anyhow::{bail, Result};
use gdal::raster::{GdalType, ResampleAlg};
use log::info;
use ndarray::Array3;

use crate::raster::{write_raster, OutputFormat, Raster};
use crate::util::{file_size_kb, round_to};
use crate::RasterUtilError;

pub const DEFAULT_BLUR_FACTOR: f64 = 0.9;
pub const DEFAULT_SCALE_FACTOR: f64 = 5.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlurResizeParams {
    /// Shrinks the rescaled size further, viewers scale it back up which blurs it
    pub blur_factor: f64,
    /// Divides the raster size and the pixel size
    pub scale_factor: f64,
}

impl Default for BlurResizeParams {
    fn default() -> Self {
        BlurResizeParams {
            blur_factor: DEFAULT_BLUR_FACTOR,
            scale_factor: DEFAULT_SCALE_FACTOR,
        }
    }
}

impl BlurResizeParams {
    fn check(&self) -> Result<()> {
        if !self.blur_factor.is_finite() || self.blur_factor <= 0.0 {
            bail!(RasterUtilError::InvalidArgument(format!("blur factor must be positive, got {}", self.blur_factor)));
        }
        if !self.scale_factor.is_finite() || self.scale_factor <= 0.0 {
            bail!(RasterUtilError::InvalidArgument(format!("scale factor must be positive, got {}", self.scale_factor)));
        }
        Ok(())
    }

    /// (rows, cols) after dividing by the scale factor, truncated
    pub fn rescaled_size(&self, num_rows: usize, num_cols: usize) -> (usize, usize) {
        (
            (num_rows as f64 / self.scale_factor) as usize,
            (num_cols as f64 / self.scale_factor) as usize,
        )
    }

    /// (rows, cols) of the data actually written
    pub fn output_size(&self, num_rows: usize, num_cols: usize) -> (usize, usize) {
        let (rows, cols) = self.rescaled_size(num_rows, num_cols);
        (
            (rows as f64 * self.blur_factor).floor() as usize,
            (cols as f64 * self.blur_factor).floor() as usize,
        )
    }
}

/// Sizes in kilobytes.  The rate is new / original * 10000, rounded to 3 decimals
#[derive(Debug, Clone, PartialEq)]
pub struct SizeReport {
    pub original_size: f64,
    pub new_size: f64,
    pub new_size_rate: f64,
}

impl SizeReport {
    pub fn new(original_size: f64, new_size: f64) -> Self {
        SizeReport {
            original_size,
            new_size,
            new_size_rate: round_to((new_size / original_size) * 10000.0, 3),
        }
    }
}

// Debug keeps the trailing ".0" of whole sizes, 40.0 rather than 40
impl fmt::Display for SizeReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Original size: {:?} \nNew size: {:?} \nNew size rate: {:?}%",
               self.original_size,
               self.new_size,
               self.new_size_rate)
    }
}

/// Cubic resample of every band to the blurred size, written to out_path in the format
/// given by its extension.  Returns the written data (band, row, col)
pub fn resample_raster<T: GdalType + Copy>(raster: &Raster,
                                           out_path: &Path,
                                           params: &BlurResizeParams) -> Result<Array3<T>> {
    params.check()?;

    let profile = &raster.profile;

    let (out_rows, out_cols) = params.output_size(profile.num_rows, profile.num_cols);
    if out_rows == 0 || out_cols == 0 {
        bail!(RasterUtilError::InvalidArgument(format!(
            "{}x{} raster is too small for scale factor {} and blur factor {}",
            profile.num_cols, profile.num_rows, params.scale_factor, params.blur_factor)));
    }

    let format = OutputFormat::from_path(out_path);

    let out_profile = profile
        .clone()
        .with_driver(format.driver_name())
        .with_transform(profile.transform.with_pixel_size_divided_by(params.scale_factor))
        .with_size(out_cols, out_rows);

    info!("Resampling {:?} from {}x{} to {}x{}, writing {} to {:?}",
          raster.path, profile.num_cols, profile.num_rows, out_cols, out_rows, format, out_path);

    let data: Array3<T> = raster.read((profile.band_count, out_rows, out_cols), ResampleAlg::Cubic)?;

    write_raster(out_path, &out_profile, &data)?;

    Ok(data)
}

fn write_resampled<T: GdalType + Copy>(raster: &Raster, out_path: &Path, params: &BlurResizeParams) -> Result<()> {
    resample_raster::<T>(raster, out_path, params).map(|_| ())
}

/// Blur factor 0.9, scale factor 5.5
pub fn blur_and_resize(path: &Path, out_path: &Path) -> Result<SizeReport> {
    blur_and_resize_with(path, out_path, &BlurResizeParams::default())
}

pub fn blur_and_resize_with(path: &Path, out_path: &Path, params: &BlurResizeParams) -> Result<SizeReport> {
    params.check()?;

    let original_size = file_size_kb(path)?;

    {
        let raster = Raster::open(path)?;
        dispatch_gdal_type!(raster.profile.gdal_type, write_resampled(&raster, out_path, params))?;
    }

    let report = SizeReport::new(original_size, file_size_kb(out_path)?);

    info!("Resized {:?} to {:?}: {} kB -> {} kB", path, out_path, report.original_size, report.new_size);

    Ok(report)
}
