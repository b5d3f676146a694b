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
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use gdal::raster::{GdalType, RasterBand, ResampleAlg};
use gdal::Dataset;
use log::debug;
use ndarray::Array3;

use crate::RasterUtilError;

/// Calls a function generic over the pixel type with the type matching a GDAL band type,
/// so outputs keep the data type of their source.
///
/// Complex and unknown band types have no Rust pixel type, they are read and written as f64.
macro_rules! dispatch_gdal_type {
    ($gdal_type:expr, $func:ident ( $($arg:expr),* )) => {
        match $gdal_type {
            gdal::raster::GdalDataType::UInt8 => $func::<u8>($($arg),*),
            gdal::raster::GdalDataType::Int8 => $func::<i8>($($arg),*),
            gdal::raster::GdalDataType::UInt16 => $func::<u16>($($arg),*),
            gdal::raster::GdalDataType::Int16 => $func::<i16>($($arg),*),
            gdal::raster::GdalDataType::UInt32 => $func::<u32>($($arg),*),
            gdal::raster::GdalDataType::Int32 => $func::<i32>($($arg),*),
            gdal::raster::GdalDataType::UInt64 => $func::<u64>($($arg),*),
            gdal::raster::GdalDataType::Int64 => $func::<i64>($($arg),*),
            gdal::raster::GdalDataType::Float32 => $func::<f32>($($arg),*),
            gdal::raster::GdalDataType::Float64 => $func::<f64>($($arg),*),
            #[allow(unreachable_patterns)]
            _ => $func::<f64>($($arg),*),
        }
    };
}

mod affine;
mod algo;
pub mod compress;
mod output_format;
mod raster_profile;
pub mod raster_resample;
pub mod reproject;
pub mod test_util;

pub use affine::*;
pub use algo::*;
pub use compress::{compress_given_quality, compress_high_quality, compress_low_quality};
pub use output_format::*;
pub use raster_profile::*;
pub use raster_resample::{blur_and_resize, blur_and_resize_with, resample_raster, BlurResizeParams, SizeReport};
pub use reproject::{reproject_raster, reproject_raster_seeded, reproject_raster_with_rng};

/// An open raster, closed when dropped
pub struct Raster {
    pub path: PathBuf,
    pub profile: RasterProfile,
    pub dataset: Dataset,
}

impl Raster {
    pub fn open(path: &Path) -> Result<Raster> {
        if !path.exists() {
            bail!(RasterUtilError::FileNotFound(path.to_path_buf()));
        }

        let dataset = Dataset::open(path)
            .with_context(|| format!("Unable to open raster {:?}", path))?;

        let profile = RasterProfile::new(&dataset)
            .with_context(|| format!("Unable to read profile of {:?}", path))?;

        debug!("Opened raster {:?} with profile\n{}", path, &profile);

        Ok(Raster {
            path: path.to_path_buf(),
            profile,
            dataset,
        })
    }

    /// 1 based, like GDAL
    pub fn band(&self, index: usize) -> Result<RasterBand> {
        Ok(self.dataset.rasterband(index)?)
    }

    /// All bands resampled to out_shape (bands, rows, cols)
    pub fn read<T: GdalType + Copy>(&self, out_shape: (usize, usize, usize), alg: ResampleAlg) -> Result<Array3<T>> {
        read_bands(&self.dataset, out_shape, alg)
    }

    /// All bands at full resolution
    pub fn read_all<T: GdalType + Copy>(&self) -> Result<Array3<T>> {
        self.read(
            (self.profile.band_count, self.profile.num_rows, self.profile.num_cols),
            ResampleAlg::NearestNeighbour,
        )
    }
}
