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

use anyhow::Result;
use gdal::raster::{GdalDataType, GdalType};
use ndarray::Array3;

use crate::raster::{write_raster, Affine, RasterProfile, GTIFF_DRIVER};

/// GeoTIFF profile without CRS, pixels of 0.004 x -0.005 degrees
pub fn test_profile(num_cols: usize, num_rows: usize, band_count: usize, gdal_type: GdalDataType) -> RasterProfile {
    RasterProfile {
        driver: GTIFF_DRIVER.to_string(),
        num_cols,
        num_rows,
        band_count,
        transform: Affine::new(0.004, 0.0, 6.021557, 0.0, -0.005, 46.242485),
        projection: "".to_string(),
        no_data_value: None,
        gdal_type,
    }
}

pub fn create_test_raster<T: Copy + GdalType>(dir: &Path,
                                              file_name: &str,
                                              profile: &RasterProfile,
                                              data: &Array3<T>) -> Result<PathBuf> {
    let input_path = dir.join(file_name);

    assert!(!input_path.exists());

    write_raster(&input_path, profile, data)?;

    assert!(input_path.exists());

    Ok(input_path)
}
