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
use std::fs::remove_file;
use std::path::Path;

use anyhow::{Context, Result};
use gdal::cpl::CslStringList;
use gdal::raster::{Buffer, GdalType, ResampleAlg};
use gdal::{Dataset, DriverManager};
use log::debug;
use ndarray::Array3;

use crate::raster::{Affine, RasterProfile, MEM_DRIVER};

/// Reads every band through GDAL's RasterIO, resampling on read when out_shape
/// differs from the raster size.  Result is (band, row, col)
pub fn read_bands<T: GdalType + Copy>(dataset: &Dataset,
                                      out_shape: (usize, usize, usize),
                                      alg: ResampleAlg) -> Result<Array3<T>> {
    let (band_count, out_rows, out_cols) = out_shape;
    let (num_cols, num_rows) = dataset.raster_size();

    let mut data: Vec<T> = Vec::with_capacity(band_count * out_rows * out_cols);

    for band_index in 1..=band_count {
        let band = dataset.rasterband(band_index)?;
        let buffer = band.read_as::<T>(
            (0, 0),
            (num_cols, num_rows),
            (out_cols, out_rows),
            Some(alg),
        )?;

        debug!("Read band {} of {} as {}x{}", band_index, band_count, out_cols, out_rows);

        data.extend_from_slice(buffer.data());
    }

    Ok(Array3::from_shape_vec((band_count, out_rows, out_cols), data)?)
}

/// Creates an in memory raster, pixels start at 0
pub fn create_mem_raster<T: GdalType>(num_cols: usize,
                                      num_rows: usize,
                                      band_count: usize,
                                      transform: &Affine,
                                      projection: &str) -> Result<Dataset> {
    let drv = DriverManager::get_driver_by_name(MEM_DRIVER)?;

    let mut ds = drv.create_with_band_type::<T, _>("", num_cols, num_rows, band_count)?;

    ds.set_geo_transform(&transform.to_gdal())?;

    if !projection.is_empty() {
        ds.set_projection(projection)?;
    }

    Ok(ds)
}

/// Existing outputs are replaced without warning
pub fn remove_existing(path: &Path) -> Result<()> {
    if path.is_file() {
        debug!("Overwriting {:?}", path);
        remove_file(path)?;
    }
    Ok(())
}

/// Writes (band, row, col) data with the driver, georeferencing and nodata of the profile.
///
/// The raster is assembled in memory then copied out, which works for drivers like
/// JP2OpenJPEG that can only CreateCopy.  The output size is the size of `data`.
pub fn write_raster<T: GdalType + Copy>(raster_path: &Path,
                                        profile: &RasterProfile,
                                        data: &Array3<T>) -> Result<()> {
    let (band_count, num_rows, num_cols) = data.dim();

    debug!("Creating {} raster {:?} ({} bands, {}x{})", profile.driver, raster_path, band_count, num_cols, num_rows);

    let mem_ds = create_mem_raster::<T>(num_cols, num_rows, band_count, &profile.transform, &profile.projection)?;

    for (band_index, band_data) in data.outer_iter().enumerate() {
        let mut band = mem_ds.rasterband(band_index + 1)?;

        if let Some(no_data_value) = profile.no_data_value {
            band.set_no_data_value(Some(no_data_value))?;
        }

        let mut buffer = Buffer::new((num_cols, num_rows), band_data.iter().copied().collect());
        band.write((0, 0), (num_cols, num_rows), &mut buffer)?;
    }

    let drv = DriverManager::get_driver_by_name(&profile.driver)
        .with_context(|| format!("Driver {} is not available", profile.driver))?;

    remove_existing(raster_path)?;

    // the copy is closed and flushed when dropped
    mem_ds
        .create_copy(&drv, raster_path, &CslStringList::new())
        .with_context(|| format!("Unable to write {:?} with driver {}", raster_path, profile.driver))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::test_util::test_profile;
    use crate::raster::{Raster, HFA_DRIVER};
    use gdal::raster::GdalDataType;

    #[test]
    fn test_write_uses_data_size_and_driver() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("written.img");

        // profile size is ignored
        let profile = test_profile(100, 100, 2, GdalDataType::Float32)
            .with_driver(HFA_DRIVER)
            .with_no_data_value(Some(-9999.0));
        let data = Array3::from_shape_fn((2, 5, 7), |(b, r, c)| (b + r * c) as f32 * 0.5);

        write_raster(&path, &profile, &data).unwrap();

        let raster = Raster::open(&path).unwrap();
        assert_eq!(raster.profile.driver, "HFA");
        assert_eq!(raster.profile.num_cols, 7);
        assert_eq!(raster.profile.num_rows, 5);
        assert_eq!(raster.profile.band_count, 2);
        assert_eq!(raster.profile.gdal_type, GdalDataType::Float32);
        assert_eq!(raster.band(2).unwrap().no_data_value(), Some(-9999.0));

        let read: Array3<f32> = raster.read_all().unwrap();
        assert_eq!(read, data);
    }

    #[test]
    fn test_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("twice.tif");
        let profile = test_profile(3, 3, 1, GdalDataType::UInt8);

        write_raster(&path, &profile, &Array3::<u8>::zeros((1, 3, 3))).unwrap();
        write_raster(&path, &profile, &Array3::<u8>::from_elem((1, 2, 4), 7)).unwrap();

        let raster = Raster::open(&path).unwrap();
        assert_eq!((raster.profile.num_cols, raster.profile.num_rows), (4, 2));
        let read: Array3<u8> = raster.read_all().unwrap();
        assert!(read.iter().all(|v| *v == 7));
    }

    #[test]
    fn test_read_resampled_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.tif");
        let profile = test_profile(40, 30, 1, GdalDataType::UInt8);

        write_raster(&path, &profile, &Array3::<u8>::from_elem((1, 30, 40), 42)).unwrap();

        let raster = Raster::open(&path).unwrap();
        let read: Array3<u8> = raster.read((1, 4, 6), ResampleAlg::Cubic).unwrap();

        assert_eq!(read.dim(), (1, 4, 6));
        // a constant raster stays constant whatever the kernel
        assert!(read.iter().all(|v| *v == 42));
    }

    #[test]
    fn test_mem_raster_starts_at_zero() {
        let ds = create_mem_raster::<f64>(5, 4, 1, &Affine::identity(), "").unwrap();
        let buffer = ds.rasterband(1).unwrap().read_as::<f64>((0, 0), (5, 4), (5, 4), None).unwrap();

        assert!(buffer.data().iter().all(|v| *v == 0.0));
        assert_eq!(ds.geo_transform().unwrap(), Affine::identity().to_gdal());
    }
}
