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
//! JPEG2000 compression at a given quality.
//!
//! The output is always written to the caller's path, the ratio compares the sizes of
//! the two files on disk.

use std::path::Path;

use anyhow::{bail, Context, Result};
use gdal::cpl::CslStringList;
use gdal::{Dataset, DriverManager};
use log::info;

use crate::raster::{remove_existing, JP2_DRIVER};
use crate::util::file_size;
use crate::RasterUtilError;

/// High compression, low fidelity
pub const LOW_QUALITY: i32 = 10;
/// Low compression, high fidelity
pub const HIGH_QUALITY: i32 = 100;

pub fn validate_quality(quality: i32) -> Result<()> {
    if !(0..=100).contains(&quality) {
        bail!(RasterUtilError::InvalidQuality(quality));
    }
    Ok(())
}

/// QUALITY=<quality>, REVERSIBLE=YES, YCBCR420=NO
pub fn jp2_option_pairs(quality: i32) -> Vec<(&'static str, String)> {
    vec![
        ("QUALITY", quality.to_string()),
        ("REVERSIBLE", "YES".to_string()),
        ("YCBCR420", "NO".to_string()),
    ]
}

pub fn jp2_creation_options(quality: i32) -> Result<CslStringList> {
    let mut options = CslStringList::new();
    for (name, value) in jp2_option_pairs(quality) {
        options.set_name_value(name, &value)?;
    }
    Ok(options)
}

/// Translates input_path to a JPEG2000 file at out_path, returns out size / input size.
/// The quality is checked before anything is opened.
pub fn compress_given_quality(input_path: &Path, out_path: &Path, quality: i32) -> Result<f64> {
    validate_quality(quality)?;

    if !input_path.exists() {
        bail!(RasterUtilError::FileNotFound(input_path.to_path_buf()));
    }

    {
        let src_ds = Dataset::open(input_path)
            .with_context(|| format!("Unable to open raster {:?}", input_path))?;

        let drv = DriverManager::get_driver_by_name(JP2_DRIVER)
            .with_context(|| format!("Driver {} is not available", JP2_DRIVER))?;

        let options = jp2_creation_options(quality)?;

        info!("Compressing {:?} to {:?} with quality {}", input_path, out_path, quality);

        remove_existing(out_path)?;

        src_ds
            .create_copy(&drv, out_path, &options)
            .with_context(|| format!("Unable to write {:?}", out_path))?;
    }

    let ratio = file_size(out_path)? as f64 / file_size(input_path)? as f64;

    info!("Compression ratio of {:?}: {}", out_path, ratio);

    Ok(ratio)
}

pub fn compress_low_quality(input_path: &Path, out_path: &Path) -> Result<f64> {
    compress_given_quality(input_path, out_path, LOW_QUALITY)
}

pub fn compress_high_quality(input_path: &Path, out_path: &Path) -> Result<f64> {
    compress_given_quality(input_path, out_path, HIGH_QUALITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::test_util::{create_test_raster, test_profile};
    use crate::raster::Raster;
    use gdal::raster::GdalDataType;
    use ndarray::Array3;

    #[test]
    fn test_validate_quality() {
        for quality in [-1, 101, 150, i32::MIN, i32::MAX].iter() {
            let err = validate_quality(*quality).unwrap_err();
            assert_eq!(err.to_string(), "Quality must be between 0 and 100");
            assert_eq!(
                err.downcast_ref::<RasterUtilError>(),
                Some(&RasterUtilError::InvalidQuality(*quality))
            );
        }

        for quality in [0, 10, 50, 100].iter() {
            assert!(validate_quality(*quality).is_ok());
        }
    }

    #[test]
    fn test_options() {
        assert_eq!(
            jp2_option_pairs(42),
            vec![
                ("QUALITY", "42".to_string()),
                ("REVERSIBLE", "YES".to_string()),
                ("YCBCR420", "NO".to_string()),
            ]
        );
        assert_eq!(jp2_creation_options(42).unwrap().len(), 3);
    }

    #[test]
    fn test_invalid_quality_before_io() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.tif");
        let out_path = dir.path().join("out.jp2");

        let err = compress_given_quality(&missing, &out_path, 150).unwrap_err();

        assert_eq!(err.to_string(), "Quality must be between 0 and 100");
        assert!(!out_path.exists());
    }

    #[test]
    fn test_bounds_pass_validation() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.tif");
        let out_path = dir.path().join("out.jp2");

        // 0 and 100 get as far as looking for the input
        for quality in [0, 100].iter() {
            let err = compress_given_quality(&missing, &out_path, *quality).unwrap_err();
            assert_eq!(
                err.downcast_ref::<RasterUtilError>(),
                Some(&RasterUtilError::FileNotFound(missing.clone()))
            );
        }
    }

    #[test]
    fn test_compress() {
        if DriverManager::get_driver_by_name(JP2_DRIVER).is_err() {
            println!("{} driver not available, skipping", JP2_DRIVER);
            return;
        }

        let dir = tempfile::tempdir().unwrap();

        let profile = test_profile(64, 64, 1, GdalDataType::UInt8);
        let data = Array3::from_shape_fn((1, 64, 64), |(_, r, c)| ((r * 7 + c * 13) % 256) as u8);
        let in_path = create_test_raster(dir.path(), "in.tif", &profile, &data).unwrap();

        let low_path = dir.path().join("low.jp2");
        let high_path = dir.path().join("high.jp2");

        let low_ratio = compress_low_quality(&in_path, &low_path).unwrap();
        let high_ratio = compress_high_quality(&in_path, &high_path).unwrap();

        let in_size = file_size(&in_path).unwrap() as f64;
        assert_eq!(low_ratio, file_size(&low_path).unwrap() as f64 / in_size);
        assert_eq!(high_ratio, file_size(&high_path).unwrap() as f64 / in_size);

        let out = Raster::open(&high_path).unwrap();
        assert_eq!(out.profile.driver, "JP2OpenJPEG");
        assert_eq!((out.profile.num_cols, out.profile.num_rows), (64, 64));

        // reversible at full quality is lossless
        let read: Array3<u8> = out.read_all().unwrap();
        assert_eq!(read, data);
    }
}
