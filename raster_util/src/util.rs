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
use std::fs::metadata;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Result};

use crate::RasterUtilError;

pub fn format_duration(d: Duration) -> String {
    let mut secs = d.as_secs();
    let hours = secs / 3600;
    secs = secs % 3600;
    let minutes = secs / 60;
    secs = secs % 60;

    let ms = d.as_millis() % 1000;

    format!("{}h {}m {}s {}ms", hours, minutes, secs, ms)
}

/// Size of a file in bytes, FileNotFound if it does not exist
pub fn file_size(path: &Path) -> Result<u64> {
    if !path.exists() {
        bail!(RasterUtilError::FileNotFound(path.to_path_buf()));
    }
    Ok(metadata(path)?.len())
}

/// Size in kilobytes (1000 bytes)
pub fn file_size_kb(path: &Path) -> Result<f64> {
    Ok(file_size(path)? as f64 / 1000.0)
}

/// Rounds the exact binary value to a fixed number of decimals,
/// 1.0005 (stored as 1.000499..) gives 1.0
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::write;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(3_723_045)), "1h 2m 3s 45ms");
        assert_eq!(format_duration(Duration::from_millis(0)), "0h 0m 0s 0ms");
    }

    #[test]
    fn test_file_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("some.bin");
        write(&path, vec![0u8; 2500]).unwrap();

        assert_eq!(file_size(&path).unwrap(), 2500);
        assert!((file_size_kb(&path).unwrap() - 2.5).abs() < f64::EPSILON);

        let missing = dir.path().join("missing.bin");
        let err = file_size(&missing).unwrap_err();
        assert_eq!(
            err.downcast_ref::<RasterUtilError>(),
            Some(&RasterUtilError::FileNotFound(missing))
        );
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1234.56789, 3), 1234.568);
        assert_eq!(round_to(0.0004, 3), 0.0);
        assert_eq!(round_to(5000.0, 3), 5000.0);
    }

    #[test]
    fn test_round_to_below_half() {
        assert_eq!(round_to(1.0005, 3), 1.0);
        assert_eq!(round_to(308.6425, 3), 308.642);
        assert_eq!(round_to(2.0005, 3), 2.001);
        assert_eq!(round_to(1234.5675, 3), 1234.568);
    }
}
