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

use thiserror::Error;

/// Domain errors raised through `anyhow`; callers can recover them with `downcast_ref`.
/// GDAL errors are propagated as they are.
#[derive(Clone, PartialEq, Debug, Error)]
pub enum RasterUtilError {
    #[error("File not found: {0:?}")]
    FileNotFound(PathBuf),

    #[error("Quality must be between 0 and 100")]
    InvalidQuality(i32),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("GDALReprojectImage failed: '{0}'")]
    Reproject(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            RasterUtilError::InvalidQuality(150).to_string(),
            "Quality must be between 0 and 100"
        );
        assert_eq!(
            RasterUtilError::FileNotFound(PathBuf::from("/tmp/nope.tif")).to_string(),
            "File not found: \"/tmp/nope.tif\""
        );
        assert_eq!(
            RasterUtilError::InvalidArgument("scale factor 0".to_string()).to_string(),
            "Invalid argument: scale factor 0"
        );
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = RasterUtilError::InvalidQuality(-1).into();
        assert_eq!(
            err.downcast_ref::<RasterUtilError>(),
            Some(&RasterUtilError::InvalidQuality(-1))
        );
    }
}
