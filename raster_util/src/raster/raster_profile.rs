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

use anyhow::Result;
use gdal::raster::GdalDataType;
use gdal::Dataset;

use crate::raster::Affine;

/// What is needed to write a raster like another one: driver, size, georeferencing,
/// nodata and band type
#[derive(Debug, Clone, PartialEq)]
pub struct RasterProfile {
    //GDAL driver short name
    pub driver: String,
    pub num_cols: usize,
    pub num_rows: usize,
    pub band_count: usize,
    pub transform: Affine,

    //WKT projection string, empty when the raster has no CRS
    pub projection: String,

    pub no_data_value: Option<f64>,
    pub gdal_type: GdalDataType,
}

impl fmt::Display for RasterProfile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Driver: {}\nOrigin X,Y: {}, {}\nPixel Width/Height: {},{}\nRows: {} Cols: {} Bands: {}\nNo data value: {:?}\nGdal Type: {:?}\nProjection: {}",
               self.driver,
               self.transform.c,
               self.transform.f,
               self.transform.a,
               self.transform.e,
               self.num_rows,
               self.num_cols,
               self.band_count,
               self.no_data_value,
               self.gdal_type,
               &self.projection
        )
    }
}

impl RasterProfile {
    /// Band type and nodata are taken from the first band
    pub fn new(dataset: &Dataset) -> Result<Self> {
        let (num_cols, num_rows) = dataset.raster_size();
        let band_count = dataset.raster_count() as usize;

        let band = dataset.rasterband(1)?;

        // GDAL reports no geotransform for plain images, treat those as pixel space
        let transform = dataset
            .geo_transform()
            .map(|gt| Affine::from_gdal(&gt))
            .unwrap_or_default();

        Ok(RasterProfile {
            driver: dataset.driver().short_name(),
            num_cols,
            num_rows,
            band_count,
            transform,
            projection: dataset.projection(),
            no_data_value: band.no_data_value(),
            gdal_type: band.band_type(),
        })
    }

    pub fn with_driver(self, driver: &str) -> Self {
        RasterProfile {
            driver: driver.to_string(),
            ..self
        }
    }

    pub fn with_transform(self, transform: Affine) -> Self {
        RasterProfile { transform, ..self }
    }

    pub fn with_size(self, num_cols: usize, num_rows: usize) -> Self {
        RasterProfile {
            num_cols,
            num_rows,
            ..self
        }
    }

    pub fn with_no_data_value(self, no_data_value: Option<f64>) -> Self {
        RasterProfile {
            no_data_value,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::test_util::test_profile;

    #[test]
    fn test_overrides_keep_the_rest() {
        let profile = test_profile(10, 20, 3, GdalDataType::Float32);

        let updated = profile
            .clone()
            .with_driver("HFA")
            .with_size(2, 4)
            .with_no_data_value(Some(0.0));

        assert_eq!(updated.driver, "HFA");
        assert_eq!(updated.num_cols, 2);
        assert_eq!(updated.num_rows, 4);
        assert_eq!(updated.no_data_value, Some(0.0));

        assert_eq!(updated.band_count, profile.band_count);
        assert_eq!(updated.transform, profile.transform);
        assert_eq!(updated.projection, profile.projection);
        assert_eq!(updated.gdal_type, profile.gdal_type);
    }

    #[test]
    fn test_display() {
        let profile = test_profile(10, 20, 1, GdalDataType::UInt8);
        let s = profile.to_string();

        assert!(s.starts_with("Driver: GTiff\n"));
        assert!(s.contains("Rows: 20 Cols: 10 Bands: 1"));
    }
}
