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
//! Random reprojection: moves a raster by a random number of its own extents.
//!
//! The pixels are reprojected onto the source grid with nearest neighbour, the
//! displacement only ends up in the geotransform of the output.

use std::ffi::CStr;
use std::path::Path;
use std::ptr::{null, null_mut};

use anyhow::{bail, Result};
use gdal::raster::{Buffer, GdalType};
use gdal_sys::{CPLErr, GDALResampleAlg};
use log::{debug, info};
use ndarray::{Array2, Array3, ArrayView2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::raster::{create_mem_raster, write_raster, Affine, Raster};
use crate::RasterUtilError;

pub const MIN_DISPLACEMENT: f64 = 100.0;
pub const MAX_DISPLACEMENT: f64 = 1000.0;

/// Nodata declared on every band of the output
pub const OUTPUT_NO_DATA: f64 = 0.0;

/// Uniform in [MIN_DISPLACEMENT, MAX_DISPLACEMENT)
pub fn random_displacement<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(MIN_DISPLACEMENT..MAX_DISPLACEMENT)
}

pub fn shifted_transform(transform: &Affine, num_cols: usize, num_rows: usize, displacement: f64) -> Affine {
    *transform * Affine::translation(num_cols as f64 * displacement, num_rows as f64 * displacement)
}

/// Displacement drawn from entropy, a different result every call
pub fn reproject_raster(in_path: &Path, out_path: &Path) -> Result<()> {
    reproject_raster_seeded(in_path, out_path, None)
}

pub fn reproject_raster_seeded(in_path: &Path, out_path: &Path, seed: Option<u64>) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    reproject_raster_with_rng(in_path, out_path, &mut rng)
}

/// Draws exactly one displacement from rng
pub fn reproject_raster_with_rng<R: Rng + ?Sized>(in_path: &Path, out_path: &Path, rng: &mut R) -> Result<()> {
    let raster = Raster::open(in_path)?;

    let displacement = random_displacement(rng);

    let transform = shifted_transform(
        &raster.profile.transform,
        raster.profile.num_cols,
        raster.profile.num_rows,
        displacement,
    );

    info!("Reprojecting {:?} with random displacement {}, new transform\n{}", in_path, displacement, transform);

    dispatch_gdal_type!(raster.profile.gdal_type, reproject_bands(&raster, out_path, transform))?;

    info!("Wrote {:?}", out_path);

    Ok(())
}

fn reproject_bands<T: GdalType + Copy>(raster: &Raster, out_path: &Path, shifted: Affine) -> Result<()> {
    let profile = &raster.profile;

    let data: Array3<T> = raster.read_all()?;

    let mut reprojected: Vec<T> = Vec::with_capacity(data.len());

    for (band_index, band) in data.outer_iter().enumerate() {
        debug!("Reprojecting band {} of {}", band_index + 1, profile.band_count);

        let dest = reproject_band(band, &profile.transform, &profile.projection)?;
        reprojected.extend(dest.iter().copied());
    }

    let reprojected = Array3::from_shape_vec(data.dim(), reprojected)?;

    let out_profile = profile
        .clone()
        .with_transform(shifted)
        .with_no_data_value(Some(OUTPUT_NO_DATA));

    write_raster(out_path, &out_profile, &reprojected)
}

/// Nearest neighbour reprojection of one band onto a zeroed grid of the same shape.
/// Source and destination share transform and CRS.
fn reproject_band<T: GdalType + Copy>(band: ArrayView2<T>, transform: &Affine, projection: &str) -> Result<Array2<T>> {
    let (num_rows, num_cols) = band.dim();

    let src_ds = create_mem_raster::<T>(num_cols, num_rows, 1, transform, projection)?;
    {
        let mut src_band = src_ds.rasterband(1)?;
        let mut buffer = Buffer::new((num_cols, num_rows), band.iter().copied().collect());
        src_band.write((0, 0), (num_cols, num_rows), &mut buffer)?;
    }

    let dst_ds = create_mem_raster::<T>(num_cols, num_rows, 1, transform, projection)?;

    // null WKT means use the projection of the dataset
    let rv = unsafe {
        gdal_sys::GDALReprojectImage(
            src_ds.c_dataset(),
            null(),
            dst_ds.c_dataset(),
            null(),
            GDALResampleAlg::GRA_NearestNeighbour,
            0.0,
            0.0,
            None,
            null_mut(),
            null_mut(),
        )
    };
    if rv != CPLErr::CE_None {
        bail!(RasterUtilError::Reproject(last_cpl_error_msg()));
    }

    let buffer = dst_ds
        .rasterband(1)?
        .read_as::<T>((0, 0), (num_cols, num_rows), (num_cols, num_rows), None)?;

    Ok(Array2::from_shape_vec((num_rows, num_cols), buffer.data().to_vec())?)
}

fn last_cpl_error_msg() -> String {
    unsafe {
        CStr::from_ptr(gdal_sys::CPLGetLastErrorMsg())
            .to_string_lossy()
            .into_owned()
    }
}
