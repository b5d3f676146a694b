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
use std::ops::Mul;

use gdal::GeoTransform;

/// Pixel to world mapping
///
/// x = a * col + b * row + c
/// y = d * col + e * row + f
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Affine {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Affine { a, b, c, d, e, f }
    }

    pub fn identity() -> Self {
        Affine::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0)
    }

    pub fn translation(tx: f64, ty: f64) -> Self {
        Affine::new(1.0, 0.0, tx, 0.0, 1.0, ty)
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Affine::new(sx, 0.0, 0.0, 0.0, sy, 0.0)
    }

    /// GDAL orders the coefficients [c, a, b, f, d, e]
    pub fn from_gdal(gt: &GeoTransform) -> Self {
        Affine::new(gt[1], gt[2], gt[0], gt[4], gt[5], gt[3])
    }

    pub fn to_gdal(&self) -> GeoTransform {
        [self.c, self.a, self.b, self.f, self.d, self.e]
    }

    /// Divides the pixel sizes (a, e), shear and origin are kept
    pub fn with_pixel_size_divided_by(&self, factor: f64) -> Self {
        Affine {
            a: self.a / factor,
            e: self.e / factor,
            ..*self
        }
    }

    pub fn apply(&self, col: f64, row: f64) -> (f64, f64) {
        (
            self.a * col + self.b * row + self.c,
            self.d * col + self.e * row + self.f,
        )
    }
}

impl Default for Affine {
    fn default() -> Self {
        Affine::identity()
    }
}

/// Matrix product, `lhs * rhs` applies `rhs` first
impl Mul for Affine {
    type Output = Affine;

    fn mul(self, rhs: Affine) -> Affine {
        Affine {
            a: self.a * rhs.a + self.b * rhs.d,
            b: self.a * rhs.b + self.b * rhs.e,
            c: self.a * rhs.c + self.b * rhs.f + self.c,
            d: self.d * rhs.a + self.e * rhs.d,
            e: self.d * rhs.b + self.e * rhs.e,
            f: self.d * rhs.c + self.e * rhs.f + self.f,
        }
    }
}

impl fmt::Display for Affine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "| {}, {}, {}|\n| {}, {}, {}|",
            self.a, self.b, self.c, self.d, self.e, self.f
        )
    }
}
