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

pub const GTIFF_DRIVER: &str = "GTiff";
pub const JP2_DRIVER: &str = "JP2OpenJPEG";
pub const HFA_DRIVER: &str = "HFA";
pub const MEM_DRIVER: &str = "MEM";

/// Output format chosen from the extension of the output file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    GTiff,
    Jp2OpenJpeg,
    /// Erdas Imagine, used for every extension we do not recognize
    Hfa,
}

impl OutputFormat {
    /// Only looks at what follows the last '.' of the file name, case sensitive
    pub fn from_path(path: &Path) -> OutputFormat {
        let file_name = path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        OutputFormat::from_extension(file_name.rsplit('.').next().unwrap_or(""))
    }

    pub fn from_extension(extension: &str) -> OutputFormat {
        match extension {
            "tif" | "tiff" => OutputFormat::GTiff,
            "jp2" => OutputFormat::Jp2OpenJpeg,
            _ => OutputFormat::Hfa,
        }
    }

    pub fn driver_name(&self) -> &'static str {
        match self {
            OutputFormat::GTiff => GTIFF_DRIVER,
            OutputFormat::Jp2OpenJpeg => JP2_DRIVER,
            OutputFormat::Hfa => HFA_DRIVER,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.driver_name())
    }
}
