//! File exporters for a laid-out box.
//!
//! - [`dxf`]: DXF R12 cut files for laser cutting services
//! - [`svg`]: a quick visual check of every panel

pub mod dxf;
pub mod svg;

pub use dxf::{box_to_dxf, DxfDocument, DxfShape};
pub use svg::{box_to_svg, export_svg, SvgParams};

use std::path::Path;

use crate::ExportError;

pub(crate) fn write_file(path: &Path, contents: &[u8]) -> Result<(), ExportError> {
    std::fs::write(path, contents).map_err(|source| ExportError::Io {
        path: path.to_owned(),
        source,
    })
}
