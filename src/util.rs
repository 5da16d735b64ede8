//! Private utility module
use crate::error::{NiftiError, Result};
use flate2::bufread::MultiGzDecoder;
use std::io::Read;
use tracing::debug;

/// The two leading bytes of every gzip member.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Check whether the file name denotes a NIfTI file, either plain (".nii")
/// or gzip-compressed (".nii.gz"). The comparison is case-insensitive.
pub fn is_nifti_file<P: AsRef<str>>(filename: P) -> bool {
    let name = filename.as_ref().to_ascii_lowercase();
    name.ends_with(".nii") || name.ends_with(".nii.gz")
}

/// Check whether the file name denotes a gzip-compressed NIfTI file (".nii.gz").
/// The comparison is case-insensitive.
pub fn is_compressed_nifti<P: AsRef<str>>(filename: P) -> bool {
    filename.as_ref().to_ascii_lowercase().ends_with(".nii.gz")
}

/// Check whether the buffer starts with the gzip magic number.
pub fn is_gzip_data(bytes: &[u8]) -> bool {
    bytes.starts_with(&GZIP_MAGIC)
}

/// Inflate the given buffer if `compressed` is set, or hand it back untouched.
///
/// Concatenated gzip members are decoded as a single stream.
///
/// # Errors
///
/// - `NiftiError::Decompression` if the buffer is not valid gzip data.
pub fn decompress(bytes: Vec<u8>, compressed: bool) -> Result<Vec<u8>> {
    if !compressed {
        return Ok(bytes);
    }
    if !is_gzip_data(&bytes) {
        return Err(NiftiError::Decompression(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "invalid gzip header",
        )));
    }
    let mut out = Vec::with_capacity(bytes.len().saturating_mul(4));
    let _ = MultiGzDecoder::new(&bytes[..])
        .read_to_end(&mut out)
        .map_err(NiftiError::Decompression)?;
    debug!(compressed = bytes.len(), decompressed = out.len(), "gzip stream inflated");
    Ok(out)
}

/// Format a byte count with a binary (1024-based) unit and one decimal place.
pub fn format_file_size(bytes: u64) -> String {
    const KB: f64 = 1024.;
    const MB: f64 = KB * 1024.;
    const GB: f64 = MB * 1024.;
    let b = bytes as f64;
    if b < KB {
        format!("{} B", bytes)
    } else if b < MB {
        format!("{:.1} KB", b / KB)
    } else if b < GB {
        format!("{:.1} MB", b / MB)
    } else {
        format!("{:.1} GB", b / GB)
    }
}

/// Take an optional header value, falling back to `default` when it is
/// zero or not a finite number.
pub fn or_default_if_unset(value: f64, default: f64) -> f64 {
    if value == 0. || !value.is_finite() {
        default
    } else {
        value
    }
}

/// Convert a raw volume value to the scale defined
/// by the given scale slope and intercept parameters.
pub fn raw_to_value(value: f64, slope: f64, intercept: f64) -> f64 {
    value * slope + intercept
}
