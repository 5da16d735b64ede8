//! Types for error handling go here.

use std::fmt;
use std::io::Error as IOError;

/// The stage of the loading pipeline in which an error occurred.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Stage {
    /// Reading the raw bytes of the input file.
    Read,
    /// Inflating a gzip-compressed buffer.
    Decompress,
    /// Validating the signature and parsing the header.
    Parse,
    /// Cutting a single slice out of the voxel buffer.
    Extract,
    /// Building the image slice descriptor.
    Adapt,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Stage::Read => "read",
            Stage::Decompress => "decompress",
            Stage::Parse => "parse",
            Stage::Extract => "extract",
            Stage::Adapt => "adapt",
        };
        f.write_str(name)
    }
}

quick_error! {
    /// Error type for all error kinds in this crate.
    #[derive(Debug)]
    pub enum NiftiError {
        /// The gzip stream could not be inflated.
        Decompression(err: IOError) {
            source(err)
            display("decompress: failed to inflate gzip data: {}", err)
        }
        /// The buffer does not start with a NIfTI-1 or NIfTI-2 header.
        InvalidFormat {
            display("parse: not a valid NIfTI file")
        }
        /// The header only describes the volume, the voxels live in another file.
        NoVolumeData {
            display("parse: header-only file carries no volume data")
        }
        /// Width or height of the volume is not a positive number.
        InvalidDimensions(width: i64, height: i64) {
            display("extract: invalid image dimensions {}x{}", width, height)
        }
        /// The voxel buffer ends before the requested data does.
        TruncatedVolume { needed: usize, available: usize } {
            display("extract: volume data truncated: {} bytes needed, {} available", needed, available)
        }
        /// The assembled image slice failed its final consistency check.
        InvalidImage { width: usize, height: usize, pixels: usize } {
            display("adapt: invalid image: width={}, height={}, pixels={}", width, height, pixels)
        }
        /// I/O Error
        Io(err: IOError) {
            from()
            source(err)
            display("read: {}", err)
        }
    }
}

impl NiftiError {
    /// The pipeline stage that produced this error.
    pub fn stage(&self) -> Stage {
        match self {
            NiftiError::Io(_) => Stage::Read,
            NiftiError::Decompression(_) => Stage::Decompress,
            NiftiError::InvalidFormat | NiftiError::NoVolumeData => Stage::Parse,
            NiftiError::InvalidDimensions(..) | NiftiError::TruncatedVolume { .. } => {
                Stage::Extract
            }
            NiftiError::InvalidImage { .. } => Stage::Adapt,
        }
    }
}

/// Alias type for results originated from this crate.
pub type Result<T> = ::std::result::Result<T, NiftiError>;
