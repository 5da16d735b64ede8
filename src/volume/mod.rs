//! This module defines the raw voxel buffer of a loaded file and the
//! extraction of single 2-D slices out of it.

pub mod element;
pub mod slice;

pub use self::element::DataElement;
pub use self::slice::{extract_slice, ExtractedSlice, SliceGeometry, SlicePixels, SliceView, ValueRange};

use crate::error::{NiftiError, Result};
use crate::header::VolumeHeader;
use byteordered::Endianness;
use tracing::debug;

/// The voxels of a NIfTI volume, exactly as stored in the file,
/// X-fastest. Paired with the `VolumeHeader` it was read with.
#[derive(Debug, PartialEq, Clone)]
pub struct VolumeData {
    raw_data: Vec<u8>,
    endianness: Endianness,
}

impl VolumeData {
    /// Wrap an existing voxel buffer stored with the given byte order.
    pub fn new(raw_data: Vec<u8>, endianness: Endianness) -> Self {
        VolumeData {
            raw_data,
            endianness,
        }
    }

    /// Take the voxel data out of a full single-file buffer, which starts
    /// with the given header. The buffer is reused in place.
    ///
    /// # Errors
    ///
    /// - `NiftiError::NoVolumeData` if the header declares a separate image file.
    /// - `NiftiError::TruncatedVolume` if the buffer ends before `vox_offset`.
    pub fn from_buffer(header: &VolumeHeader, mut bytes: Vec<u8>) -> Result<Self> {
        if !header.is_single_file() {
            return Err(NiftiError::NoVolumeData);
        }
        if bytes.len() < header.vox_offset {
            return Err(NiftiError::TruncatedVolume {
                needed: header.vox_offset,
                available: bytes.len(),
            });
        }
        let _ = bytes.drain(..header.vox_offset);
        debug!(bytes = bytes.len(), "voxel data read");
        Ok(VolumeData::new(bytes, header.endianness))
    }

    /// Copy the voxel data out of a full single-file buffer.
    /// See `from_buffer`.
    pub fn from_bytes(header: &VolumeHeader, bytes: &[u8]) -> Result<Self> {
        if !header.is_single_file() {
            return Err(NiftiError::NoVolumeData);
        }
        let raw = bytes
            .get(header.vox_offset..)
            .ok_or(NiftiError::TruncatedVolume {
                needed: header.vox_offset,
                available: bytes.len(),
            })?;
        Ok(VolumeData::new(raw.to_vec(), header.endianness))
    }

    /// Retrieve a reference to the raw data.
    pub fn raw_data(&self) -> &[u8] {
        &self.raw_data
    }

    /// Retrieve the raw data, consuming the volume.
    pub fn into_raw_data(self) -> Vec<u8> {
        self.raw_data
    }

    /// Byte order of the voxel values.
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Length of the voxel buffer in bytes.
    pub fn len(&self) -> usize {
        self.raw_data.len()
    }

    /// Whether the voxel buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.raw_data.is_empty()
    }
}
