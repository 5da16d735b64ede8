//! This module defines the `VolumeHeader` struct, which is used
//! to provide important information about NIfTI volumes.
//!
//! Both single-file NIfTI-1 (348-byte header) and NIfTI-2 (540-byte header)
//! layouts are recognised. Only the fields needed to locate, decode and
//! describe the voxel data are kept.

use crate::error::{NiftiError, Result};
use byteordered::{ByteOrdered, Endianness};
use std::io::{self, Read};
use tracing::debug;

/// Magic code for NIFTI-1 header files (extention ".hdr[.gz]").
pub const MAGIC_CODE_NI1: &[u8; 4] = b"ni1\0";
/// Magic code for full NIFTI-1 files (extention ".nii[.gz]").
pub const MAGIC_CODE_NIP1: &[u8; 4] = b"n+1\0";
/// Magic code for NIFTI-2 header files.
pub const MAGIC_CODE_NI2: &[u8; 8] = b"ni2\0\r\n\x1a\n";
/// Magic code for full NIFTI-2 files.
pub const MAGIC_CODE_NIP2: &[u8; 8] = b"n+2\0\r\n\x1a\n";

/// Byte offset of the magic code in a NIFTI-1 header.
const MAGIC_OFFSET_NI1: usize = 344;
/// Byte offset of the magic code in a NIFTI-2 header.
const MAGIC_OFFSET_NI2: usize = 4;

/// Version of the NIfTI header layout.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum NiftiVersion {
    /// NIFTI-1: 348 byte header, 16-bit dimensions.
    Nifti1,
    /// NIFTI-2: 540 byte header, 64-bit dimensions.
    Nifti2,
}

impl NiftiVersion {
    /// Size of the header in bytes, as stored in `sizeof_hdr`.
    pub fn header_size(self) -> usize {
        match self {
            NiftiVersion::Nifti1 => 348,
            NiftiVersion::Nifti2 => 540,
        }
    }

    /// Smallest possible voxel offset in a single file: the header
    /// followed by the 4-byte extender.
    pub fn min_vox_offset(self) -> usize {
        self.header_size() + 4
    }

    /// Identify the header layout from its magic code.
    /// Returns `None` if the buffer holds neither.
    pub fn detect(bytes: &[u8]) -> Option<NiftiVersion> {
        let ni1 = bytes.get(MAGIC_OFFSET_NI1..MAGIC_OFFSET_NI1 + 4);
        if ni1 == Some(&MAGIC_CODE_NIP1[..]) || ni1 == Some(&MAGIC_CODE_NI1[..]) {
            return Some(NiftiVersion::Nifti1);
        }
        if bytes.len() >= NiftiVersion::Nifti2.header_size() {
            let ni2 = &bytes[MAGIC_OFFSET_NI2..MAGIC_OFFSET_NI2 + 8];
            if ni2 == &MAGIC_CODE_NIP2[..] || ni2 == &MAGIC_CODE_NI2[..] {
                return Some(NiftiVersion::Nifti2);
            }
        }
        None
    }
}

/// Check whether the buffer starts with a NIfTI-1 or NIfTI-2 header.
pub fn is_nifti(bytes: &[u8]) -> bool {
    NiftiVersion::detect(bytes).is_some()
}

/// The parsed NIfTI header.
///
/// Dimensions and spacings are widened to the NIFTI-2 types so that both
/// layouts share one representation.
///
/// # Example
///
/// ```
/// use nifti_slice::VolumeHeader;
///
/// let hdr = VolumeHeader {
///     dims: [3, 64, 64, 10, 1, 1, 1, 1],
///     datatype_code: 16,
///     ..Default::default()
/// };
/// assert_eq!(hdr.dims[3], 10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeHeader {
    /// Header layout version
    pub version: NiftiVersion,
    /// Header size, 348 or 540
    pub sizeof_hdr: i32,
    /// Data array dimensions, `dims[0]` being the number of dimensions in use
    pub dims: [i64; 8],
    /// Grid spacings
    pub pix_dims: [f64; 8],
    /// Defines the data type!
    pub datatype_code: i16,
    /// Number of bits per voxel
    pub bitpix: i16,
    /// Offset into the file to reach the volume
    pub vox_offset: usize,
    /// Data scaling: slope
    pub scl_slope: f64,
    /// Data scaling: offset
    pub scl_intercept: f64,
    /// Max display intensity
    pub cal_max: f64,
    /// Min display intensity
    pub cal_min: f64,
    /// Units of pix_dims[1..4]
    pub xyzt_units: i32,
    /// Any text you like
    pub description: String,
    /// Leading bytes of the magic code, e.g. `b"n+1\0"`
    pub magic: [u8; 4],
    /// Original data Endianness
    pub endianness: Endianness,
}

impl Default for VolumeHeader {
    fn default() -> VolumeHeader {
        VolumeHeader {
            version: NiftiVersion::Nifti1,
            sizeof_hdr: 348,
            dims: [1, 0, 0, 0, 0, 0, 0, 0],
            pix_dims: [0.; 8],
            datatype_code: 0,
            bitpix: 0,
            vox_offset: 352,
            scl_slope: 0.,
            scl_intercept: 0.,
            cal_max: 0.,
            cal_min: 0.,
            xyzt_units: 0,
            description: String::new(),
            magic: *MAGIC_CODE_NIP1,
            endianness: Endianness::Little,
        }
    }
}

impl VolumeHeader {
    /// Validate the signature and parse the header at the start of the buffer.
    ///
    /// # Errors
    ///
    /// - `NiftiError::InvalidFormat` if the buffer does not start with a
    /// NIfTI-1 or NIfTI-2 header. Nothing is read in that case.
    pub fn from_bytes(bytes: &[u8]) -> Result<VolumeHeader> {
        let version = NiftiVersion::detect(bytes).ok_or(NiftiError::InvalidFormat)?;
        let endianness = detect_endianness(bytes, version);
        let header = match version {
            NiftiVersion::Nifti1 => parse_header_1(bytes, endianness),
            NiftiVersion::Nifti2 => parse_header_2(bytes, endianness),
        }
        .map_err(|_| NiftiError::InvalidFormat)?;

        debug!(
            ?version,
            ?endianness,
            dims = ?header.dims,
            datatype = header.datatype_code,
            vox_offset = header.vox_offset,
            "NIfTI header parsed"
        );
        Ok(header)
    }

    /// Number of slices along the third axis: `dims[3]`, or 1 when the
    /// volume has fewer than three dimensions or the field is unset.
    pub fn depth(&self) -> i64 {
        if self.dims[0] >= 3 && self.dims[3] > 0 {
            self.dims[3]
        } else {
            1
        }
    }

    /// Whether the voxels follow the header in the same file
    /// (`n+1`/`n+2`), as opposed to a separate image file (`ni1`/`ni2`).
    pub fn is_single_file(&self) -> bool {
        self.magic[1] == b'+'
    }
}

/// The header is little endian if `sizeof_hdr` reads back as the
/// expected size in little endian, big endian otherwise.
fn detect_endianness(bytes: &[u8], version: NiftiVersion) -> Endianness {
    match ByteOrdered::le(bytes).read_i32() {
        Ok(n) if n == version.header_size() as i32 => Endianness::Little,
        _ => Endianness::Big,
    }
}

/// Discard `n` bytes of the input.
fn skip<R: Read>(input: R, n: u64) -> io::Result<()> {
    let skipped = io::copy(&mut input.take(n), &mut io::sink())?;
    if skipped < n {
        return Err(io::ErrorKind::UnexpectedEof.into());
    }
    Ok(())
}

/// Read the `descrip` field, cut at the first NUL.
fn read_description<R: Read>(mut input: R) -> io::Result<String> {
    let mut descrip = [0u8; 80];
    input.read_exact(&mut descrip)?;
    let end = descrip.iter().position(|b| *b == 0).unwrap_or(descrip.len());
    Ok(String::from_utf8_lossy(&descrip[..end]).trim().to_string())
}

fn clamp_vox_offset(vox_offset: f64, version: NiftiVersion) -> usize {
    let min = version.min_vox_offset();
    if vox_offset.is_finite() && vox_offset > min as f64 {
        vox_offset as usize
    } else {
        min
    }
}

fn parse_header_1(bytes: &[u8], endianness: Endianness) -> io::Result<VolumeHeader> {
    let mut input = ByteOrdered::runtime(bytes, endianness);
    let mut h = VolumeHeader {
        version: NiftiVersion::Nifti1,
        endianness,
        ..VolumeHeader::default()
    };

    h.sizeof_hdr = input.read_i32()?;
    // data_type, db_name, extents, session_error, regular, dim_info
    skip(&mut input, 36)?;
    for v in &mut h.dims {
        *v = i64::from(input.read_i16()?);
    }
    // intent_p1..3, intent_code
    skip(&mut input, 14)?;
    h.datatype_code = input.read_i16()?;
    h.bitpix = input.read_i16()?;
    let _slice_start = input.read_i16()?;
    for v in &mut h.pix_dims {
        *v = f64::from(input.read_f32()?);
    }
    h.vox_offset = clamp_vox_offset(f64::from(input.read_f32()?), NiftiVersion::Nifti1);
    h.scl_slope = f64::from(input.read_f32()?);
    h.scl_intercept = f64::from(input.read_f32()?);
    // slice_end, slice_code
    skip(&mut input, 3)?;
    h.xyzt_units = i32::from(input.read_u8()?);
    h.cal_max = f64::from(input.read_f32()?);
    h.cal_min = f64::from(input.read_f32()?);
    // slice_duration, toffset, glmax, glmin
    skip(&mut input, 16)?;
    h.description = read_description(&mut input)?;
    // aux_file, qform/sform codes, quaternion, srow_*, intent_name
    skip(&mut input, 116)?;
    input.read_exact(&mut h.magic)?;

    Ok(h)
}

fn parse_header_2(bytes: &[u8], endianness: Endianness) -> io::Result<VolumeHeader> {
    let mut input = ByteOrdered::runtime(bytes, endianness);
    let mut h = VolumeHeader {
        version: NiftiVersion::Nifti2,
        endianness,
        ..VolumeHeader::default()
    };

    h.sizeof_hdr = input.read_i32()?;
    let mut magic = [0u8; 8];
    input.read_exact(&mut magic)?;
    h.magic.copy_from_slice(&magic[..4]);
    h.datatype_code = input.read_i16()?;
    h.bitpix = input.read_i16()?;
    for v in &mut h.dims {
        *v = input.read_i64()?;
    }
    // intent_p1..3
    skip(&mut input, 24)?;
    for v in &mut h.pix_dims {
        *v = input.read_f64()?;
    }
    h.vox_offset = clamp_vox_offset(input.read_i64()? as f64, NiftiVersion::Nifti2);
    h.scl_slope = input.read_f64()?;
    h.scl_intercept = input.read_f64()?;
    h.cal_max = input.read_f64()?;
    h.cal_min = input.read_f64()?;
    // slice_duration, toffset, slice_start, slice_end
    skip(&mut input, 32)?;
    h.description = read_description(&mut input)?;
    // aux_file, qform/sform codes, quaternion, srow_*, slice_code
    skip(&mut input, 180)?;
    h.xyzt_units = input.read_i32()?;

    Ok(h)
}
