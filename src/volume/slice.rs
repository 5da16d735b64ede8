//! Extraction of a single 2-D slice, along the third axis, out of the
//! voxel buffer of a volume.

use super::element::DataElement;
use super::VolumeData;
use crate::error::{NiftiError, Result};
use crate::header::VolumeHeader;
use crate::typedef::NiftiType;
use byteordered::Endianness;
use num_traits::AsPrimitive;
use std::borrow::Cow;
use std::convert::TryFrom;
use std::io::Result as IoResult;
use std::ops::Range;
use tracing::{debug, warn};

/// In-plane size and number of slices of a volume.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SliceGeometry {
    /// `dims[1]`
    pub width: usize,
    /// `dims[2]`
    pub height: usize,
    /// `dims[3]`, or 1 when the volume has fewer than three dimensions
    pub depth: usize,
}

impl SliceGeometry {
    /// Read the geometry from the header.
    ///
    /// # Errors
    ///
    /// - `NiftiError::InvalidDimensions` if width or height is not positive.
    pub fn from_header(header: &VolumeHeader) -> Result<Self> {
        let (w, h) = (header.dims[1], header.dims[2]);
        let invalid = || NiftiError::InvalidDimensions(w, h);
        if w <= 0 || h <= 0 {
            return Err(invalid());
        }
        let width = usize::try_from(w).map_err(|_| invalid())?;
        let height = usize::try_from(h).map_err(|_| invalid())?;
        let depth = usize::try_from(header.depth()).unwrap_or(usize::MAX);
        Ok(SliceGeometry {
            width,
            height,
            depth,
        })
    }

    /// Number of pixels in one slice, `None` on overflow.
    pub fn pixels_per_slice(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }

    /// The slice shown when none is requested: the middle one.
    pub fn default_index(&self) -> usize {
        self.depth / 2
    }

    /// Resolve a requested slice index. Out of range requests are
    /// clamped to `[0, depth - 1]` rather than rejected.
    pub fn clamp_index(&self, requested: Option<i64>) -> usize {
        match requested {
            None => self.default_index(),
            Some(i) if i <= 0 => 0,
            Some(i) => usize::try_from(i)
                .unwrap_or(usize::MAX)
                .min(self.depth.saturating_sub(1)),
        }
    }
}

/// Lowest and highest raw value found in a slice.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ValueRange {
    /// minimum raw value
    pub min: f64,
    /// maximum raw value
    pub max: f64,
}

impl ValueRange {
    /// Center of the intensity window covering the whole range.
    pub fn window_center(&self) -> f64 {
        (self.max + self.min) / 2.
    }

    /// Width of the intensity window covering the whole range.
    pub fn window_width(&self) -> f64 {
        self.max - self.min
    }

    fn scan<T: DataElement>(values: &[T]) -> ValueRange {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            let v: f64 = (*v).as_();
            if v < min {
                min = v;
            }
            if v > max {
                max = v;
            }
        }
        if min > max {
            // nothing comparable, e.g. all NaN
            ValueRange { min: 0., max: 0. }
        } else {
            ValueRange { min, max }
        }
    }
}

/// Typed pixel values of one slice.
#[derive(Debug, Clone, PartialEq)]
pub enum SlicePixels<'a> {
    /// unsigned 8-bit pixels
    Uint8(Cow<'a, [u8]>),
    /// signed 16-bit pixels
    Int16(Cow<'a, [i16]>),
    /// signed 32-bit pixels
    Int32(Cow<'a, [i32]>),
    /// 32-bit float pixels
    Float32(Cow<'a, [f32]>),
    /// 64-bit float pixels
    Float64(Cow<'a, [f64]>),
}

macro_rules! with_values {
    ($pixels:expr, $v:ident => $e:expr) => {
        match $pixels {
            SlicePixels::Uint8($v) => $e,
            SlicePixels::Int16($v) => $e,
            SlicePixels::Int32($v) => $e,
            SlicePixels::Float32($v) => $e,
            SlicePixels::Float64($v) => $e,
        }
    };
}

impl<'a> SlicePixels<'a> {
    /// Interpret `raw` as pixels of the given type.
    pub fn from_raw(data_type: NiftiType, raw: &'a [u8], e: Endianness) -> IoResult<Self> {
        Ok(match data_type {
            NiftiType::Uint8 => SlicePixels::Uint8(u8::from_raw_slice(raw, e)?),
            NiftiType::Int16 => SlicePixels::Int16(i16::from_raw_slice(raw, e)?),
            NiftiType::Int32 => SlicePixels::Int32(i32::from_raw_slice(raw, e)?),
            NiftiType::Float32 => SlicePixels::Float32(f32::from_raw_slice(raw, e)?),
            NiftiType::Float64 => SlicePixels::Float64(f64::from_raw_slice(raw, e)?),
        })
    }

    /// The element type of the pixels.
    pub fn data_type(&self) -> NiftiType {
        match self {
            SlicePixels::Uint8(_) => NiftiType::Uint8,
            SlicePixels::Int16(_) => NiftiType::Int16,
            SlicePixels::Int32(_) => NiftiType::Int32,
            SlicePixels::Float32(_) => NiftiType::Float32,
            SlicePixels::Float64(_) => NiftiType::Float64,
        }
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        with_values!(self, v => v.len())
    }

    /// Whether there are no pixels.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetch a pixel's raw value as a double precision floating point value.
    pub fn get_f64(&self, index: usize) -> Option<f64> {
        with_values!(self, v => v.get(index).map(|x| AsPrimitive::<f64>::as_(*x)))
    }

    /// Scan all pixels for the lowest and highest value.
    pub fn value_range(&self) -> ValueRange {
        with_values!(self, v => ValueRange::scan(&v[..]))
    }

    /// Detach the pixels from the buffer they were read from.
    pub fn into_owned(self) -> SlicePixels<'static> {
        match self {
            SlicePixels::Uint8(v) => SlicePixels::Uint8(Cow::Owned(v.into_owned())),
            SlicePixels::Int16(v) => SlicePixels::Int16(Cow::Owned(v.into_owned())),
            SlicePixels::Int32(v) => SlicePixels::Int32(Cow::Owned(v.into_owned())),
            SlicePixels::Float32(v) => SlicePixels::Float32(Cow::Owned(v.into_owned())),
            SlicePixels::Float64(v) => SlicePixels::Float64(Cow::Owned(v.into_owned())),
        }
    }
}

/// A window into the voxel buffer covering exactly one slice.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceView<'a> {
    index: usize,
    byte_range: Range<usize>,
    pixels: SlicePixels<'a>,
}

impl<'a> SliceView<'a> {
    /// 0-based depth index of the slice.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The bytes of the voxel buffer this slice was read from.
    pub fn byte_range(&self) -> Range<usize> {
        self.byte_range.clone()
    }

    /// The typed pixel values.
    pub fn pixels(&self) -> &SlicePixels<'a> {
        &self.pixels
    }

    /// Number of pixels, always `width * height`.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Whether the slice has no pixels.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Size of one pixel in the source buffer.
    pub fn bytes_per_element(&self) -> usize {
        self.pixels.data_type().size_of()
    }

    /// Fetch a pixel's raw value. See `SlicePixels::get_f64`.
    pub fn get_f64(&self, index: usize) -> Option<f64> {
        self.pixels.get_f64(index)
    }

    /// Detach the view from the voxel buffer.
    pub fn into_owned(self) -> SliceView<'static> {
        SliceView {
            index: self.index,
            byte_range: self.byte_range,
            pixels: self.pixels.into_owned(),
        }
    }
}

/// The outcome of slice extraction: the view plus what was learned
/// about the volume on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedSlice<'a> {
    /// geometry of the whole volume
    pub geometry: SliceGeometry,
    /// the pixels of the selected slice
    pub view: SliceView<'a>,
    /// value range of the selected slice
    pub values: ValueRange,
}

impl<'a> ExtractedSlice<'a> {
    /// Detach the slice from the voxel buffer.
    pub fn into_owned(self) -> ExtractedSlice<'static> {
        ExtractedSlice {
            geometry: self.geometry,
            view: self.view.into_owned(),
            values: self.values,
        }
    }
}

/// Resolve the voxel type of the header. Unknown codes are read as
/// `Int16`, with a warning.
fn slice_data_type(header: &VolumeHeader) -> NiftiType {
    match NiftiType::from_code(header.datatype_code) {
        Some(t) => t,
        None => {
            warn!(
                datatype = header.datatype_code,
                "unknown data type, reading voxels as {}",
                NiftiType::FALLBACK.name()
            );
            NiftiType::FALLBACK
        }
    }
}

/// Cut one slice out of the volume. When `slice_index` is `None` the
/// middle slice is taken, and any requested index is clamped into the
/// volume.
///
/// # Errors
///
/// - `NiftiError::InvalidDimensions` if width or height is not positive.
/// - `NiftiError::TruncatedVolume` if the voxel buffer ends before the slice does.
pub fn extract_slice<'a>(
    header: &VolumeHeader,
    data: &'a VolumeData,
    slice_index: Option<i64>,
) -> Result<ExtractedSlice<'a>> {
    let geometry = SliceGeometry::from_header(header)?;
    let index = geometry.clamp_index(slice_index);
    let data_type = slice_data_type(header);
    debug!(?geometry, requested = ?slice_index, index, "slice selected");

    let pixels_per_slice = geometry
        .pixels_per_slice()
        .ok_or(NiftiError::InvalidDimensions(header.dims[1], header.dims[2]))?;
    let truncated = NiftiError::TruncatedVolume {
        needed: usize::MAX,
        available: data.len(),
    };
    let slice_bytes = match pixels_per_slice.checked_mul(data_type.size_of()) {
        Some(n) => n,
        None => return Err(truncated),
    };
    let start = match index.checked_mul(slice_bytes) {
        Some(n) => n,
        None => return Err(truncated),
    };
    let end = match start.checked_add(slice_bytes) {
        Some(n) => n,
        None => return Err(truncated),
    };
    let byte_range = start..end;
    let raw = match data.raw_data().get(byte_range.clone()) {
        Some(raw) => raw,
        None => {
            return Err(NiftiError::TruncatedVolume {
                needed: byte_range.end,
                available: data.len(),
            })
        }
    };

    let pixels = SlicePixels::from_raw(data_type, raw, data.endianness())?;
    let values = pixels.value_range();
    debug!(min = values.min, max = values.max, "slice value range");

    Ok(ExtractedSlice {
        geometry,
        view: SliceView {
            index,
            byte_range,
            pixels,
        },
        values,
    })
}
