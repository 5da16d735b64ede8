//! This module defines the data element API, which enables the slice
//! extractor to read voxel values of any supported type out of a raw
//! byte buffer.
use crate::typedef::NiftiType;
use byteordered::{ByteOrdered, Endianness};
use bytemuck::Pod;
use num_traits::AsPrimitive;
use std::borrow::Cow;
use std::io::{Read, Result as IoResult};
use std::mem::size_of;

/// This system's byte order.
pub fn native_endianness() -> Endianness {
    if cfg!(target_endian = "little") {
        Endianness::Little
    } else {
        Endianness::Big
    }
}

/// Trait type for characterizing a NIfTI data element, implemented for
/// primitive numeric types which are used by the crate to represent voxel
/// values.
pub trait DataElement: 'static + Copy + Pod + AsPrimitive<f64> {
    /// The `datatype` mapped to the type T
    const DATA_TYPE: NiftiType;

    /// Read a single element from the given byte source.
    fn from_raw<R: Read>(src: R, endianness: Endianness) -> IoResult<Self>;

    /// Interpret a byte buffer as a sequence of elements.
    ///
    /// The buffer is borrowed as is when it is already in the system's byte
    /// order and suitably aligned, otherwise the elements are decoded into
    /// a new vector. Trailing bytes which do not make up a full element are
    /// ignored.
    fn from_raw_slice(bytes: &[u8], endianness: Endianness) -> IoResult<Cow<'_, [Self]>> {
        let n = bytes.len() / size_of::<Self>();
        let bytes = &bytes[..n * size_of::<Self>()];
        if endianness == native_endianness() {
            if let Ok(values) = bytemuck::try_cast_slice(bytes) {
                return Ok(Cow::Borrowed(values));
            }
        }
        let mut cursor = bytes;
        (0..n)
            .map(|_| Self::from_raw(&mut cursor, endianness))
            .collect::<IoResult<Vec<_>>>()
            .map(Cow::Owned)
    }
}

impl DataElement for u8 {
    const DATA_TYPE: NiftiType = NiftiType::Uint8;
    fn from_raw<R: Read>(src: R, e: Endianness) -> IoResult<Self> {
        ByteOrdered::runtime(src, e).read_u8()
    }
    fn from_raw_slice(bytes: &[u8], _: Endianness) -> IoResult<Cow<'_, [Self]>> {
        Ok(Cow::Borrowed(bytes))
    }
}
impl DataElement for i16 {
    const DATA_TYPE: NiftiType = NiftiType::Int16;
    fn from_raw<R: Read>(src: R, e: Endianness) -> IoResult<Self> {
        ByteOrdered::runtime(src, e).read_i16()
    }
}
impl DataElement for i32 {
    const DATA_TYPE: NiftiType = NiftiType::Int32;
    fn from_raw<R: Read>(src: R, e: Endianness) -> IoResult<Self> {
        ByteOrdered::runtime(src, e).read_i32()
    }
}
impl DataElement for f32 {
    const DATA_TYPE: NiftiType = NiftiType::Float32;
    fn from_raw<R: Read>(src: R, e: Endianness) -> IoResult<Self> {
        ByteOrdered::runtime(src, e).read_f32()
    }
}
impl DataElement for f64 {
    const DATA_TYPE: NiftiType = NiftiType::Float64;
    fn from_raw<R: Read>(src: R, e: Endianness) -> IoResult<Self> {
        ByteOrdered::runtime(src, e).read_f64()
    }
}
