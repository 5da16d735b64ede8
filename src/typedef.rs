//! This module contains the voxel data types understood by the slice
//! extractor. The set is closed: any other `datatype` code found in a
//! header is read as `Int16`, the most common storage type of MR volumes.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

/// Data type for representing a NIFTI value type in a volume.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromPrimitive)]
pub enum NiftiType {
    /// unsigned char.
    // NIFTI_TYPE_UINT8           2
    Uint8 = 2,
    /// signed short.
    // NIFTI_TYPE_INT16           4
    Int16 = 4,
    /// signed int.
    // NIFTI_TYPE_INT32           8
    Int32 = 8,
    /// 32 bit float.
    // NIFTI_TYPE_FLOAT32        16
    Float32 = 16,
    /// 64 bit float = double.
    // NIFTI_TYPE_FLOAT64        64
    Float64 = 64,
}

impl NiftiType {
    /// The type used for codes outside of this enumeration.
    pub const FALLBACK: NiftiType = NiftiType::Int16;

    /// Map a raw `datatype` code to a supported type.
    pub fn from_code(code: i16) -> Option<NiftiType> {
        FromPrimitive::from_i16(code)
    }

    /// Retrieve the size of an element of this data type, in bytes.
    pub fn size_of(self) -> usize {
        match self {
            NiftiType::Uint8 => 1,
            NiftiType::Int16 => 2,
            NiftiType::Int32 | NiftiType::Float32 => 4,
            NiftiType::Float64 => 8,
        }
    }

    /// Human readable name of the data type.
    pub fn name(self) -> &'static str {
        match self {
            NiftiType::Uint8 => "UINT8",
            NiftiType::Int16 => "INT16",
            NiftiType::Int32 => "INT32",
            NiftiType::Float32 => "FLOAT32",
            NiftiType::Float64 => "FLOAT64",
        }
    }
}

/// Bytes per voxel for the given `datatype` code, using the `Int16`
/// size for unknown codes.
pub fn bytes_per_element(code: i16) -> usize {
    NiftiType::from_code(code)
        .unwrap_or(NiftiType::FALLBACK)
        .size_of()
}

/// Display name for the given `datatype` code. Unknown codes render
/// as `unknown(<code>)`.
pub fn data_type_name(code: i16) -> String {
    match NiftiType::from_code(code) {
        Some(t) => t.name().to_string(),
        None => format!("unknown({})", code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_sizes() {
        assert_eq!(bytes_per_element(2), 1);
        assert_eq!(bytes_per_element(4), 2);
        assert_eq!(bytes_per_element(8), 4);
        assert_eq!(bytes_per_element(16), 4);
        assert_eq!(bytes_per_element(64), 8);
        assert_eq!(bytes_per_element(999), 2);
        assert_eq!(bytes_per_element(0), 2);
    }

    #[test]
    fn names() {
        assert_eq!(data_type_name(2), "UINT8");
        assert_eq!(data_type_name(16), "FLOAT32");
        assert_eq!(data_type_name(64), "FLOAT64");
        assert_eq!(data_type_name(999), "unknown(999)");
        // valid in the standard, outside of the supported set
        assert_eq!(data_type_name(512), "unknown(512)");
    }

    #[test]
    fn codes() {
        assert_eq!(NiftiType::from_code(8), Some(NiftiType::Int32));
        assert_eq!(NiftiType::from_code(-4), None);
        assert_eq!(NiftiType::Float64 as i16, 64);
    }
}
