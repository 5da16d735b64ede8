//! Load NIfTI-1 and NIfTI-2 volumes into display-ready 2-D image slices.
//!
//! A file goes through a short pipeline: its name tells whether it is
//! gzip-compressed, the (inflated) bytes are checked for a NIfTI signature,
//! the header is parsed, and a single slice along the third axis is cut out
//! of the voxel data. The slice is then wrapped in an
//! [`ImageSliceDescriptor`], which carries everything a monochrome image
//! viewer needs: dimensions, spacing, an intensity window and the pixels.
//!
//! # Example
//!
//! ```no_run
//! use nifti_slice::{load_nifti_file, LoaderOptions, PathSource};
//! # use nifti_slice::Result;
//!
//! # fn run() -> Result<()> {
//! let image = load_nifti_file(&PathSource::new("brain.nii.gz"), &LoaderOptions::new())?;
//! println!("{} ({}x{})", image.image_id, image.width, image.height);
//! # Ok(())
//! # }
//! ```
//!
//! [`ImageSliceDescriptor`]: ./image/struct.ImageSliceDescriptor.html
#![deny(missing_debug_implementations)]
#![warn(missing_docs, unused_extern_crates, trivial_casts, unused_results)]

#[macro_use]
extern crate quick_error;

pub mod error;
pub mod header;
pub mod image;
pub mod object;
pub mod summary;
pub mod typedef;
mod util;
pub mod volume;

pub use byteordered::Endianness;
pub use error::{NiftiError, Result, Stage};
pub use header::{is_nifti, NiftiVersion, VolumeHeader};
pub use image::{ImageSliceDescriptor, PhotometricInterpretation, Presentation};
pub use object::{load_nifti_file, FileSource, LoaderOptions, NamedBuffer, NiftiObject, PathSource};
pub use summary::{extract_image_summary, extract_patient_summary, ImageSummary, PatientSummary};
pub use typedef::NiftiType;
pub use util::{decompress, format_file_size, is_compressed_nifti, is_nifti_file};
pub use volume::{extract_slice, SliceGeometry, SlicePixels, SliceView, ValueRange, VolumeData};
