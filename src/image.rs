//! Adaptation of an extracted slice into an image descriptor that any
//! monochrome 2-D display host can render.

use crate::error::{NiftiError, Result};
use crate::header::VolumeHeader;
use crate::util::{or_default_if_unset, raw_to_value};
use crate::volume::{ExtractedSlice, SliceView};
use std::fmt;

/// How stored sample values map to displayed brightness.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum PhotometricInterpretation {
    /// Single-channel grayscale, the lowest value is displayed black.
    Monochrome2,
}

impl PhotometricInterpretation {
    /// The DICOM term for this interpretation.
    pub fn as_str(self) -> &'static str {
        match self {
            PhotometricInterpretation::Monochrome2 => "MONOCHROME2",
        }
    }
}

impl fmt::Display for PhotometricInterpretation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed pixel format attributes announced to the display host.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Presentation {
    /// Channels per pixel
    pub samples_per_pixel: u16,
    /// Whether the host should invert the grayscale
    pub invert: bool,
    /// Whether the image is in color
    pub color: bool,
    /// Storage bits per sample
    pub bits_allocated: u16,
    /// Significant bits per sample
    pub bits_stored: u16,
    /// Most significant bit
    pub high_bit: u16,
    /// 0 for unsigned samples, 1 for signed samples
    pub pixel_representation: u16,
    /// Brightness convention
    pub photometric_interpretation: PhotometricInterpretation,
}

impl Presentation {
    /// Signed 16-bit grayscale, regardless of the source data type.
    pub const MONOCHROME16: Presentation = Presentation {
        samples_per_pixel: 1,
        invert: false,
        color: false,
        bits_allocated: 16,
        bits_stored: 16,
        high_bit: 15,
        pixel_representation: 1,
        photometric_interpretation: PhotometricInterpretation::Monochrome2,
    };
}

/// Build the stable identifier of a slice of a file.
pub fn image_id(filename: &str, slice_index: usize) -> String {
    format!("nifti:{}:{}", filename, slice_index)
}

/// A self-contained, display-ready slice of a NIfTI volume.
///
/// # Example
///
/// ```
/// use nifti_slice::{extract_slice, ImageSliceDescriptor, VolumeData, VolumeHeader};
/// use nifti_slice::Endianness;
/// # use nifti_slice::Result;
///
/// # fn run() -> Result<()> {
/// let header = VolumeHeader {
///     dims: [3, 2, 2, 3, 1, 1, 1, 1],
///     datatype_code: 2,
///     ..Default::default()
/// };
/// let data = VolumeData::new((0..12).collect(), Endianness::Little);
/// let slice = extract_slice(&header, &data, None)?;
/// let image = ImageSliceDescriptor::new("tiny.nii", &header, slice)?;
/// assert_eq!(image.image_id, "nifti:tiny.nii:1");
/// assert_eq!(image.min_pixel_value, 4.);
/// assert_eq!(image.max_pixel_value, 7.);
/// # Ok(())
/// # }
/// # run().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSliceDescriptor<'a> {
    /// `nifti:<filename>:<slice index>`
    pub image_id: String,
    /// Pixels per row
    pub width: usize,
    /// Pixels per column
    pub height: usize,
    /// 0-based index of this slice
    pub current_slice: usize,
    /// Number of slices in the volume
    pub total_slices: usize,
    /// Lowest raw value of the slice
    pub min_pixel_value: f64,
    /// Highest raw value of the slice
    pub max_pixel_value: f64,
    /// Center of the default intensity window
    pub window_center: f64,
    /// Width of the default intensity window
    pub window_width: f64,
    /// Rescale slope, 1 when the header sets none
    pub slope: f64,
    /// Rescale intercept, 0 when the header sets none
    pub intercept: f64,
    /// Spacing between columns in mm (`pix_dims[1]`)
    pub column_pixel_spacing: f64,
    /// Spacing between rows in mm (`pix_dims[2]`)
    pub row_pixel_spacing: f64,
    /// Spacing between slices in mm (`pix_dims[3]`)
    pub slice_thickness: f64,
    /// Fixed pixel format attributes
    pub presentation: Presentation,
    pixels: SliceView<'a>,
}

impl<'a> ImageSliceDescriptor<'a> {
    /// Combine an extracted slice with the header it came from.
    ///
    /// # Errors
    ///
    /// - `NiftiError::InvalidImage` if the dimensions are empty or the
    /// number of pixels disagrees with them.
    pub fn new(filename: &str, header: &VolumeHeader, slice: ExtractedSlice<'a>) -> Result<Self> {
        let ExtractedSlice {
            geometry,
            view,
            values,
        } = slice;

        let descriptor = ImageSliceDescriptor {
            image_id: image_id(filename, view.index()),
            width: geometry.width,
            height: geometry.height,
            current_slice: view.index(),
            total_slices: geometry.depth,
            min_pixel_value: values.min,
            max_pixel_value: values.max,
            window_center: values.window_center(),
            window_width: values.window_width(),
            slope: or_default_if_unset(header.scl_slope, 1.),
            intercept: if header.scl_intercept.is_finite() {
                header.scl_intercept
            } else {
                0.
            },
            column_pixel_spacing: or_default_if_unset(header.pix_dims[1], 1.),
            row_pixel_spacing: or_default_if_unset(header.pix_dims[2], 1.),
            slice_thickness: or_default_if_unset(header.pix_dims[3], 1.),
            presentation: Presentation::MONOCHROME16,
            pixels: view,
        };
        descriptor.validate()?;
        Ok(descriptor)
    }

    fn validate(&self) -> Result<()> {
        let expected = self.width.checked_mul(self.height);
        if self.width == 0 || self.height == 0 || expected != Some(self.pixels.len()) {
            return Err(NiftiError::InvalidImage {
                width: self.width,
                height: self.height,
                pixels: self.pixels.len(),
            });
        }
        Ok(())
    }

    /// The pixel data of the slice. Repeated calls return the same view.
    pub fn pixel_data(&self) -> &SliceView<'a> {
        &self.pixels
    }

    /// Number of pixel rows, same as `height`.
    pub fn rows(&self) -> usize {
        self.height
    }

    /// Number of pixel columns, same as `width`.
    pub fn columns(&self) -> usize {
        self.width
    }

    /// Column and row spacing, in mm.
    pub fn pixel_spacing(&self) -> [f64; 2] {
        [self.column_pixel_spacing, self.row_pixel_spacing]
    }

    /// Size of the pixel data in its source representation.
    pub fn size_in_bytes(&self) -> usize {
        self.pixels.len() * self.pixels.bytes_per_element()
    }

    /// Fetch a pixel's value with the rescale slope and intercept applied.
    pub fn rescaled_value(&self, index: usize) -> Option<f64> {
        self.pixels
            .get_f64(index)
            .map(|v| raw_to_value(v, self.slope, self.intercept))
    }

    /// Detach the descriptor from the voxel buffer it was read from.
    pub fn into_owned(self) -> ImageSliceDescriptor<'static> {
        ImageSliceDescriptor {
            image_id: self.image_id,
            width: self.width,
            height: self.height,
            current_slice: self.current_slice,
            total_slices: self.total_slices,
            min_pixel_value: self.min_pixel_value,
            max_pixel_value: self.max_pixel_value,
            window_center: self.window_center,
            window_width: self.window_width,
            slope: self.slope,
            intercept: self.intercept,
            column_pixel_spacing: self.column_pixel_spacing,
            row_pixel_spacing: self.row_pixel_spacing,
            slice_thickness: self.slice_thickness,
            presentation: self.presentation,
            pixels: self.pixels.into_owned(),
        }
    }
}
