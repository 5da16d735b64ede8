//! Module for loading complete NIfTI objects out of a file-like source
//! and turning them into image slices.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{NiftiError, Result};
use crate::header::{is_nifti, VolumeHeader};
use crate::image::ImageSliceDescriptor;
use crate::summary::{extract_image_summary, extract_patient_summary, ImageSummary, PatientSummary};
use crate::util::{decompress, is_compressed_nifti, is_gzip_data};
use crate::volume::{extract_slice, VolumeData};
use tracing::debug;

/// A named source of bytes, read wholesale into memory.
pub trait FileSource {
    /// The file name, used to detect compression and to identify slices.
    fn name(&self) -> &str;

    /// Read the full contents of the source.
    fn read_bytes(&self) -> Result<Vec<u8>>;
}

impl<'a, S: FileSource + ?Sized> FileSource for &'a S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn read_bytes(&self) -> Result<Vec<u8>> {
        (**self).read_bytes()
    }
}

/// A file already held in memory, such as an upload.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedBuffer {
    name: String,
    bytes: Vec<u8>,
}

impl NamedBuffer {
    /// Create a new source from a file name and its contents.
    pub fn new<N: Into<String>>(name: N, bytes: Vec<u8>) -> Self {
        NamedBuffer {
            name: name.into(),
            bytes,
        }
    }

    /// Take the contents out of the source.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl FileSource for NamedBuffer {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}

/// A file in the file system, named after its last path component.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSource {
    path: PathBuf,
    name: String,
}

impl PathSource {
    /// Create a new source for the file at the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        PathSource { path, name }
    }

    /// The path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FileSource for PathSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_bytes(&self) -> Result<Vec<u8>> {
        Ok(fs::read(&self.path)?)
    }
}

/// Options for loading a NIfTI object.
///
/// # Example
///
/// ```
/// use nifti_slice::LoaderOptions;
///
/// let options = LoaderOptions::new().slice_index(12).detect_gzip_magic(true);
/// assert_eq!(options.slice_index, Some(12));
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LoaderOptions {
    /// Depth index of the slice to show, the middle slice if `None`.
    pub slice_index: Option<i64>,
    /// Also inflate buffers starting with the gzip magic number when the
    /// file name does not end in ".nii.gz".
    pub detect_gzip_magic: bool,
}

impl LoaderOptions {
    /// Options with default values.
    pub fn new() -> Self {
        LoaderOptions::default()
    }

    /// Select the slice to show.
    pub fn slice_index(mut self, index: i64) -> Self {
        self.slice_index = Some(index);
        self
    }

    /// Whether to detect gzip data by content as well as by file name.
    pub fn detect_gzip_magic(mut self, detect: bool) -> Self {
        self.detect_gzip_magic = detect;
        self
    }
}

/// Data type for a NIfTI object that is fully contained in memory:
/// the header, the voxel data and the name of the file they came from.
#[derive(Debug, PartialEq, Clone)]
pub struct NiftiObject {
    filename: String,
    header: VolumeHeader,
    volume: VolumeData,
}

impl NiftiObject {
    /// Load a NIfTI object from the given source.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nifti_slice::{LoaderOptions, NiftiObject, PathSource};
    /// # use nifti_slice::Result;
    ///
    /// # fn run() -> Result<()> {
    /// let obj = NiftiObject::from_source(&PathSource::new("brain.nii.gz"), &LoaderOptions::new())?;
    /// let image = obj.slice(Some(40))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_source<S>(source: &S, options: &LoaderOptions) -> Result<NiftiObject>
    where
        S: FileSource + ?Sized,
    {
        let bytes = source.read_bytes()?;
        debug!(file = source.name(), bytes = bytes.len(), "file read");
        Self::from_bytes(source.name(), bytes, options)
    }

    /// Load a NIfTI object from the full contents of a file.
    ///
    /// # Errors
    ///
    /// - `NiftiError::Decompression` if the file is compressed and not valid gzip data.
    /// - `NiftiError::InvalidFormat` if the (decompressed) bytes are not a NIfTI file.
    /// - `NiftiError::NoVolumeData` if the file holds a header only.
    pub fn from_bytes<N>(filename: N, bytes: Vec<u8>, options: &LoaderOptions) -> Result<NiftiObject>
    where
        N: Into<String>,
    {
        let filename = filename.into();
        let compressed = is_compressed_nifti(&filename)
            || (options.detect_gzip_magic && is_gzip_data(&bytes));
        let bytes = decompress(bytes, compressed)?;

        if !is_nifti(&bytes) {
            return Err(NiftiError::InvalidFormat);
        }
        let header = VolumeHeader::from_bytes(&bytes)?;
        let volume = VolumeData::from_buffer(&header, bytes)?;

        Ok(NiftiObject {
            filename,
            header,
            volume,
        })
    }

    /// Build the image descriptor of one slice. When `slice_index` is
    /// `None` the middle slice is used, and any requested index is
    /// clamped into the volume.
    pub fn slice(&self, slice_index: Option<i64>) -> Result<ImageSliceDescriptor<'_>> {
        let slice = extract_slice(&self.header, &self.volume, slice_index)?;
        let image = ImageSliceDescriptor::new(&self.filename, &self.header, slice)?;
        debug!(image_id = %image.image_id, "image slice ready");
        Ok(image)
    }

    /// Name of the file the object was loaded from.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Obtain a reference to the NIfTI header.
    pub fn header(&self) -> &VolumeHeader {
        &self.header
    }

    /// Obtain a reference to the object's voxel data.
    pub fn volume(&self) -> &VolumeData {
        &self.volume
    }

    /// Move the voxel data out of the object, discarding the header.
    pub fn into_volume(self) -> VolumeData {
        self.volume
    }

    /// Patient fields for display.
    pub fn patient_summary(&self) -> PatientSummary {
        extract_patient_summary(&self.header)
    }

    /// Image fields for display, describing the given slice of this object.
    pub fn image_summary(&self, image: &ImageSliceDescriptor<'_>) -> ImageSummary {
        extract_image_summary(&self.header, image)
    }
}

/// Load a file and build the image descriptor of the slice selected in
/// `options`. Nothing is returned unless every stage succeeds.
pub fn load_nifti_file<S>(source: &S, options: &LoaderOptions) -> Result<ImageSliceDescriptor<'static>>
where
    S: FileSource + ?Sized,
{
    let obj = NiftiObject::from_source(source, options)?;
    let image = obj.slice(options.slice_index)?;
    Ok(image.into_owned())
}
