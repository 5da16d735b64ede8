//! Human-readable summaries of a loaded volume, for display next to the image.

use crate::header::VolumeHeader;
use crate::image::ImageSliceDescriptor;
use crate::typedef::{bytes_per_element, data_type_name};
use crate::util::{format_file_size, or_default_if_unset};

/// Patient name shown when the header has no description.
pub const UNKNOWN_PATIENT: &str = "unknown patient";
/// Value of fields that NIfTI headers do not carry.
pub const NOT_AVAILABLE: &str = "N/A";
/// NIfTI volumes handled here come from MR acquisitions.
pub const NIFTI_MODALITY: &str = "MR";

/// Patient and study fields of a NIfTI file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientSummary {
    /// The header description, or `UNKNOWN_PATIENT`
    pub patient_name: String,
    /// Always `NOT_AVAILABLE`
    pub patient_id: String,
    /// Always `NOT_AVAILABLE`
    pub study_date: String,
    /// Always `NIFTI_MODALITY`
    pub modality: String,
    /// Always `NOT_AVAILABLE`
    pub institution: String,
}

/// Derive the patient summary from a header. The format only has a free
/// text description, which stands in for the patient name.
pub fn extract_patient_summary(header: &VolumeHeader) -> PatientSummary {
    let patient_name = if header.description.is_empty() {
        UNKNOWN_PATIENT.to_string()
    } else {
        header.description.clone()
    };
    PatientSummary {
        patient_name,
        patient_id: NOT_AVAILABLE.to_string(),
        study_date: NOT_AVAILABLE.to_string(),
        modality: NIFTI_MODALITY.to_string(),
        institution: NOT_AVAILABLE.to_string(),
    }
}

/// Image fields of a NIfTI file, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSummary {
    /// `dims[1]`
    pub width: i64,
    /// `dims[2]`
    pub height: i64,
    /// `dims[3]`, or 1
    pub depth: i64,
    /// e.g. `"0.90 mm x 0.90 mm"`
    pub pixel_spacing: String,
    /// e.g. `"3.00 mm"`
    pub slice_thickness: String,
    /// e.g. `"FLOAT32"` or `"unknown(999)"`
    pub data_type: String,
    /// Estimated size of the uncompressed file
    pub file_size: String,
    /// 1-based index of the displayed slice
    pub current_slice: usize,
    /// Number of slices in the volume
    pub total_slices: usize,
    /// Window center, no decimals
    pub window_center: String,
    /// Window width, no decimals
    pub window_width: String,
}

fn spacing(value: f64) -> String {
    format!("{:.2} mm", or_default_if_unset(value, 1.))
}

/// Derive the image summary from a header and one of its slices.
pub fn extract_image_summary(header: &VolumeHeader, image: &ImageSliceDescriptor<'_>) -> ImageSummary {
    let width = header.dims[1];
    let height = header.dims[2];
    let depth = header.depth();

    let voxels = [width, height, depth]
        .iter()
        .fold(1u64, |acc, d| acc.saturating_mul((*d).max(0) as u64));
    let file_size = (header.vox_offset as u64)
        .saturating_add(voxels.saturating_mul(bytes_per_element(header.datatype_code) as u64));

    ImageSummary {
        width,
        height,
        depth,
        pixel_spacing: format!("{} x {}", spacing(header.pix_dims[1]), spacing(header.pix_dims[2])),
        slice_thickness: spacing(header.pix_dims[3]),
        data_type: data_type_name(header.datatype_code),
        file_size: format_file_size(file_size),
        current_slice: image.current_slice + 1,
        total_slices: image.total_slices,
        window_center: format!("{:.0}", image.window_center.round()),
        window_width: format!("{:.0}", image.window_width.round()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volume::{extract_slice, VolumeData};
    use byteordered::Endianness;

    #[test]
    fn patient_placeholders() {
        let s = extract_patient_summary(&VolumeHeader::default());
        assert_eq!(s.patient_name, UNKNOWN_PATIENT);
        assert_eq!(s.patient_id, NOT_AVAILABLE);
        assert_eq!(s.study_date, NOT_AVAILABLE);
        assert_eq!(s.institution, NOT_AVAILABLE);
        assert_eq!(s.modality, "MR");

        let h = VolumeHeader {
            description: "FSL3.2beta".to_string(),
            ..VolumeHeader::default()
        };
        assert_eq!(extract_patient_summary(&h).patient_name, "FSL3.2beta");
    }

    #[test]
    fn unknown_type_and_missing_spacing() {
        let h = VolumeHeader {
            dims: [3, 2, 2, 2, 0, 0, 0, 0],
            datatype_code: 999,
            ..VolumeHeader::default()
        };
        let data = VolumeData::new(vec![0; 16], Endianness::Little);
        let image = ImageSliceDescriptor::new("x.nii", &h, extract_slice(&h, &data, None).unwrap()).unwrap();
        let s = extract_image_summary(&h, &image);
        assert_eq!(s.data_type, "unknown(999)");
        assert_eq!(s.pixel_spacing, "1.00 mm x 1.00 mm");
        assert_eq!(s.slice_thickness, "1.00 mm");
        // 352 + 2 * 2 * 2 * 2
        assert_eq!(s.file_size, "368 B");
        assert_eq!((s.current_slice, s.total_slices), (2, 2));
        assert_eq!((s.window_center.as_str(), s.window_width.as_str()), ("0", "0"));
    }

    #[test]
    fn spacing_is_rounded() {
        assert_eq!(spacing(0.9375), "0.94 mm");
        assert_eq!(spacing(3.), "3.00 mm");
        assert_eq!(spacing(0.), "1.00 mm");
    }

    #[test]
    fn window_halves_round_away_from_zero() {
        let h = VolumeHeader {
            dims: [3, 2, 1, 2, 0, 0, 0, 0],
            datatype_code: 4,
            ..VolumeHeader::default()
        };
        // slice 0 holds [0, 5], slice 1 holds [-5, 0]
        let data = VolumeData::new(vec![0, 0, 5, 0, 0xfb, 0xff, 0, 0], Endianness::Little);

        let image = ImageSliceDescriptor::new("w.nii", &h, extract_slice(&h, &data, Some(0)).unwrap()).unwrap();
        assert_eq!(image.window_center, 2.5);
        let s = extract_image_summary(&h, &image);
        assert_eq!((s.window_center.as_str(), s.window_width.as_str()), ("3", "5"));

        let image = ImageSliceDescriptor::new("w.nii", &h, extract_slice(&h, &data, Some(1)).unwrap()).unwrap();
        assert_eq!(image.window_center, -2.5);
        let s = extract_image_summary(&h, &image);
        assert_eq!(s.window_center, "-3");
    }
}
