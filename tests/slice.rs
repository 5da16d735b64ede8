use nifti_slice::{
    extract_slice, Endianness, ImageSliceDescriptor, NiftiError, NiftiType, SlicePixels,
    VolumeData, VolumeHeader,
};
use pretty_assertions::assert_eq;
use std::borrow::Cow;

mod util;

use util::encode;

const WIDTH: usize = 3;
const HEIGHT: usize = 2;
const DEPTH: usize = 4;

fn header(datatype_code: i16) -> VolumeHeader {
    VolumeHeader {
        dims: [3, WIDTH as i64, HEIGHT as i64, DEPTH as i64, 1, 1, 1, 1],
        datatype_code,
        ..VolumeHeader::default()
    }
}

/// voxel value = its linear index
fn ramp(datatype_code: i16, endianness: Endianness) -> VolumeData {
    let values: Vec<f64> = (0..WIDTH * HEIGHT * DEPTH).map(|i| i as f64).collect();
    VolumeData::new(encode(datatype_code, &values, endianness), endianness)
}

#[test]
fn every_supported_type() {
    let cases = [
        (2, NiftiType::Uint8, 1),
        (4, NiftiType::Int16, 2),
        (8, NiftiType::Int32, 4),
        (16, NiftiType::Float32, 4),
        (64, NiftiType::Float64, 8),
    ];
    for &(code, data_type, size) in &cases {
        for &e in &[Endianness::Little, Endianness::Big] {
            let h = header(code);
            let data = ramp(code, e);
            let slice = extract_slice(&h, &data, Some(2)).unwrap();
            let view = &slice.view;

            let pixels = WIDTH * HEIGHT;
            assert_eq!(view.len(), pixels);
            assert_eq!(view.index(), 2);
            assert_eq!(view.byte_range(), 2 * pixels * size..3 * pixels * size);
            assert_eq!(view.pixels().data_type(), data_type);
            for i in 0..pixels {
                assert_eq!(view.get_f64(i), Some((2 * pixels + i) as f64), "{:?} {:?}", data_type, e);
            }
            assert_eq!(slice.values.min, 12.);
            assert_eq!(slice.values.max, 17.);
        }
    }
}

#[test]
fn unknown_type_reads_int16() {
    let h = header(999);
    let data = ramp(4, Endianness::Little);
    let slice = extract_slice(&h, &data, None).unwrap();
    assert_eq!(slice.view.pixels().data_type(), NiftiType::Int16);
    assert_eq!(slice.view.index(), 2);
    assert_eq!(slice.view.len(), WIDTH * HEIGHT);
    assert_eq!(slice.view.get_f64(0), Some(12.));
}

#[test]
fn known_values_window() {
    let h = VolumeHeader {
        dims: [3, 5, 1, 1, 1, 1, 1, 1],
        datatype_code: 4,
        ..VolumeHeader::default()
    };
    let data = VolumeData::new(encode(4, &[-5., 0., 3., 3., 100.], Endianness::Little), Endianness::Little);
    let slice = extract_slice(&h, &data, None).unwrap();
    assert_eq!(slice.view.pixels(), &SlicePixels::Int16(Cow::Owned(vec![-5, 0, 3, 3, 100])));

    let image = ImageSliceDescriptor::new("values.nii", &h, slice).unwrap();
    assert_eq!(image.min_pixel_value, -5.);
    assert_eq!(image.max_pixel_value, 100.);
    assert_eq!(image.window_center, 47.5);
    assert_eq!(image.window_width, 105.);
}

#[test]
fn clamped_requests() {
    let h = VolumeHeader {
        dims: [3, 2, 2, 10, 1, 1, 1, 1],
        datatype_code: 2,
        ..VolumeHeader::default()
    };
    let data = VolumeData::new((0..40).collect(), Endianness::Little);
    for &(requested, effective) in &[(Some(-5), 0), (Some(99), 9), (Some(4), 4), (None, 5)] {
        let slice = extract_slice(&h, &data, requested).unwrap();
        assert_eq!(slice.view.index(), effective);
        let image = ImageSliceDescriptor::new("clamp.nii", &h, slice).unwrap();
        assert_eq!(image.image_id, format!("nifti:clamp.nii:{}", effective));
        assert_eq!(image.total_slices, 10);
    }
}

#[test]
fn four_dimensional_volume_uses_first_frame() {
    let h = VolumeHeader {
        dims: [4, 2, 2, 2, 3, 1, 1, 1],
        datatype_code: 2,
        ..VolumeHeader::default()
    };
    let data = VolumeData::new((0..24).collect(), Endianness::Little);
    let slice = extract_slice(&h, &data, Some(1)).unwrap();
    assert_eq!(slice.geometry.depth, 2);
    assert_eq!(slice.view.byte_range(), 4..8);
}

#[test]
fn truncated_volume() {
    let h = header(16);
    let data = VolumeData::new(vec![0; 50], Endianness::Little);
    match extract_slice(&h, &data, Some(3)) {
        Err(NiftiError::TruncatedVolume { needed, available }) => {
            assert_eq!(needed, 4 * WIDTH * HEIGHT * 4);
            assert_eq!(available, 50);
        }
        r => panic!("unexpected result {:?}", r),
    }
}

#[test]
fn invalid_dimensions() {
    let h = VolumeHeader {
        dims: [3, 64, 0, 10, 1, 1, 1, 1],
        datatype_code: 2,
        ..VolumeHeader::default()
    };
    let data = VolumeData::new(vec![0; 64], Endianness::Little);
    match extract_slice(&h, &data, None) {
        Err(e @ NiftiError::InvalidDimensions(64, 0)) => {
            assert_eq!(e.to_string(), "extract: invalid image dimensions 64x0");
        }
        r => panic!("unexpected result {:?}", r),
    }
}
