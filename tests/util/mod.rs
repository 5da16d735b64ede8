//! Synthetic NIfTI files for the integration tests.
#![allow(dead_code)]

use byteordered::{ByteOrdered, Endianness};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;

/// Everything needed to write a small single-file volume.
#[derive(Debug, Clone)]
pub struct TestVolume {
    pub dims: [i64; 8],
    pub pix_dims: [f64; 8],
    pub datatype: i16,
    pub scl_slope: f64,
    pub scl_inter: f64,
    pub descrip: &'static str,
    pub endianness: Endianness,
    pub single_file: bool,
    pub voxels: Vec<u8>,
}

impl Default for TestVolume {
    fn default() -> Self {
        TestVolume {
            dims: [3, 1, 1, 1, 1, 1, 1, 1],
            pix_dims: [0.; 8],
            datatype: 2,
            scl_slope: 0.,
            scl_inter: 0.,
            descrip: "",
            endianness: Endianness::Little,
            single_file: true,
            voxels: vec![0],
        }
    }
}

fn bitpix(datatype: i16) -> i16 {
    match datatype {
        2 => 8,
        8 | 16 => 32,
        64 => 64,
        _ => 16,
    }
}

fn descrip(text: &str) -> [u8; 80] {
    let mut out = [0u8; 80];
    out[..text.len()].copy_from_slice(text.as_bytes());
    out
}

/// A NIFTI-1 file, voxels at offset 352.
pub fn nifti1_bytes(v: &TestVolume) -> Vec<u8> {
    let mut w = ByteOrdered::runtime(Vec::with_capacity(352 + v.voxels.len()), v.endianness);
    w.write_i32(348).unwrap();
    w.write_all(&[0; 36]).unwrap();
    for d in &v.dims {
        w.write_i16(*d as i16).unwrap();
    }
    w.write_all(&[0; 14]).unwrap();
    w.write_i16(v.datatype).unwrap();
    w.write_i16(bitpix(v.datatype)).unwrap();
    w.write_i16(0).unwrap();
    for p in &v.pix_dims {
        w.write_f32(*p as f32).unwrap();
    }
    w.write_f32(352.).unwrap();
    w.write_f32(v.scl_slope as f32).unwrap();
    w.write_f32(v.scl_inter as f32).unwrap();
    w.write_all(&[0; 3]).unwrap();
    w.write_u8(2).unwrap();
    w.write_f32(0.).unwrap();
    w.write_f32(0.).unwrap();
    w.write_all(&[0; 16]).unwrap();
    w.write_all(&descrip(v.descrip)).unwrap();
    w.write_all(&[0; 116]).unwrap();
    w.write_all(if v.single_file { b"n+1\0" } else { b"ni1\0" }).unwrap();
    w.write_all(&[0; 4]).unwrap();
    w.write_all(&v.voxels).unwrap();
    let bytes = w.into_inner();
    assert_eq!(bytes.len(), 352 + v.voxels.len());
    bytes
}

/// A NIFTI-2 file, voxels at offset 544.
pub fn nifti2_bytes(v: &TestVolume) -> Vec<u8> {
    let mut w = ByteOrdered::runtime(Vec::with_capacity(544 + v.voxels.len()), v.endianness);
    w.write_i32(540).unwrap();
    w.write_all(if v.single_file { b"n+2\0\r\n\x1a\n" } else { b"ni2\0\r\n\x1a\n" }).unwrap();
    w.write_i16(v.datatype).unwrap();
    w.write_i16(bitpix(v.datatype)).unwrap();
    for d in &v.dims {
        w.write_i64(*d).unwrap();
    }
    w.write_all(&[0; 24]).unwrap();
    for p in &v.pix_dims {
        w.write_f64(*p).unwrap();
    }
    w.write_i64(544).unwrap();
    w.write_f64(v.scl_slope).unwrap();
    w.write_f64(v.scl_inter).unwrap();
    w.write_all(&[0; 48]).unwrap();
    w.write_all(&descrip(v.descrip)).unwrap();
    w.write_all(&[0; 176]).unwrap();
    w.write_i32(0).unwrap();
    w.write_i32(2).unwrap();
    w.write_all(&[0; 40]).unwrap();
    w.write_all(&v.voxels).unwrap();
    let bytes = w.into_inner();
    assert_eq!(bytes.len(), 544 + v.voxels.len());
    bytes
}

/// Encode values with the storage type of the given `datatype` code.
/// Unknown codes are stored as INT16.
pub fn encode(datatype: i16, values: &[f64], endianness: Endianness) -> Vec<u8> {
    let mut w = ByteOrdered::runtime(Vec::new(), endianness);
    for v in values {
        match datatype {
            2 => w.write_u8(*v as u8),
            8 => w.write_i32(*v as i32),
            16 => w.write_f32(*v as f32),
            64 => w.write_f64(*v),
            _ => w.write_i16(*v as i16),
        }
        .unwrap();
    }
    w.into_inner()
}

/// Compress the bytes as a single gzip member.
pub fn gzip(bytes: &[u8]) -> Vec<u8> {
    let mut e = GzEncoder::new(Vec::new(), Compression::default());
    e.write_all(bytes).unwrap();
    e.finish().unwrap()
}

/// The 64x64x10 FLOAT32 phantom, voxel value `z * 10000 + y * 64 + x`.
pub fn brain_phantom() -> TestVolume {
    let values: Vec<f64> = (0..10)
        .flat_map(|z| (0..64).flat_map(move |y| (0..64).map(move |x| (z * 10000 + y * 64 + x) as f64)))
        .collect();
    TestVolume {
        dims: [3, 64, 64, 10, 1, 1, 1, 1],
        pix_dims: [1., 0.9375, 0.9375, 3., 0., 0., 0., 0.],
        datatype: 16,
        descrip: "brain phantom",
        voxels: encode(16, &values, Endianness::Little),
        ..TestVolume::default()
    }
}
