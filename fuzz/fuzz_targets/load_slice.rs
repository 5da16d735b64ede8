#![no_main]
use libfuzzer_sys::fuzz_target;
use nifti_slice::{LoaderOptions, NiftiObject};

fuzz_target!(|data: &[u8]| {
    let options = LoaderOptions::new().detect_gzip_magic(true);
    if let Ok(obj) = NiftiObject::from_bytes("fuzz.nii", data.to_vec(), &options) {
        for index in &[None, Some(0), Some(-1), Some(i64::MAX)] {
            if let Ok(image) = obj.slice(*index) {
                let _ = obj.image_summary(&image);
            }
        }
    }
});
