#![no_main]
use libfuzzer_sys::fuzz_target;
use nifti_slice::VolumeHeader;

fuzz_target!(|data: &[u8]| {
    if let Ok(header) = VolumeHeader::from_bytes(data) {
        let _ = header.depth();
        let _ = header.is_single_file();
        let _ = header.clone().description.len();
    }
});
