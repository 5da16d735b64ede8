//! An application for printing the summaries of one NIfTI slice.
//!
//! Usage: `slicedump <file.nii[.gz]> [slice index]`.
//! Set `RUST_LOG=debug` to see what the loader does.

use std::env;
use std::process;

use nifti_slice::{LoaderOptions, NiftiObject, PathSource};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = env::args().skip(1);
    let filename = args.next().expect("Path to NIfTI file is required");
    let mut options = LoaderOptions::new().detect_gzip_magic(true);
    if let Some(index) = args.next() {
        options = options.slice_index(index.parse().expect("Slice index must be an integer"));
    }

    let obj = match NiftiObject::from_source(&PathSource::new(&filename), &options) {
        Ok(obj) => obj,
        Err(e) => {
            eprintln!("{}: {}", filename, e);
            process::exit(1);
        }
    };
    let image = match obj.slice(options.slice_index) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("{}: {}", filename, e);
            process::exit(1);
        }
    };

    println!("{:#?}", obj.patient_summary());
    println!("{:#?}", obj.image_summary(&image));
    println!(
        "{} ({}x{}, {} bytes of pixel data)",
        image.image_id,
        image.columns(),
        image.rows(),
        image.size_in_bytes()
    );
}
