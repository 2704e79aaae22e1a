//! Retrieves information about the version of the engine from Git and the build
//! environment. This information is then written to a file in the output
//! directory and can be accessed at runtime by the front-end.

use std::path::Path;
use std::{env, fs};

fn generate_file(filename: &str, contents: &str) {
    let out_dir = env::var_os("OUT_DIR").expect("cargo always sets OUT_DIR for build scripts");
    let dest_path = Path::new(&out_dir).join(filename);
    fs::write(dest_path, contents).expect("OUT_DIR is writable");
}

fn generate_build_info() {
    let profile = env::var("PROFILE").unwrap_or_else(|_| String::from("unknown"));
    generate_file("profile", &profile);
}

fn main() -> shadow_rs::SdResult<()> {
    generate_build_info();
    shadow_rs::new()
}
