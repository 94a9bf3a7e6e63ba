use std::env;
use std::path::PathBuf;

fn main() {
    // Tell cargo to invalidate the built crate whenever the wrapper changes
    println!("cargo:rerun-if-changed=wrapper.h");

    // Location and link kind of FFTW, set in src build script
    let include = env::var("DEP_FFTW3_INCLUDE").unwrap_or_default();
    let lib_dir = env::var("DEP_FFTW3_LIB_DIR").unwrap_or_default();
    let link = env::var("DEP_FFTW3_LINK").unwrap_or_else(|_| "dylib".into());

    if !lib_dir.is_empty() {
        println!("cargo:rustc-link-search=native={}", lib_dir);
    }
    println!("cargo:rustc-link-lib={}=fftw3", link);
    println!("cargo:rustc-link-lib={}=fftw3f", link);

    // Write bindings file to $OUT_DIR/bindings.rs
    let out_path = PathBuf::from(env::var("OUT_DIR").unwrap());

    let mut builder = bindgen::Builder::default().header("wrapper.h");
    if !include.is_empty() {
        builder = builder.clang_arg(format!("-I{}", include));
    }

    let bindings = builder
        .allowlist_type("^fftw.*")
        .allowlist_var("^FFTW.*")
        .allowlist_function("^fftw.*")
        .allowlist_type("^fftwf.*")
        .allowlist_function("^fftwf.*")
        .blocklist_type("FILE") // Use libc::FILE type
        .blocklist_type("fftw.*_complex") // Use num_complex complex types
        .blocklist_function("fftwl_.*") // disable long double FFTs
        .default_enum_style(bindgen::EnumVariation::Rust {
            non_exhaustive: true,
        })
        .generate()
        .expect("Unable to generate bindings");

    bindings
        .write_to_file(out_path.join("bindings.rs"))
        .expect("Couldn't write bindings!");
}
