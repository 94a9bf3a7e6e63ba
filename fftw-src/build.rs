use std::{
    env::var,
    fs::canonicalize,
    path::{Path, PathBuf},
    process::Command,
};

/// Version of the vendored source tree, expected next to this manifest.
const FFTW_DIR: &str = "fftw-3.3.10";

fn run(command: &mut Command) {
    println!("Running: {:?}", command);
    match command.status() {
        Ok(status) => {
            if !status.success() {
                panic!("`{:?}` failed: {}", command, status);
            }
        }
        Err(error) => {
            panic!("failed to execute `{:?}`: {}", command, error);
        }
    }
}

fn build_fftw(src_dir: &Path, out_dir: &Path, flags: &[&str]) {
    run(
        Command::new(canonicalize(src_dir.join("configure")).unwrap())
            .arg("--with-pic")
            .arg("--enable-static")
            .arg("--disable-doc")
            .arg(format!("--prefix={}", out_dir.display()))
            .args(flags)
            .current_dir(src_dir),
    );

    run(Command::new("make")
        .arg(format!("-j{}", var("NUM_JOBS").unwrap_or_else(|_| "1".into())))
        .current_dir(src_dir));

    run(Command::new("make").arg("install").current_dir(src_dir));
}

/// Compile the vendored tree out of source, double and single precision.
fn build_vendored(src_dir: &Path) {
    let out_dir = PathBuf::from(var("OUT_DIR").unwrap());
    let out_src_dir = out_dir.join("src");

    fs_extra::dir::copy(
        src_dir,
        &out_src_dir,
        &fs_extra::dir::CopyOptions {
            overwrite: true,
            skip_exist: false,
            buffer_size: 64000,
            copy_inside: true,
            depth: 0,
            content_only: false,
        },
    )
    .unwrap();

    if !out_dir.join("lib/libfftw3.a").exists() {
        build_fftw(&out_src_dir, &out_dir, &[]);
    }

    // Separate configure run, `make install` keeps the double precision library
    if !out_dir.join("lib/libfftw3f.a").exists() {
        build_fftw(&out_src_dir, &out_dir, &["--enable-single"]);
    }

    println!("cargo:root={}", out_src_dir.display());
    println!("cargo:include={}", out_dir.join("include").display());
    println!("cargo:lib_dir={}", out_dir.join("lib").display());
    println!("cargo:link=static");
}

/// Use an FFTW installed on the host.
fn use_system() {
    println!("cargo:include={}", var("FFTW3_INCLUDE_DIR").unwrap_or_default());
    println!("cargo:lib_dir={}", var("FFTW3_LIB_DIR").unwrap_or_default());
    println!("cargo:link=dylib");
}

fn main() {
    println!("cargo:rerun-if-env-changed=FFTW3_SYSTEM");
    println!("cargo:rerun-if-env-changed=FFTW3_INCLUDE_DIR");
    println!("cargo:rerun-if-env-changed=FFTW3_LIB_DIR");

    let src_dir = PathBuf::from(var("CARGO_MANIFEST_DIR").unwrap()).join(FFTW_DIR);

    if var("FFTW3_SYSTEM").is_ok() || !src_dir.join("configure").exists() {
        use_system();
    } else {
        build_vendored(&src_dir);
    }
}
