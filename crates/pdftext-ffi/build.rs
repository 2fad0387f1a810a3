use std::env;

fn main() {
    if let Err(e) = run() {
        eprintln!("Build script error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let crate_dir = env::var("CARGO_MANIFEST_DIR").map_err(|_| "CARGO_MANIFEST_DIR not set".to_string())?;

    let config = cbindgen::Config::from_file(format!("{}/cbindgen.toml", crate_dir))
        .map_err(|e| format!("Failed to load cbindgen config: {}", e))?;

    cbindgen::generate_with_config(&crate_dir, config)
        .map_err(|e| format!("Failed to generate C bindings: {}", e))?
        .write_to_file(format!("{}/pdftext.h", crate_dir));

    println!("cargo:rerun-if-changed=cbindgen.toml");
    println!("cargo:rerun-if-changed=src/lib.rs");

    Ok(())
}
