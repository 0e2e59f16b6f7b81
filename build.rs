// Packages the build-info resource read by the startup banner.
use std::fs::File;
use std::io::Write;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-env-changed=DOMINION_REVISION");

    // An explicit revision (e.g. a release tag) wins over the crate version
    let revision = std::env::var("DOMINION_REVISION")
        .or_else(|_| std::env::var("CARGO_PKG_VERSION"))
        .unwrap_or_default();

    if let Err(e) = generate_build_info(&revision) {
        panic!("Failed to generate build-info resource: {}", e);
    }
}

fn generate_build_info(revision: &str) -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = std::env::var("OUT_DIR")?;
    let dest_path = std::path::Path::new(&out_dir).join("build-info.toml");
    let mut file = File::create(dest_path)?;

    writeln!(file, "# Auto-generated by build.rs")?;
    if !revision.is_empty() {
        writeln!(file, "revision = {:?}", revision)?;
    }

    Ok(())
}
