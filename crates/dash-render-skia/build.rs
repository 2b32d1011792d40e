// File: crates/dash-render-skia/build.rs
// Summary: Skia's ICU and font-manager code reads the registry on Windows; link advapi32 there.

fn main() {
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("windows") {
        // RegOpenKeyExW, RegQueryInfoKeyW
        println!("cargo:rustc-link-lib=advapi32");
    }
}
