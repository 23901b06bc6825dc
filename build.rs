// Stamps BUILD_DATE for `platekit::BUILD_DATE`, shown by the CLI banner.
fn main() {
    let stamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
    println!("cargo:rustc-env=BUILD_DATE={}", stamp);
    println!("cargo:rerun-if-changed=build.rs");
}
