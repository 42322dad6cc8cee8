//! Build script for musify-storage.
//!
//! Rebuild when database migrations change, since they are embedded.

fn main() {
    println!("cargo:rerun-if-changed=migrations");
}
