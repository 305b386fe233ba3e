//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `<crate version> (<commit>, <date>)`, plus the profile for non-release builds.
pub fn version_string() -> String {
    let base = format!(
        "{} ({}, {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_COMMIT,
        BUILD_DATE
    );
    if BUILD_PROFILE == "release" {
        base
    } else {
        format!("{} [{}]", base, BUILD_PROFILE)
    }
}
