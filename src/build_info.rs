//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version banner, e.g. `arcade 2026-10-18 (a1b2c3d)`.
pub fn version_line() -> String {
    format!("arcade {} ({})", BUILD_DATE, BUILD_COMMIT)
}
