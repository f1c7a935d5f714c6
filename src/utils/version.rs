//! Version information

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version reported in the startup log line
pub fn get_version() -> &'static str {
    VERSION
}
