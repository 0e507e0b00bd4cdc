//! Version and build information for linkeddoc

/// Full version string: "linkeddoc {version} ({commit} {date})"
pub fn version() -> String {
    format!(
        "linkeddoc {} ({} {})",
        package_version(),
        build_commit(),
        build_date()
    )
}

/// Get the package version (e.g., "0.1.0")
pub fn package_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Commit SHA the binary was built from, or "unknown"
pub fn build_commit() -> &'static str {
    option_env!("LINKEDDOC_COMMIT_SHA").unwrap_or("unknown")
}

/// Build date, or "unknown"
pub fn build_date() -> &'static str {
    option_env!("LINKEDDOC_BUILD_DATE").unwrap_or("unknown")
}
