//! Version and build stamp reported by the startup banner and the status tool

use serde::Serialize;

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Stamp written by `build.rs` for the current binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildStamp {
    pub version: &'static str,
    /// Local compile counter; 0 when the build script could not provide one
    pub build: u64,
    pub compiled_at: &'static str,
    pub profile: &'static str,
}

impl BuildStamp {
    pub fn current() -> Self {
        Self::from_parts(
            option_env!("SHOPLIST_BUILD_NUMBER"),
            option_env!("SHOPLIST_BUILD_TIMESTAMP"),
            option_env!("SHOPLIST_BUILD_PROFILE"),
        )
    }

    fn from_parts(
        build: Option<&'static str>,
        compiled_at: Option<&'static str>,
        profile: Option<&'static str>,
    ) -> Self {
        Self {
            version: VERSION,
            build: build.and_then(|b| b.trim().parse().ok()).unwrap_or(0),
            compiled_at: compiled_at.unwrap_or("unknown"),
            profile: profile.unwrap_or("unknown"),
        }
    }

    /// One-line form, e.g. `shoplist 1.0.0 (build 12, release)`
    pub fn label(&self) -> String {
        format!("shoplist {} (build {}, {})", self.version, self.build, self.profile)
    }
}

/// Banner printed to stderr when the server starts
pub fn startup_banner(stamp: &BuildStamp) -> String {
    let rule = "=".repeat(47);
    format!(
        "{rule}\n  Shopping List Builder\n  {}\n  Compiled: {}\n{rule}",
        stamp.label(),
        stamp.compiled_at
    )
}
