//! Version and build information.
//!
//! Values other than the crate version are exported by `build.rs` and may be
//! missing (e.g. when building from a source tarball without git).

use std::fmt;

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub version: &'static str,
    pub commit: Option<&'static str>,
    pub build_date: Option<&'static str>,
    pub target: &'static str,
    pub rustc_version: Option<&'static str>,
}

impl BuildInfo {
    /// One-line form, e.g. `fwcheck 0.1.0 (3f2a9c1, 2026-10-16T08:00:00Z)`.
    pub fn short(&self) -> String {
        let extras: Vec<&str> = [self.commit, self.build_date].into_iter().flatten().collect();
        if extras.is_empty() {
            format!("fwcheck {}", self.version)
        } else {
            format!("fwcheck {} ({})", self.version, extras.join(", "))
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.short())?;
        write!(f, "Target: {}", self.target)?;

        if let Some(rustc) = self.rustc_version {
            write!(f, "\nRustc: {}", rustc)?;
        }

        Ok(())
    }
}

/// Get build information
pub fn get_build_info() -> BuildInfo {
    BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        commit: option_env!("FWCHECK_GIT_HASH"),
        build_date: option_env!("FWCHECK_BUILD_DATE"),
        target: option_env!("FWCHECK_TARGET").unwrap_or(std::env::consts::ARCH),
        rustc_version: option_env!("FWCHECK_RUSTC_VERSION"),
    }
}
