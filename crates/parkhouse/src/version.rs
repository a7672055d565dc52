//! Version information for parkhouse.

/// Crate version from Cargo.toml
pub const PARKHOUSE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version information reported by the health check.
#[derive(Debug, Clone, serde::Serialize)]
pub struct VersionInfo {
    pub parkhouse: &'static str,
    /// Build identifier baked in at compile time (commit, CI run, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,
}

impl Default for VersionInfo {
    fn default() -> Self {
        Self {
            parkhouse: PARKHOUSE_VERSION,
            build: option_env!("PARKHOUSE_BUILD").map(str::to_string),
        }
    }
}

impl VersionInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_build(mut self, build: String) -> Self {
        self.build = Some(build);
        self
    }
}
