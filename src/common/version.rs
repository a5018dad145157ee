// Copyright 2025 Stockyard Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Version information for Stockyard
//!
//! This module provides version constants and build information.

/// Major version number
pub const MAJOR: u32 = 0;

/// Minor version number
pub const MINOR: u32 = 1;

/// Patch version number
pub const PATCH: u32 = 0;

use std::sync::OnceLock;

/// Full version string in semver format (e.g., "0.1.0")
static VERSION: OnceLock<String> = OnceLock::new();

/// Get the version string
fn get_version() -> &'static String {
    VERSION.get_or_init(|| format!("{}.{}.{}", MAJOR, MINOR, PATCH))
}

/// Git commit hash at build time
/// Set via STOCKYARD_GIT_COMMIT environment variable during compilation
pub const GIT_COMMIT: &str = match option_env!("STOCKYARD_GIT_COMMIT") {
    Some(commit) => commit,
    None => "unknown",
};

/// Build timestamp
/// Set via STOCKYARD_BUILD_TIME environment variable during compilation
pub const BUILD_TIME: &str = match option_env!("STOCKYARD_BUILD_TIME") {
    Some(time) => time,
    None => "unknown",
};

/// Returns the full version string
pub fn version() -> &'static str {
    get_version()
}

/// Returns version info as a formatted string
pub fn version_info() -> String {
    format!(
        "stockyard {} (commit: {}, built: {})",
        get_version(),
        GIT_COMMIT,
        BUILD_TIME
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constants() {
        assert_eq!(MAJOR, 0);
        assert_eq!(MINOR, 1);
        assert_eq!(PATCH, 0);
    }

    #[test]
    fn test_version_string() {
        assert_eq!(version(), "0.1.0");
    }

    #[test]
    fn test_version_info() {
        let info = version_info();
        assert!(info.contains("stockyard"));
        assert!(info.contains("0.1.0"));
    }

    #[test]
    fn test_git_commit_default() {
        // Without env var set, should be "unknown"
        assert!(!GIT_COMMIT.is_empty());
    }

    #[test]
    fn test_build_time_default() {
        // Without env var set, should be "unknown"
        assert!(!BUILD_TIME.is_empty());
    }
}
