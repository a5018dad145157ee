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

//! Common utilities for Stockyard
//!
//! This module contains shared utilities used throughout the crate:
//!
//! - [`version`] - Version information and constants

pub mod version;

// Re-export main types for convenience
pub use version::{version, version_info, BUILD_TIME, GIT_COMMIT, MAJOR, MINOR, PATCH};
