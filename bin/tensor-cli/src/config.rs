// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! CLI configuration loaded from TOML files.
//!
//! # TOML Format
//! ```toml
//! backend = "accelerated"
//!
//! [bench]
//! sizes = [64, 128, 256]
//! iterations = 5
//! ```
//!
//! Every key is optional; missing keys take their [`Default`] values.

use anyhow::Context;
use dense_tensor::MatmulBackend;
use std::path::Path;

/// Configuration for the `dtensor` command.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Matmul kernel used when `--backend` is not given.
    pub backend: MatmulBackend,
    /// Settings for `dtensor bench`.
    pub bench: BenchConfig,
}

/// Settings for `dtensor bench`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Square matrix sizes to time.
    pub sizes: Vec<usize>,
    /// Timed repetitions per size and backend.
    pub iterations: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes: vec![64, 128, 256],
            iterations: 5,
        }
    }
}

impl CliConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config '{}'", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("invalid config '{}'", path.display()))
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> anyhow::Result<Self> {
        toml::from_str(toml_str).context("TOML parse error")
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("TOML serialise error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let c = CliConfig::default();
        assert_eq!(c.backend, MatmulBackend::default());
        assert_eq!(c.bench.sizes, vec![64, 128, 256]);
        assert_eq!(c.bench.iterations, 5);
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
backend = "portable"

[bench]
sizes = [8, 16]
iterations = 2
"#;
        let c = CliConfig::from_toml(toml).unwrap();
        assert_eq!(c.backend, MatmulBackend::Portable);
        assert_eq!(c.bench.sizes, vec![8, 16]);
        assert_eq!(c.bench.iterations, 2);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let c = CliConfig::from_toml("[bench]\niterations = 9\n").unwrap();
        assert_eq!(c.backend, MatmulBackend::default());
        assert_eq!(c.bench.sizes, vec![64, 128, 256]);
        assert_eq!(c.bench.iterations, 9);
        assert_eq!(CliConfig::from_toml("").unwrap(), CliConfig::default());
    }

    #[test]
    fn test_to_toml_roundtrip() {
        let c = CliConfig {
            backend: MatmulBackend::Portable,
            ..Default::default()
        };
        let toml = c.to_toml().unwrap();
        assert!(toml.contains("backend = \"portable\""));
        assert_eq!(CliConfig::from_toml(&toml).unwrap(), c);
    }

    #[test]
    fn test_unknown_backend_rejected() {
        assert!(CliConfig::from_toml("backend = \"cuda\"").is_err());
    }
}
