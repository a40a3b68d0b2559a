// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Harness defaults loaded from a TOML file (`--config`).
//!
//! # TOML Format
//! ```toml
//! container = "models/inception_v3.dlc"
//! input_list = "data/target_raw_list.txt"
//! output_dir = "output"
//! buffer_type = "USERBUFFER_TF8"
//! static_quantization = true
//! runtime_order = "dsp,gpu,cpu"
//! init_caching = true
//! resizable_dim = 32
//! platform_options = "unsignedPD:ON"
//! ```
//!
//! Every key is optional and command-line values take precedence.

use anyhow::Context;
use std::path::{Path, PathBuf};

/// Contents of a harness configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    pub container: Option<PathBuf>,
    pub input_list: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub buffer_type: Option<String>,
    pub static_quantization: Option<bool>,
    pub user_buffer_source: Option<String>,
    pub runtime: Option<String>,
    pub runtime_order: Option<String>,
    pub init_caching: Option<bool>,
    pub extension_packages: Option<String>,
    pub cpu_fixed_point: Option<bool>,
    pub resizable_dim: Option<u64>,
    pub platform_options: Option<String>,
}

impl HarnessConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config '{}'", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("invalid config '{}'", path.display()))
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(HarnessConfig::from_toml("").unwrap(), HarnessConfig::default());
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
container = "/tmp/net.dlc"
buffer_type = "USERBUFFER_TF16"
static_quantization = true
runtime_order = "dsp,cpu"
resizable_dim = 8
"#;
        let c = HarnessConfig::from_toml(toml).unwrap();
        assert_eq!(c.container, Some(PathBuf::from("/tmp/net.dlc")));
        assert_eq!(c.buffer_type.as_deref(), Some("USERBUFFER_TF16"));
        assert_eq!(c.static_quantization, Some(true));
        assert_eq!(c.runtime_order.as_deref(), Some("dsp,cpu"));
        assert_eq!(c.resizable_dim, Some(8));
        assert_eq!(c.runtime, None);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(HarnessConfig::from_toml("strategy = \"greedy\"").is_err());
    }

    #[test]
    fn test_wrong_type_rejected() {
        assert!(HarnessConfig::from_toml("init_caching = \"yes\"").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = HarnessConfig::from_file(Path::new("/nonexistent/harness.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("cannot read config"));
    }
}
