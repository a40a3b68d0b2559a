// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Opaque platform options forwarded to the engine.

use crate::DlSystemError;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Platform options in `key:value;key:value` form (e.g. `unsignedPD:ON`).
///
/// The harness does not interpret the options; it only checks that they are
/// well formed and hands them to the engine factory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformConfig {
    options: BTreeMap<String, String>,
}

impl PlatformConfig {
    /// Returns `true` when no option is set.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Looks up a single option.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    /// Iterates options in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromStr for PlatformConfig {
    type Err = DlSystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut options = BTreeMap::new();
        for entry in s.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            let (key, value) = entry
                .split_once(':')
                .ok_or_else(|| DlSystemError::InvalidPlatformOptions(s.to_string()))?;
            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() || value.is_empty() {
                return Err(DlSystemError::InvalidPlatformOptions(s.to_string()));
            }
            options.insert(key.to_string(), value.to_string());
        }
        Ok(Self { options })
    }
}

impl fmt::Display for PlatformConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (k, v)) in self.options.iter().enumerate() {
            if i > 0 {
                write!(f, ";")?;
            }
            write!(f, "{k}:{v}")?;
        }
        Ok(())
    }
}
