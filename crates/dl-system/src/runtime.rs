// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Hardware execution targets and the runtime name table.

use crate::DlSystemError;
use std::fmt;
use std::str::FromStr;

/// One hardware execution target for inference.
///
/// There is exactly one variant per supported target. "No runtime" is
/// expressed as `Option<Runtime>::None`: [`Runtime::from_name`] returns
/// `None` for names outside the table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum Runtime {
    /// Snapdragon CPU. Data & math: float 32-bit.
    #[serde(rename = "cpu_float32", alias = "cpu")]
    Cpu,
    /// Adreno GPU. Data: float 16-bit, math: float 32-bit.
    #[serde(rename = "gpu_float32_16_hybrid", alias = "gpu")]
    Gpu,
    /// Adreno GPU. Data & math: float 16-bit.
    #[serde(rename = "gpu_float16")]
    GpuFloat16,
    /// Hexagon DSP. Data & math: 8-bit fixed point, TensorFlow-style encoding.
    #[serde(rename = "dsp_fixed8_tf", alias = "dsp")]
    Dsp,
    /// Snapdragon HTA+HVX. Data & math: 8-bit fixed point, TensorFlow-style encoding.
    #[serde(rename = "aip_fixed8_tf", alias = "aip")]
    AipFixedTf,
}

/// Every accepted name, short aliases included. Lookups are lowercase.
const NAME_TABLE: &[(&str, Runtime)] = &[
    ("cpu", Runtime::Cpu),
    ("cpu_float32", Runtime::Cpu),
    ("gpu", Runtime::Gpu),
    ("gpu_float32_16_hybrid", Runtime::Gpu),
    ("gpu_float16", Runtime::GpuFloat16),
    ("dsp", Runtime::Dsp),
    ("dsp_fixed8_tf", Runtime::Dsp),
    ("aip", Runtime::AipFixedTf),
    ("aip_fixed8_tf", Runtime::AipFixedTf),
];

impl Runtime {
    /// All runtimes, in the order they are listed in usage text.
    pub const ALL: [Runtime; 5] = [
        Runtime::Cpu,
        Runtime::Gpu,
        Runtime::GpuFloat16,
        Runtime::Dsp,
        Runtime::AipFixedTf,
    ];

    /// Resolves a runtime name (canonical or short alias).
    ///
    /// Surrounding whitespace is ignored and the comparison is
    /// case-insensitive.
    ///
    /// # Examples
    /// ```
    /// use dl_system::Runtime;
    /// assert_eq!(Runtime::from_name("dsp"), Some(Runtime::Dsp));
    /// assert_eq!(Runtime::from_name(" CPU_FLOAT32 "), Some(Runtime::Cpu));
    /// assert_eq!(Runtime::from_name("tpu"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        NAME_TABLE
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|&(_, runtime)| runtime)
    }

    /// Returns the canonical, fully-qualified name.
    pub fn as_str(self) -> &'static str {
        match self {
            Runtime::Cpu => "cpu_float32",
            Runtime::Gpu => "gpu_float32_16_hybrid",
            Runtime::GpuFloat16 => "gpu_float16",
            Runtime::Dsp => "dsp_fixed8_tf",
            Runtime::AipFixedTf => "aip_fixed8_tf",
        }
    }

    /// Returns the hardware block this runtime executes on.
    pub fn hardware(self) -> &'static str {
        match self {
            Runtime::Cpu => "Snapdragon CPU",
            Runtime::Gpu | Runtime::GpuFloat16 => "Adreno GPU",
            Runtime::Dsp => "Hexagon DSP",
            Runtime::AipFixedTf => "Snapdragon HTA+HVX",
        }
    }

    /// Returns `true` for runtimes that compute in 8-bit fixed point and
    /// therefore need a quantized container.
    pub fn is_fixed_point(self) -> bool {
        matches!(self, Runtime::Dsp | Runtime::AipFixedTf)
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Runtime {
    type Err = DlSystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| DlSystemError::UnknownRuntime(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_and_canonical_names_agree() {
        for runtime in Runtime::ALL {
            assert_eq!(Runtime::from_name(runtime.as_str()), Some(runtime));
        }
        assert_eq!(Runtime::from_name("cpu"), Some(Runtime::Cpu));
        assert_eq!(Runtime::from_name("gpu"), Some(Runtime::Gpu));
        assert_eq!(Runtime::from_name("dsp"), Some(Runtime::Dsp));
        assert_eq!(Runtime::from_name("aip"), Some(Runtime::AipFixedTf));
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(Runtime::from_name("tpu"), None);
        assert_eq!(Runtime::from_name(""), None);
        assert_eq!(Runtime::from_name("cpu,gpu"), None);
    }

    #[test]
    fn test_from_str() {
        let r: Runtime = "GPU_FLOAT16".parse().unwrap();
        assert_eq!(r, Runtime::GpuFloat16);
        assert!("npu".parse::<Runtime>().is_err());
    }

    #[test]
    fn test_fixed_point() {
        assert!(Runtime::Dsp.is_fixed_point());
        assert!(Runtime::AipFixedTf.is_fixed_point());
        assert!(!Runtime::Cpu.is_fixed_point());
        assert!(!Runtime::GpuFloat16.is_fixed_point());
    }

    #[test]
    fn test_serde_uses_canonical_name_and_accepts_alias() {
        let json = serde_json::to_string(&Runtime::Dsp).unwrap();
        assert_eq!(json, "\"dsp_fixed8_tf\"");
        let back: Runtime = serde_json::from_str("\"dsp\"").unwrap();
        assert_eq!(back, Runtime::Dsp);
    }
}
