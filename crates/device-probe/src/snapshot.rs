// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Aggregated availability report.

use dl_system::Runtime;

/// Availability of one runtime.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RuntimeStatus {
    /// The runtime probed.
    pub runtime: Runtime,
    /// Whether the runtime appears usable.
    pub available: bool,
    /// The device node that was found, if any.
    pub node: Option<String>,
    /// Extra hardware detail (e.g. the GPU model), if readable.
    pub detail: Option<String>,
}

/// Availability of every runtime at one point in time.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AvailabilitySnapshot {
    /// One entry per runtime, in [`Runtime::ALL`] order.
    pub statuses: Vec<RuntimeStatus>,
}

impl AvailabilitySnapshot {
    /// Runtimes reported available.
    pub fn available_runtimes(&self) -> Vec<Runtime> {
        self.statuses
            .iter()
            .filter(|s| s.available)
            .map(|s| s.runtime)
            .collect()
    }

    /// One-line summary for logging.
    ///
    /// # Example output
    /// ```text
    /// Runtimes: cpu_float32 yes, gpu_float32_16_hybrid yes (Adreno660), gpu_float16 yes (Adreno660), dsp_fixed8_tf no, aip_fixed8_tf no
    /// ```
    pub fn summary(&self) -> String {
        let parts: Vec<String> = self
            .statuses
            .iter()
            .map(|s| {
                let flag = if s.available { "yes" } else { "no" };
                match &s.detail {
                    Some(d) => format!("{} {flag} ({d})", s.runtime),
                    None => format!("{} {flag}", s.runtime),
                }
            })
            .collect();
        format!("Runtimes: {}", parts.join(", "))
    }
}
