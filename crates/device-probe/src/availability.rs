// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The [`RuntimeAvailability`] trait and its implementations.

use crate::nodes::{check_node, device_nodes, read_sysfs_file, GPU_MODEL_PATH};
use crate::{AvailabilitySnapshot, RuntimeStatus};
use dl_system::Runtime;
use std::path::{Path, PathBuf};

/// Answers whether a runtime is present on this device.
///
/// Implementations must not fail: an unknown answer is `false`.
pub trait RuntimeAvailability {
    /// Returns `true` if `runtime` appears to be usable.
    fn is_available(&self, runtime: Runtime) -> bool;
}

impl<T: RuntimeAvailability + ?Sized> RuntimeAvailability for &T {
    fn is_available(&self, runtime: Runtime) -> bool {
        (**self).is_available(runtime)
    }
}

/// Probes the live system for accelerator device nodes.
#[derive(Debug, Clone)]
pub struct DeviceProbe {
    dev_root: PathBuf,
    sys_root: PathBuf,
}

impl DeviceProbe {
    /// Probes the real `/dev` and `/sys` trees.
    pub fn new() -> Self {
        Self::with_roots("/dev", "/sys")
    }

    /// Probes alternative roots (used by tests and chroot-style setups).
    pub fn with_roots(dev_root: impl Into<PathBuf>, sys_root: impl Into<PathBuf>) -> Self {
        Self {
            dev_root: dev_root.into(),
            sys_root: sys_root.into(),
        }
    }

    /// Probes a single runtime.
    pub fn probe(&self, runtime: Runtime) -> RuntimeStatus {
        let nodes = device_nodes(runtime);
        if nodes.is_empty() {
            return RuntimeStatus {
                runtime,
                available: true,
                node: None,
                detail: None,
            };
        }

        for node in nodes {
            let path = self.dev_root.join(node);
            match check_node(&path) {
                Ok(()) => {
                    tracing::debug!("{runtime}: found {}", path.display());
                    return RuntimeStatus {
                        runtime,
                        available: true,
                        node: Some(path.display().to_string()),
                        detail: self.detail_for(runtime),
                    };
                }
                Err(e) => tracing::trace!("{runtime}: {e}"),
            }
        }

        RuntimeStatus {
            runtime,
            available: false,
            node: None,
            detail: None,
        }
    }

    /// Probes every runtime.
    pub fn snapshot(&self) -> AvailabilitySnapshot {
        AvailabilitySnapshot {
            statuses: Runtime::ALL.iter().map(|&r| self.probe(r)).collect(),
        }
    }

    fn detail_for(&self, runtime: Runtime) -> Option<String> {
        match runtime {
            Runtime::Gpu | Runtime::GpuFloat16 => {
                read_sysfs_file(&self.sys_root.join(Path::new(GPU_MODEL_PATH))).ok()
            }
            _ => None,
        }
    }
}

impl Default for DeviceProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeAvailability for DeviceProbe {
    fn is_available(&self, runtime: Runtime) -> bool {
        self.probe(runtime).available
    }
}

/// A fixed answer set, for hosts where probing is not wanted and for tests.
#[derive(Debug, Clone, Default)]
pub struct FixedAvailability {
    available: Vec<Runtime>,
}

impl FixedAvailability {
    /// Reports exactly the given runtimes as available.
    pub fn new(available: impl IntoIterator<Item = Runtime>) -> Self {
        Self {
            available: available.into_iter().collect(),
        }
    }

    /// Reports every runtime as available.
    pub fn all() -> Self {
        Self::new(Runtime::ALL)
    }

    /// Reports only the CPU as available.
    pub fn cpu_only() -> Self {
        Self::new([Runtime::Cpu])
    }
}

impl RuntimeAvailability for FixedAvailability {
    fn is_available(&self, runtime: Runtime) -> bool {
        self.available.contains(&runtime)
    }
}
