// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Device node table and low-level filesystem reads.
//!
//! Each accelerator driver publishes a character device:
//! - Adreno GPU: `/dev/kgsl-3d0` (KGSL driver).
//! - Hexagon DSP: FastRPC channels, `/dev/adsprpc-smd` / `/dev/cdsprpc-smd`
//!   on older kernels, `/dev/fastrpc-adsp` / `/dev/fastrpc-cdsp` on newer ones.
//! - HTA (AIP runtime): `/dev/hta`.
//!
//! The CPU runtime needs no node.

use crate::ProbeError;
use dl_system::Runtime;
use std::path::Path;

const GPU_NODES: &[&str] = &["kgsl-3d0"];
const DSP_NODES: &[&str] = &["adsprpc-smd", "cdsprpc-smd", "fastrpc-adsp", "fastrpc-cdsp"];
const AIP_NODES: &[&str] = &["hta"];

/// Sysfs entry (relative to the sys root) naming the Adreno model.
pub(crate) const GPU_MODEL_PATH: &str = "class/kgsl/kgsl-3d0/gpu_model";

/// Device nodes that indicate `runtime` is present. Any one of them suffices.
pub(crate) fn device_nodes(runtime: Runtime) -> &'static [&'static str] {
    match runtime {
        Runtime::Cpu => &[],
        Runtime::Gpu | Runtime::GpuFloat16 => GPU_NODES,
        Runtime::Dsp => DSP_NODES,
        Runtime::AipFixedTf => AIP_NODES,
    }
}

/// Checks that a device node exists and its metadata can be read.
pub(crate) fn check_node(path: &Path) -> Result<(), ProbeError> {
    if !path.exists() {
        return Err(ProbeError::NotAvailable {
            path: path.display().to_string(),
        });
    }
    std::fs::metadata(path)
        .map(|_| ())
        .map_err(|e| ProbeError::ReadError {
            path: path.display().to_string(),
            source: e,
        })
}

/// Reads a sysfs file and returns its trimmed content.
pub(crate) fn read_sysfs_file(path: &Path) -> Result<String, ProbeError> {
    if !path.exists() {
        return Err(ProbeError::NotAvailable {
            path: path.display().to_string(),
        });
    }
    std::fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .map_err(|e| ProbeError::ReadError {
            path: path.display().to_string(),
            source: e,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_needs_no_node() {
        assert!(device_nodes(Runtime::Cpu).is_empty());
    }

    #[test]
    fn test_gpu_variants_share_nodes() {
        assert_eq!(device_nodes(Runtime::Gpu), device_nodes(Runtime::GpuFloat16));
    }

    #[test]
    fn test_missing_node() {
        let err = check_node(Path::new("/nonexistent/dev/kgsl-3d0")).unwrap_err();
        assert!(matches!(err, ProbeError::NotAvailable { .. }));
    }

    #[test]
    fn test_read_sysfs_trims() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gpu_model");
        std::fs::write(&path, "Adreno740v2\n").unwrap();
        assert_eq!(read_sysfs_file(&path).unwrap(), "Adreno740v2");
    }
}
