// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The loaded, validated container handle.

use crate::{ContainerError, ContainerManifest, InitCacheRecord, LayerSpec};
use dl_system::{Runtime, TensorShape};
use std::path::{Path, PathBuf};

/// A loaded network container.
///
/// Owned by the caller for the whole run. Engines borrow it, so a
/// `Container` always outlives every engine built from it.
#[derive(Debug, Clone)]
pub struct Container {
    path: PathBuf,
    manifest: ContainerManifest,
}

impl Container {
    /// Loads and validates a container file.
    pub fn load(path: &Path) -> Result<Self, ContainerError> {
        let content = std::fs::read_to_string(path).map_err(|e| ContainerError::ReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        let manifest = ContainerManifest::from_json(&content)?;
        let container = Self::from_manifest(path, manifest)?;
        tracing::info!("loaded {}", container.summary());
        Ok(container)
    }

    /// Wraps an in-memory manifest, validating it.
    pub fn from_manifest(
        path: impl Into<PathBuf>,
        manifest: ContainerManifest,
    ) -> Result<Self, ContainerError> {
        manifest.validate()?;
        Ok(Self {
            path: path.into(),
            manifest,
        })
    }

    /// Path the container was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Network name.
    pub fn name(&self) -> &str {
        &self.manifest.name
    }

    /// Whether the network carries quantized parameters.
    pub fn is_quantized(&self) -> bool {
        self.manifest.quantized
    }

    /// Returns `true` if the network was prepared for `runtime`.
    pub fn supports(&self, runtime: Runtime) -> bool {
        self.manifest.runtimes.is_empty() || self.manifest.runtimes.contains(&runtime)
    }

    /// Input layers in declaration order.
    pub fn inputs(&self) -> &[LayerSpec] {
        &self.manifest.inputs
    }

    /// Output layers in declaration order.
    pub fn outputs(&self) -> &[LayerSpec] {
        &self.manifest.outputs
    }

    /// Looks up an output layer by name.
    pub fn output(&self, name: &str) -> Option<&LayerSpec> {
        self.manifest.outputs.iter().find(|l| l.name == name)
    }

    /// Dimensions of the first input; the first dimension is the batch size.
    pub fn input_shape(&self) -> &TensorShape {
        // validate() guarantees at least one input.
        &self.manifest.inputs[0].dims
    }

    /// Init-cache record stored for `runtime`, if any.
    pub fn init_cache_for(&self, runtime: Runtime) -> Option<&InitCacheRecord> {
        self.manifest.init_cache.iter().find(|r| r.runtime == runtime)
    }

    /// Writes the container to `path` unchanged.
    pub fn save(&self, path: &Path) -> Result<(), ContainerError> {
        self.save_with_cache(path, &[])
    }

    /// Writes the container to `path` with `records` merged into its init
    /// cache. A record replaces any existing record for the same runtime.
    ///
    /// The file is written next to its destination and renamed into place,
    /// so a failed save leaves the original container intact. `self` is not
    /// modified.
    pub fn save_with_cache(
        &self,
        path: &Path,
        records: &[InitCacheRecord],
    ) -> Result<(), ContainerError> {
        let mut manifest = self.manifest.clone();
        for record in records {
            manifest.init_cache.retain(|r| r.runtime != record.runtime);
            manifest.init_cache.push(record.clone());
        }
        let json = manifest.to_json()?;

        let write_err = |e: std::io::Error| ContainerError::WriteError {
            path: path.display().to_string(),
            source: e,
        };
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        std::fs::write(&tmp, json).map_err(write_err)?;
        if let Err(e) = std::fs::rename(&tmp, path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(write_err(e));
        }

        tracing::debug!(
            "saved container '{}' with {} init-cache record(s) to {}",
            manifest.name,
            manifest.init_cache.len(),
            path.display(),
        );
        Ok(())
    }

    /// One-line summary for logging.
    ///
    /// # Example output
    /// ```text
    /// Container 'inception_v3': 1 input(s) [1, 299, 299, 3], 1 output(s), float, runtimes: all, 0 cache record(s)
    /// ```
    pub fn summary(&self) -> String {
        let runtimes = if self.manifest.runtimes.is_empty() {
            "all".to_string()
        } else {
            self.manifest
                .runtimes
                .iter()
                .map(|r| r.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!(
            "Container '{}': {} input(s) {}, {} output(s), {}, runtimes: {runtimes}, {} cache record(s)",
            self.manifest.name,
            self.manifest.inputs.len(),
            self.input_shape(),
            self.manifest.outputs.len(),
            if self.manifest.quantized { "quantized" } else { "float" },
            self.manifest.init_cache.len(),
        )
    }
}
