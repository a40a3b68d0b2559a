// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Result writing.
//!
//! ```text
//! <output_dir>/
//! ├── Result_0/
//! │   └── softmax_0.raw
//! └── Result_1/
//!     └── softmax_0.raw
//! ```
//!
//! One `Result_<n>` directory per input-list element; padding slots of a
//! short final batch are not written.

use crate::IoError;
use dl_system::TensorMap;
use std::path::{Path, PathBuf};

/// Makes a layer name usable as a file name (`:` and `/` become `_`).
pub fn sanitize_layer_name(name: &str) -> String {
    name.replace([':', '/'], "_")
}

/// Writes output tensors under a root directory.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    root: PathBuf,
}

impl OutputWriter {
    /// Creates a writer rooted at `root`. Nothing is created until the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Output root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes the outputs of one batch.
    ///
    /// `first_index` is the input-list index of the batch's first element
    /// and `valid` the number of real (non-padding) elements. Each output
    /// tensor is split along its first dimension, one slice per element.
    /// Returns the written file paths.
    pub fn write_batch(
        &self,
        first_index: usize,
        valid: usize,
        outputs: &TensorMap,
    ) -> Result<Vec<PathBuf>, IoError> {
        let mut written = Vec::new();
        for (name, tensor) in outputs {
            let volume = tensor.shape().element_volume();
            let file_name = format!("{}.raw", sanitize_layer_name(name));
            for (i, slice) in tensor.as_slice().chunks(volume.max(1)).take(valid).enumerate() {
                let dir = self.root.join(format!("Result_{}", first_index + i));
                std::fs::create_dir_all(&dir).map_err(|e| IoError::WriteError {
                    path: dir.display().to_string(),
                    source: e,
                })?;
                let path = dir.join(&file_name);
                let bytes: Vec<u8> = slice.iter().flat_map(|v| v.to_le_bytes()).collect();
                std::fs::write(&path, bytes).map_err(|e| IoError::WriteError {
                    path: path.display().to_string(),
                    source: e,
                })?;
                written.push(path);
            }
        }
        tracing::debug!(
            "wrote {} file(s) for elements {}..{}",
            written.len(),
            first_index,
            first_index + valid,
        );
        Ok(written)
    }
}
