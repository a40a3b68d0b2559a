// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Raw little-endian `f32` input files and batch assembly.

use crate::{InputEntry, IoError};
use container::LayerSpec;
use dl_system::{Tensor, TensorMap};
use std::path::Path;

/// Reads a raw `f32` file holding exactly `expected` values.
///
/// The file is memory-mapped and decoded in place.
pub fn read_raw_f32(path: &Path, expected: usize) -> Result<Vec<f32>, IoError> {
    let read_err = |e: std::io::Error| IoError::ReadError {
        path: path.display().to_string(),
        source: e,
    };
    let invalid = |detail: String| IoError::InvalidRawFile {
        path: path.display().to_string(),
        detail,
    };

    let file = std::fs::File::open(path).map_err(read_err)?;
    let len = file.metadata().map_err(read_err)?.len() as usize;
    if len == 0 {
        return Err(invalid(format!("file is empty, expected {expected} values")));
    }
    if len % 4 != 0 {
        return Err(invalid(format!("size {len} is not a multiple of 4 bytes")));
    }
    if len / 4 != expected {
        return Err(invalid(format!("holds {} values, expected {expected}", len / 4)));
    }

    let mmap = unsafe { memmap2::Mmap::map(&file) }.map_err(read_err)?;
    let values = mmap
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();
    tracing::trace!("read {} values from {}", expected, path.display());
    Ok(values)
}

/// Builds the input tensors for one batch.
///
/// Each tensor has the input's declared shape. Entry `b` of the batch fills
/// slot `b`; slots past the end of a short batch stay zero.
pub fn assemble_batch(inputs: &[LayerSpec], batch: &[InputEntry]) -> Result<TensorMap, IoError> {
    let mut tensors = TensorMap::new();
    for (index, spec) in inputs.iter().enumerate() {
        let mut tensor = Tensor::zeros(spec.dims.clone());
        let volume = spec.dims.element_volume();
        let slots = spec.dims.batch_size().unwrap_or(1);
        if batch.len() > slots {
            return Err(IoError::InvalidInputList {
                line: batch[slots].line,
                detail: format!("batch holds {} element(s) but '{}' takes {slots}", batch.len(), spec.name),
            });
        }

        for (b, entry) in batch.iter().enumerate() {
            let path = entry.path_for(index, &spec.name).ok_or_else(|| IoError::InvalidInputList {
                line: entry.line,
                detail: format!("no file for input '{}'", spec.name),
            })?;
            let values = read_raw_f32(path, volume)?;
            tensor.as_mut_slice()[b * volume..(b + 1) * volume].copy_from_slice(&values);
        }
        tensors.insert(spec.name.clone(), tensor);
    }
    Ok(tensors)
}
