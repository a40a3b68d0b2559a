// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for device probing.

/// Errors that can occur when reading device nodes or sysfs entries.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The path exists but could not be read.
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },

    /// The expected device node or sysfs path does not exist.
    #[error("path not found: {path}")]
    NotAvailable { path: String },
}
