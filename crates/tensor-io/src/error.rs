// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for input and output handling.

/// Errors raised while reading inputs or writing results.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// A file could not be opened, mapped or read.
    #[error("cannot read '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A file or directory could not be written.
    #[error("cannot write '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The input list is malformed.
    #[error("input list line {line}: {detail}")]
    InvalidInputList { line: usize, detail: String },

    /// A raw input file does not match the tensor it feeds.
    #[error("raw input '{path}': {detail}")]
    InvalidRawFile { path: String, detail: String },

    /// A batch size of zero was requested.
    #[error("batch size must be positive")]
    InvalidBatchSize,

    /// A quantization encoding could not be derived.
    #[error("invalid quantization encoding: {0}")]
    InvalidEncoding(String),

    /// Tensor construction failed.
    #[error(transparent)]
    Tensor(#[from] dl_system::DlSystemError),
}
