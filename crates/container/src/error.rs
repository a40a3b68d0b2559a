// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for container loading and saving.

/// Errors that can occur when working with containers.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    /// The container file could not be read.
    #[error("failed to read container '{path}': {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },

    /// The container JSON is malformed.
    #[error("failed to parse container: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The container could not be written back.
    #[error("failed to write container '{path}': {source}")]
    WriteError {
        path: String,
        source: std::io::Error,
    },

    /// A layer declaration is invalid.
    #[error("invalid layer '{layer}': {detail}")]
    InvalidLayer { layer: String, detail: String },

    /// The container as a whole is malformed.
    #[error("invalid container: {0}")]
    InvalidContainer(String),
}
