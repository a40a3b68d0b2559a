// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for engine construction and execution.

/// Errors that can occur while configuring, building or running an engine.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// The factory could not produce an engine for the given configuration.
    #[error("engine build failed: {detail}")]
    BuildFailure { detail: String },

    /// An extension package could not be registered.
    #[error("failed to load extension package '{package}': {detail}")]
    ExtensionLoadFailure { package: String, detail: String },

    /// The engine rejected its inputs or failed while executing.
    #[error("execution error: {0}")]
    ExecutionError(String),

    /// The builder configuration is incomplete or inconsistent.
    #[error("invalid builder configuration: {0}")]
    InvalidConfig(String),
}
