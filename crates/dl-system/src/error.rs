// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the shared vocabulary.

use crate::{Runtime, TensorShape};

/// Errors raised while parsing or assembling the shared types.
#[derive(Debug, thiserror::Error)]
pub enum DlSystemError {
    /// A runtime name did not match any entry of the name table.
    #[error("unknown runtime '{0}'")]
    UnknownRuntime(String),

    /// A runtime was added to a [`crate::RuntimeList`] that already holds it.
    #[error("runtime {0} is already present in the runtime order")]
    DuplicateRuntime(Runtime),

    /// The buffer type string is not one of the supported modes.
    #[error(
        "buffer type '{0}' is not valid; expected USERBUFFER_FLOAT, USERBUFFER_TF8, USERBUFFER_TF16 or ITENSOR"
    )]
    InvalidBufferType(String),

    /// The user buffer source string is not recognised or not usable.
    #[error("user buffer source '{value}' is not valid: {detail}")]
    InvalidUserBufferSource { value: String, detail: String },

    /// A platform option entry is malformed.
    #[error("invalid platform options '{0}'; expected 'key:value' pairs separated by ';'")]
    InvalidPlatformOptions(String),

    /// The element count of a buffer does not match its shape.
    #[error("tensor shape {shape} needs {expected} elements, got {actual}")]
    ElementCountMismatch {
        shape: TensorShape,
        expected: usize,
        actual: usize,
    },
}
