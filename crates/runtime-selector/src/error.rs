// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for runtime selection.

/// Errors that reject a runtime selection outright.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// Both a single runtime and a runtime order were supplied.
    #[error("invalid option: cannot mix runtime order {order_option} with runtime {runtime_option}")]
    ConflictingRuntimeSelection {
        runtime_option: String,
        order_option: String,
    },

    /// The runtime order names the same runtime more than once.
    #[error(
        "invalid values passed to the argument {option}: duplicate entry '{token}' in runtime order '{list}'"
    )]
    DuplicateRuntimeToken {
        option: String,
        list: String,
        token: String,
    },

    /// The runtime order contains a name outside the runtime table.
    #[error(
        "invalid values passed to the argument {option}: unknown runtime '{token}'; please provide a comma-separated runtime order of precedence"
    )]
    UnknownRuntimeToken { option: String, token: String },
}
