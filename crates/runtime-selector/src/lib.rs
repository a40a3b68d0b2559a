// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # runtime-selector
//!
//! Turns the user's runtime options into a validated [`RuntimeSelection`]:
//! an ordered, duplicate-free [`RuntimeList`](dl_system::RuntimeList) of at
//! least one entry plus the resolved static-quantization policy.
//!
//! # Rules
//!
//! | Input | Outcome |
//! |---|---|
//! | nothing | `[cpu_float32]` |
//! | `-r <name>` | one-element list; unknown name warns and falls back to CPU |
//! | `-l <a,b,c>` | list in the given order |
//! | `-r` and `-l` | [`SelectionError::ConflictingRuntimeSelection`] |
//! | repeated token in `-l` | [`SelectionError::DuplicateRuntimeToken`] (checked before names are resolved) |
//! | unknown token in `-l` | [`SelectionError::UnknownRuntimeToken`] |
//!
//! Availability of an explicitly requested runtime is checked but never
//! fatal: an absent runtime only produces a warning, and the engine build is
//! left to fail authoritatively.
//!
//! # Example
//! ```
//! use device_probe::FixedAvailability;
//! use dl_system::Runtime;
//! use runtime_selector::{select_runtimes, RuntimeRequest};
//!
//! let request = RuntimeRequest {
//!     runtime_order: Some("dsp,cpu".into()),
//!     ..Default::default()
//! };
//! let selection = select_runtimes(&request, &FixedAvailability::cpu_only()).unwrap();
//! assert_eq!(selection.order.as_slice(), &[Runtime::Dsp, Runtime::Cpu]);
//! ```

mod error;
mod order;
mod selection;

pub use error::SelectionError;
pub use order::parse_runtime_order;
pub use selection::{
    select_runtimes, RuntimeRequest, RuntimeSelection, RUNTIME_OPTION, RUNTIME_ORDER_OPTION,
};
