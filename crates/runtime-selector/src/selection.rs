// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Runtime selection: mutual exclusion, normalization and the soft
//! availability check.

use crate::{parse_runtime_order, SelectionError};
use device_probe::RuntimeAvailability;
use dl_system::{Runtime, RuntimeList};

/// Command-line spelling of the single-runtime option.
pub const RUNTIME_OPTION: &str = "-r";

/// Command-line spelling of the runtime-order option.
pub const RUNTIME_ORDER_OPTION: &str = "-l";

/// The raw runtime options of one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeRequest {
    /// Single runtime name (`-r`), if given.
    pub runtime: Option<String>,
    /// Comma-separated runtime order (`-l`), if given.
    pub runtime_order: Option<String>,
    /// Whether static quantization (`-q true`) was requested.
    pub static_quantization: bool,
}

/// A validated runtime choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeSelection {
    /// Runtimes in precedence order. Never empty.
    pub order: RuntimeList,
    /// Resolved static-quantization policy.
    pub static_quantization: bool,
    /// `true` if the user named the runtime(s) rather than taking the CPU default.
    pub explicit: bool,
}

impl RuntimeSelection {
    /// One-line summary for logging.
    pub fn summary(&self) -> String {
        format!(
            "runtime order {} ({}), static quantization {}",
            self.order,
            if self.explicit { "requested" } else { "default" },
            if self.static_quantization { "on" } else { "off" },
        )
    }
}

/// Validates `request` and resolves it into a [`RuntimeSelection`].
///
/// Steps:
/// 1. Reject `-r` combined with a non-empty `-l`.
/// 2. Parse `-l` (duplicates first, then names).
/// 3. Otherwise resolve `-r`, falling back to CPU on an unknown name.
/// 4. For an explicit `-r`, drop static quantization on runtimes that are
///    not fixed point, and warn (without failing) if the runtime is absent.
/// 5. Wrap a single runtime into a one-element list.
pub fn select_runtimes(
    request: &RuntimeRequest,
    availability: &dyn RuntimeAvailability,
) -> Result<RuntimeSelection, SelectionError> {
    let order_given = request
        .runtime_order
        .as_deref()
        .is_some_and(|csv| !csv.trim().is_empty());

    if request.runtime.is_some() && order_given {
        return Err(SelectionError::ConflictingRuntimeSelection {
            runtime_option: RUNTIME_OPTION.to_string(),
            order_option: RUNTIME_ORDER_OPTION.to_string(),
        });
    }

    if let Some(csv) = request.runtime_order.as_deref() {
        tracing::info!("runtime order input: {csv}");
        let order = parse_runtime_order(RUNTIME_ORDER_OPTION, csv)?;
        return Ok(RuntimeSelection {
            order,
            static_quantization: request.static_quantization,
            explicit: true,
        });
    }

    let Some(name) = request.runtime.as_deref() else {
        return Ok(RuntimeSelection {
            order: RuntimeList::single(Runtime::Cpu),
            static_quantization: request.static_quantization,
            explicit: false,
        });
    };

    let runtime = Runtime::from_name(name).unwrap_or_else(|| {
        tracing::warn!("the runtime option '{name}' is not valid; defaulting to the CPU runtime");
        Runtime::Cpu
    });

    let mut static_quantization = request.static_quantization;
    if static_quantization && !runtime.is_fixed_point() {
        tracing::warn!(
            "static quantization is only designed for DSP/AIP runtimes; proceeding without it on {runtime}"
        );
        static_quantization = false;
    }

    if !availability.is_available(runtime) {
        tracing::warn!(
            "selected runtime {runtime} ({}) does not appear to be present; continuing, the engine build will decide",
            runtime.hardware(),
        );
    }

    Ok(RuntimeSelection {
        order: RuntimeList::single(runtime),
        static_quantization,
        explicit: true,
    })
}
