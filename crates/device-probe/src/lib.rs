// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # device-probe
//!
//! Answers "is this runtime present on the device?" by looking for the
//! kernel device nodes each accelerator driver exposes under `/dev`, and
//! reads a little descriptive detail from `/sys` when it is there.
//!
//! # Best-effort by design
//! Probing never fails hard. A missing or unreadable node just means the
//! runtime is reported absent; the engine factory remains the authority on
//! whether a runtime can actually be used. Outside a Snapdragon device
//! (containers, x86 hosts) only the CPU runtime reports as available.
//!
//! # Example
//! ```no_run
//! use device_probe::{DeviceProbe, RuntimeAvailability};
//! use dl_system::Runtime;
//!
//! let probe = DeviceProbe::new();
//! if !probe.is_available(Runtime::Dsp) {
//!     println!("no DSP here");
//! }
//! println!("{}", probe.snapshot().summary());
//! ```

mod availability;
mod error;
mod nodes;
mod snapshot;

pub use availability::{DeviceProbe, FixedAvailability, RuntimeAvailability};
pub use error::ProbeError;
pub use snapshot::{AvailabilitySnapshot, RuntimeStatus};
