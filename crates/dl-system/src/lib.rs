// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # dl-system
//!
//! The vocabulary shared by every crate in the harness:
//!
//! - [`Runtime`]: one hardware execution target (CPU, GPU, DSP, AIP).
//! - [`RuntimeList`]: an ordered, duplicate-free runtime preference list.
//! - [`BufferType`] / [`UserBufferSource`]: how input/output memory is supplied.
//! - [`PlatformConfig`]: opaque platform options forwarded to the engine.
//! - [`TensorShape`], [`Tensor`], [`TensorMap`]: minimal f32 tensor carriers.
//!
//! Nothing in this crate performs I/O; every type is cheap to construct in
//! tests.
//!
//! # Example
//! ```
//! use dl_system::{Runtime, RuntimeList};
//!
//! let mut order = RuntimeList::new();
//! order.add(Runtime::Gpu).unwrap();
//! order.add(Runtime::Cpu).unwrap();
//! assert!(order.add(Runtime::from_name("cpu_float32").unwrap()).is_err());
//! assert_eq!(order.to_string(), "[gpu_float32_16_hybrid, cpu_float32]");
//! ```

mod buffer;
mod error;
mod platform;
mod runtime;
mod runtime_list;
mod shape;
mod tensor;

pub use buffer::{BufferType, UserBufferSource};
pub use error::DlSystemError;
pub use platform::PlatformConfig;
pub use runtime::Runtime;
pub use runtime_list::RuntimeList;
pub use shape::TensorShape;
pub use tensor::{Tensor, TensorMap};
