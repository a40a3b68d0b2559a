// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tensor-io
//!
//! Everything between files on disk and the engine's tensor maps:
//!
//! - [`InputList`] parses input lists and groups their elements into batches.
//! - [`assemble_batch`] reads raw `f32` files (memory-mapped) into a
//!   [`TensorMap`](dl_system::TensorMap), zero-padding short batches.
//! - [`TfEncoding`] / [`quantize_inputs`] model 8- and 16-bit quantized
//!   user buffers.
//! - [`OutputWriter`] writes results as `Result_<n>/<layer>.raw`.
//!
//! # Example
//! ```no_run
//! use tensor_io::{assemble_batch, InputList, OutputWriter};
//! # fn example(inputs: &[container::LayerSpec]) -> Result<(), tensor_io::IoError> {
//! let list = InputList::load("target_raw_list.txt".as_ref())?;
//! let writer = OutputWriter::new("output");
//! for (n, batch) in list.batches(1)?.into_iter().enumerate() {
//!     let tensors = assemble_batch(inputs, batch)?;
//!     writer.write_batch(n, batch.len(), &tensors)?;
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod input_list;
mod output;
mod quant;
mod raw;

pub use error::IoError;
pub use input_list::{InputEntry, InputItem, InputList};
pub use output::{sanitize_layer_name, OutputWriter};
pub use quant::{quantize_inputs, TfEncoding};
pub use raw::{assemble_batch, read_raw_f32};
