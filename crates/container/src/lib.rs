// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # container
//!
//! Loads the network container the harness runs: a JSON document naming
//! the network, its input and output layers with their dimensions, the
//! runtimes it was prepared for, and any init-cache records stored by
//! earlier runs.
//!
//! # Format
//! ```json
//! {
//!   "name": "inception_v3",
//!   "quantized": false,
//!   "runtimes": ["cpu", "gpu"],
//!   "inputs":  [{ "name": "input:0", "dims": [1, 299, 299, 3],
//!                "encoding": { "min": 0.0, "max": 1.0 } }],
//!   "outputs": [{ "name": "softmax:0", "dims": [1, 1001] }],
//!   "init_cache": [{ "runtime": "cpu_float32", "fingerprint": "9f2c41d07a3be815" }]
//! }
//! ```
//!
//! An empty or missing `runtimes` list means every runtime is supported.
//!
//! # Example
//! ```no_run
//! use container::Container;
//! use std::path::Path;
//!
//! let container = Container::load(Path::new("inception_v3.dlc")).unwrap();
//! println!("{}", container.summary());
//! ```

mod container;
mod error;
mod manifest;

pub use container::Container;
pub use error::ContainerError;
pub use manifest::{ContainerManifest, InitCacheRecord, LayerSpec, QuantEncoding};
