// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # engine
//!
//! The boundary between the harness and the inference engine library.
//!
//! - [`BuilderConfig`] gathers every build option into one immutable value.
//! - [`EngineFactory`] turns a `Container` and a `BuilderConfig` into a
//!   [`Engine`] that borrows the container.
//! - [`ReferenceFactory`] is the built-in factory; it places the network on
//!   the first usable runtime and runs a deterministic projection.
//! - [`ExtensionLoader`] registers extension packages before the build.
//! - [`RunMetrics`] times each phase of a run.
//!
//! # Example
//! ```no_run
//! use container::Container;
//! use device_probe::DeviceProbe;
//! use dl_system::{Runtime, RuntimeList};
//! use engine::{build_engine, BuilderConfig, ReferenceFactory};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let container = Container::load("inception_v3.dlc".as_ref())?;
//! let config = BuilderConfig::builder()
//!     .runtime_order(RuntimeList::single(Runtime::Cpu))
//!     .build()?;
//! let factory = ReferenceFactory::new(DeviceProbe::new());
//! let engine = build_engine(&factory, &container, config)?;
//! println!("batchSize = {}", engine.input_shape().batch_size().unwrap_or(1));
//! # Ok(())
//! # }
//! ```

mod config;
mod engine;
mod error;
mod extension;
mod metrics;
mod reference;

pub use config::{BuilderConfig, BuilderConfigBuilder};
pub use engine::{build_engine, Engine, EngineFactory};
pub use error::RuntimeError;
pub use extension::{load_extension_packages, ExtensionLoader, FsExtensionLoader};
pub use metrics::RunMetrics;
pub use reference::{ReferenceEngine, ReferenceFactory};
