// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The engine contract.
//!
//! ```text
//! Container ──┐
//!             ├──► EngineFactory::build ──► Box<dyn Engine + 'c>
//! BuilderConfig┘                                │  .input_shape()
//!                                               │  .execute(inputs)
//!                                               ▼
//!                                           TensorMap
//! ```
//!
//! An engine borrows the container it was built from, so the borrow checker
//! guarantees the container outlives it.

use crate::{BuilderConfig, RuntimeError};
use container::{Container, InitCacheRecord};
use dl_system::{Runtime, TensorMap, TensorShape};

/// A built, ready-to-run inference engine.
pub trait Engine {
    /// The runtime the engine was placed on.
    fn runtime(&self) -> Runtime;

    /// Dimensions of the first input; the first dimension is the batch size.
    fn input_shape(&self) -> &TensorShape;

    /// Names of the outputs `execute` produces.
    fn output_names(&self) -> Vec<&str>;

    /// Runs one inference pass.
    fn execute(&mut self, inputs: &TensorMap) -> Result<TensorMap, RuntimeError>;

    /// Init-cache record to persist into the container, when init-cache
    /// mode is on.
    fn init_cache_record(&self) -> Option<InitCacheRecord>;

    /// Whether initialization was satisfied from a cached record.
    fn loaded_from_cache(&self) -> bool;
}

/// Produces engines from a container and a configuration.
pub trait EngineFactory {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Builds an engine. The configuration is consumed.
    fn build<'c>(
        &self,
        container: &'c Container,
        config: BuilderConfig,
    ) -> Result<Box<dyn Engine + 'c>, RuntimeError>;
}

/// Builds one engine through `factory`.
///
/// The factory is called exactly once; nothing is cached between calls.
pub fn build_engine<'c>(
    factory: &dyn EngineFactory,
    container: &'c Container,
    config: BuilderConfig,
) -> Result<Box<dyn Engine + 'c>, RuntimeError> {
    tracing::info!("building engine with '{}': {}", factory.name(), config.summary());
    let engine = factory.build(container, config)?;
    tracing::info!(
        "engine ready on {} (input shape {}, cached init: {})",
        engine.runtime(),
        engine.input_shape(),
        engine.loaded_from_cache(),
    );
    Ok(engine)
}
