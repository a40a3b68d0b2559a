// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The reference engine: a deterministic stand-in for a vendor engine.
//!
//! It honours the parts of the contract the harness depends on (runtime
//! placement, output selection, batch size, init caching) and replaces
//! numeric inference with a projection: every element of batch entry `b`
//! in output `o` is
//!
//! ```text
//! mean(all input values of entry b) + j / volume(o)
//! ```
//!
//! where `j` is the element's position inside the entry.

use crate::{BuilderConfig, Engine, EngineFactory, RuntimeError};
use container::{Container, InitCacheRecord, LayerSpec};
use device_probe::RuntimeAvailability;
use dl_system::{Runtime, Tensor, TensorMap, TensorShape};

/// Factory for [`ReferenceEngine`]s.
///
/// Placement walks the runtime order and picks the first runtime that the
/// container supports and `availability` reports present. Fixed-point
/// runtimes, and the CPU in fixed-point mode, also need a quantized
/// container.
#[derive(Debug, Clone)]
pub struct ReferenceFactory<A: RuntimeAvailability> {
    availability: A,
}

impl<A: RuntimeAvailability> ReferenceFactory<A> {
    /// Creates a factory that places engines using `availability`.
    pub fn new(availability: A) -> Self {
        Self { availability }
    }

    fn place(&self, container: &Container, config: &BuilderConfig) -> Result<Runtime, RuntimeError> {
        for runtime in config.runtime_order() {
            if !container.supports(runtime) {
                tracing::debug!("skipping {runtime}: '{}' was not prepared for it", container.name());
                continue;
            }
            if !self.availability.is_available(runtime) {
                tracing::debug!("skipping {runtime}: not present on this device");
                continue;
            }
            let needs_quantized = runtime.is_fixed_point()
                || (runtime == Runtime::Cpu && config.cpu_fixed_point_mode());
            if needs_quantized && !container.is_quantized() {
                tracing::debug!("skipping {runtime}: fixed-point execution needs a quantized network");
                continue;
            }
            return Ok(runtime);
        }
        Err(RuntimeError::BuildFailure {
            detail: format!(
                "no runtime in {} can run '{}' on this device",
                config.runtime_order(),
                container.name(),
            ),
        })
    }
}

impl<A: RuntimeAvailability> EngineFactory for ReferenceFactory<A> {
    fn name(&self) -> &str {
        "reference"
    }

    fn build<'c>(
        &self,
        container: &'c Container,
        config: BuilderConfig,
    ) -> Result<Box<dyn Engine + 'c>, RuntimeError> {
        let outputs: Vec<&'c LayerSpec> = if config.output_layers().is_empty() {
            container.outputs().iter().collect()
        } else {
            config
                .output_layers()
                .iter()
                .map(|name| {
                    container.output(name).ok_or_else(|| RuntimeError::BuildFailure {
                        detail: format!("'{}' has no output layer '{name}'", container.name()),
                    })
                })
                .collect::<Result<_, _>>()?
        };

        let runtime = self.place(container, &config)?;

        let fingerprint = fingerprint(runtime, &config);
        let loaded_from_cache = config.init_cache_mode()
            && container
                .init_cache_for(runtime)
                .is_some_and(|r| r.fingerprint == fingerprint);
        let cache_record = config.init_cache_mode().then(|| InitCacheRecord {
            runtime,
            fingerprint,
        });

        Ok(Box::new(ReferenceEngine {
            container,
            runtime,
            outputs,
            cache_record,
            loaded_from_cache,
        }))
    }
}

/// Describes the build options that affect initialization on `runtime`.
fn fingerprint(runtime: Runtime, config: &BuilderConfig) -> String {
    format!(
        "{runtime};user_buffers={};cpu_fixed_point={};static_quantization={};platform={}",
        config.use_user_supplied_buffers(),
        config.cpu_fixed_point_mode(),
        config.static_quantization(),
        config.platform_config(),
    )
}

/// Engine produced by [`ReferenceFactory`].
#[derive(Debug)]
pub struct ReferenceEngine<'c> {
    container: &'c Container,
    runtime: Runtime,
    outputs: Vec<&'c LayerSpec>,
    cache_record: Option<InitCacheRecord>,
    loaded_from_cache: bool,
}

impl ReferenceEngine<'_> {
    fn check_inputs(&self, inputs: &TensorMap) -> Result<(), RuntimeError> {
        for spec in self.container.inputs() {
            let tensor = inputs
                .get(&spec.name)
                .ok_or_else(|| RuntimeError::ExecutionError(format!("missing input '{}'", spec.name)))?;
            if tensor.shape() != &spec.dims {
                return Err(RuntimeError::ExecutionError(format!(
                    "input '{}' has shape {}, expected {}",
                    spec.name,
                    tensor.shape(),
                    spec.dims,
                )));
            }
        }
        Ok(())
    }

    /// Mean of every input value belonging to each batch entry.
    fn entry_means(&self, inputs: &TensorMap, batch: usize) -> Vec<f32> {
        let mut sums = vec![0.0f64; batch];
        let mut counts = vec![0usize; batch];
        for spec in self.container.inputs() {
            let Some(tensor) = inputs.get(&spec.name) else {
                continue;
            };
            let volume = spec.dims.element_volume();
            for (b, chunk) in tensor.as_slice().chunks(volume.max(1)).take(batch).enumerate() {
                sums[b] += chunk.iter().map(|&v| f64::from(v)).sum::<f64>();
                counts[b] += chunk.len();
            }
        }
        sums.iter()
            .zip(&counts)
            .map(|(&s, &n)| if n == 0 { 0.0 } else { (s / n as f64) as f32 })
            .collect()
    }
}

impl Engine for ReferenceEngine<'_> {
    fn runtime(&self) -> Runtime {
        self.runtime
    }

    fn input_shape(&self) -> &TensorShape {
        self.container.input_shape()
    }

    fn output_names(&self) -> Vec<&str> {
        self.outputs.iter().map(|l| l.name.as_str()).collect()
    }

    fn execute(&mut self, inputs: &TensorMap) -> Result<TensorMap, RuntimeError> {
        self.check_inputs(inputs)?;
        let batch = self.input_shape().batch_size().unwrap_or(1);
        let means = self.entry_means(inputs, batch);

        let mut results = TensorMap::new();
        for spec in &self.outputs {
            let shape = spec.dims.resolve_dynamic(1).with_batch_size(batch);
            let volume = shape.element_volume();
            let data: Vec<f32> = means
                .iter()
                .flat_map(|&m| (0..volume).map(move |j| m + j as f32 / volume as f32))
                .collect();
            let tensor = Tensor::from_vec(shape, data)
                .map_err(|e| RuntimeError::ExecutionError(format!("output '{}': {e}", spec.name)))?;
            results.insert(spec.name.clone(), tensor);
        }
        tracing::debug!("executed {} output(s) on {}", results.len(), self.runtime);
        Ok(results)
    }

    fn init_cache_record(&self) -> Option<InitCacheRecord> {
        self.cache_record.clone()
    }

    fn loaded_from_cache(&self) -> bool {
        self.loaded_from_cache
    }
}
