// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The harness workflow.
//!
//! ```text
//! resolve options ─► load container ─► register extensions ─► read input list
//!        ─► BuilderConfig ─► build engine ─► (save init cache)
//!        ─► per batch: read raw inputs ─► encode user buffers ─► execute ─► write results
//! ```

use crate::options::{HarnessOptions, RawOptions};
use anyhow::{bail, Context};
use container::Container;
use device_probe::DeviceProbe;
use dl_system::TensorMap;
use engine::{
    build_engine, load_extension_packages, BuilderConfig, Engine, EngineFactory,
    FsExtensionLoader, ReferenceFactory, RunMetrics,
};
use std::time::Instant;
use tensor_io::{assemble_batch, quantize_inputs, InputList, OutputWriter};

/// Validates `raw` against the local device and runs the harness with the
/// reference engine.
pub fn execute(raw: RawOptions) -> anyhow::Result<()> {
    let probe = DeviceProbe::new();
    tracing::debug!("{}", probe.snapshot().summary());

    let options = HarnessOptions::resolve(raw, &probe)?;
    tracing::info!("{}", options.selection.summary());

    let factory = ReferenceFactory::new(probe);
    run_with(&options, &factory)
}

/// Runs the workflow with validated options and the given factory.
pub fn run_with(options: &HarnessOptions, factory: &dyn EngineFactory) -> anyhow::Result<()> {
    let mut metrics = RunMetrics::new();

    let start = Instant::now();
    let container = Container::load(&options.container).context("Error while opening the container file")?;
    metrics.load_duration = start.elapsed();

    let mut loader = FsExtensionLoader::new();
    load_extension_packages(&mut loader, &options.extension_packages)
        .context("Failed to load extension package(s)")?;

    let input_list = InputList::load(&options.input_list).context("Error while reading the input list")?;

    let config = BuilderConfig::builder()
        .output_layers(input_list.output_layers().to_vec())
        .runtime_order(options.selection.order.clone())
        .use_user_supplied_buffers(options.buffer_type.uses_user_buffers())
        .platform_config(options.platform_config.clone())
        .init_cache_mode(options.init_caching)
        .cpu_fixed_point_mode(options.cpu_fixed_point)
        .static_quantization(options.selection.static_quantization)
        .build()?;

    let start = Instant::now();
    let mut engine = build_engine(factory, &container, config).context("Error while building object")?;
    metrics.build_duration = start.elapsed();

    if options.init_caching {
        save_init_cache(&container, &*engine, options);
    }

    let shape = engine.input_shape().clone();
    let batch_size = shape.batch_size().unwrap_or(1);
    println!("batchSize = {batch_size}");
    for dim in shape.dims().iter().skip(1) {
        println!("{dim}");
    }

    let capacities = buffer_capacities(&container, &*engine, options);
    let writer = OutputWriter::new(&options.output_dir);
    let mut first = 0;
    for batch in input_list.batches(batch_size)? {
        let mut inputs = assemble_batch(container.inputs(), batch)?;
        if let Some(bits) = options.buffer_type.bit_width() {
            quantize_inputs(
                &mut inputs,
                container.inputs(),
                bits,
                options.selection.static_quantization,
            )?;
        }

        let start = Instant::now();
        let outputs = engine.execute(&inputs)?;
        let execute = start.elapsed();

        if let Some(capacities) = &capacities {
            check_capacities(capacities, &outputs)?;
        }

        let start = Instant::now();
        writer.write_batch(first, batch.len(), &outputs)?;
        metrics.record_batch(execute, start.elapsed());
        first += batch.len();
    }

    tracing::info!("{}", metrics.summary());
    println!(
        "Wrote results for {first} input(s) to {}",
        writer.root().display()
    );
    Ok(())
}

/// Persists the engine's init-cache record. Failure is reported but not fatal.
fn save_init_cache(container: &Container, engine: &dyn Engine, options: &HarnessOptions) {
    let Some(record) = engine.init_cache_record() else {
        return;
    };
    if engine.loaded_from_cache() {
        tracing::info!("init cache for {} already present", record.runtime);
    }
    match container.save_with_cache(&options.container, &[record]) {
        Ok(()) => println!("Saved container into archive successfully"),
        Err(e) => {
            tracing::warn!("{e}");
            println!("Failed to save container into archive");
        }
    }
}

/// User-buffer sizes per output, in values. `None` without user buffers.
///
/// Dynamic dimensions are sized with the resizable-dimension hint.
fn buffer_capacities(
    container: &Container,
    engine: &dyn Engine,
    options: &HarnessOptions,
) -> Option<Vec<(String, usize)>> {
    if !options.buffer_type.uses_user_buffers() {
        return None;
    }
    let hint = options.resizable_dim.unwrap_or(1);
    let capacities: Vec<(String, usize)> = engine
        .output_names()
        .into_iter()
        .filter_map(|name| {
            let spec = container.output(name)?;
            let dims = spec.dims.resolve_dynamic(hint);
            tracing::debug!("user buffer for '{name}': {} ({})", dims, options.buffer_type);
            Some((name.to_string(), dims.num_elements()))
        })
        .collect();
    Some(capacities)
}

fn check_capacities(capacities: &[(String, usize)], outputs: &TensorMap) -> anyhow::Result<()> {
    for (name, capacity) in capacities {
        if let Some(tensor) = outputs.get(name) {
            if tensor.len() > *capacity {
                bail!(
                    "output '{name}' produced {} values but its user buffer holds {capacity}; raise the resizable dimension (-z)",
                    tensor.len()
                );
            }
        }
    }
    Ok(())
}
