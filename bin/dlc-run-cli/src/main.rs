// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # dlc-run
//!
//! Loads a network container, picks a runtime, builds an engine and runs the
//! inputs of an input list through it.
//!
//! ## Usage
//! ```bash
//! # CPU, default tensors
//! dlc-run -d inception_v3.dlc -i target_raw_list.txt -o output
//!
//! # Prefer the DSP, fall back to GPU then CPU, 8-bit user buffers
//! dlc-run -d inception_v3_quantized.dlc -i target_raw_list.txt -l dsp,gpu,cpu -b USERBUFFER_TF8
//!
//! # Defaults from a file, with init caching
//! dlc-run --config harness.toml -c
//! ```
//!
//! Every failure exits with status 1.

mod config;
mod logging;
mod options;
mod run;

use clap::error::ErrorKind;
use clap::Parser;
use config::HarnessConfig;
use options::RawOptions;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "dlc-run",
    about = "Load a network container and run it on a selected runtime",
    version,
    author
)]
struct Cli {
    /// Path to the network container.
    #[arg(short = 'd', long = "container", value_name = "FILE")]
    container: Option<PathBuf>,

    /// Path to a file listing the inputs for the network.
    #[arg(short = 'i', long = "input-list", value_name = "FILE")]
    input_list: Option<PathBuf>,

    /// Directory to store output results [default: ./output/].
    #[arg(short = 'o', long = "output-dir", value_name = "PATH")]
    output_dir: Option<PathBuf>,

    /// Buffer type: USERBUFFER_FLOAT, USERBUFFER_TF8, USERBUFFER_TF16 or ITENSOR [default: ITENSOR].
    #[arg(short = 'b', long = "buffer-type", value_name = "TYPE")]
    buffer_type: Option<String>,

    /// Use the static quantization encodings of the network instead of
    /// per-input ones (true or false) [default: false].
    #[arg(short = 'q', long = "static-quantization", value_name = "BOOL")]
    static_quantization: Option<String>,

    /// Source of user buffers with USERBUFFER_FLOAT: CPUBUFFER or GLBUFFER [default: CPUBUFFER].
    #[arg(short = 's', long = "user-buffer-source", value_name = "TYPE")]
    user_buffer_source: Option<String>,

    /// Runtime to use: cpu, gpu, dsp or aip [default: cpu].
    #[arg(short = 'r', long = "runtime", value_name = "RUNTIME")]
    runtime: Option<String>,

    /// Runtime order of precedence, e.g. dsp_fixed8_tf,gpu_float32_16_hybrid,cpu_float32.
    #[arg(short = 'l', long = "runtime-order", value_name = "VAL,VAL")]
    runtime_order: Option<String>,

    /// Cache initialization artifacts into the container.
    #[arg(short = 'c', long = "init-caching")]
    init_caching: bool,

    /// Comma-separated extension package paths.
    #[arg(short = 'u', long = "extension-packages", value_name = "VAL,VAL")]
    extension_packages: Option<String>,

    /// Fixed-point execution on the CPU runtime (quantized networks only).
    #[arg(short = 'x', long = "cpu-fixed-point")]
    cpu_fixed_point: bool,

    /// Largest size a resizable output dimension can grow to; sizes user buffers.
    #[arg(short = 'z', long = "resizable-dim", value_name = "NUMBER")]
    resizable_dim: Option<String>,

    /// Platform options as key:value pairs separated by ';'.
    #[arg(short = 'p', long = "platform-options", value_name = "OPTIONS")]
    platform_options: Option<String>,

    /// TOML file with default values; command-line values win.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Collects the option values, filling gaps from `--config`.
    fn into_raw_options(self) -> anyhow::Result<RawOptions> {
        let raw = RawOptions {
            container: self.container,
            input_list: self.input_list,
            output_dir: self.output_dir,
            buffer_type: self.buffer_type,
            static_quantization: self.static_quantization,
            user_buffer_source: self.user_buffer_source,
            runtime: self.runtime,
            runtime_order: self.runtime_order,
            init_caching: self.init_caching,
            extension_packages: self.extension_packages,
            cpu_fixed_point: self.cpu_fixed_point,
            resizable_dim: self.resizable_dim,
            platform_options: self.platform_options,
        };
        match self.config {
            Some(path) => Ok(raw.merge(HarnessConfig::from_file(&path)?)),
            None => Ok(raw),
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                return ExitCode::FAILURE;
            }
        },
    };

    logging::init_tracing(cli.verbose);

    match cli.into_raw_options().and_then(run::execute) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
