// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Builder configuration handed to an [`EngineFactory`](crate::EngineFactory).
//!
//! A [`BuilderConfig`] is assembled once per run through
//! [`BuilderConfigBuilder`] and then moved into the factory. Every field is
//! carried even when it holds its default, so a factory never has to guess
//! what the caller meant.
//!
//! ```
//! use dl_system::{Runtime, RuntimeList};
//! use engine::BuilderConfig;
//!
//! let config = BuilderConfig::builder()
//!     .output_layers(Vec::new())
//!     .runtime_order(RuntimeList::single(Runtime::Cpu))
//!     .use_user_supplied_buffers(false)
//!     .init_cache_mode(true)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.runtime_order().first(), Some(Runtime::Cpu));
//! assert!(config.init_cache_mode());
//! ```

use crate::RuntimeError;
use dl_system::{PlatformConfig, RuntimeList};

/// Immutable engine build options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderConfig {
    output_layers: Vec<String>,
    runtime_order: RuntimeList,
    use_user_supplied_buffers: bool,
    platform_config: PlatformConfig,
    init_cache_mode: bool,
    cpu_fixed_point_mode: bool,
    static_quantization: bool,
}

impl BuilderConfig {
    /// Starts a new builder with every option at its default.
    pub fn builder() -> BuilderConfigBuilder {
        BuilderConfigBuilder::default()
    }

    /// Requested output layers. Empty means every output the network declares.
    pub fn output_layers(&self) -> &[String] {
        &self.output_layers
    }

    /// Runtimes in precedence order. Never empty.
    pub fn runtime_order(&self) -> &RuntimeList {
        &self.runtime_order
    }

    /// Whether inputs and outputs live in caller-supplied buffers.
    pub fn use_user_supplied_buffers(&self) -> bool {
        self.use_user_supplied_buffers
    }

    /// Platform options forwarded verbatim.
    pub fn platform_config(&self) -> &PlatformConfig {
        &self.platform_config
    }

    /// Whether initialization artifacts are cached into the container.
    pub fn init_cache_mode(&self) -> bool {
        self.init_cache_mode
    }

    /// Whether the CPU runtime executes in fixed point.
    pub fn cpu_fixed_point_mode(&self) -> bool {
        self.cpu_fixed_point_mode
    }

    /// Whether static (container-embedded) quantization encodings are used.
    pub fn static_quantization(&self) -> bool {
        self.static_quantization
    }

    /// One-line summary for logging.
    pub fn summary(&self) -> String {
        let outputs = if self.output_layers.is_empty() {
            "all".to_string()
        } else {
            self.output_layers.join(", ")
        };
        format!(
            "runtimes {}, outputs: {outputs}, user buffers {}, init cache {}, cpu fixed point {}, static quantization {}, platform options '{}'",
            self.runtime_order,
            on_off(self.use_user_supplied_buffers),
            on_off(self.init_cache_mode),
            on_off(self.cpu_fixed_point_mode),
            on_off(self.static_quantization),
            self.platform_config,
        )
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

/// Step-by-step constructor for [`BuilderConfig`].
#[derive(Debug, Clone, Default)]
pub struct BuilderConfigBuilder {
    output_layers: Vec<String>,
    runtime_order: Option<RuntimeList>,
    use_user_supplied_buffers: bool,
    platform_config: PlatformConfig,
    init_cache_mode: bool,
    cpu_fixed_point_mode: bool,
    static_quantization: bool,
}

impl BuilderConfigBuilder {
    /// Sets the requested output layers.
    pub fn output_layers(mut self, layers: Vec<String>) -> Self {
        self.output_layers = layers;
        self
    }

    /// Sets the full runtime processor order.
    pub fn runtime_order(mut self, order: RuntimeList) -> Self {
        self.runtime_order = Some(order);
        self
    }

    /// Sets the user-supplied-buffer flag.
    pub fn use_user_supplied_buffers(mut self, enabled: bool) -> Self {
        self.use_user_supplied_buffers = enabled;
        self
    }

    /// Sets the platform options.
    pub fn platform_config(mut self, config: PlatformConfig) -> Self {
        self.platform_config = config;
        self
    }

    /// Sets init-cache mode.
    pub fn init_cache_mode(mut self, enabled: bool) -> Self {
        self.init_cache_mode = enabled;
        self
    }

    /// Sets CPU fixed-point mode.
    pub fn cpu_fixed_point_mode(mut self, enabled: bool) -> Self {
        self.cpu_fixed_point_mode = enabled;
        self
    }

    /// Sets the static quantization policy.
    pub fn static_quantization(mut self, enabled: bool) -> Self {
        self.static_quantization = enabled;
        self
    }

    /// Finishes the configuration.
    ///
    /// Fails if no runtime order was set or the order is empty.
    pub fn build(self) -> Result<BuilderConfig, RuntimeError> {
        let runtime_order = self
            .runtime_order
            .ok_or_else(|| RuntimeError::InvalidConfig("no runtime order set".into()))?;
        if runtime_order.is_empty() {
            return Err(RuntimeError::InvalidConfig("runtime order is empty".into()));
        }
        Ok(BuilderConfig {
            output_layers: self.output_layers,
            runtime_order,
            use_user_supplied_buffers: self.use_user_supplied_buffers,
            platform_config: self.platform_config,
            init_cache_mode: self.init_cache_mode,
            cpu_fixed_point_mode: self.cpu_fixed_point_mode,
            static_quantization: self.static_quantization,
        })
    }
}
