// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Serialized container document.

use crate::ContainerError;
use dl_system::{Runtime, TensorShape};
use std::collections::HashSet;

/// Top-level container document.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ContainerManifest {
    /// Network name.
    pub name: String,
    /// Whether the network carries fixed-point (quantized) parameters.
    #[serde(default)]
    pub quantized: bool,
    /// Runtimes the network was prepared for. Empty means all.
    #[serde(default)]
    pub runtimes: Vec<Runtime>,
    /// Input layers, in the order the input list names them.
    pub inputs: Vec<LayerSpec>,
    /// Output layers.
    pub outputs: Vec<LayerSpec>,
    /// Init-cache records written by earlier runs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub init_cache: Vec<InitCacheRecord>,
}

/// One input or output layer.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerSpec {
    /// Layer (tensor) name.
    pub name: String,
    /// Dimensions; the first is the batch size. `0` marks a dynamic axis.
    pub dims: TensorShape,
    /// Static quantization encoding, when the network embeds one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<QuantEncoding>,
}

/// Value range of a quantized tensor, TensorFlow style.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct QuantEncoding {
    /// Smallest representable value.
    pub min: f32,
    /// Largest representable value.
    pub max: f32,
}

/// Cached initialization artifact for one runtime.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InitCacheRecord {
    /// Runtime the artifact was produced for.
    pub runtime: Runtime,
    /// Opaque fingerprint of the build configuration that produced it.
    pub fingerprint: String,
}

impl ContainerManifest {
    /// Parses a manifest from a JSON string (without validating it).
    pub fn from_json(json: &str) -> Result<Self, ContainerError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the manifest as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ContainerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks structural consistency.
    ///
    /// Rules:
    /// - the name is non-empty,
    /// - there is at least one input and one output,
    /// - layer names are unique across inputs and outputs,
    /// - every layer has rank ≥ 1,
    /// - input dimensions are all positive (inputs cannot be dynamic),
    /// - encodings have `min < max`.
    pub fn validate(&self) -> Result<(), ContainerError> {
        if self.name.trim().is_empty() {
            return Err(ContainerError::InvalidContainer("network name is empty".into()));
        }
        if self.inputs.is_empty() {
            return Err(ContainerError::InvalidContainer("no input layers declared".into()));
        }
        if self.outputs.is_empty() {
            return Err(ContainerError::InvalidContainer("no output layers declared".into()));
        }

        let mut names = HashSet::new();
        for layer in self.inputs.iter().chain(&self.outputs) {
            if !names.insert(layer.name.as_str()) {
                return Err(ContainerError::InvalidLayer {
                    layer: layer.name.clone(),
                    detail: "layer name declared twice".into(),
                });
            }
            if layer.dims.rank() == 0 {
                return Err(ContainerError::InvalidLayer {
                    layer: layer.name.clone(),
                    detail: "layer has no dimensions".into(),
                });
            }
            if let Some(enc) = layer.encoding {
                if !(enc.min < enc.max) {
                    return Err(ContainerError::InvalidLayer {
                        layer: layer.name.clone(),
                        detail: format!("encoding min {} must be below max {}", enc.min, enc.max),
                    });
                }
            }
        }

        for input in &self.inputs {
            if input.dims.is_dynamic() {
                return Err(ContainerError::InvalidLayer {
                    layer: input.name.clone(),
                    detail: format!("input dimensions {} must all be positive", input.dims),
                });
            }
        }

        Ok(())
    }
}
