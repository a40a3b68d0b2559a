// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! TensorFlow-style fixed-point encoding for quantized user buffers.
//!
//! An encoding maps `[min, max]` onto `0..=2^bits - 1` with a uniform step.
//! The range is first widened to include zero and then shifted so that zero
//! falls exactly on a quantization level.

use crate::IoError;
use container::LayerSpec;
use dl_system::{Tensor, TensorMap};

/// A fixed-point encoding for one tensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TfEncoding {
    min: f32,
    max: f32,
    step: f32,
    bit_width: u8,
}

impl TfEncoding {
    /// Creates an encoding for `[min, max]` at `bit_width` (8 or 16) bits.
    pub fn new(min: f32, max: f32, bit_width: u8) -> Result<Self, IoError> {
        if bit_width != 8 && bit_width != 16 {
            return Err(IoError::InvalidEncoding(format!(
                "unsupported bit width {bit_width}"
            )));
        }
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(IoError::InvalidEncoding(format!("bad range [{min}, {max}]")));
        }

        let levels = Self::levels_for(bit_width);
        let lo = min.min(0.0);
        let mut hi = max.max(0.0);
        if hi - lo < f32::EPSILON {
            hi = lo + 1.0;
        }
        let step = (hi - lo) / levels;
        let offset = (lo / step).round();
        let min = offset * step;
        Ok(Self {
            min,
            max: min + levels * step,
            step,
            bit_width,
        })
    }

    /// Derives an encoding from the observed range of `values`.
    pub fn from_values(values: &[f32], bit_width: u8) -> Result<Self, IoError> {
        let (min, max) = values
            .iter()
            .fold((0.0f32, 0.0f32), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        Self::new(min, max, bit_width)
    }

    fn levels_for(bit_width: u8) -> f32 {
        ((1u32 << bit_width) - 1) as f32
    }

    /// Lower end of the encoded range (a multiple of the step).
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Upper end of the encoded range.
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Distance between adjacent levels.
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Bits per value.
    pub fn bit_width(&self) -> u8 {
        self.bit_width
    }

    /// Quantizes values, clamping to the encoded range.
    pub fn encode(&self, values: &[f32]) -> Vec<u16> {
        let top = Self::levels_for(self.bit_width);
        values
            .iter()
            .map(|&v| ((v - self.min) / self.step).round().clamp(0.0, top) as u16)
            .collect()
    }

    /// Maps quantized levels back to floats.
    pub fn decode(&self, levels: &[u16]) -> Vec<f32> {
        levels
            .iter()
            .map(|&q| self.min + f32::from(q) * self.step)
            .collect()
    }
}

/// Passes every input through a user buffer of `bit_width` bits.
///
/// With `static_quantization` the container's embedded encoding is used;
/// otherwise, or when an input carries none, the encoding is derived from
/// the input's own values. Tensors are replaced by their dequantized form,
/// which is what the engine would observe through the buffer.
pub fn quantize_inputs(
    inputs: &mut TensorMap,
    specs: &[LayerSpec],
    bit_width: u8,
    static_quantization: bool,
) -> Result<(), IoError> {
    for spec in specs {
        let Some(tensor) = inputs.get_mut(&spec.name) else {
            continue;
        };
        let encoding = match (static_quantization, spec.encoding) {
            (true, Some(enc)) => TfEncoding::new(enc.min, enc.max, bit_width)?,
            (true, None) => {
                tracing::warn!(
                    "input '{}' has no embedded encoding; deriving one from its values",
                    spec.name
                );
                TfEncoding::from_values(tensor.as_slice(), bit_width)?
            }
            (false, _) => TfEncoding::from_values(tensor.as_slice(), bit_width)?,
        };
        tracing::debug!(
            "input '{}': tf{} encoding [{}, {}] step {}",
            spec.name,
            bit_width,
            encoding.min(),
            encoding.max(),
            encoding.step(),
        );
        let decoded = encoding.decode(&encoding.encode(tensor.as_slice()));
        *tensor = Tensor::from_vec(tensor.shape().clone(), decoded)?;
    }
    Ok(())
}
